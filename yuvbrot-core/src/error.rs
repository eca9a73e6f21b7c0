use thiserror::Error;

/// Errors originating from the core engine.
///
/// Every navigation and iteration operation is total; only construction of
/// the per-resolution buffers can fail.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid resolution: {reason}")]
    InvalidResolution { reason: String },

    #[error("failed to allocate {what} ({bytes} bytes)")]
    Allocation { what: &'static str, bytes: usize },
}
