use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] yuvbrot_core::CoreError),
}
