pub mod command;
pub mod complex;
pub mod coords;
pub mod error;
pub mod iteration;
pub mod memory;
pub mod resolution;
pub mod view;

// Re-export primary types for convenience.
pub use command::{CommandSet, LimitChange};
pub use complex::Complex;
pub use coords::CoordinateCache;
pub use error::CoreError;
pub use iteration::{IterationEngine, MAX_ITERATION_LIMIT, MIN_ITERATION_LIMIT};
pub use resolution::{Resolution, OVERLAY_MARGIN};
pub use view::{
    ViewState, INITIAL_ITERATION_LIMIT, INITIAL_PALETTE, INITIAL_ZOOM, MIN_ZOOM, PALETTE_COUNT,
    ZOOM_CONTRACTION,
};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
