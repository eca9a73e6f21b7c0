pub mod encoder;
pub mod error;
pub mod export;
pub mod field;
pub mod frame;
pub mod orchestrator;
pub mod palette;

pub use encoder::{pack, PixelEncoder, BLACK_WORD};
pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use field::FieldBuffer;
pub use frame::{FrameBuffer, MARKER_RED};
pub use orchestrator::{FrameOrchestrator, FrameReport, FrameSink};
pub use palette::{Palette, PaletteTable, Yuv, LUT_SIZE};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
