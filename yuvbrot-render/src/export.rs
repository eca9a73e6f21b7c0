//! PNG snapshot of a presented frame with embedded view metadata (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use crate::frame::FrameBuffer;

/// View parameters recorded alongside an exported frame.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub center_re: f64,
    pub center_im: f64,
    pub magnification: f64,
    pub iteration_limit: u32,
    pub palette_name: String,
}

/// Write `frame` as an RGBA PNG with `metadata` in tEXt chunks.
pub fn export_png(frame: &FrameBuffer, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let width = frame.width() as u32;
    let height = frame.height() as u32;

    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "YuvBrot".to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(metadata, width, height) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&frame.to_rgba())?;
    png_writer.finish()?;

    debug!("Exported PNG {}x{} to {}", width, height, path.display());
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    format!(
        "Mandelbrot - Center: {:.8} {:+.8}i, Zoom: {:.4e}, Iterations: {}",
        meta.center_re, meta.center_im, meta.magnification, meta.iteration_limit,
    )
}

fn build_metadata_pairs(meta: &ExportMetadata, width: u32, height: u32) -> Vec<(String, String)> {
    vec![
        ("YuvBrot.CenterRe".into(), format!("{}", meta.center_re)),
        ("YuvBrot.CenterIm".into(), format!("{}", meta.center_im)),
        ("YuvBrot.Zoom".into(), format!("{:e}", meta.magnification)),
        ("YuvBrot.IterationLimit".into(), meta.iteration_limit.to_string()),
        ("YuvBrot.Palette".into(), meta.palette_name.clone()),
        ("YuvBrot.Resolution".into(), format!("{width}x{height}")),
    ]
}
