//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate. Rows are written without
//! the framebuffer's stride padding.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        Self::encode(fb, BufWriter::new(file))?;
        debug!("wrote {}x{} PNG to {}", fb.width(), fb.height(), path.as_ref().display());
        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    fn encode<W: Write>(fb: &Framebuffer, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&fb.to_compact_pixels())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_png_to_bytes() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::RED);

        let bytes = PngEncoder::to_bytes(&fb).unwrap();
        // PNG magic bytes
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_png_write_to_file() {
        // Odd width exercises stride padding
        let mut fb = Framebuffer::new(13, 7).unwrap();
        fb.clear(Rgba::BLUE);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        PngEncoder::write_to_file(&fb, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, PngEncoder::to_bytes(&fb).unwrap());
    }
}
