//! PNG output through the `image` crate.

use std::path::Path;

use image::codecs::png::PngEncoder as ImagePngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use crate::error::Result;
use crate::render::framebuffer::FrameBuffer;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &FrameBuffer, path: P) -> Result<()> {
        image::save_buffer_with_format(
            path,
            fb.pixels(),
            fb.width(),
            fb.height(),
            ExtendedColorType::Rgba8,
            ImageFormat::Png,
        )?;
        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    pub fn to_bytes(fb: &FrameBuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        ImagePngEncoder::new(&mut buffer).write_image(
            fb.pixels(),
            fb.width(),
            fb.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(buffer)
    }
}

impl FrameBuffer {
    /// Save as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PngEncoder::write_to_file(self, path)
    }
}
