//! Binary PPM (P6) encoding and decoding.
//!
//! The header is written exactly as `P6\n{width} {height}\n255\n`, followed by one
//! RGB triple per pixel, row-major from the top. Alpha is dropped on encode and
//! restored as opaque on decode.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::render::framebuffer::{buffer_len, FrameBuffer};

const MAGIC: &[u8] = b"P6";
const MAXVAL: u32 = 255;

/// PPM encoder/decoder for framebuffers.
pub struct PpmEncoder;

impl PpmEncoder {
    /// Encode a framebuffer to PPM bytes.
    pub fn to_bytes(fb: &FrameBuffer) -> Vec<u8> {
        let header = format!("P6\n{} {}\n{}\n", fb.width(), fb.height(), MAXVAL);
        let mut out = Vec::with_capacity(header.len() + fb.pixels().len() / 4 * 3);
        out.extend_from_slice(header.as_bytes());
        for px in fb.pixels().chunks_exact(4) {
            out.extend_from_slice(&px[..3]);
        }
        out
    }

    /// Write PPM bytes to any writer.
    pub fn write<W: Write>(fb: &FrameBuffer, mut writer: W) -> Result<()> {
        writer.write_all(&Self::to_bytes(fb))?;
        writer.flush()?;
        Ok(())
    }

    /// Write a framebuffer to a PPM file.
    pub fn write_to_file<P: AsRef<Path>>(fb: &FrameBuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::write(fb, BufWriter::new(file))
    }

    /// Decode a P6 image with maxval 255. `#` comments are allowed in the header.
    pub fn from_bytes(bytes: &[u8]) -> Result<FrameBuffer> {
        let mut header = HeaderReader { bytes, pos: 0 };

        if !bytes.starts_with(MAGIC) {
            return Err(Error::PpmDecode("missing P6 magic number".into()));
        }
        header.pos = MAGIC.len();

        let width = header.next_number("width")?;
        let height = header.next_number("height")?;
        let maxval = header.next_number("maxval")?;
        if maxval != MAXVAL {
            return Err(Error::PpmDecode(format!(
                "unsupported maxval {maxval}, expected {MAXVAL}"
            )));
        }
        // Exactly one whitespace byte separates the header from the raster.
        match bytes.get(header.pos) {
            Some(b) if b.is_ascii_whitespace() => header.pos += 1,
            _ => return Err(Error::PpmDecode("missing whitespace after header".into())),
        }

        let expected = buffer_len(width, height, 3).ok_or_else(|| {
            Error::PpmDecode(format!("image {width}x{height} is too large"))
        })?;
        let raster = &bytes[header.pos..];
        if raster.len() < expected {
            return Err(Error::PpmDecode(format!(
                "raster truncated: {} of {expected} bytes",
                raster.len()
            )));
        }

        let mut rgba = Vec::with_capacity(expected / 3 * 4);
        for rgb in raster[..expected].chunks_exact(3) {
            rgba.extend_from_slice(rgb);
            rgba.push(u8::MAX);
        }
        FrameBuffer::from_rgba8(width, height, rgba)
    }

    /// Read and decode from any reader.
    pub fn read<R: Read>(mut reader: R) -> Result<FrameBuffer> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Read and decode a PPM file.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<FrameBuffer> {
        Self::read(File::open(path)?)
    }
}

struct HeaderReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl HeaderReader<'_> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.bytes.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_number(&mut self, field: &str) -> Result<u32> {
        let before = self.pos;
        self.skip_whitespace_and_comments();
        if self.pos == before {
            return Err(Error::PpmDecode(format!("expected whitespace before {field}")));
        }
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| Error::PpmDecode(format!("invalid {field}")))
    }
}

// Convenience methods on FrameBuffer, delegating to the encoder.
impl FrameBuffer {
    /// Encode as binary PPM.
    pub fn to_ppm(&self) -> Vec<u8> {
        PpmEncoder::to_bytes(self)
    }

    pub fn write_ppm<W: Write>(&self, writer: W) -> Result<()> {
        PpmEncoder::write(self, writer)
    }

    pub fn save_ppm<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PpmEncoder::write_to_file(self, path)
    }

    /// Decode a binary PPM into an opaque framebuffer.
    pub fn from_ppm<R: Read>(reader: R) -> Result<FrameBuffer> {
        PpmEncoder::read(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn header_is_exact() {
        let fb = FrameBuffer::with_background(3, 2, Color::RED).unwrap();
        let bytes = fb.to_ppm();
        assert!(bytes.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(bytes.len(), b"P6\n3 2\n255\n".len() + 3 * 2 * 3);
        assert_eq!(&bytes[bytes.len() - 3..], &[255, 0, 0]);
    }

    #[test]
    fn round_trip_preserves_opaque_pixels() {
        let mut fb = FrameBuffer::new(4, 3).unwrap();
        fb.set_pixel(0, 0, Color::rgb(0.2, 0.4, 0.6)).unwrap();
        fb.set_pixel(3, 2, Color::YELLOW).unwrap();

        let decoded = FrameBuffer::from_ppm(fb.to_ppm().as_slice()).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 3);
        assert_eq!(decoded.pixels(), fb.pixels());
    }

    #[test]
    fn comments_in_header_are_skipped() {
        let mut bytes = b"P6\n# made by hand\n1 1\n# max\n255\n".to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        let fb = PpmEncoder::from_bytes(&bytes).unwrap();
        assert_eq!(fb.pixels(), &[1, 2, 3, 255]);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(PpmEncoder::from_bytes(b"P3\n1 1\n255\n"), Err(Error::PpmDecode(_))));
        assert!(matches!(PpmEncoder::from_bytes(b"P6\n1 1\n65535\n\0\0\0\0\0\0"), Err(Error::PpmDecode(_))));
        assert!(matches!(PpmEncoder::from_bytes(b"P6\n2 2\n255\n\0\0\0"), Err(Error::PpmDecode(_))));
        assert!(PpmEncoder::from_bytes(b"P6\n0 2\n255\n").is_err());
    }

    #[test]
    fn oversized_header_is_rejected_without_panicking() {
        let result = PpmEncoder::from_bytes(b"P6\n4294967295 4294967295\n255\n\0\0\0");
        assert!(matches!(result, Err(Error::PpmDecode(_))));
    }
}
