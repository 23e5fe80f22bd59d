//! Skin image decoding.
//!
//! Skins are PNG files. Every PNG color type and bit depth is normalized to
//! 8-bit RGBA, the format `SdiBackend::load_texture` expects.

use std::io::Cursor;
use std::path::Path;

use slice9_types::backend::{SdiBackend, TextureId};
use slice9_types::error::{Result, Slice9Error};
use slice9_types::geometry::Size;

/// A decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SourceImage {
    /// Wrap raw RGBA8 pixels, checking the buffer length.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Slice9Error::Image(format!(
                "pixel data size mismatch: expected {expected}, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Decode a PNG file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let image = Self::from_png_bytes(&bytes)
            .map_err(|e| Slice9Error::Image(format!("{}: {e}", path.display())))?;
        log::info!(
            "Loaded image {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );
        Ok(image)
    }

    /// Decode PNG bytes.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info().map_err(image_err)?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).map_err(image_err)?;
        buf.truncate(info.buffer_size());

        let rgba = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => buf
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            png::ColorType::Indexed => {
                return Err(Slice9Error::Image(
                    "indexed PNG was not expanded".to_string(),
                ));
            }
        };
        Self::from_rgba(info.width, info.height, rgba)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Upload the pixels to a backend.
    pub fn upload(&self, backend: &mut dyn SdiBackend) -> Result<TextureId> {
        backend.load_texture(self.width, self.height, &self.rgba)
    }
}

fn image_err(e: png::DecodingError) -> Slice9Error {
    Slice9Error::Image(e.to_string())
}
