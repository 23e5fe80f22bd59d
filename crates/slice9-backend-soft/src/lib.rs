//! Software RGBA framebuffer backend for slice9.
//!
//! Implements `SdiBackend` by drawing into a `Vec<u8>` RGBA buffer. Used
//! for headless rendering, screenshots, and pixel-level tests of the panel
//! renderer.

use std::rc::Rc;

use slice9_types::backend::{SdiBackend, TextureId};
use slice9_types::color::Color;
use slice9_types::error::{CopyError, Result, Slice9Error};
use slice9_types::geometry::Rect;

/// Largest width or height the framebuffer accepts.
pub const MAX_SURFACE_SIZE: u32 = 16384;

/// Byte length of a `width`x`height` RGBA buffer.
fn rgba_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| Slice9Error::Backend(format!("{width}x{height} RGBA buffer overflows")))
}

/// Byte length of the framebuffer, rejecting sizes above `MAX_SURFACE_SIZE`.
fn surface_len(width: u32, height: u32) -> Result<usize> {
    if width > MAX_SURFACE_SIZE || height > MAX_SURFACE_SIZE {
        return Err(Slice9Error::Backend(format!(
            "surface {width}x{height} exceeds {MAX_SURFACE_SIZE}x{MAX_SURFACE_SIZE}"
        )));
    }
    rgba_len(width, height)
}

/// A stored texture for later copies.
struct Texture {
    width: u32,
    height: u32,
    data: Rc<Vec<u8>>,
}

/// Software RGBA framebuffer renderer.
///
/// All rendering operations write directly to an RGBA pixel buffer. A
/// dirty flag tracks whether the buffer has changed since the last read.
pub struct SoftBackend {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    dirty: bool,
    textures: Vec<Option<Texture>>,
}

impl SoftBackend {
    /// Create a new backend with the given resolution.
    ///
    /// Either side above `MAX_SURFACE_SIZE` is rejected.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            width,
            height,
            buffer: vec![0; surface_len(width, height)?],
            dirty: true,
            textures: Vec::new(),
        })
    }

    /// Get a read-only reference to the RGBA pixel buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Whether the buffer has been modified since the last `clear_dirty()`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Buffer dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Read a single pixel, `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.buffer[offset..offset + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Set a single pixel. Out-of-bounds writes are dropped.
    fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let offset = ((y as usize * self.width as usize) + x as usize) * 4;
        // Alpha blending (source over).
        if color.a == 255 {
            self.buffer[offset] = color.r;
            self.buffer[offset + 1] = color.g;
            self.buffer[offset + 2] = color.b;
            self.buffer[offset + 3] = 255;
        } else if color.a > 0 {
            let sa = color.a as u16;
            let da = 255 - sa;
            self.buffer[offset] =
                ((color.r as u16 * sa + self.buffer[offset] as u16 * da + 127) / 255) as u8;
            self.buffer[offset + 1] =
                ((color.g as u16 * sa + self.buffer[offset + 1] as u16 * da + 127) / 255) as u8;
            self.buffer[offset + 2] =
                ((color.b as u16 * sa + self.buffer[offset + 2] as u16 * da + 127) / 255) as u8;
            self.buffer[offset + 3] = 255;
        }
    }

    /// Get texture data via `Rc::clone` (O(1) refcount bump, no data copy).
    fn get_texture_data(
        &self,
        tex: TextureId,
    ) -> std::result::Result<(u32, u32, Rc<Vec<u8>>), CopyError> {
        let texture = usize::try_from(tex.0)
            .ok()
            .and_then(|idx| self.textures.get(idx))
            .and_then(|t| t.as_ref())
            .ok_or_else(|| CopyError(format!("invalid texture id: {}", tex.0)))?;
        Ok((texture.width, texture.height, Rc::clone(&texture.data)))
    }
}

impl SdiBackend for SoftBackend {
    /// Reallocate the buffer. An oversized request leaves the old one intact.
    fn init(&mut self, width: u32, height: u32) -> Result<()> {
        let len = surface_len(width, height)?;
        self.width = width;
        self.height = height;
        self.buffer = vec![0; len];
        self.dirty = true;
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel[0] = color.r;
            pixel[1] = color.g;
            pixel[2] = color.b;
            pixel[3] = color.a;
        }
        self.dirty = true;
        Ok(())
    }

    /// The framebuffer is the logical surface: a new size reallocates it.
    fn set_logical_size(&mut self, width: u32, height: u32) -> Result<()> {
        if (width, height) != (self.width, self.height) {
            log::debug!("Software framebuffer resized to {width}x{height}");
            self.init(width, height)?;
        }
        Ok(())
    }

    fn load_texture(&mut self, width: u32, height: u32, rgba_data: &[u8]) -> Result<TextureId> {
        let expected = rgba_len(width, height)?;
        if rgba_data.len() != expected {
            return Err(Slice9Error::Backend(format!(
                "texture data size mismatch: expected {expected}, got {}",
                rgba_data.len()
            )));
        }

        let texture = Texture {
            width,
            height,
            data: Rc::new(rgba_data.to_vec()),
        };

        for (i, slot) in self.textures.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(texture);
                return Ok(TextureId(i as u64));
            }
        }
        let id = self.textures.len();
        self.textures.push(Some(texture));
        Ok(TextureId(id as u64))
    }

    fn destroy_texture(&mut self, tex: TextureId) -> Result<()> {
        if let Some(slot) = usize::try_from(tex.0)
            .ok()
            .and_then(|idx| self.textures.get_mut(idx))
        {
            *slot = None;
        }
        Ok(())
    }

    fn copy_region(
        &mut self,
        tex: TextureId,
        src: Rect,
        dst: Rect,
    ) -> std::result::Result<(), CopyError> {
        let (tex_w, tex_h, tex_data) = self.get_texture_data(tex)?;
        if src.x < 0
            || src.y < 0
            || src.w < 0
            || src.h < 0
            || src.right() as i64 > tex_w as i64
            || src.bottom() as i64 > tex_h as i64
        {
            return Err(CopyError(format!(
                "source rect {src:?} outside {tex_w}x{tex_h} texture"
            )));
        }
        if dst.is_empty() {
            return Ok(());
        }
        if src.is_empty() {
            return Err(CopyError(format!("empty source rect {src:?}")));
        }

        // Nearest-neighbour mapping; identical sizes give a 1:1 copy.
        let (sw, sh) = (src.w as i64, src.h as i64);
        let (dw, dh) = (dst.w as i64, dst.h as i64);
        for dy in 0..dh {
            let sy = src.y as i64 + dy * sh / dh;
            for dx in 0..dw {
                let sx = src.x as i64 + dx * sw / dw;
                let src_offset = ((sy * tex_w as i64 + sx) * 4) as usize;
                let color = Color::rgba(
                    tex_data[src_offset],
                    tex_data[src_offset + 1],
                    tex_data[src_offset + 2],
                    tex_data[src_offset + 3],
                );
                self.set_pixel(dst.x as i64 + dx, dst.y as i64 + dy, color);
            }
        }
        self.dirty = true;
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_pixels(&self, x: i32, y: i32, w: u32, h: u32) -> Result<Vec<u8>> {
        let mut out = vec![0u8; surface_len(w, h)?];
        for row in 0..h {
            let sy = y as i64 + row as i64;
            if sy < 0 || sy >= self.height as i64 {
                continue;
            }
            for col in 0..w {
                let sx = x as i64 + col as i64;
                if sx < 0 || sx >= self.width as i64 {
                    continue;
                }
                let src_idx = (sy as usize * self.width as usize + sx as usize) * 4;
                let dst_idx = (row as usize * w as usize + col as usize) * 4;
                out[dst_idx..dst_idx + 4].copy_from_slice(&self.buffer[src_idx..src_idx + 4]);
            }
        }
        Ok(out)
    }

    fn shutdown(&mut self) -> Result<()> {
        self.buffer.clear();
        self.textures.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    /// 2x1 texture: red then blue.
    fn red_blue(backend: &mut SoftBackend) -> TextureId {
        let data: Vec<u8> = [RED, BLUE].concat();
        backend.load_texture(2, 1, &data).unwrap()
    }

    #[test]
    fn new_creates_buffer() {
        let backend = SoftBackend::new(480, 272).unwrap();
        assert_eq!(backend.buffer().len(), 480 * 272 * 4);
        assert_eq!(backend.dimensions(), (480, 272));
    }

    #[test]
    fn clear_fills_buffer() {
        let mut backend = SoftBackend::new(4, 4).unwrap();
        backend.clear(Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(backend.pixel(0, 0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(backend.pixel(3, 3), Some(Color::rgb(255, 0, 0)));
        assert_eq!(backend.pixel(4, 0), None);
    }

    #[test]
    fn copy_one_to_one() {
        let mut backend = SoftBackend::new(4, 2).unwrap();
        let tex = red_blue(&mut backend);
        backend
            .copy_region(tex, Rect::new(0, 0, 2, 1), Rect::new(1, 1, 2, 1))
            .unwrap();
        assert_eq!(backend.pixel(0, 1), Some(Color::TRANSPARENT));
        assert_eq!(backend.pixel(1, 1), Some(Color::rgb(255, 0, 0)));
        assert_eq!(backend.pixel(2, 1), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn copy_scales_nearest() {
        let mut backend = SoftBackend::new(4, 1).unwrap();
        let tex = red_blue(&mut backend);
        backend
            .copy_region(tex, Rect::new(0, 0, 2, 1), Rect::new(0, 0, 4, 1))
            .unwrap();
        let row: Vec<_> = (0..4).map(|x| backend.pixel(x, 0).unwrap()).collect();
        assert_eq!(
            row,
            vec![
                Color::rgb(255, 0, 0),
                Color::rgb(255, 0, 0),
                Color::rgb(0, 0, 255),
                Color::rgb(0, 0, 255),
            ]
        );
    }

    #[test]
    fn copy_sub_region() {
        let mut backend = SoftBackend::new(3, 1).unwrap();
        let tex = red_blue(&mut backend);
        backend
            .copy_region(tex, Rect::new(1, 0, 1, 1), Rect::new(0, 0, 3, 1))
            .unwrap();
        assert!((0..3).all(|x| backend.pixel(x, 0) == Some(Color::rgb(0, 0, 255))));
    }

    #[test]
    fn copy_clips_to_surface() {
        let mut backend = SoftBackend::new(2, 2).unwrap();
        let tex = red_blue(&mut backend);
        backend
            .copy_region(tex, Rect::new(0, 0, 2, 1), Rect::new(-1, 1, 4, 2))
            .unwrap();
        assert_eq!(backend.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(backend.pixel(0, 1), Some(Color::rgb(255, 0, 0)));
        assert_eq!(backend.pixel(1, 1), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn copy_outside_texture_fails() {
        let mut backend = SoftBackend::new(4, 4).unwrap();
        let tex = red_blue(&mut backend);
        assert!(
            backend
                .copy_region(tex, Rect::new(1, 0, 2, 1), Rect::new(0, 0, 2, 1))
                .is_err()
        );
        assert!(
            backend
                .copy_region(tex, Rect::new(-1, 0, 1, 1), Rect::new(0, 0, 1, 1))
                .is_err()
        );
    }

    #[test]
    fn empty_destination_is_a_no_op() {
        let mut backend = SoftBackend::new(4, 4).unwrap();
        let tex = red_blue(&mut backend);
        backend.clear_dirty();
        backend
            .copy_region(tex, Rect::new(0, 0, 0, 0), Rect::new(0, 0, 0, 5))
            .unwrap();
        assert!(!backend.is_dirty());
    }

    #[test]
    fn empty_source_with_area_fails() {
        let mut backend = SoftBackend::new(4, 4).unwrap();
        let tex = red_blue(&mut backend);
        assert!(
            backend
                .copy_region(tex, Rect::new(0, 0, 0, 1), Rect::new(0, 0, 2, 2))
                .is_err()
        );
    }

    #[test]
    fn translucent_pixels_blend() {
        let mut backend = SoftBackend::new(1, 1).unwrap();
        backend.clear(Color::BLACK).unwrap();
        let tex = backend.load_texture(1, 1, &[255, 255, 255, 128]).unwrap();
        backend
            .copy_region(tex, Rect::new(0, 0, 1, 1), Rect::new(0, 0, 1, 1))
            .unwrap();
        let p = backend.pixel(0, 0).unwrap();
        assert_eq!((p.r, p.a), (128, 255));
    }

    #[test]
    fn destroy_texture_invalidates() {
        let mut backend = SoftBackend::new(10, 10).unwrap();
        let tex = backend.load_texture(2, 2, &[0u8; 16]).unwrap();
        backend.destroy_texture(tex).unwrap();
        let err = backend
            .copy_region(tex, Rect::new(0, 0, 2, 2), Rect::new(0, 0, 2, 2))
            .unwrap_err();
        assert!(err.0.contains("invalid texture id"));
    }

    #[test]
    fn texture_slot_reuse() {
        let mut backend = SoftBackend::new(4, 4).unwrap();
        let a = backend.load_texture(1, 1, &[0; 4]).unwrap();
        let b = backend.load_texture(1, 1, &[0; 4]).unwrap();
        backend.destroy_texture(a).unwrap();
        let c = backend.load_texture(1, 1, &[0; 4]).unwrap();
        assert_eq!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn texture_data_size_mismatch() {
        let mut backend = SoftBackend::new(10, 10).unwrap();
        assert!(backend.load_texture(2, 2, &[0; 8]).is_err());
    }

    #[test]
    fn logical_size_reallocates() {
        let mut backend = SoftBackend::new(4, 4).unwrap();
        backend.set_logical_size(8, 2).unwrap();
        assert_eq!(backend.dimensions(), (8, 2));
        assert_eq!(backend.buffer().len(), 8 * 2 * 4);
    }

    #[test]
    fn read_pixels_window() {
        let mut backend = SoftBackend::new(4, 4).unwrap();
        backend.clear(Color::rgb(9, 9, 9)).unwrap();
        let px = backend.read_pixels(3, 3, 2, 1).unwrap();
        assert_eq!(px, vec![9, 9, 9, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn oversized_surface_is_rejected() {
        assert!(SoftBackend::new(40000, 40000).is_err());
        assert!(SoftBackend::new(u32::MAX, u32::MAX).is_err());
        assert!(SoftBackend::new(MAX_SURFACE_SIZE, 1).is_ok());
    }

    #[test]
    fn oversized_resize_keeps_buffer() {
        let mut backend = SoftBackend::new(4, 4).unwrap();
        let err = backend.set_logical_size(40000, 40000).unwrap_err();
        assert!(matches!(err, Slice9Error::Backend(_)));
        assert_eq!(backend.dimensions(), (4, 4));
        assert_eq!(backend.buffer().len(), 4 * 4 * 4);
    }

    #[test]
    fn oversized_read_is_rejected() {
        let backend = SoftBackend::new(4, 4).unwrap();
        assert!(backend.read_pixels(0, 0, u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn shutdown_clears_state() {
        let mut backend = SoftBackend::new(4, 4).unwrap();
        let tex = backend.load_texture(1, 1, &[0; 4]).unwrap();
        backend.shutdown().unwrap();
        assert!(backend.buffer().is_empty());
        assert!(
            backend
                .copy_region(tex, Rect::new(0, 0, 1, 1), Rect::new(0, 0, 1, 1))
                .is_err()
        );
    }
}
