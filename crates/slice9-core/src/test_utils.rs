//! Shared test utilities for slice9-core tests.
//!
//! Provides a [`MockBackend`] that records all backend calls for assertion.

use slice9_types::backend::{SdiBackend, TextureId};
use slice9_types::color::Color;
use slice9_types::error::{CopyError, Result, Slice9Error};
use slice9_types::geometry::Rect;

/// A recorded call on the mock backend.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    LogicalSize(u32, u32),
    Copy { tex: TextureId, src: Rect, dst: Rect },
    Present,
}

/// A mock backend that records all calls for test assertions.
///
/// `fail_at` makes the copy with that zero-based index fail;
/// `fail_logical_size` makes `set_logical_size` fail.
#[derive(Default)]
pub struct MockBackend {
    pub calls: Vec<DrawCall>,
    pub fail_at: Option<usize>,
    pub fail_logical_size: bool,
    copies: usize,
    textures: Vec<TextureId>,
    next_texture: u64,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::new()
        }
    }

    /// Destination rects of all successful copies, in call order.
    pub fn copy_dsts(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Copy { dst, .. } => Some(*dst),
                _ => None,
            })
            .collect()
    }

    pub fn copy_count(&self) -> usize {
        self.copy_dsts().len()
    }

    /// Textures loaded and not yet destroyed.
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn present_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Present))
            .count()
    }
}

impl SdiBackend for MockBackend {
    fn init(&mut self, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.calls.push(DrawCall::Clear(color));
        Ok(())
    }

    fn set_logical_size(&mut self, width: u32, height: u32) -> Result<()> {
        if self.fail_logical_size {
            return Err(Slice9Error::Backend("display lost".into()));
        }
        self.calls.push(DrawCall::LogicalSize(width, height));
        Ok(())
    }

    fn load_texture(&mut self, _width: u32, _height: u32, _rgba_data: &[u8]) -> Result<TextureId> {
        self.next_texture += 1;
        let tex = TextureId(self.next_texture);
        self.textures.push(tex);
        Ok(tex)
    }

    fn destroy_texture(&mut self, tex: TextureId) -> Result<()> {
        self.textures.retain(|&t| t != tex);
        Ok(())
    }

    fn copy_region(
        &mut self,
        tex: TextureId,
        src: Rect,
        dst: Rect,
    ) -> std::result::Result<(), CopyError> {
        let index = self.copies;
        self.copies += 1;
        if self.fail_at == Some(index) {
            return Err(CopyError("surface lost".into()));
        }
        self.calls.push(DrawCall::Copy { tex, src, dst });
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }

    fn read_pixels(&self, _x: i32, _y: i32, w: u32, h: u32) -> Result<Vec<u8>> {
        Ok(vec![0; (w * h * 4) as usize])
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
