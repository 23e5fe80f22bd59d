//! Nine-patch (9-slice) skins.

use slice9_types::backend::{SdiBackend, TextureId};
use slice9_types::error::{GeometryError, RenderError};
use slice9_types::geometry::{Rect, Size};

use crate::insets::{BorderInsets, FillMode};
use crate::renderer::render_panel;

/// Nine-patch definition for a loaded texture.
///
/// The texture is divided into a 3x3 grid. Corners render at fixed size,
/// edges stretch or tile in one dimension, and the center in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NinePatch {
    pub texture: TextureId,
    pub source: Size,
    pub insets: BorderInsets,
}

impl NinePatch {
    /// Bind insets to an uploaded texture, rejecting insets that don't fit.
    pub fn new(
        texture: TextureId,
        source: Size,
        insets: BorderInsets,
    ) -> Result<Self, GeometryError> {
        insets.validate(source)?;
        Ok(Self {
            texture,
            source,
            insets,
        })
    }

    /// Draw the nine-patch into `dest`.
    pub fn draw(
        &self,
        backend: &mut dyn SdiBackend,
        dest: Rect,
        fill: FillMode,
    ) -> Result<usize, RenderError> {
        render_panel(backend, self.texture, self.source, self.insets, dest, fill)
    }
}
