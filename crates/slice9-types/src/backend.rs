//! Backend trait definitions.
//!
//! Every platform implements these traits. The planner and the panel
//! renderer dispatch all drawing through `SdiBackend` and never call
//! platform-specific APIs.

use crate::color::Color;
use crate::error::{CopyError, Result};
use crate::geometry::Rect;
use crate::input::InputEvent;

/// Opaque handle to a loaded texture in the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Rendering backend trait.
///
/// Two implementations ship with the workspace: SDL2 (desktop/Pi) and a
/// software RGBA framebuffer (headless rendering and screenshots).
pub trait SdiBackend {
    /// Initialize the rendering subsystem.
    fn init(&mut self, width: u32, height: u32) -> Result<()>;

    /// Clear the surface to a solid color.
    fn clear(&mut self, color: Color) -> Result<()>;

    /// Set the logical drawing resolution.
    ///
    /// Backends that scale their output map this resolution onto the
    /// physical surface. The default does nothing.
    fn set_logical_size(&mut self, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }

    /// Upload an RGBA8 image and return a handle to it.
    fn load_texture(&mut self, width: u32, height: u32, rgba_data: &[u8]) -> Result<TextureId>;

    /// Release a texture. Unknown handles are ignored.
    fn destroy_texture(&mut self, tex: TextureId) -> Result<()>;

    /// Copy `src` of `tex` onto `dst` of the surface.
    ///
    /// A 1:1 copy when the rects share a size, a scaled copy otherwise.
    /// Destination pixels outside the surface are clipped. A source rect
    /// that doesn't lie inside the texture is an error.
    fn copy_region(&mut self, tex: TextureId, src: Rect, dst: Rect)
    -> std::result::Result<(), CopyError>;

    /// Present the frame.
    fn swap_buffers(&mut self) -> Result<()>;

    /// Read back RGBA pixels from the surface.
    fn read_pixels(&self, x: i32, y: i32, w: u32, h: u32) -> Result<Vec<u8>>;

    /// Shut down the rendering subsystem.
    fn shutdown(&mut self) -> Result<()>;
}

/// Input backend trait.
///
/// Maps platform-specific input to the platform-agnostic `InputEvent` enum.
pub trait InputBackend {
    /// Drain all pending events.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}
