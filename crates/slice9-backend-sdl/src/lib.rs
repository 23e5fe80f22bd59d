//! SDL2 backend for slice9.
//!
//! Implements `SdiBackend` and `InputBackend` using SDL2. The window is
//! resizable; the drawing resolution follows the logical size set by the
//! scene, and SDL scales it onto the window.

use std::collections::HashMap;

use sdl2::EventPump;
use sdl2::event::{Event, WindowEvent};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

use slice9_types::backend::{InputBackend, SdiBackend, TextureId};
use slice9_types::color::Color;
use slice9_types::error::{CopyError, Result, Slice9Error};
use slice9_types::geometry::Rect;
use slice9_types::input::InputEvent;

/// SDL2 rendering and input backend.
///
/// # Safety
///
/// `textures` is declared before `texture_creator` so that Rust's drop order
/// (declaration order) destroys all textures before the creator they borrow from.
/// The `Texture<'static>` lifetime is erased via transmute in `load_texture()`.
/// This is sound because the `TextureCreator` always outlives the textures.
pub struct SdlBackend {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    textures: HashMap<u64, Texture<'static>>,
    texture_creator: TextureCreator<WindowContext>,
    next_texture_id: u64,
}

impl SdlBackend {
    /// Create a new SDL2 backend with a resizable window.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let sdl = sdl2::init().map_err(|e| Slice9Error::Backend(e.to_string()))?;
        let video = sdl
            .video()
            .map_err(|e| Slice9Error::Backend(e.to_string()))?;
        let window = video
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| Slice9Error::Backend(e.to_string()))?;
        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| Slice9Error::Backend(e.to_string()))?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl
            .event_pump()
            .map_err(|e| Slice9Error::Backend(e.to_string()))?;

        log::info!("SDL2 backend initialized: {width}x{height}");

        Ok(Self {
            canvas,
            event_pump,
            textures: HashMap::new(),
            texture_creator,
            next_texture_id: 1,
        })
    }
}

/// Convert to an SDL rect. Empty rects have no SDL equivalent.
fn to_sdl_rect(r: Rect) -> Option<sdl2::rect::Rect> {
    if r.is_empty() {
        return None;
    }
    Some(sdl2::rect::Rect::new(r.x, r.y, r.w as u32, r.h as u32))
}

/// Whether `src` lies entirely inside a `width`x`height` texture.
fn source_in_bounds(src: Rect, width: u32, height: u32) -> bool {
    src.x >= 0
        && src.y >= 0
        && src.w >= 0
        && src.h >= 0
        && src.right() as i64 <= width as i64
        && src.bottom() as i64 <= height as i64
}

impl SdiBackend for SdlBackend {
    fn init(&mut self, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.canvas.set_draw_color(sdl2::pixels::Color::RGBA(
            color.r, color.g, color.b, color.a,
        ));
        self.canvas.clear();
        Ok(())
    }

    fn set_logical_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.canvas
            .set_logical_size(width, height)
            .map_err(|e| Slice9Error::Backend(e.to_string()))
    }

    fn load_texture(&mut self, width: u32, height: u32, rgba_data: &[u8]) -> Result<TextureId> {
        let row = width as usize * 4;
        let expected = row * height as usize;
        if rgba_data.len() != expected {
            return Err(Slice9Error::Backend(format!(
                "texture data size mismatch: expected {expected}, got {}",
                rgba_data.len()
            )));
        }

        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| Slice9Error::Backend(e.to_string()))?;

        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                for (y, src_row) in rgba_data.chunks_exact(row).enumerate() {
                    let start = y * pitch;
                    buffer[start..start + row].copy_from_slice(src_row);
                }
            })
            .map_err(Slice9Error::Backend)?;

        texture.set_blend_mode(sdl2::render::BlendMode::Blend);

        // SAFETY: The texture borrows from self.texture_creator which lives in the
        // same struct. `textures` is declared before `texture_creator`, so Rust drops
        // textures first. The erased lifetime is therefore always valid.
        let texture: Texture<'static> = unsafe { std::mem::transmute(texture) };

        let id = self.next_texture_id;
        self.next_texture_id += 1;
        self.textures.insert(id, texture);
        log::debug!("Loaded texture {id} ({width}x{height})");
        Ok(TextureId(id))
    }

    fn destroy_texture(&mut self, tex: TextureId) -> Result<()> {
        self.textures.remove(&tex.0);
        Ok(())
    }

    fn copy_region(
        &mut self,
        tex: TextureId,
        src: Rect,
        dst: Rect,
    ) -> std::result::Result<(), CopyError> {
        let texture = self
            .textures
            .get(&tex.0)
            .ok_or_else(|| CopyError(format!("texture not found: {}", tex.0)))?;
        let query = texture.query();
        if !source_in_bounds(src, query.width, query.height) {
            return Err(CopyError(format!(
                "source rect {src:?} outside {}x{} texture",
                query.width, query.height
            )));
        }
        let Some(dst_rect) = to_sdl_rect(dst) else {
            return Ok(());
        };
        let src_rect =
            to_sdl_rect(src).ok_or_else(|| CopyError(format!("empty source rect {src:?}")))?;
        self.canvas.copy(texture, src_rect, dst_rect).map_err(CopyError)
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.canvas.present();
        Ok(())
    }

    fn read_pixels(&self, x: i32, y: i32, w: u32, h: u32) -> Result<Vec<u8>> {
        let rect = sdl2::rect::Rect::new(x, y, w, h);
        self.canvas
            .read_pixels(rect, PixelFormatEnum::ABGR8888)
            .map_err(|e| Slice9Error::Backend(e.to_string()))
    }

    fn shutdown(&mut self) -> Result<()> {
        self.textures.clear();
        log::info!("SDL2 backend shut down");
        Ok(())
    }
}

impl InputBackend for SdlBackend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            if let Some(e) = map_sdl_event(event) {
                events.push(e);
            }
        }
        events
    }
}

/// Map an SDL2 event to a slice9 input event.
fn map_sdl_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown { .. } => Some(InputEvent::KeyPress),
        Event::Window {
            win_event: WindowEvent::SizeChanged(w, h),
            ..
        } => Some(InputEvent::Resized {
            width: w.max(0) as u32,
            height: h.max(0) as u32,
        }),
        _ => None,
    }
}
