//! Side-by-side panel scene.
//!
//! Shows one skin twice across the viewport: stretched on the left half and
//! tiled on the right half. The scene redraws only after a size change so
//! that an idle window costs nothing per frame.

use slice9_types::backend::SdiBackend;
use slice9_types::color::Color;
use slice9_types::error::{RenderError, Slice9Error};
use slice9_types::geometry::Rect;

use crate::config::AppConfig;
use crate::image::SourceImage;
use crate::insets::FillMode;
use crate::nine_patch::NinePatch;

/// A viewport showing the stretch and repeat renditions of one skin.
pub struct PanelScene {
    patch: NinePatch,
    background: Color,
    width: u32,
    height: u32,
    dirty: bool,
}

impl PanelScene {
    pub fn new(patch: NinePatch, width: u32, height: u32) -> Self {
        Self {
            patch,
            background: Color::BLACK,
            width,
            height,
            dirty: true,
        }
    }

    /// Load the configured skin, upload it, and size the scene to the
    /// configured window.
    ///
    /// Everything that can be rejected is checked before the upload, so a
    /// failed call leaves no texture behind.
    pub fn from_config(
        config: &AppConfig,
        backend: &mut dyn SdiBackend,
    ) -> Result<Self, Slice9Error> {
        let background = config.background_color()?;
        let insets = config.skin.insets();
        let image = SourceImage::load(&config.skin.image)?;
        insets.validate(image.size())?;

        let texture = image.upload(backend)?;
        let patch = NinePatch {
            texture,
            source: image.size(),
            insets,
        };
        Ok(Self::new(patch, config.window.width, config.window.height).with_background(background))
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a redraw on the next `render`.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Track a viewport size change. Same-size notifications are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            log::debug!("Viewport resized to {width}x{height}");
            self.width = width;
            self.height = height;
            self.dirty = true;
        }
    }

    /// Panel placement: stretch on the left half, repeat on the right.
    pub fn layout(&self) -> [(Rect, FillMode); 2] {
        let half = i32::try_from(self.width / 2).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        [
            (Rect::new(0, 0, half, height), FillMode::Stretch),
            (Rect::new(half, 0, half, height), FillMode::Repeat),
        ]
    }

    /// Redraw if dirty. Returns whether a frame was presented.
    ///
    /// On failure the scene stays dirty, so the next call retries.
    pub fn render(&mut self, backend: &mut dyn SdiBackend) -> Result<bool, RenderError> {
        if !self.dirty {
            return Ok(false);
        }
        let backend_err = |e: Slice9Error| RenderError::Backend(Box::new(e));

        backend
            .set_logical_size(self.width, self.height)
            .map_err(backend_err)?;
        backend.clear(self.background).map_err(backend_err)?;
        let mut copies = 0;
        for (dest, fill) in self.layout() {
            copies += self.patch.draw(backend, dest, fill)?;
        }
        backend.swap_buffers().map_err(backend_err)?;

        log::debug!(
            "Rendered {}x{} scene with {copies} copies",
            self.width,
            self.height
        );
        self.dirty = false;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insets::BorderInsets;
    use crate::test_utils::{DrawCall, MockBackend};
    use slice9_types::backend::TextureId;
    use slice9_types::geometry::Size;

    fn scene(width: u32, height: u32) -> PanelScene {
        let patch = NinePatch::new(
            TextureId(1),
            Size::new(64, 64),
            BorderInsets::new(24, 5, 17, 17),
        )
        .unwrap();
        PanelScene::new(patch, width, height)
    }

    #[test]
    fn layout_splits_viewport() {
        let [(left, lf), (right, rf)] = scene(640, 320).layout();
        assert_eq!(left, Rect::new(0, 0, 320, 320));
        assert_eq!(lf, FillMode::Stretch);
        assert_eq!(right, Rect::new(320, 0, 320, 320));
        assert_eq!(rf, FillMode::Repeat);
    }

    #[test]
    fn odd_width_drops_last_column() {
        let [(left, _), (right, _)] = scene(641, 100).layout();
        assert_eq!(left.w, 320);
        assert_eq!(right.x, 320);
        assert_eq!(right.right(), 640);
    }

    #[test]
    fn first_render_draws_and_presents() {
        let mut backend = MockBackend::new();
        let mut s = scene(640, 320).with_background(Color::rgb(1, 2, 3));
        assert!(s.render(&mut backend).unwrap());
        assert_eq!(backend.calls[0], DrawCall::LogicalSize(640, 320));
        assert_eq!(backend.calls[1], DrawCall::Clear(Color::rgb(1, 2, 3)));
        assert_eq!(backend.calls.last(), Some(&DrawCall::Present));
        assert!(backend.copy_count() > 18);
        assert!(!s.is_dirty());
    }

    #[test]
    fn clean_scene_skips_frame() {
        let mut backend = MockBackend::new();
        let mut s = scene(640, 320);
        s.render(&mut backend).unwrap();
        let calls = backend.calls.len();
        assert!(!s.render(&mut backend).unwrap());
        assert_eq!(backend.calls.len(), calls);
    }

    #[test]
    fn same_size_resize_is_ignored() {
        let mut backend = MockBackend::new();
        let mut s = scene(640, 320);
        s.render(&mut backend).unwrap();
        s.resize(640, 320);
        assert!(!s.is_dirty());
        s.resize(800, 600);
        assert!(s.is_dirty());
        assert!(s.render(&mut backend).unwrap());
        assert_eq!(backend.present_count(), 2);
        assert_eq!(s.size(), (800, 600));
    }

    #[test]
    fn failed_render_stays_dirty() {
        let mut backend = MockBackend::failing_at(0);
        let mut s = scene(640, 320);
        assert!(s.render(&mut backend).is_err());
        assert!(s.is_dirty());
        assert_eq!(backend.present_count(), 0);
    }

    fn write_skin(dir: &std::path::Path, side: u32) -> std::path::PathBuf {
        let path = dir.join("ui.png");
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = png::Encoder::new(file, side, side);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer
            .write_image_data(&vec![255; (side * side * 4) as usize])
            .unwrap();
        path
    }

    #[test]
    fn from_config_builds_scene() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.skin.image = write_skin(dir.path(), 64);
        config.window.background = "#0a0b0c".to_string();

        let mut backend = MockBackend::new();
        let mut s = PanelScene::from_config(&config, &mut backend).unwrap();
        assert_eq!(s.size(), (640, 320));
        s.render(&mut backend).unwrap();
        assert_eq!(backend.calls[1], DrawCall::Clear(Color::rgb(10, 11, 12)));
    }

    #[test]
    fn from_config_rejects_oversized_insets() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.skin.image = write_skin(dir.path(), 16);

        let mut backend = MockBackend::new();
        let err = PanelScene::from_config(&config, &mut backend).err().unwrap();
        assert!(matches!(err, Slice9Error::Geometry(_)));
        assert_eq!(backend.live_textures(), 0);
    }

    #[test]
    fn from_config_rejects_bad_background_before_upload() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.skin.image = write_skin(dir.path(), 64);
        config.window.background = "teal".to_string();

        let mut backend = MockBackend::new();
        let err = PanelScene::from_config(&config, &mut backend).err().unwrap();
        assert!(matches!(err, Slice9Error::Config(_)));
        assert_eq!(backend.live_textures(), 0);
    }

    #[test]
    fn from_config_keeps_one_texture() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.skin.image = write_skin(dir.path(), 64);

        let mut backend = MockBackend::new();
        PanelScene::from_config(&config, &mut backend).unwrap();
        assert_eq!(backend.live_textures(), 1);
    }

    #[test]
    fn backend_failure_keeps_error_source() {
        let mut backend = MockBackend::new();
        backend.fail_logical_size = true;
        let mut s = scene(640, 320);
        let err = s.render(&mut backend).unwrap_err();
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("display lost"));
        assert!(s.is_dirty());
    }

    #[test]
    fn invalidate_forces_redraw() {
        let mut backend = MockBackend::new();
        let mut s = scene(200, 100);
        s.render(&mut backend).unwrap();
        s.invalidate();
        assert!(s.render(&mut backend).unwrap());
    }

    #[test]
    fn panels_cover_viewport_without_overlap() {
        let mut backend = MockBackend::new();
        let mut s = scene(640, 320);
        s.render(&mut backend).unwrap();
        let dsts = backend.copy_dsts();
        let area: u64 = dsts.iter().map(Rect::area).sum();
        assert_eq!(area, 640 * 320);
        for (i, a) in dsts.iter().enumerate() {
            for b in &dsts[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
    }
}
