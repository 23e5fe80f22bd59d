//! slice9-core: 9-slice panel rendering built on `SdiBackend`.
//!
//! The planner turns a source image size, border insets, a destination
//! rectangle and a fill mode into an ordered list of copy instructions.
//! The renderer executes those instructions against a backend. Everything
//! here is platform-agnostic; windows, textures and pixel copies live
//! behind the backend traits.

pub mod axis;
pub mod config;
pub mod image;
pub mod insets;
pub mod nine_patch;
pub mod planner;
pub mod renderer;
pub mod scene;

pub use slice9_types::backend;
pub use slice9_types::color;
pub use slice9_types::error;
pub use slice9_types::geometry;
pub use slice9_types::input;

#[cfg(test)]
pub(crate) mod test_utils;

pub use axis::{Band, BandKind, SliceAxis, Span};
pub use config::AppConfig;
pub use image::SourceImage;
pub use insets::{BorderInsets, FillMode};
pub use nine_patch::NinePatch;
pub use planner::{Cell, CopyInstruction, plan};
pub use renderer::render_panel;
pub use scene::PanelScene;
