//! Error types for slice9.

use std::io;

/// The slice geometry cannot be computed for the supplied parameters.
///
/// These are caller programming errors: the planner never clamps its way
/// around them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error(
        "insets exceed source image: left {left} + right {right} vs width {width}, \
         top {top} + bottom {bottom} vs height {height}"
    )]
    InvalidInsets {
        top: u32,
        bottom: u32,
        left: u32,
        right: u32,
        width: u32,
        height: u32,
    },

    #[error("destination has negative extent: {w}x{h}")]
    NegativeDestination { w: i32, h: i32 },

    #[error("{0} exceeds the i32 coordinate range")]
    Overflow(&'static str),
}

/// The pixel-copy primitive failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("copy failed: {0}")]
pub struct CopyError(pub String);

/// A panel render pass was aborted.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("copy {index} failed: {source}")]
    Copy {
        index: usize,
        #[source]
        source: CopyError,
    },

    #[error("backend call failed")]
    Backend(#[source] Box<Slice9Error>),
}

/// Errors produced by the slice9 framework.
#[derive(Debug, thiserror::Error)]
pub enum Slice9Error {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Slice9Error>;
