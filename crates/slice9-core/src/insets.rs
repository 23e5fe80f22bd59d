//! Border insets and fill modes.

use serde::{Deserialize, Serialize};

use slice9_types::error::GeometryError;
use slice9_types::geometry::Size;

/// Unscaled border thickness on each side of a source image, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BorderInsets {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl BorderInsets {
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Same inset on all four sides.
    pub const fn uniform(inset: u32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// `left + right`, without overflow.
    pub const fn horizontal(&self) -> u64 {
        self.left as u64 + self.right as u64
    }

    /// `top + bottom`, without overflow.
    pub const fn vertical(&self) -> u64 {
        self.top as u64 + self.bottom as u64
    }

    /// Check that the insets leave a non-negative center on `source`.
    pub fn validate(&self, source: Size) -> Result<(), GeometryError> {
        if self.horizontal() > source.w as u64 || self.vertical() > source.h as u64 {
            return Err(GeometryError::InvalidInsets {
                top: self.top,
                bottom: self.bottom,
                left: self.left,
                right: self.right,
                width: source.w,
                height: source.h,
            });
        }
        Ok(())
    }
}

/// How the scalable bands fill their destination extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// One scaled copy per band.
    #[default]
    Stretch,
    /// Unscaled copies tiled across the band, last tile clamped.
    Repeat,
}
