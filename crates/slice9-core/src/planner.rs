//! 9-slice geometry planner.
//!
//! [`plan`] is a pure function: the same inputs always produce the same
//! ordered list of copy instructions, and nothing is cached between calls.

use slice9_types::error::GeometryError;
use slice9_types::geometry::{Rect, Size};

use crate::axis::{BandKind, SliceAxis};
use crate::insets::{BorderInsets, FillMode};

/// Which of the nine grid cells a copy belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Horizontal band.
    pub column: BandKind,
    /// Vertical band.
    pub row: BandKind,
}

impl Cell {
    pub fn is_corner(&self) -> bool {
        self.column.is_border() && self.row.is_border()
    }

    pub fn is_edge(&self) -> bool {
        self.column.is_border() != self.row.is_border()
    }

    pub fn is_center(&self) -> bool {
        self.column == BandKind::Middle && self.row == BandKind::Middle
    }
}

/// One copy: `src` of the source image onto `dst` of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyInstruction {
    pub src: Rect,
    pub dst: Rect,
    pub cell: Cell,
}

/// Compute the copies that draw a 9-slice panel.
///
/// Insets are applied to `source`; `dest` is the panel's area on the
/// surface. Corners are copied 1:1, edges and center are stretched or
/// tiled according to `fill`. Cells with no source or destination area
/// are skipped.
///
/// Instructions are ordered by horizontal band (near, middle, far), then
/// horizontal tile, then vertical band, then vertical tile.
pub fn plan(
    source: Size,
    insets: BorderInsets,
    dest: Rect,
    fill: FillMode,
) -> Result<Vec<CopyInstruction>, GeometryError> {
    if dest.w < 0 || dest.h < 0 {
        return Err(GeometryError::NegativeDestination {
            w: dest.w,
            h: dest.h,
        });
    }
    insets.validate(source)?;

    let src_w = i32::try_from(source.w).map_err(|_| GeometryError::Overflow("source width"))?;
    let src_h = i32::try_from(source.h).map_err(|_| GeometryError::Overflow("source height"))?;
    if dest.x.checked_add(dest.w).is_none() {
        return Err(GeometryError::Overflow("destination right edge"));
    }
    if dest.y.checked_add(dest.h).is_none() {
        return Err(GeometryError::Overflow("destination bottom edge"));
    }

    // validate() bounds every inset by a source extent that fits in i32.
    let horizontal = SliceAxis::new(
        src_w,
        insets.left as i32,
        insets.right as i32,
        dest.x,
        dest.w,
    );
    let vertical = SliceAxis::new(
        src_h,
        insets.top as i32,
        insets.bottom as i32,
        dest.y,
        dest.h,
    );

    let mut out = Vec::new();
    for column in horizontal.bands() {
        for xs in column.spans(fill) {
            for row in vertical.bands() {
                for ys in row.spans(fill) {
                    out.push(CopyInstruction {
                        src: Rect::new(xs.src_offset, ys.src_offset, xs.src_len, ys.src_len),
                        dst: Rect::new(xs.dst_offset, ys.dst_offset, xs.dst_len, ys.dst_len),
                        cell: Cell {
                            column: column.kind,
                            row: row.kind,
                        },
                    });
                }
            }
        }
    }
    Ok(out)
}
