//! One-dimensional slice decomposition.
//!
//! Each axis of a 9-slice is cut into three bands: the near border, the
//! scalable middle, and the far border. The 2-D grid is the cross product
//! of the horizontal and vertical decompositions.

use crate::insets::FillMode;

/// Which of the three bands along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandKind {
    Near,
    Middle,
    Far,
}

impl BandKind {
    pub const ALL: [BandKind; 3] = [BandKind::Near, BandKind::Middle, BandKind::Far];

    /// Whether this is one of the unscaled border bands.
    pub const fn is_border(self) -> bool {
        !matches!(self, BandKind::Middle)
    }
}

/// A source range on one axis and the destination range it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub kind: BandKind,
    pub src_offset: i32,
    pub src_len: i32,
    pub dst_offset: i32,
    pub dst_len: i32,
}

impl Band {
    /// A band with nothing to copy from or nothing to copy to.
    pub const fn is_degenerate(&self) -> bool {
        self.src_len <= 0 || self.dst_len <= 0
    }

    /// One-past-the-end destination coordinate.
    pub const fn dst_end(&self) -> i32 {
        self.dst_offset + self.dst_len
    }

    /// The copy spans that fill this band, in increasing destination order.
    pub fn spans(&self, fill: FillMode) -> Spans {
        Spans {
            band: *self,
            fill,
            cursor: self.dst_offset,
            done: self.is_degenerate(),
        }
    }
}

/// A single copy segment along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub src_offset: i32,
    pub src_len: i32,
    pub dst_offset: i32,
    pub dst_len: i32,
}

/// Iterator over the spans of a band. See [`Band::spans`].
#[derive(Debug, Clone)]
pub struct Spans {
    band: Band,
    fill: FillMode,
    cursor: i32,
    done: bool,
}

impl Iterator for Spans {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.done {
            return None;
        }
        let band = &self.band;
        match self.fill {
            FillMode::Stretch => {
                self.done = true;
                Some(Span {
                    src_offset: band.src_offset,
                    src_len: band.src_len,
                    dst_offset: band.dst_offset,
                    dst_len: band.dst_len,
                })
            }
            FillMode::Repeat => {
                let end = band.dst_end();
                if self.cursor >= end {
                    self.done = true;
                    return None;
                }
                // Final tile shrinks to the space left in the band.
                let len = band.src_len.min(end - self.cursor);
                let span = Span {
                    src_offset: band.src_offset,
                    src_len: len,
                    dst_offset: self.cursor,
                    dst_len: len,
                };
                self.cursor += len;
                Some(span)
            }
        }
    }
}

/// Near/middle/far decomposition of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceAxis {
    bands: [Band; 3],
}

impl SliceAxis {
    /// Decompose an axis.
    ///
    /// `source` is the source image extent, `near`/`far` the insets, and
    /// `origin`/`extent` the destination range. The caller guarantees
    /// `near + far <= source`, `extent >= 0` and that `origin + extent`
    /// fits in `i32`.
    ///
    /// When `extent < near + far` there is no room for the middle band.
    /// The border bands are then cropped (never scaled) so they split the
    /// extent in proportion to their insets without overlapping: the near
    /// band keeps the start of its source range, the far band the end.
    pub fn new(source: i32, near: i32, far: i32, origin: i32, extent: i32) -> Self {
        debug_assert!(near >= 0 && far >= 0 && near + far <= source);
        debug_assert!(extent >= 0);

        let borders = near + far;
        let (near_len, far_len) = if extent >= borders {
            (near, far)
        } else {
            let cropped = (extent as i64 * near as i64 / borders as i64) as i32;
            (cropped, extent - cropped)
        };
        let middle_dst = origin + near_len;
        let middle_len = extent - near_len - far_len;

        Self {
            bands: [
                Band {
                    kind: BandKind::Near,
                    src_offset: 0,
                    src_len: near_len,
                    dst_offset: origin,
                    dst_len: near_len,
                },
                Band {
                    kind: BandKind::Middle,
                    src_offset: near,
                    src_len: source - borders,
                    dst_offset: middle_dst,
                    dst_len: middle_len,
                },
                Band {
                    kind: BandKind::Far,
                    src_offset: source - far_len,
                    src_len: far_len,
                    dst_offset: middle_dst + middle_len,
                    dst_len: far_len,
                },
            ],
        }
    }

    /// The three bands in near, middle, far order.
    pub fn bands(&self) -> &[Band; 3] {
        &self.bands
    }

    pub fn band(&self, kind: BandKind) -> &Band {
        match kind {
            BandKind::Near => &self.bands[0],
            BandKind::Middle => &self.bands[1],
            BandKind::Far => &self.bands[2],
        }
    }
}
