//! Panel renderer: executes a slice plan against a backend.

use slice9_types::backend::{SdiBackend, TextureId};
use slice9_types::error::RenderError;
use slice9_types::geometry::{Rect, Size};

use crate::insets::{BorderInsets, FillMode};
use crate::planner::plan;

/// Draw a 9-slice panel.
///
/// Plans the copies for `dest` and issues them in order. The first failed
/// copy aborts the pass; whatever was already drawn stays on the surface.
/// Returns the number of copies issued.
pub fn render_panel(
    backend: &mut dyn SdiBackend,
    texture: TextureId,
    source: Size,
    insets: BorderInsets,
    dest: Rect,
    fill: FillMode,
) -> Result<usize, RenderError> {
    let instructions = plan(source, insets, dest, fill)?;
    log::debug!(
        "panel {}x{} at ({}, {}) {:?}: {} copies",
        dest.w,
        dest.h,
        dest.x,
        dest.y,
        fill,
        instructions.len()
    );

    for (index, ins) in instructions.iter().enumerate() {
        if let Err(err) = backend.copy_region(texture, ins.src, ins.dst) {
            log::warn!(
                "copy {index}/{} {:?} -> {:?} failed: {err}",
                instructions.len(),
                ins.src,
                ins.dst
            );
            return Err(RenderError::Copy { index, source: err });
        }
    }
    Ok(instructions.len())
}
