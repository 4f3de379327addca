//! Letterbox math for fitting a frame into the preview canvas.
//!
//! The derived dimension is floor-truncated, then raised to at least one
//! pixel so a very thin source still shows up.

/// Fit `source` into `bounds` preserving aspect ratio.
///
/// Returns `(0, 0)` when any input is zero; the caller defers drawing until
/// the surface has a size.
pub fn fit(source_w: u32, source_h: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    if source_w == 0 || source_h == 0 || box_w == 0 || box_h == 0 {
        return (0, 0);
    }

    let source_aspect = source_w as f64 / source_h as f64;
    let box_aspect = box_w as f64 / box_h as f64;

    if source_aspect > box_aspect {
        // Wider than the box: fit width, letterbox top/bottom
        let h = (box_w as f64 / source_aspect).floor() as u32;
        (box_w, h.clamp(1, box_h))
    } else {
        // Taller (or equal): fit height, pillarbox left/right
        let w = (box_h as f64 * source_aspect).floor() as u32;
        (w.clamp(1, box_w), box_h)
    }
}

/// Top-left offset that centers a fitted frame inside its box.
pub fn centered(fitted: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    (
        bounds.0.saturating_sub(fitted.0) / 2,
        bounds.1.saturating_sub(fitted.1) / 2,
    )
}
