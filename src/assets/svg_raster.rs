use crate::foundation::error::{EaselError, EaselResult};

// Avoid pathological allocations from huge destination boxes.
const MAX_DIM: u32 = 16_384;

/// Compute the raster size for an SVG drawn into a `dst_w` x `dst_h` box.
///
/// The SVG is rasterized at the destination size (rounded up) so it is never blurred by an
/// upscaling blit. Degenerate boxes fall back to the document's intrinsic size.
pub fn svg_raster_size(tree: &usvg::Tree, dst_w: f64, dst_h: f64) -> EaselResult<(u32, u32)> {
    fn to_px(v: f64) -> Option<u32> {
        (v.is_finite() && v > 0.0).then(|| (v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let base_w = to_px(size.width() as f64)
        .ok_or_else(|| EaselError::decode("svg has invalid width/height"))?;
    let base_h = to_px(size.height() as f64)
        .ok_or_else(|| EaselError::decode("svg has invalid width/height"))?;

    let w = to_px(dst_w).unwrap_or(base_w);
    let h = to_px(dst_h).unwrap_or(base_h);
    if w > MAX_DIM || h > MAX_DIM {
        return Err(EaselError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

/// Rasterize `tree` stretched to `width` x `height`, returning premultiplied RGBA8.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> EaselResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| EaselError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
