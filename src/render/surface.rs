use std::ops::{Deref, DerefMut};

use kurbo::PathEl;

use crate::assets::decode::DecodedImage;
use crate::foundation::core::{BezPath, Color, Point, Rect};
use crate::foundation::error::EaselResult;
use crate::render::frame::FrameRGBA;
use crate::render::state::{DrawState, FontSpec, LineCap, TextAlign, TextBaseline};

/// Flattening tolerance for arcs appended to the current path.
const ARC_TOLERANCE: f64 = 0.1;

/// A mutable 2D raster target shaped after the browser canvas context.
///
/// Implementations own a style stack ([`DrawState`]) and a current path. Setters and path
/// construction are provided on top of [`Surface::state_mut`] and [`Surface::path_mut`];
/// rasterizing operations are up to the backend.
pub trait Surface {
    /// Pixel width.
    fn width(&self) -> u32;

    /// Pixel height.
    fn height(&self) -> u32;

    /// Set the pixel dimensions. Clears content, the style stack and the current path.
    fn resize(&mut self, width: u32, height: u32) -> EaselResult<()>;

    /// Push the current style state.
    fn save(&mut self);

    /// Pop the last saved style state, dropping clips added since. No-op when nothing is saved.
    fn restore(&mut self);

    /// Number of outstanding [`Surface::save`] calls.
    fn save_depth(&self) -> usize;

    /// Active style state.
    fn state(&self) -> &DrawState;

    /// Mutable style state.
    fn state_mut(&mut self) -> &mut DrawState;

    /// Current path under construction.
    fn path_mut(&mut self) -> &mut BezPath;

    /// Fill the current path with the fill color.
    fn fill(&mut self);

    /// Stroke the current path with the stroke color, width and cap.
    fn stroke(&mut self);

    /// Intersect the clip region with the current path.
    fn clip(&mut self);

    /// Fill `rect` without touching the current path.
    fn fill_rect(&mut self, rect: Rect);

    /// Stroke `rect` without touching the current path.
    fn stroke_rect(&mut self, rect: Rect);

    /// Advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;

    /// Draw `text` anchored at `at` per the current alignment and baseline.
    fn fill_text(&mut self, text: &str, at: Point);

    /// Draw `image` stretched into `dst`.
    fn draw_image(&mut self, image: &DecodedImage, dst: Rect) -> EaselResult<()>;

    /// Make every draw issued so far part of the surface content.
    fn commit(&mut self) -> EaselResult<()>;

    /// Read back the current content.
    fn snapshot(&mut self) -> EaselResult<FrameRGBA>;

    fn set_fill_color(&mut self, color: Color) {
        self.state_mut().fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state_mut().stroke = color;
    }

    /// Ignored unless finite and positive.
    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state_mut().line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state_mut().line_cap = cap;
    }

    /// Ignored unless within `0.0..=1.0`.
    fn set_global_alpha(&mut self, alpha: f32) {
        if (0.0..=1.0).contains(&alpha) {
            self.state_mut().global_alpha = alpha;
        }
    }

    fn set_font(&mut self, font: FontSpec) {
        self.state_mut().font = font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state_mut().text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state_mut().text_baseline = baseline;
    }

    /// Discard the current path.
    fn begin_path(&mut self) {
        *self.path_mut() = BezPath::new();
    }

    fn move_to(&mut self, p: Point) {
        if is_finite_point(p) {
            self.path_mut().move_to(p);
        }
    }

    /// Line to `p`; starts a subpath when there is no current point.
    fn line_to(&mut self, p: Point) {
        if !is_finite_point(p) {
            return;
        }
        let path = self.path_mut();
        if has_current_point(path) {
            path.line_to(p);
        } else {
            path.move_to(p);
        }
    }

    /// Clockwise arc from `start` to `end` radians, connected to the current point by a line.
    /// A sweep of at least a full turn draws a whole circle.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        if !is_finite_point(center) || !radius.is_finite() || radius < 0.0 {
            return;
        }
        if !start.is_finite() || !end.is_finite() {
            return;
        }
        let tau = std::f64::consts::TAU;
        let sweep = if end - start >= tau {
            tau
        } else {
            (end - start).rem_euclid(tau)
        };
        let arc = kurbo::Arc::new(center, (radius, radius), start, sweep, 0.0);
        let first = center + kurbo::Vec2::from_angle(start) * radius;

        let path = self.path_mut();
        if has_current_point(path) {
            path.line_to(first);
        } else {
            path.move_to(first);
        }
        for el in arc.append_iter(ARC_TOLERANCE) {
            path.push(el);
        }
    }

    fn close_path(&mut self) {
        let path = self.path_mut();
        if has_current_point(path) {
            path.close_path();
        }
    }
}

fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn has_current_point(path: &BezPath) -> bool {
    !matches!(path.elements().last(), None | Some(PathEl::ClosePath))
}

/// Saves the surface state on creation and restores it on drop, so style changes made through
/// the guard never outlive it.
pub struct StyleScope<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> StyleScope<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.save();
        Self { surface }
    }
}

impl Drop for StyleScope<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

impl<'a> Deref for StyleScope<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl DerefMut for StyleScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
