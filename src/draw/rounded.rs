use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::foundation::core::{Point, Rect};
use crate::render::surface::Surface;
use crate::scene::model::BorderRadius;

/// Factor applied to every radius value before it becomes a corner bend.
pub const CORNER_BEND_SCALE: f64 = 0.5;

/// Per-corner bends, already scaled by [`CORNER_BEND_SCALE`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    /// Same bend at every corner from one radius value. `None` for negative or non-finite input.
    pub fn uniform(value: f64) -> Option<Self> {
        let b = bend(value)?;
        Some(Self {
            top_left: b,
            top_right: b,
            bottom_right: b,
            bottom_left: b,
        })
    }

    /// Parse a CSS corner shorthand of 1 to 4 space-separated numbers.
    ///
    /// 1 value sets all corners; 2 set top-left/bottom-right then top-right/bottom-left;
    /// 3 set top-left, top-right/bottom-left, bottom-right; 4 go clockwise from top-left.
    pub fn parse_shorthand(s: &str) -> Option<Self> {
        let vals = s
            .split_whitespace()
            .map(|t| t.parse::<f64>().ok().and_then(bend))
            .collect::<Option<Vec<f64>>>()?;
        let (tl, tr, br, bl) = match vals.as_slice() {
            [a] => (*a, *a, *a, *a),
            [a, b] => (*a, *b, *a, *b),
            [a, b, c] => (*a, *b, *c, *b),
            [a, b, c, d] => (*a, *b, *c, *d),
            _ => return None,
        };
        Some(Self {
            top_left: tl,
            top_right: tr,
            bottom_right: br,
            bottom_left: bl,
        })
    }

    pub fn from_radius(radius: &BorderRadius) -> Option<Self> {
        match radius {
            BorderRadius::Uniform(v) => Self::uniform(*v),
            BorderRadius::Shorthand(s) => Self::parse_shorthand(s),
        }
    }
}

fn bend(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value * CORNER_BEND_SCALE)
}

/// Replace the current path with a rounded-rect outline. Does not fill, stroke or clip.
pub fn trace_rounded_rect(surface: &mut dyn Surface, rect: Rect, radii: CornerRadii) {
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    let CornerRadii {
        top_left: tl,
        top_right: tr,
        bottom_right: br,
        bottom_left: bl,
    } = radii;

    surface.begin_path();
    surface.move_to(Point::new(x + tl, y));
    surface.line_to(Point::new(x + w - tr, y));
    corner(surface, Point::new(x + w - tr, y + tr), tr, 3.0 * FRAC_PI_2, TAU);
    surface.line_to(Point::new(x + w, y + h - br));
    corner(surface, Point::new(x + w - br, y + h - br), br, 0.0, FRAC_PI_2);
    surface.line_to(Point::new(x + bl, y + h));
    corner(surface, Point::new(x + bl, y + h - bl), bl, FRAC_PI_2, PI);
    surface.line_to(Point::new(x, y + tl));
    corner(surface, Point::new(x + tl, y + tl), tl, PI, 3.0 * FRAC_PI_2);
    surface.close_path();
}

fn corner(surface: &mut dyn Surface, center: Point, r: f64, start: f64, end: f64) {
    if r > 0.0 {
        surface.arc(center, r, start, end);
    } else {
        surface.line_to(center);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/rounded.rs"]
mod tests;
