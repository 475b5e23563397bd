use serde::{Deserialize, Serialize};

use crate::draw::rounded::{CornerRadii, trace_rounded_rect};
use crate::draw::text::{draw_text_at, font_of};
use crate::foundation::core::{Point, Rect};
use crate::render::state::{TextAlign, TextBaseline};
use crate::render::surface::{StyleScope, Surface};
use crate::scene::model::RectView;

/// How horizontal padding is added to a rect that grows around its text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectPadding {
    /// `paddingLeft` counted on both sides; `paddingRight` only moves right-aligned text.
    #[default]
    MirrorLeft,
    /// `paddingLeft + paddingRight`.
    LeftRight,
}

impl RectPadding {
    pub fn horizontal(self, view: &RectView) -> f64 {
        match self {
            Self::MirrorLeft => view.padding_left * 2.0,
            Self::LeftRight => view.padding_left + view.padding_right,
        }
    }
}

/// Resolved geometry of a rect primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectLayout {
    /// Outer box.
    pub frame: Rect,
    /// Anchor for the child text, if any.
    pub text_at: Option<Point>,
}

/// Size the box around its text and place the text anchor.
pub fn layout_rect(
    surface: &mut dyn Surface,
    view: &RectView,
    padding: RectPadding,
) -> RectLayout {
    let Some(text) = &view.text else {
        return RectLayout {
            frame: Rect::new(view.x, view.y, view.x + view.width, view.y + view.height),
            text_at: None,
        };
    };

    let text_width = {
        let mut scope = StyleScope::new(surface);
        scope.set_font(font_of(text));
        scope.measure_text(&text.content)
    };
    let box_width = text_width.max(view.width) + padding.horizontal(view);
    let text_x = match text.text_align {
        TextAlign::Left => view.x + view.padding_left,
        TextAlign::Center => view.x + box_width / 2.0,
        TextAlign::Right => view.x + box_width - view.padding_right,
    };
    RectLayout {
        frame: Rect::new(view.x, view.y, view.x + box_width, view.y + view.height),
        text_at: Some(Point::new(text_x, view.y + view.height / 2.0)),
    }
}

/// Fill, then border, then child text.
pub fn draw_rect(surface: &mut dyn Surface, view: &RectView, padding: RectPadding) {
    let layout = layout_rect(surface, view, padding);
    let rounded = view.border_radius.is_rounded();
    let radii = if rounded {
        let radii = CornerRadii::from_radius(&view.border_radius);
        if radii.is_none() {
            tracing::warn!(radius = ?view.border_radius, "malformed border radius, outline skipped");
        }
        radii
    } else {
        None
    };

    if let Some(bg) = view.background_color {
        let mut scope = StyleScope::new(surface);
        scope.set_global_alpha(view.opacity as f32);
        scope.set_fill_color(bg);
        match (rounded, radii) {
            (false, _) => scope.fill_rect(layout.frame),
            (true, Some(radii)) => {
                trace_rounded_rect(&mut *scope, layout.frame, radii);
                scope.fill();
            }
            (true, None) => {}
        }
    }

    if view.border_width > 0.0 {
        let mut scope = StyleScope::new(surface);
        scope.set_global_alpha(view.opacity as f32);
        scope.set_stroke_color(view.border_color);
        scope.set_line_width(view.border_width);
        match (rounded, radii) {
            (false, _) => scope.stroke_rect(layout.frame),
            (true, Some(radii)) => {
                trace_rounded_rect(&mut *scope, layout.frame, radii);
                scope.stroke();
            }
            (true, None) => {}
        }
    }

    if let (Some(text), Some(at)) = (&view.text, layout.text_at) {
        draw_text_at(surface, text, at, TextBaseline::Middle);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/rect.rs"]
mod tests;
