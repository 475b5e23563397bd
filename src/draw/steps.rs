use crate::foundation::core::Point;
use crate::render::surface::{StyleScope, Surface};
use crate::scene::model::{StepsDirection, StepsMode, StepsView};

pub fn draw_steps(surface: &mut dyn Surface, view: &StepsView) {
    let count = view.lists.len();
    let mut cursor = match view.direction {
        StepsDirection::Column => view.top,
        StepsDirection::Row => view.left,
    };
    let at = |offset: f64| match view.direction {
        StepsDirection::Column => Point::new(view.left, offset),
        StepsDirection::Row => Point::new(offset, view.top),
    };

    for (i, item) in view.lists.iter().enumerate() {
        let spacing = view.spacing_at(i);
        let mut scope = StyleScope::new(surface);
        scope.begin_path();
        scope.set_stroke_color(view.stroke_color);
        scope.set_line_width(view.line_width);
        scope.arc(at(cursor), view.r, view.start_angle, view.end_angle);

        let status_color = item.status.map(|s| view.status_color(s));
        match view.mode {
            StepsMode::None => scope.stroke(),
            StepsMode::Fill => {
                if let Some(c) = status_color {
                    scope.set_fill_color(c);
                }
                scope.fill();
            }
            StepsMode::Stroke => {
                if let Some(c) = status_color {
                    scope.set_stroke_color(c);
                }
                scope.stroke();
            }
        }

        if i + 1 < count {
            scope.begin_path();
            scope.set_stroke_color(view.cable_color);
            scope.move_to(at(cursor + view.r));
            scope.line_to(at(cursor + spacing - view.r));
            scope.stroke();
        }
        cursor += spacing;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/steps.rs"]
mod tests;
