use crate::foundation::core::Point;
use crate::render::surface::{StyleScope, Surface};
use crate::scene::model::LineView;

pub fn draw_line(surface: &mut dyn Surface, view: &LineView) {
    let mut scope = StyleScope::new(surface);
    scope.begin_path();
    scope.set_line_cap(view.line_cap);
    scope.set_stroke_color(view.color);
    scope.set_line_width(view.width);
    scope.move_to(Point::new(view.start_x, view.start_y));
    scope.line_to(Point::new(view.end_x, view.end_y));
    scope.stroke();
}

#[cfg(test)]
#[path = "../../tests/unit/draw/line.rs"]
mod tests;
