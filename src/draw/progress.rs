use crate::foundation::core::Point;
use crate::render::state::{FontSpec, TextBaseline};
use crate::render::surface::{StyleScope, Surface};
use crate::scene::model::ProgressView;

/// Foreground end point for `percent` (clamped to `0..=100`) along the bar.
pub fn progress_end(view: &ProgressView) -> Point {
    let t = view.percent.clamp(0.0, 100.0) / 100.0;
    Point::new(
        view.start_x + (view.end_x - view.start_x) * t,
        view.start_y + (view.end_y - view.start_y) * t,
    )
}

/// `info` when set, otherwise the percent rounded toward zero.
pub fn progress_label(view: &ProgressView) -> String {
    if view.info.is_empty() {
        let pct = if view.percent.is_finite() {
            view.percent.trunc() as i64
        } else {
            0
        };
        format!("{pct}%")
    } else {
        view.info.clone()
    }
}

pub fn draw_progress(surface: &mut dyn Surface, view: &ProgressView) {
    let mut scope = StyleScope::new(surface);
    let start = Point::new(view.start_x, view.start_y);

    scope.begin_path();
    scope.set_line_width(view.line_width);
    scope.set_stroke_color(view.from_color);
    scope.set_line_cap(view.line_cap);
    scope.move_to(start);
    scope.line_to(Point::new(view.end_x, view.end_y));
    scope.stroke();

    if view.percent > 0.0 {
        scope.begin_path();
        scope.set_stroke_color(view.to_color);
        scope.move_to(start);
        scope.line_to(progress_end(view));
        scope.stroke();
    }

    scope.begin_path();
    scope.set_line_width(view.font_line_width);
    scope.set_fill_color(view.font_color);
    scope.set_font(FontSpec {
        size_px: view.font_size,
        weight: view.font_weight,
        slant: view.font_style,
        family: view.font_family.clone(),
    });
    scope.set_text_baseline(TextBaseline::Alphabetic);
    scope.fill_text(
        &progress_label(view),
        Point::new(
            view.end_x + view.info_margin_left,
            view.end_y + view.line_width,
        ),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/draw/progress.rs"]
mod tests;
