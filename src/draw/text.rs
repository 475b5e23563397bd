use crate::foundation::core::Point;
use crate::render::state::{FontSpec, TextBaseline};
use crate::render::surface::{StyleScope, Surface};
use crate::scene::model::TextView;

const ELLIPSIS: &str = "...";

/// Break `content` into at most `line_num` lines no wider than `max_width`.
///
/// Wrapping only starts when the whole string is wider than `max_width - indent` (or
/// `max_width` without an indent). Lines are then filled one character at a time until they
/// measure at least `max_width`. When text remains after the last permitted line, that line's
/// final character is replaced with `...`. Without a usable width the content is one line.
pub fn wrap_lines(
    content: &str,
    max_width: Option<f64>,
    line_num: u32,
    indent: f64,
    mut measure: impl FnMut(&str) -> f64,
) -> Vec<String> {
    let Some(width) = max_width.filter(|w| w.is_finite() && *w > 0.0) else {
        return vec![content.to_owned()];
    };
    let limit = if indent > 0.0 { width - indent } else { width };
    if measure(content) <= limit {
        return vec![content.to_owned()];
    }

    let chars: Vec<char> = content.chars().collect();
    let last = chars.len().saturating_sub(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut line = 1u32;
    for (i, ch) in chars.iter().enumerate() {
        current.push(*ch);
        if measure(&current) >= width {
            if line == line_num && i != last {
                current.pop();
                current.push_str(ELLIPSIS);
            }
            if line <= line_num {
                lines.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
            line += 1;
        } else if line <= line_num && i == last {
            lines.push(std::mem::take(&mut current));
        }
    }
    lines
}

pub(crate) fn font_of(view: &TextView) -> FontSpec {
    FontSpec {
        size_px: view.font_size,
        weight: view.font_weight,
        slant: view.font_style,
        family: view.font_family.clone(),
    }
}

/// Draw a standalone text primitive at its own `left`/`top`.
pub fn draw_text(surface: &mut dyn Surface, view: &TextView) {
    draw_text_at(
        surface,
        view,
        Point::new(view.left, view.top),
        TextBaseline::Top,
    );
}

/// Draw `view` with its first line anchored at `origin`, using `default_baseline` when the view
/// names none.
pub fn draw_text_at(
    surface: &mut dyn Surface,
    view: &TextView,
    origin: Point,
    default_baseline: TextBaseline,
) {
    let mut scope = StyleScope::new(surface);
    scope.begin_path();
    scope.set_font(font_of(view));
    scope.set_global_alpha(view.opacity as f32);
    scope.set_text_align(view.text_align);
    scope.set_text_baseline(view.base_line.unwrap_or(default_baseline));
    scope.set_fill_color(view.color);

    let lines = wrap_lines(
        &view.content,
        view.width,
        view.line_num,
        view.indent_width,
        |s| scope.measure_text(s),
    );
    let advance = if view.line_height != 0.0 {
        view.line_height
    } else {
        view.font_size
    };
    for (i, line) in lines.iter().enumerate() {
        let indent = if i == 0 && view.indent_width != 0.0 {
            view.indent_width
        } else {
            0.0
        };
        scope.fill_text(
            line,
            Point::new(origin.x + indent, origin.y + advance * i as f64),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/text.rs"]
mod tests;
