use super::*;
use crate::foundation::core::Color;
use crate::render::recording::{DrawCall, RecordingSurface};
use crate::render::state::LineCap;

#[test]
fn strokes_one_segment_with_view_style() {
    let mut s = RecordingSurface::new(50, 50);
    let view = LineView {
        start_x: 1.0,
        start_y: 2.0,
        end_x: 30.0,
        end_y: 2.0,
        color: Color::rgb(9, 9, 9),
        width: 3.0,
        line_cap: LineCap::Square,
    };
    draw_line(&mut s, &view);

    assert_eq!(s.save_depth(), 0);
    let strokes: Vec<_> = s
        .calls()
        .iter()
        .filter_map(|c| match c {
            DrawCall::StrokePath {
                path,
                color,
                line_width,
                line_cap,
            } => Some((path.elements().len(), *color, *line_width, *line_cap)),
            _ => None,
        })
        .collect();
    assert_eq!(strokes, vec![(2, Color::rgb(9, 9, 9), 3.0, LineCap::Square)]);
}
