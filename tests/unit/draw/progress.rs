use super::*;
use crate::foundation::core::Color;
use crate::render::recording::{DrawCall, RecordingSurface};
use kurbo::PathEl;

fn bar(percent: f64) -> ProgressView {
    ProgressView {
        start_x: 20.0,
        start_y: 100.0,
        end_x: 220.0,
        end_y: 100.0,
        percent,
        ..ProgressView::default()
    }
}

fn stroke_ends(s: &RecordingSurface) -> Vec<(Color, Point)> {
    s.calls()
        .iter()
        .filter_map(|c| match c {
            DrawCall::StrokePath { path, color, .. } => match path.elements().last() {
                Some(PathEl::LineTo(p)) => Some((*color, *p)),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

#[test]
fn zero_percent_draws_only_the_track() {
    let mut s = RecordingSurface::new(300, 200);
    let view = bar(0.0);
    draw_progress(&mut s, &view);
    let strokes = stroke_ends(&s);
    assert_eq!(strokes, vec![(view.from_color, Point::new(220.0, 100.0))]);
    assert_eq!(s.texts(), vec!["0%"]);
    assert_eq!(s.save_depth(), 0);
}

#[test]
fn foreground_covers_the_percent_fraction() {
    let mut s = RecordingSurface::new(300, 200);
    let view = bar(25.0);
    draw_progress(&mut s, &view);
    let strokes = stroke_ends(&s);
    assert_eq!(strokes.len(), 2);
    assert_eq!(strokes[1], (view.to_color, Point::new(70.0, 100.0)));
}

#[test]
fn percent_is_clamped() {
    assert_eq!(progress_end(&bar(250.0)), Point::new(220.0, 100.0));
    assert_eq!(progress_end(&bar(-5.0)), Point::new(20.0, 100.0));
}

#[test]
fn label_truncates_percent_or_uses_info() {
    assert_eq!(progress_label(&bar(66.9)), "66%");
    assert_eq!(progress_label(&bar(f64::NAN)), "0%");
    let mut v = bar(10.0);
    v.info = "3/10".into();
    assert_eq!(progress_label(&v), "3/10");
}

#[test]
fn label_sits_after_the_bar_on_the_alphabetic_baseline() {
    let mut s = RecordingSurface::new(300, 200);
    draw_progress(&mut s, &bar(50.0));
    let text = s.calls().iter().find_map(|c| match c {
        DrawCall::FillText {
            text,
            at,
            baseline,
            color,
            font,
            ..
        } => Some((text.clone(), *at, *baseline, *color, font.size_px)),
        _ => None,
    });
    assert_eq!(
        text,
        Some((
            "50%".to_owned(),
            Point::new(230.0, 112.0),
            TextBaseline::Alphabetic,
            Color::rgb(0x4A, 0x4A, 0x4A),
            16.0
        ))
    );
}
