use super::*;
use crate::foundation::core::Color;
use crate::render::recording::{DrawCall, RecordingSurface};

fn pixel() -> DecodedImage {
    DecodedImage::from_straight_rgba8(2, 2, vec![255; 16]).unwrap()
}

fn view() -> ImageView {
    ImageView {
        url: "a.png".into(),
        top: 10.0,
        left: 5.0,
        width: 40.0,
        height: 30.0,
        border_radius: 0.0,
        border_width: 0.0,
        border_color: Color::TRANSPARENT,
    }
}

fn names(s: &RecordingSurface) -> Vec<&'static str> {
    s.calls()
        .iter()
        .map(|c| match c {
            DrawCall::Save => "save",
            DrawCall::Restore => "restore",
            DrawCall::FillRect { .. } => "fill_rect",
            DrawCall::StrokeRect { .. } => "stroke_rect",
            DrawCall::FillPath { .. } => "fill",
            DrawCall::StrokePath { .. } => "stroke",
            DrawCall::Clip { .. } => "clip",
            DrawCall::FillText { .. } => "text",
            DrawCall::DrawImage { .. } => "image",
            DrawCall::Commit => "commit",
        })
        .collect()
}

#[test]
fn plain_image_is_stretched_into_its_box() {
    let mut s = RecordingSurface::new(100, 100);
    draw_image(&mut s, &view(), &pixel()).unwrap();
    assert_eq!(names(&s), vec!["save", "image", "restore"]);
    assert!(matches!(
        s.calls()[1],
        DrawCall::DrawImage { size: (2, 2), dst, .. } if dst == Rect::new(5.0, 10.0, 45.0, 40.0)
    ));
}

#[test]
fn rounded_image_strokes_border_then_clips() {
    let mut s = RecordingSurface::new(100, 100);
    let v = ImageView {
        border_radius: 12.0,
        border_width: 2.0,
        border_color: Color::rgb(1, 1, 1),
        ..view()
    };
    draw_image(&mut s, &v, &pixel()).unwrap();
    assert_eq!(
        names(&s),
        vec!["save", "stroke", "clip", "image", "restore"]
    );
    assert_eq!(s.save_depth(), 0);
    assert_eq!(s.state().clip_depth, 0);
}

#[test]
fn rounded_image_without_border_only_clips() {
    let mut s = RecordingSurface::new(100, 100);
    let v = ImageView {
        border_radius: 12.0,
        ..view()
    };
    draw_image(&mut s, &v, &pixel()).unwrap();
    assert_eq!(names(&s), vec!["save", "clip", "image", "restore"]);
}

#[test]
fn square_border_is_stroked_over_the_image() {
    let mut s = RecordingSurface::new(100, 100);
    let v = ImageView {
        border_width: 3.0,
        border_color: Color::rgb(0, 0, 200),
        ..view()
    };
    draw_image(&mut s, &v, &pixel()).unwrap();
    assert_eq!(names(&s), vec!["save", "image", "stroke_rect", "restore"]);
}
