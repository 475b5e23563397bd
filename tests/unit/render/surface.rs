use super::*;
use crate::render::recording::{DrawCall, RecordingSurface};

#[test]
fn style_scope_restores_on_drop() {
    let mut s = RecordingSurface::new(10, 10);
    {
        let mut scope = StyleScope::new(&mut s);
        scope.set_fill_color(Color::WHITE);
        scope.set_line_width(4.0);
        assert_eq!(scope.save_depth(), 1);
        {
            let mut inner = StyleScope::new(&mut *scope);
            inner.set_line_cap(LineCap::Round);
            assert_eq!(inner.save_depth(), 2);
        }
        assert_eq!(scope.state().line_cap, LineCap::Butt);
        assert_eq!(scope.state().line_width, 4.0);
    }
    assert_eq!(s.save_depth(), 0);
    assert_eq!(s.state().fill, Color::BLACK);
    assert_eq!(s.state().line_width, 1.0);
}

#[test]
fn style_scope_restores_on_early_return() {
    fn draw(surface: &mut dyn Surface) -> Result<(), ()> {
        let mut scope = StyleScope::new(surface);
        scope.set_global_alpha(0.2);
        Err(())
    }
    let mut s = RecordingSurface::new(10, 10);
    assert!(draw(&mut s).is_err());
    assert_eq!(s.save_depth(), 0);
    assert_eq!(s.state().global_alpha, 1.0);
}

#[test]
fn invalid_setter_values_are_ignored() {
    let mut s = RecordingSurface::new(10, 10);
    s.set_line_width(f64::NAN);
    s.set_line_width(-2.0);
    s.set_global_alpha(1.5);
    assert_eq!(s.state().line_width, 1.0);
    assert_eq!(s.state().global_alpha, 1.0);
}

#[test]
fn full_turn_arc_is_a_closed_circle() {
    let mut s = RecordingSurface::new(10, 10);
    s.begin_path();
    s.arc(Point::new(5.0, 5.0), 3.0, 0.0, std::f64::consts::TAU);
    s.stroke();
    let DrawCall::StrokePath { path, .. } = &s.calls()[0] else {
        panic!("expected a stroke");
    };
    use kurbo::Shape;
    let bbox = path.bounding_box();
    assert!((bbox.width() - 6.0).abs() < 0.05);
    assert!((bbox.height() - 6.0).abs() < 0.05);
}

#[test]
fn non_finite_points_are_dropped() {
    let mut s = RecordingSurface::new(10, 10);
    s.begin_path();
    s.move_to(Point::new(f64::NAN, 0.0));
    s.line_to(Point::new(0.0, f64::INFINITY));
    assert!(s.path_mut().elements().is_empty());
}
