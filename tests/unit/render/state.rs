use super::*;

#[test]
fn restore_returns_to_saved_values() {
    let mut st = StateStack::default();
    st.current_mut().fill = Color::WHITE;
    st.save();
    st.current_mut().fill = Color::rgb(1, 2, 3);
    st.current_mut().line_width = 9.0;
    assert_eq!(st.depth(), 1);

    assert_eq!(st.restore(), Some(0));
    assert_eq!(st.current().fill, Color::WHITE);
    assert_eq!(st.current().line_width, 1.0);
    assert_eq!(st.depth(), 0);
}

#[test]
fn unbalanced_restore_is_a_noop() {
    let mut st = StateStack::default();
    st.current_mut().global_alpha = 0.5;
    assert_eq!(st.restore(), None);
    assert_eq!(st.current().global_alpha, 0.5);
}

#[test]
fn restore_reports_dropped_clips() {
    let mut st = StateStack::default();
    st.save();
    st.current_mut().clip_depth += 2;
    assert_eq!(st.restore(), Some(2));
    assert_eq!(st.current().clip_depth, 0);
}

#[test]
fn effective_colors_apply_global_alpha() {
    let st = DrawState {
        fill: Color::rgb(10, 20, 30),
        global_alpha: 0.5,
        ..DrawState::default()
    };
    assert_eq!(st.effective_fill().a, 128);
    assert_eq!(st.effective_stroke().a, 128);
}

#[test]
fn font_css_shorthand() {
    let f = FontSpec {
        weight: 800,
        size_px: 48.0,
        ..FontSpec::default()
    };
    assert_eq!(f.css(), "normal 800 48px Microsoft YaHei");
}
