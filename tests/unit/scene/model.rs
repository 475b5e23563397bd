use super::*;
use serde_json::json;

#[test]
fn numeric_and_string_tags_are_equivalent() {
    let by_name: Primitive =
        serde_json::from_value(json!({"type": "line", "startX": 1, "endX": 9})).unwrap();
    let by_index: Primitive =
        serde_json::from_value(json!({"type": 2, "startX": 1, "endX": 9})).unwrap();
    assert_eq!(by_name, by_index);
    assert_eq!(by_name.kind(), PrimitiveKind::Line);

    for (i, kind) in PrimitiveKind::ALL.into_iter().enumerate() {
        assert_eq!(PrimitiveKind::from_index(i as u64), Some(kind));
        assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
    }
}

#[test]
fn unknown_or_missing_tag_is_rejected() {
    assert!(serde_json::from_value::<Primitive>(json!({"type": "circle"})).is_err());
    assert!(serde_json::from_value::<Primitive>(json!({"type": 6})).is_err());
    assert!(serde_json::from_value::<Primitive>(json!({"left": 1})).is_err());
}

#[test]
fn serializes_with_string_tag() {
    let p: Primitive = serde_json::from_value(json!({"type": 1, "content": "hi"})).unwrap();
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["type"], "text");
    assert_eq!(v["content"], "hi");
}

#[test]
fn text_defaults_follow_the_schema() {
    let Primitive::Text(t) =
        serde_json::from_value(json!({"type": "text", "content": "x"})).unwrap()
    else {
        panic!("expected text");
    };
    assert_eq!(t.font_size, 16.0);
    assert_eq!(t.color, Color::BLACK);
    assert_eq!(t.base_line, None);
    assert_eq!(t.text_align, TextAlign::Left);
    assert_eq!(t.line_num, 1);
    assert_eq!(t.font_weight, 400);
    assert_eq!(t.font_family, "Microsoft YaHei");
    assert_eq!(t.width, None);
}

#[test]
fn font_weight_accepts_numbers_and_keywords() {
    let parse = |w: serde_json::Value| -> u16 {
        let t: TextView = serde_json::from_value(json!({"fontWeight": w})).unwrap();
        t.font_weight
    };
    assert_eq!(parse(json!(800)), 800);
    assert_eq!(parse(json!("800")), 800);
    assert_eq!(parse(json!("bold")), 700);
    assert_eq!(parse(json!("normal")), 400);
    assert!(serde_json::from_value::<TextView>(json!({"fontWeight": "heavy"})).is_err());
}

#[test]
fn border_radius_number_or_string() {
    let r: RectView = serde_json::from_value(json!({"borderRadius": 10})).unwrap();
    assert_eq!(r.border_radius, BorderRadius::Uniform(10.0));
    assert!(r.border_radius.is_rounded());

    let r: RectView = serde_json::from_value(json!({"borderRadius": "10 20"})).unwrap();
    assert_eq!(r.border_radius, BorderRadius::Shorthand("10 20".into()));

    let r: RectView = serde_json::from_value(json!({})).unwrap();
    assert!(!r.border_radius.is_rounded());
    assert_eq!(r.border_color, Color::BLACK);
    assert_eq!(r.opacity, 1.0);
}

#[test]
fn steps_spacing_falls_back_to_first_then_fifty() {
    let s: StepsView = serde_json::from_value(json!({
        "lists": [{"status": 2, "spacing": 30}, {"status": 1}, {"spacing": 80}]
    }))
    .unwrap();
    assert_eq!(s.spacing_at(0), 30.0);
    assert_eq!(s.spacing_at(1), 30.0);
    assert_eq!(s.spacing_at(2), 80.0);
    assert_eq!(s.lists[0].status, Some(StepStatus::Finished));
    assert_eq!(s.lists[2].status, None);

    let bare: StepsView = serde_json::from_value(json!({"lists": [{}, {}]})).unwrap();
    assert_eq!(bare.spacing_at(1), StepsView::FALLBACK_SPACING);
    assert_eq!(bare.r, 5.0);
    assert_eq!(bare.mode, StepsMode::Fill);
    assert_eq!(bare.direction, StepsDirection::Column);
}

#[test]
fn step_status_outside_range_is_rejected() {
    assert!(serde_json::from_value::<StepItem>(json!({"status": 3})).is_err());
}

#[test]
fn progress_uses_lowercase_linecap_key() {
    let p: ProgressView =
        serde_json::from_value(json!({"linecap": "square", "percent": 40})).unwrap();
    assert_eq!(p.line_cap, LineCap::Square);
    assert_eq!(p.percent, 40.0);
    assert_eq!(p.line_width, 12.0);
    assert_eq!(p.info_margin_left, 10.0);
    assert_eq!(ProgressView::default().line_cap, LineCap::Round);
}
