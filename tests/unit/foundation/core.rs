use super::*;

#[test]
fn premul_roundtrip_opaque_is_identity() {
    let c = Color::rgb(12, 200, 99);
    assert_eq!(c.to_premul().to_straight(), c);
}

#[test]
fn premul_half_alpha_rounds() {
    let p = Rgba8Premul::from_straight_rgba(255, 100, 0, 128);
    assert_eq!(p.r, 128);
    assert_eq!(p.g, ((100u16 * 128 + 127) / 255) as u8);
    assert_eq!(p.b, 0);
    assert_eq!(p.a, 128);
}

#[test]
fn transparent_premul_unpremuls_to_transparent() {
    assert_eq!(Rgba8Premul::transparent().to_straight(), Color::TRANSPARENT);
}

#[test]
fn alpha_mul_clamps_and_ignores_nan() {
    let c = Color::rgb(1, 2, 3);
    assert_eq!(c.with_alpha_mul(0.5).a, 128);
    assert_eq!(c.with_alpha_mul(2.0).a, 255);
    assert_eq!(c.with_alpha_mul(-1.0).a, 0);
    assert_eq!(c.with_alpha_mul(f32::NAN).a, 255);
}

#[test]
fn usable_len_rejects_negative_and_nan() {
    assert!(is_usable_len(0.0));
    assert!(is_usable_len(10.5));
    assert!(!is_usable_len(-1.0));
    assert!(!is_usable_len(f64::NAN));
    assert!(!is_usable_len(f64::INFINITY));
}
