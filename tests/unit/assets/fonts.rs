use super::*;

fn book_with_system_font() -> Option<FontBook> {
    let path = find_system_font()?;
    let mut book = FontBook::new();
    book.register_font_file(path).ok()?;
    Some(book)
}

#[test]
fn empty_book_measures_zero_and_shapes_nothing() {
    let mut book = FontBook::new();
    assert!(book.is_empty());
    let spec = FontSpec::default();
    assert_eq!(book.measure("hello", &spec), 0.0);
    assert!(
        book.shape_line("hello", &spec, TextBrushRgba8::default())
            .is_none()
    );
}

#[test]
fn garbage_bytes_do_not_register() {
    let mut book = FontBook::new();
    assert!(book.register_font(b"not a font".to_vec()).is_err());
    assert!(book.is_empty());
}

#[test]
fn measure_grows_with_content_when_font_present() {
    let Some(mut book) = book_with_system_font() else {
        return;
    };
    let spec = FontSpec {
        family: "Microsoft YaHei".to_owned(),
        ..FontSpec::default()
    };
    let short = book.measure("ab", &spec);
    let long = book.measure("abcdef", &spec);
    assert!(short > 0.0);
    assert!(long > short);

    let bigger = FontSpec {
        size_px: 32.0,
        ..spec.clone()
    };
    assert!(book.measure("ab", &bigger) > short);
}

#[test]
fn unknown_family_falls_back_to_first_registered() {
    let Some(mut book) = book_with_system_font() else {
        return;
    };
    let first = book.families()[0].to_owned();
    let spec = FontSpec {
        family: "'No Such Family', sans-serif".to_owned(),
        ..FontSpec::default()
    };
    let named = FontSpec {
        family: first,
        ..FontSpec::default()
    };
    assert_eq!(book.measure("fallback", &spec), book.measure("fallback", &named));
}
