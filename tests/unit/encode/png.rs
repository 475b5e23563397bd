use super::*;

#[test]
fn unpremultiply_restores_straight_channels() {
    let out = unpremultiply_rgba8(&[64, 32, 0, 128, 9, 9, 9, 0, 10, 20, 30, 255]);
    assert_eq!(&out[0..4], &[128, 64, 0, 128]);
    assert_eq!(&out[4..8], &[0, 0, 0, 0]);
    assert_eq!(&out[8..12], &[10, 20, 30, 255]);
}

#[test]
fn png_has_signature_and_decodes_back() {
    let mut frame = FrameRGBA::blank(3, 2);
    frame.data[0..4].copy_from_slice(&[255, 0, 0, 255]);
    let png = encode_png(&frame).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(2, 1).0, [0, 0, 0, 0]);
}

#[test]
fn mismatched_buffer_is_an_encode_error() {
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 7],
        premultiplied: true,
    };
    assert!(matches!(encode_png(&frame), Err(EaselError::Encode(_))));
}

#[test]
fn data_url_prefix() {
    let url = png_data_url(&[1, 2, 3]);
    assert_eq!(url, "data:image/png;base64,AQID");
}
