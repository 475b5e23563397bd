use std::io::Cursor;
use std::path::PathBuf;

use base64::Engine as _;

use super::*;

fn tmp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "easel_loader_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn one_px_png() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, vec![1u8, 2u8, 3u8, 255u8]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./assets//bg.jpg").unwrap(), "assets/bg.jpg");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn classify_url_by_scheme() {
    assert_eq!(classify_url("data:image/png;base64,AAAA"), UrlKind::Data);
    assert_eq!(classify_url("HTTPS://example.com/a.png"), UrlKind::Http);
    assert_eq!(classify_url("http://example.com/a.png"), UrlKind::Http);
    assert_eq!(classify_url("file://assets/a.png"), UrlKind::File("assets/a.png"));
    assert_eq!(classify_url(" assets/bg.jpg "), UrlKind::File("assets/bg.jpg"));
}

#[test]
fn data_url_base64_and_plain_payloads() {
    let (mime, bytes) = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
    assert_eq!(mime, "image/png");
    assert_eq!(bytes, b"hello");

    let (mime, bytes) = decode_data_url("data:,abc").unwrap();
    assert_eq!(mime, "text/plain");
    assert_eq!(bytes, b"abc");

    assert!(decode_data_url("data:image/png;base64").is_err());
    assert!(decode_data_url("data:image/png;base64,!!!").is_err());
}

#[tokio::test]
async fn loads_relative_file_from_assets_root() {
    let dir = tmp_dir("file");
    std::fs::create_dir_all(dir.join("assets")).unwrap();
    std::fs::write(dir.join("assets/px.png"), one_px_png()).unwrap();

    let loader = FetchLoader::new(&dir);
    let img = loader.load("assets/px.png").await.unwrap();
    assert_eq!(img.size(), (1, 1));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn loads_base64_data_url() {
    let b64 = base64::engine::general_purpose::STANDARD.encode(one_px_png());
    let url = format!("data:image/png;base64,{b64}");
    let loader = FetchLoader::new(".");
    let img = loader.load(&url).await.unwrap();
    assert!(matches!(img, DecodedImage::Raster(_)));
}

#[tokio::test]
async fn missing_file_is_an_image_load_error() {
    let dir = tmp_dir("missing");
    let loader = FetchLoader::new(&dir);
    let err = loader.load("nope.png").await.unwrap_err();
    match err {
        EaselError::ImageLoad { url, .. } => assert_eq!(url, "nope.png"),
        other => panic!("expected ImageLoad, got {other:?}"),
    }
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn traversal_is_rejected_before_io() {
    let loader = FetchLoader::new(".");
    let err = loader.load("../secret.png").await.unwrap_err();
    assert!(matches!(err, EaselError::ImageLoad { .. }));
}
