use std::time::Duration;

use futures::future::BoxFuture;

use super::*;
use crate::assets::decode::DecodedImage;
use crate::foundation::core::Color;
use crate::foundation::error::EaselError;
use crate::render::recording::{DrawCall, RecordingSurface};

/// Serves a 1x1 white pixel for URLs starting with `ok`, fails everything else.
struct PrefixLoader;

impl ImageLoader for PrefixLoader {
    fn load<'a>(&'a self, url: &'a str) -> BoxFuture<'a, EaselResult<DecodedImage>> {
        Box::pin(async move {
            if url.starts_with("ok") {
                DecodedImage::from_straight_rgba8(1, 1, vec![255; 4])
            } else {
                Err(EaselError::image_load(url, anyhow::anyhow!("not found")))
            }
        })
    }
}

fn comp(json: &str) -> Composition {
    Composition::from_json_str(json).unwrap()
}

async fn run(
    c: &Composition,
    surface: &mut RecordingSurface,
    opts: &CanvasOpts,
) -> EaselResult<Sequenced> {
    let mut ticket = RenderTicket::detached();
    render(
        c,
        surface,
        &PrefixLoader,
        &mut ticket,
        opts,
        DisplaySize::new(10.0, 10.0),
    )
    .await
}

#[tokio::test]
async fn background_then_views_in_order_with_commit_after_images() {
    let c = comp(
        r##"{"width": 20, "height": 10, "backgroundColor": "#ff0000", "extra": {"k": 1},
            "views": [
                {"type": "text", "content": "a"},
                {"type": "image", "url": "ok-1", "width": 5, "height": 5},
                {"type": "text", "content": "b"}
            ]}"##,
    );
    let mut s = RecordingSurface::new(20, 10);
    let out = run(&c, &mut s, &CanvasOpts::default()).await.unwrap();

    let Sequenced::Completed(artifact) = out else {
        panic!("expected completion");
    };
    assert_eq!((artifact.width, artifact.height), (20, 10));
    assert_eq!(artifact.extra, Some(serde_json::json!({"k": 1})));
    assert_eq!(artifact.generation, 0);
    assert!(!artifact.png.is_empty());

    assert!(matches!(
        &s.calls()[..3],
        [
            DrawCall::Save,
            DrawCall::FillRect { rect, color },
            DrawCall::Restore
        ] if *rect == Rect::new(0.0, 0.0, 20.0, 10.0) && *color == Color::rgb(255, 0, 0)
    ));
    assert_eq!(s.texts(), vec!["a", "b"]);
    assert_eq!(s.commits(), 1);
    let image_at = s
        .calls()
        .iter()
        .position(|c| matches!(c, DrawCall::DrawImage { .. }))
        .unwrap();
    assert!(matches!(s.calls()[image_at + 2], DrawCall::Commit));
    assert_eq!(s.save_depth(), 0);
}

#[tokio::test]
async fn failed_image_aborts_by_default() {
    let c = comp(
        r#"{"width": 4, "height": 4, "views": [
            {"type": "image", "url": "missing.png"},
            {"type": "text", "content": "after"}
        ]}"#,
    );
    let mut s = RecordingSurface::new(4, 4);
    let err = run(&c, &mut s, &CanvasOpts::default()).await.unwrap_err();
    assert!(matches!(err, EaselError::ImageLoad { ref url, .. } if url == "missing.png"));
    assert!(s.texts().is_empty());
}

#[tokio::test]
async fn skip_policy_continues_past_a_broken_image() {
    let c = comp(
        r#"{"width": 4, "height": 4, "views": [
            {"type": "image", "url": "missing.png"},
            {"type": "text", "content": "after"}
        ]}"#,
    );
    let mut s = RecordingSurface::new(4, 4);
    let opts = CanvasOpts::default().with_image_errors(ImageErrorPolicy::Skip);
    let out = run(&c, &mut s, &opts).await.unwrap();
    assert!(matches!(out, Sequenced::Completed(_)));
    assert_eq!(s.texts(), vec!["after"]);
    assert_eq!(s.commits(), 0);
}

#[tokio::test(start_paused = true)]
async fn delay_settle_waits_instead_of_committing() {
    let c = comp(r#"{"width": 4, "height": 4, "views": [{"type": "image", "url": "ok"}]}"#);
    let mut s = RecordingSurface::new(4, 4);
    let opts = CanvasOpts::default().with_settle(SettleMode::Delay(SettleMode::LEGACY_DELAY));
    let before = tokio::time::Instant::now();
    let out = run(&c, &mut s, &opts).await.unwrap();
    assert!(matches!(out, Sequenced::Completed(_)));
    assert_eq!(s.commits(), 0);
    assert!(before.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn stale_ticket_does_not_produce_an_artifact() {
    let c = comp(r#"{"width": 4, "height": 4, "views": [{"type": "line"}]}"#);
    let (tx, rx) = tokio::sync::watch::channel(1);
    let mut ticket = RenderTicket::new(1, rx);
    tx.send_replace(2);
    let mut s = RecordingSurface::new(4, 4);
    let out = render(
        &c,
        &mut s,
        &PrefixLoader,
        &mut ticket,
        &CanvasOpts::default(),
        DisplaySize::default(),
    )
    .await
    .unwrap();
    assert!(matches!(out, Sequenced::Superseded));
}

#[tokio::test]
async fn debug_flag_follows_override() {
    let c = comp(r#"{"width": 4, "height": 4, "debug": true, "views": [{"type": "line"}]}"#);
    let mut s = RecordingSurface::new(4, 4);
    let Sequenced::Completed(a) = run(&c, &mut s, &CanvasOpts::default()).await.unwrap() else {
        panic!("expected completion");
    };
    assert!(a.debug);

    let quiet = CanvasOpts::default().with_debug(false);
    let Sequenced::Completed(b) = run(&c, &mut s, &quiet).await.unwrap() else {
        panic!("expected completion");
    };
    assert!(!b.debug);
}

#[test]
fn settle_mode_from_env_value() {
    assert_eq!(SettleMode::from_env_value(None), SettleMode::Commit);
    assert_eq!(SettleMode::from_env_value(Some("  ")), SettleMode::Commit);
    assert_eq!(SettleMode::from_env_value(Some("abc")), SettleMode::Commit);
    assert_eq!(
        SettleMode::from_env_value(Some("250")),
        SettleMode::Delay(Duration::from_millis(250))
    );
}
