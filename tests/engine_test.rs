mod common;

use common::*;
use image_variants::{ContentHandle, VariantEngine, VariantErrorKind};

#[tokio::test]
async fn test_derive_runs_off_thread() {
    let ws = Workspace::new();
    let source = ws.write_source("warrior.png", &encode_png(&sample_image(60, 48)));
    let engine = VariantEngine::new(ws.pipeline());

    let paths = engine
        .derive_or_empty(ContentHandle::new(file_uri(&source)))
        .await;

    assert!(!paths.is_empty());
    assert!(std::path::Path::new(&paths.original).exists());
    assert!(std::path::Path::new(&paths.preview).exists());
}

#[tokio::test]
async fn test_unreadable_handle_yields_empty_sentinel() {
    let ws = Workspace::new();
    let engine = VariantEngine::new(ws.pipeline());

    let paths = engine
        .derive_or_empty(ContentHandle::new("/definitely/not/here.jpg"))
        .await;

    assert!(paths.is_empty());
    assert!(ws.output_files().is_empty());
}

#[tokio::test]
async fn test_corrupt_source_yields_empty_sentinel() {
    let ws = Workspace::new();
    let source = ws.write_source("noise.jpg", &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x42]);
    let engine = VariantEngine::new(ws.pipeline());

    let paths = engine
        .derive_or_empty(ContentHandle::new(source.to_str().unwrap()))
        .await;

    assert!(paths.is_empty());
    assert!(ws.output_files().is_empty());
}

#[tokio::test]
async fn test_derive_reports_error_kind() {
    let ws = Workspace::new();
    let engine = VariantEngine::new(ws.pipeline());

    let err = engine
        .derive(ContentHandle::new("https://cdn.example.com/a.jpg"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), VariantErrorKind::SourceUnreadable);
}

#[tokio::test]
async fn test_derive_all_keeps_order_and_isolates_failures() {
    let ws = Workspace::new();
    let good = ws.write_source("good.png", &encode_png(&sample_image(36, 36)));
    let bad = ws.write_source("bad.png", b"nope");
    let engine = VariantEngine::new(ws.pipeline());

    let results = engine
        .derive_all(vec![
            ContentHandle::new(good.to_str().unwrap()),
            ContentHandle::new(bad.to_str().unwrap()),
            ContentHandle::new(good.to_str().unwrap()),
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1].as_ref().unwrap_err().kind(),
        VariantErrorKind::DecodeFailed
    );
    assert!(results[2].is_ok());
}

#[tokio::test]
async fn test_copy_video_or_empty() {
    let ws = Workspace::new();
    let source = ws.write_source("savasana.mov", b"moov");
    let engine = VariantEngine::new(ws.pipeline());

    let path = engine
        .copy_video_or_empty(ContentHandle::new(source.to_str().unwrap()))
        .await;
    assert!(path.ends_with("savasana.mov"));

    let missing = engine
        .copy_video_or_empty(ContentHandle::new(ws.sources().join("x.mov").to_str().unwrap()))
        .await;
    assert!(missing.is_empty());
}
