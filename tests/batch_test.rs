//! Tests for the batch conversion service.

mod common;

use pretty_assertions::assert_eq;
use std::sync::Arc;

use common::fixtures::{self, INKS};
use glance_render::error::RenderError;
use glance_render::rendering::decode_png;
use glance_render::services::{BatchService, QuantizeMode};
use spectra_dither::{classify_rgb, pack_4bpp, DitherAlgorithm, DitherOptions, Rgb};

#[tokio::test]
async fn test_converts_file_to_preview_png() {
    let dir = tempfile::tempdir().unwrap();
    let rgb = fixtures::gradient_rgb([255, 0, 0], 32, 8);
    let input = fixtures::write_file(dir.path(), "ramp.png", &fixtures::png_from_rgb(&rgb, 32, 8));

    let service = BatchService::new(DitherOptions::default(), 2);
    let report = service.convert_file(&input, dir.path()).await.unwrap();

    assert_eq!(report.width, 32);
    assert_eq!(report.height, 8);
    assert_eq!(report.packed, None);
    assert_eq!(report.ink_counts.iter().sum::<usize>(), 32 * 8);

    let preview = std::fs::read(&report.preview).unwrap();
    common::assert_png(&preview);
    let decoded = decode_png(&preview).unwrap();
    common::assert_palette_closed(decoded.as_bytes());
}

#[tokio::test]
async fn test_packed_output_matches_device_classifier() {
    let dir = tempfile::tempdir().unwrap();
    let rgb = fixtures::gradient_rgb([40, 120, 220], 15, 5);
    let input = fixtures::write_file(dir.path(), "sky.png", &fixtures::png_from_rgb(&rgb, 15, 5));

    let service = BatchService::new(DitherOptions::default(), 1).packed_output(true);
    let report = service.convert_file(&input, dir.path()).await.unwrap();

    let packed_path = report.packed.expect("packed buffer should be written");
    let packed = std::fs::read(packed_path).unwrap();
    common::assert_packed_len(&packed, 15 * 5);
    common::assert_valid_nibbles(&packed);

    // The driver re-classifies the preview's RGB; it must land on the same indices
    let preview = decode_png(&std::fs::read(&report.preview).unwrap()).unwrap();
    let reclassified: Vec<_> = preview.pixels().map(classify_rgb).collect();
    assert_eq!(pack_4bpp(&reclassified), packed);
}

#[tokio::test]
async fn test_transparent_pixels_become_white() {
    let dir = tempfile::tempdir().unwrap();
    let rgba = [0u8, 0, 0, 0].repeat(4);
    let input = fixtures::write_file(dir.path(), "clear.png", &fixtures::png_from_rgba(&rgba, 2, 2));

    let service = BatchService::new(DitherOptions::default(), 1).packed_output(true);
    let report = service.convert_file(&input, dir.path()).await.unwrap();

    assert_eq!(report.ink_counts, [0, 4, 0, 0, 0, 0]);
    let packed = std::fs::read(report.packed.unwrap()).unwrap();
    assert_eq!(packed, vec![0x11, 0x11]);
}

#[tokio::test]
async fn test_batch_keeps_input_order_and_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    let mut inputs = Vec::new();
    for (i, ink) in INKS.iter().enumerate() {
        let png = fixtures::png_from_rgb(&fixtures::solid_rgb(*ink, 4, 4), 4, 4);
        inputs.push(fixtures::write_file(dir.path(), &format!("ink{i}.png"), &png));
    }
    inputs.insert(3, fixtures::write_file(dir.path(), "broken.png", b"not a png"));

    let service = Arc::new(BatchService::new(DitherOptions::default(), 3));
    let results = service.run(inputs.clone(), out.clone()).await;

    let order: Vec<_> = results.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(order, inputs);

    let failures: Vec<_> = results.iter().filter(|(_, r)| r.is_err()).collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0].1, Err(RenderError::PngDecode(_))));

    // Solid inks are already on the palette and come back untouched
    for (input, result) in &results {
        let Ok(report) = result else { continue };
        let original = decode_png(&std::fs::read(input).unwrap()).unwrap();
        let preview = decode_png(&std::fs::read(&report.preview).unwrap()).unwrap();
        assert_eq!(preview.as_bytes(), original.as_bytes());
    }
}

#[tokio::test]
async fn test_algorithms_produce_different_mosaics() {
    let dir = tempfile::tempdir().unwrap();
    let rgb = fixtures::solid_rgb([200, 0, 0], 40, 40);
    let input = fixtures::write_file(dir.path(), "red.png", &fixtures::png_from_rgb(&rgb, 40, 40));
    let fs_dir = dir.path().join("fs");
    let at_dir = dir.path().join("at");
    std::fs::create_dir(&fs_dir).unwrap();
    std::fs::create_dir(&at_dir).unwrap();

    let fs = BatchService::new(DitherOptions::default(), 1)
        .convert_file(&input, &fs_dir)
        .await
        .unwrap();
    let at = BatchService::new(DitherOptions::new().algorithm(DitherAlgorithm::Atkinson), 1)
        .convert_file(&input, &at_dir)
        .await
        .unwrap();

    // Only red and black are needed to render a dark red
    for report in [&fs, &at] {
        let [black, white, yellow, red, blue, green] = report.ink_counts;
        assert_eq!(white + yellow + blue + green, 0);
        assert!(red > black);
    }
    assert!(at.ink_counts[3] > fs.ink_counts[3]);
}

#[tokio::test]
async fn test_adaptive_mode_maps_without_diffusion() {
    let dir = tempfile::tempdir().unwrap();
    let rgb = fixtures::solid_rgb([230, 30, 20], 6, 6);
    let input = fixtures::write_file(dir.path(), "warm.png", &fixtures::png_from_rgb(&rgb, 6, 6));

    let service = BatchService::new(DitherOptions::default(), 1).mode(QuantizeMode::Adaptive);
    let report = service.convert_file(&input, dir.path()).await.unwrap();

    assert_eq!(report.ink_counts, [0, 0, 0, 36, 0, 0]);
    let preview = decode_png(&std::fs::read(&report.preview).unwrap()).unwrap();
    assert!(preview.pixels().all(|px| px == Rgb::new(255, 0, 0)));
}
