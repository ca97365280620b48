// Copyright 2025 the Cropzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exporting crops from a laid-out editor.

use std::rc::Rc;

use cropzoom::{ClipType, CropClipView, CropError, ExportFormat, PixelRect, Rotation};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use kurbo::{Point, Size};

/// Raw 200x100 image: left half red, right half blue.
fn halves() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(200, 100, |x, _| {
        if x < 100 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
    }))
}

fn editor<B: cropzoom::Bitmap>(bitmap: B, rotation: Rotation) -> CropClipView<B> {
    let mut editor = CropClipView::new(ClipType::Rectangle);
    editor.layout(Size::new(400.0, 600.0));
    editor.view_mut().set_image(bitmap, rotation);
    editor
}

#[test]
fn export_is_turned_to_displayed_orientation() {
    let editor = editor(halves(), Rotation::Deg90);
    // The quarter turn shows red on top; the centered square hole covers the
    // middle of the oriented image.
    assert_eq!(editor.crop_rect_image(), Some(PixelRect::new(50, 0, 150, 100)));

    let png = editor.export(ExportFormat::Png).unwrap();
    let out = cropzoom_bitmap::decode(&png).unwrap();
    assert_eq!(out.dimensions(), (100, 100));
    assert_eq!(out.get_pixel(50, 10).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(50, 90).0, [0, 0, 255, 255]);
}

#[test]
fn upright_export_keeps_orientation() {
    let editor = editor(halves(), Rotation::Deg0);
    let out = editor.cropped_image().unwrap();
    assert_eq!(out.dimensions(), (100, 100));
    assert_eq!(out.get_pixel(10, 50).0[0], 255);
    assert_eq!(out.get_pixel(90, 50).0[2], 255);
}

#[test]
fn zoomed_export_is_smaller_region() {
    let mut editor = editor(halves(), Rotation::Deg0);
    editor.view_mut().zoom_to(2.0, Point::new(200.0, 300.0));
    let region = editor.crop_rect_image().unwrap();
    assert_eq!((region.width(), region.height()), (50, 50));
    let jpeg = editor.export(ExportFormat::Jpeg { quality: 80 }).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
}

#[test]
fn shared_bitmaps_export_too() {
    let shared = Rc::new(halves());
    let editor = editor(Rc::clone(&shared), Rotation::Deg180);
    let out = editor.cropped_image().unwrap();
    // Half a turn puts blue on the left.
    assert_eq!(out.get_pixel(10, 50).0[2], 255);
    assert_eq!(Rc::strong_count(&shared), 2);
}

#[test]
fn empty_editor_reports_why() {
    let unsized_editor: CropClipView<DynamicImage> = CropClipView::default();
    assert!(matches!(
        unsized_editor.export(ExportFormat::Png),
        Err(CropError::NotLaidOut)
    ));

    let mut empty: CropClipView<DynamicImage> = CropClipView::default();
    empty.layout(Size::new(100.0, 100.0));
    let err = empty.export(ExportFormat::default()).unwrap_err();
    assert_eq!(err.to_string(), "no image to crop");
}
