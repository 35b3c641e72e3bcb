use std::path::{Path, PathBuf};

use imprint::{
    BackendKind, CaptionSpec, Channels, FitSpec, ImprintError, OverlaySpec, Resample, Scene, Size,
    compose_scene, create_backend, load_fitted,
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "imprint_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_rgb_png(path: &Path, width: u32, height: u32, px: [u8; 3]) {
    image::RgbImage::from_pixel(width, height, image::Rgb(px))
        .save(path)
        .unwrap();
}

fn plain_scene(x: u32, y: u32) -> Scene {
    Scene {
        background: "bg.png".into(),
        overlay: OverlaySpec {
            path: "fg.png".into(),
            fit: None,
            x,
            y,
        },
        caption: None,
    }
}

#[test]
fn load_preserves_the_decoded_channel_count() {
    let tmp = temp_dir("load_channels");
    write_rgb_png(&tmp.join("rgb.png"), 3, 3, [9, 8, 7]);
    image::RgbaImage::from_pixel(3, 3, image::Rgba([9, 8, 7, 60]))
        .save(tmp.join("rgba.png"))
        .unwrap();

    let backend = create_backend(BackendKind::Software);

    let rgb = backend.load(&tmp.join("rgb.png")).unwrap();
    assert_eq!(rgb.pixmap().unwrap().channels(), Channels::Rgb);
    assert_eq!(rgb.pixmap().unwrap().pixel(0, 0), &[9, 8, 7]);

    let rgba = backend.load(&tmp.join("rgba.png")).unwrap();
    assert_eq!(rgba.pixmap().unwrap().channels(), Channels::Rgba);
    assert_eq!(rgba.pixmap().unwrap().pixel(2, 2), &[9, 8, 7, 60]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn load_rejects_files_that_are_not_images() {
    let tmp = temp_dir("load_not_an_image");
    let path = tmp.join("notes.txt");
    std::fs::write(&path, "not pixels").unwrap();

    let backend = create_backend(BackendKind::Software);
    let err = backend.load(&path).unwrap_err();
    assert!(matches!(err, ImprintError::Load(_)));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn load_fitted_scales_into_the_box() {
    let tmp = temp_dir("fit_box");
    write_rgb_png(&tmp.join("wide.png"), 200, 100, [10, 20, 30]);

    let fit = FitSpec {
        width: 100,
        height: 100,
        keep_aspect: true,
        resample: None,
    };
    let backend = create_backend(BackendKind::Software);
    let image = load_fitted(backend.as_ref(), &tmp.join("wide.png"), Some(&fit)).unwrap();
    assert_eq!(image.pixmap().unwrap().size(), Size::new(100, 50));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn load_fitted_stretches_when_aspect_is_off() {
    let tmp = temp_dir("fit_stretch");
    write_rgb_png(&tmp.join("wide.png"), 200, 100, [10, 20, 30]);

    let fit = FitSpec {
        width: 100,
        height: 100,
        keep_aspect: false,
        resample: Some(Resample::Nearest),
    };
    let backend = create_backend(BackendKind::Software);
    let image = load_fitted(backend.as_ref(), &tmp.join("wide.png"), Some(&fit)).unwrap();
    assert_eq!(image.pixmap().unwrap().size(), Size::new(100, 100));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn noop_fit_leaves_the_pixels_untouched() {
    // A 4x4 source fitted into a 4x4 box skips the resize, so even a
    // smoothing kernel cannot disturb the pixels.
    let tmp = temp_dir("fit_noop");
    write_rgb_png(&tmp.join("same.png"), 4, 4, [200, 0, 0]);

    let fit = FitSpec {
        width: 4,
        height: 4,
        keep_aspect: true,
        resample: Some(Resample::Bilinear),
    };
    let backend = create_backend(BackendKind::Software);
    let image = load_fitted(backend.as_ref(), &tmp.join("same.png"), Some(&fit)).unwrap();
    assert_eq!(image.pixmap().unwrap().pixel(2, 2), &[200, 0, 0]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn composed_overlay_covers_exactly_its_region() {
    let tmp = temp_dir("compose_region");
    write_rgb_png(&tmp.join("bg.png"), 20, 20, [0, 0, 0]);
    write_rgb_png(&tmp.join("fg.png"), 10, 10, [255, 255, 255]);

    let backend = create_backend(BackendKind::Software);
    let out = compose_scene(backend.as_ref(), &plain_scene(5, 5), &tmp).unwrap();
    let pm = out.pixmap().unwrap();

    assert_eq!(pm.size(), Size::new(20, 20));
    assert_eq!(pm.pixel(4, 4), &[0, 0, 0]);
    assert_eq!(pm.pixel(5, 5), &[255, 255, 255]);
    assert_eq!(pm.pixel(14, 14), &[255, 255, 255]);
    assert_eq!(pm.pixel(15, 15), &[0, 0, 0]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn translucent_overlay_blends_with_the_background() {
    let tmp = temp_dir("compose_alpha");
    write_rgb_png(&tmp.join("bg.png"), 4, 4, [0, 0, 0]);
    image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 128]))
        .save(tmp.join("fg.png"))
        .unwrap();

    let backend = create_backend(BackendKind::Software);
    let out = compose_scene(backend.as_ref(), &plain_scene(1, 1), &tmp).unwrap();
    let pm = out.pixmap().unwrap();

    // 255 * 128/255 rounds to 128.
    assert_eq!(pm.pixel(1, 1), &[128, 128, 128]);
    assert_eq!(pm.pixel(0, 0), &[0, 0, 0]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn fitted_overlay_lands_at_the_requested_offset() {
    let tmp = temp_dir("compose_fitted");
    write_rgb_png(&tmp.join("bg.png"), 40, 40, [0, 0, 0]);
    write_rgb_png(&tmp.join("fg.png"), 20, 10, [0, 200, 0]);

    // 20x10 into a 10x10 box keeps the 2:1 aspect, so the overlay becomes
    // 10x5 and its far corner lands on (39, 39).
    let mut scene = plain_scene(30, 35);
    scene.overlay.fit = Some(FitSpec {
        width: 10,
        height: 10,
        keep_aspect: true,
        resample: Some(Resample::Nearest),
    });

    let backend = create_backend(BackendKind::Software);
    let out = compose_scene(backend.as_ref(), &scene, &tmp).unwrap();
    let pm = out.pixmap().unwrap();

    assert_eq!(pm.pixel(30, 35), &[0, 200, 0]);
    assert_eq!(pm.pixel(39, 39), &[0, 200, 0]);
    assert_eq!(pm.pixel(29, 35), &[0, 0, 0]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn oversized_overlay_is_rejected_not_clipped() {
    let tmp = temp_dir("compose_oob");
    write_rgb_png(&tmp.join("bg.png"), 8, 8, [0, 0, 0]);
    write_rgb_png(&tmp.join("fg.png"), 8, 8, [255, 255, 255]);

    let backend = create_backend(BackendKind::Software);
    let err = compose_scene(backend.as_ref(), &plain_scene(1, 0), &tmp).unwrap_err();
    assert!(matches!(err, ImprintError::OutOfBounds(_)));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn saved_output_reloads_with_the_same_pixels() {
    let tmp = temp_dir("compose_save");
    write_rgb_png(&tmp.join("bg.png"), 16, 16, [40, 50, 60]);
    write_rgb_png(&tmp.join("fg.png"), 4, 4, [200, 10, 10]);

    let backend = create_backend(BackendKind::Software);
    let out = compose_scene(backend.as_ref(), &plain_scene(6, 6), &tmp).unwrap();

    let out_path = tmp.join("result.png");
    backend.save(&out, &out_path).unwrap();

    let reloaded = backend.load(&out_path).unwrap();
    let pm = reloaded.pixmap().unwrap();
    assert_eq!(pm.size(), Size::new(16, 16));
    assert_eq!(pm.pixel(0, 0), &[40, 50, 60]);
    assert_eq!(pm.pixel(7, 7), &[200, 10, 10]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn captioned_overlay_differs_from_the_plain_one() {
    let tmp = temp_dir("compose_caption");
    write_rgb_png(&tmp.join("bg.png"), 80, 80, [0, 0, 0]);
    write_rgb_png(&tmp.join("fg.png"), 60, 40, [0, 0, 0]);

    let mut scene = plain_scene(10, 10);
    scene.caption = Some(CaptionSpec {
        text: "Hi".into(),
        x: 4,
        y: 30,
        scale: 1.0,
        color_rgba8: [255, 255, 255, 255],
        thickness: 1,
        font: None,
    });

    let backend = create_backend(BackendKind::Software);
    let out = match compose_scene(backend.as_ref(), &scene, &tmp) {
        Ok(out) => out,
        // Headless machines without any system font cannot rasterize.
        Err(ImprintError::Font(_)) => return,
        Err(e) => panic!("compose failed: {e}"),
    };

    let pm = out.pixmap().unwrap();
    let marked = (10..70).any(|x| (10..50).any(|y| pm.pixel(x, y) != [0, 0, 0]));
    assert!(marked, "caption left no visible pixels");

    std::fs::remove_dir_all(&tmp).ok();
}
