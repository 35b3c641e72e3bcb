use std::path::PathBuf;

use imprint::{BackendKind, Channels, Image, ImprintError, Pixmap, TextStyle, create_backend};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let dir = PathBuf::from("target").join("compose_demo");
    std::fs::create_dir_all(&dir)?;

    let backend = create_backend(BackendKind::Software);

    // 320x180 backdrop with a red ramp along x and a blue ramp along y.
    let mut bg = Pixmap::new(320, 180, Channels::Rgb)?;
    for y in 0..180 {
        for x in 0..320 {
            let px = bg.pixel_mut(x, y);
            px[0] = (x * 255 / 319) as u8;
            px[2] = (y * 255 / 179) as u8;
        }
    }

    // 96x96 badge whose alpha falls off radially from the center.
    let mut badge = Pixmap::new(96, 96, Channels::Rgba)?;
    for y in 0..96 {
        for x in 0..96 {
            let dx = x as f32 - 47.5;
            let dy = y as f32 - 47.5;
            let d = (dx * dx + dy * dy).sqrt();
            let px = badge.pixel_mut(x, y);
            px[0] = 255;
            px[1] = 200;
            px[3] = (255.0 * (1.0 - d / 48.0).clamp(0.0, 1.0)) as u8;
        }
    }

    let mut canvas = Image::from_pixmap(bg);
    let mut overlay = Image::from_pixmap(badge);

    let style = TextStyle {
        scale: 1.5,
        color_rgba8: [255, 255, 255, 255],
        thickness: 2,
        font: None,
    };
    match backend.render_text(&mut overlay, "demo", 8, 56, &style) {
        Ok(()) => {}
        Err(ImprintError::Font(_)) => eprintln!("no system font found; skipping the caption"),
        Err(e) => return Err(e.into()),
    }

    backend.composite(&overlay, &mut canvas, 112, 42)?;

    let out = dir.join("compose_demo.png");
    backend.save(&canvas, &out)?;
    println!("wrote {}", out.display());
    Ok(())
}
