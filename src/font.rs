use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use fontdue::{Font, FontSettings};

use crate::blend::{lerp_div255, mul_div255};
use crate::error::{ImprintError, ImprintResult};
use crate::raster::{Image, Pixmap};

/// Pixel height of caption text at scale 1.0.
const BASE_GLYPH_PX: f32 = 16.0;

/// Common system font locations, searched when a style names no font file.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Caption styling handed to the text collaborator.
#[derive(Clone, Debug)]
pub struct TextStyle {
    /// Multiplier over the 16 px base glyph height.
    pub scale: f32,
    pub color_rgba8: [u8; 4],
    /// Faux-bold width in pixels; glyphs re-stamp at 1 px horizontal offsets.
    pub thickness: u32,
    /// Explicit font file; the system font search runs when absent.
    pub font: Option<PathBuf>,
}

static SYSTEM_FONT: OnceLock<Option<Font>> = OnceLock::new();

/// The memoized system font. The search runs once per process; a failed
/// search is memoized as well.
fn system_font() -> ImprintResult<&'static Font> {
    SYSTEM_FONT
        .get_or_init(|| {
            FONT_SEARCH_PATHS.iter().find_map(|path| {
                let data = std::fs::read(path).ok()?;
                Font::from_bytes(data, FontSettings::default()).ok()
            })
        })
        .as_ref()
        .ok_or_else(|| ImprintError::font("no usable font in the system font directories"))
}

fn load_font_file(path: &Path) -> ImprintResult<Font> {
    let data = std::fs::read(path)
        .map_err(|e| ImprintError::font(format!("read '{}': {e}", path.display())))?;
    Font::from_bytes(data, FontSettings::default())
        .map_err(|e| ImprintError::font(format!("parse '{}': {e}", path.display())))
}

/// Draws `text` onto `image` with `(x, y)` as the baseline origin of the
/// first glyph. Glyph pixels falling outside the image are clipped, not
/// errors. The image's alpha plane, when present, is not modified.
pub fn draw_text(
    image: &mut Image,
    text: &str,
    x: u32,
    y: u32,
    style: &TextStyle,
) -> ImprintResult<()> {
    if style.scale <= 0.0 || !style.scale.is_finite() {
        return Err(ImprintError::validation(
            "text scale must be positive and finite",
        ));
    }
    if style.thickness == 0 {
        return Err(ImprintError::validation("text thickness must be at least 1"));
    }

    let pixmap = image.pixmap_mut()?;

    let loaded;
    let font = match style.font.as_deref() {
        Some(path) => {
            loaded = load_font_file(path)?;
            &loaded
        }
        None => system_font()?,
    };

    let px_size = BASE_GLYPH_PX * style.scale;
    let mut cursor_x = x as f32;
    for ch in text.chars() {
        if ch.is_control() {
            continue;
        }
        let (metrics, coverage) = font.rasterize(ch, px_size);
        let left = cursor_x.round() as i64 + i64::from(metrics.xmin);
        let top = i64::from(y) - (metrics.height as i64 + i64::from(metrics.ymin));
        for pass in 0..style.thickness {
            stamp_glyph(
                pixmap,
                &coverage,
                metrics.width,
                metrics.height,
                left + i64::from(pass),
                top,
                style.color_rgba8,
            );
        }
        cursor_x += metrics.advance_width;
    }

    Ok(())
}

/// Blends one coverage bitmap into the pixmap at (`left`, `top`). Coverage
/// scales the style color's alpha; color channels blend source-over and any
/// destination alpha plane stays as it was.
fn stamp_glyph(
    pixmap: &mut Pixmap,
    coverage: &[u8],
    glyph_w: usize,
    glyph_h: usize,
    left: i64,
    top: i64,
    color: [u8; 4],
) {
    let width = i64::from(pixmap.width());
    let height = i64::from(pixmap.height());

    for gy in 0..glyph_h {
        let py = top + gy as i64;
        if py < 0 || py >= height {
            continue;
        }
        for gx in 0..glyph_w {
            let px = left + gx as i64;
            if px < 0 || px >= width {
                continue;
            }
            let a = mul_div255(coverage[gy * glyph_w + gx], color[3]);
            if a == 0 {
                continue;
            }
            let out = pixmap.pixel_mut(px as u32, py as u32);
            for c in 0..3 {
                out[c] = lerp_div255(color[c], out[c], a);
            }
        }
    }
}
