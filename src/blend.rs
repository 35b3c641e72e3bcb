use crate::error::{ImprintError, ImprintResult};
use crate::geom::Rect;
use crate::raster::{Channels, Image, Pixmap};

/// Draws `source` onto `destination` at `(x, y)`, mutating the destination
/// in place.
///
/// When the channel counts differ, the 3-channel operand is treated as
/// 4-channel with a fully opaque alpha plane (a scratch copy for the source,
/// implicitly for the destination). An alpha-bearing source is blended
/// source-over per color channel, so a fully transparent source leaves any
/// destination untouched; the destination's own alpha plane, when present,
/// is never modified. A source without alpha overwrites the addressed
/// sub-region directly. Pixels outside `(x, y, source.width, source.height)`
/// are untouched. The source must fit entirely inside the destination;
/// nothing is clamped or resized here.
pub fn draw_on(source: &Image, destination: &mut Image, x: u32, y: u32) -> ImprintResult<()> {
    if !source.is_loaded() {
        return Err(ImprintError::not_loaded("source image"));
    }
    if !destination.is_loaded() {
        return Err(ImprintError::not_loaded("destination image"));
    }
    let src = source.pixmap()?;
    let dst = destination.pixmap_mut()?;

    let region = Rect::new(x, y, src.width(), src.height());
    if !region.fits_within(dst.size()) {
        return Err(ImprintError::out_of_bounds(format!(
            "{}x{} source at ({}, {}) exceeds {}x{} destination",
            src.width(),
            src.height(),
            x,
            y,
            dst.width(),
            dst.height()
        )));
    }

    blit(src, dst, x, y);
    Ok(())
}

/// Bounds are already checked; `x + src.width <= dst.width` and likewise
/// for rows.
fn blit(src: &Pixmap, dst: &mut Pixmap, x: u32, y: u32) {
    // A 3-channel source entering a 4-channel blend picks up an opaque
    // alpha plane; the destination always keeps its own layout.
    let promoted;
    let src = if src.channels() == Channels::Rgb && dst.channels() == Channels::Rgba {
        promoted = src.with_channels(Channels::Rgba);
        &promoted
    } else {
        src
    };

    let sbpp = src.channels().count();
    let dbpp = dst.channels().count();
    let blend = src.channels().has_alpha();
    let sw = src.width() as usize;
    let dw = dst.width() as usize;
    let x = x as usize;
    let y = y as usize;

    for row in 0..src.height() as usize {
        let src_start = row * sw * sbpp;
        let src_row = &src.data()[src_start..src_start + sw * sbpp];
        let dst_start = ((y + row) * dw + x) * dbpp;
        let dst_row = &mut dst.data_mut()[dst_start..dst_start + sw * dbpp];

        if blend {
            blend_row(dst_row, src_row, dbpp);
        } else {
            dst_row.copy_from_slice(src_row);
        }
    }
}

/// Source-over per color channel; `src` is RGBA, `dst` pixels are `dst_bpp`
/// bytes wide and any fourth byte is left as it was.
fn blend_row(dst: &mut [u8], src: &[u8], dst_bpp: usize) {
    for (d, s) in dst.chunks_exact_mut(dst_bpp).zip(src.chunks_exact(4)) {
        let a = s[3];
        if a == 0 {
            continue;
        }
        if a == 255 {
            d[..3].copy_from_slice(&s[..3]);
            continue;
        }
        for c in 0..3 {
            d[c] = lerp_div255(s[c], d[c], a);
        }
    }
}

/// Rounded `(src*a + dst*(255-a)) / 255`; exact at `a = 0` and `a = 255`.
pub(crate) fn lerp_div255(src: u8, dst: u8, a: u8) -> u8 {
    let a = u32::from(a);
    ((u32::from(src) * a + u32::from(dst) * (255 - a) + 127) / 255) as u8
}

/// Rounded `x*y / 255`.
pub(crate) fn mul_div255(x: u8, y: u8) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}
