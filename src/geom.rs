use crate::error::{ImprintError, ImprintResult};

/// A (width, height) pair in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A sub-region of an image, addressed from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when the whole region lies inside `bounds`. Widened to u64 so
    /// `x + width` cannot wrap.
    pub fn fits_within(&self, bounds: Size) -> bool {
        let right = u64::from(self.x) + u64::from(self.width);
        let bottom = u64::from(self.y) + u64::from(self.height);
        right <= u64::from(bounds.width) && bottom <= u64::from(bounds.height)
    }
}

/// Interpolation hint handed through to the resampling backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resample {
    Nearest,
    Bilinear,
    Area,
}

impl Resample {
    /// Hint selection: area averaging when shrinking, bilinear when enlarging.
    pub fn suggest(src: Size, target: Size) -> Self {
        let src_area = u64::from(src.width) * u64::from(src.height);
        let target_area = u64::from(target.width) * u64::from(target.height);
        if target_area < src_area {
            Self::Area
        } else {
            Self::Bilinear
        }
    }
}

impl std::fmt::Display for Resample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::Area => "area",
        };
        f.write_str(s)
    }
}

/// Computes the destination size for resizing `src` into `target`.
///
/// With `keep_aspect` unset the result is exactly `target` (a non-uniform
/// stretch). With it set, the result is `src` scaled by
/// `min(target.width / src.width, target.height / src.height)` so it fits
/// entirely within `target`, touching at least one side. Fractional
/// dimensions round half away from zero (`f64::round`); a dimension that
/// rounds to zero is an error, not clamped to 1.
pub fn compute_size(src: Size, target: Size, keep_aspect: bool) -> ImprintResult<Size> {
    if src.width == 0 || src.height == 0 {
        return Err(ImprintError::invalid_dimension(format!(
            "source size {}x{} must be positive",
            src.width, src.height
        )));
    }
    if target.width == 0 || target.height == 0 {
        return Err(ImprintError::invalid_dimension(format!(
            "target size {}x{} must be positive",
            target.width, target.height
        )));
    }

    if !keep_aspect {
        return Ok(target);
    }

    let sx = f64::from(target.width) / f64::from(src.width);
    let sy = f64::from(target.height) / f64::from(src.height);
    let s = sx.min(sy);

    let width = (f64::from(src.width) * s).round();
    let height = (f64::from(src.height) * s).round();
    if width < 1.0 || height < 1.0 {
        return Err(ImprintError::invalid_dimension(format!(
            "fitting {}x{} into {}x{} collapses a dimension to zero",
            src.width, src.height, target.width, target.height
        )));
    }

    Ok(Size::new(width as u32, height as u32))
}
