use std::path::PathBuf;

use crate::error::{ImprintError, ImprintResult};
use crate::font::TextStyle;
use crate::geom::Resample;

/// One compose run: a background, an overlay stamped onto it, and an
/// optional caption drawn on the overlay first. Paths are resolved
/// relative to the scene file.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub background: String,
    pub overlay: OverlaySpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<CaptionSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct OverlaySpec {
    pub path: String,
    /// Resize-on-load box; the overlay keeps its decoded size when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitSpec>,
    pub x: u32,
    pub y: u32,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FitSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub keep_aspect: bool,
    /// Override for the interpolation hint; suggested from the size change
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resample: Option<Resample>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CaptionSpec {
    pub text: String,
    pub x: u32,
    /// Baseline of the first glyph.
    pub y: u32,
    pub scale: f32,
    pub color_rgba8: [u8; 4],
    #[serde(default = "default_thickness")]
    pub thickness: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

fn default_thickness() -> u32 {
    1
}

impl Scene {
    pub fn validate(&self) -> ImprintResult<()> {
        if self.background.trim().is_empty() {
            return Err(ImprintError::validation("background path must be non-empty"));
        }
        if self.overlay.path.trim().is_empty() {
            return Err(ImprintError::validation("overlay path must be non-empty"));
        }
        if let Some(fit) = &self.overlay.fit {
            if fit.width == 0 || fit.height == 0 {
                return Err(ImprintError::validation(format!(
                    "overlay fit box {}x{} must be positive",
                    fit.width, fit.height
                )));
            }
        }
        if let Some(caption) = &self.caption {
            caption.validate()?;
        }
        Ok(())
    }
}

impl CaptionSpec {
    pub fn validate(&self) -> ImprintResult<()> {
        if self.text.trim().is_empty() {
            return Err(ImprintError::validation("caption text must be non-empty"));
        }
        if self.scale <= 0.0 || !self.scale.is_finite() {
            return Err(ImprintError::validation(
                "caption scale must be positive and finite",
            ));
        }
        if self.thickness == 0 {
            return Err(ImprintError::validation("caption thickness must be > 0"));
        }
        Ok(())
    }

    pub fn style(&self) -> TextStyle {
        TextStyle {
            scale: self.scale,
            color_rgba8: self.color_rgba8,
            thickness: self.thickness,
            font: self.font.as_ref().map(PathBuf::from),
        }
    }
}
