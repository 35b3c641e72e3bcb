use std::path::Path;

use crate::blend;
use crate::error::ImprintResult;
use crate::font::TextStyle;
use crate::geom::{Resample, Size};
use crate::raster::Image;

/// The capability set a graphics backend provides: decode, resample, glyph
/// drawing, presentation, and encode. Compositing has a provided body; it
/// is backend-agnostic and touches pixels only through [`Image`].
pub trait GraphicsBackend {
    /// Decodes `path`, preserving the source's channel count.
    fn load(&self, path: &Path) -> ImprintResult<Image>;

    /// Resamples `image` to `size` with the given interpolation hint.
    fn resize(&self, image: &Image, size: Size, resample: Resample) -> ImprintResult<Image>;

    /// Draws glyphs in place; `(x, y)` is the baseline origin of the first
    /// glyph.
    fn render_text(
        &self,
        image: &mut Image,
        text: &str,
        x: u32,
        y: u32,
        style: &TextStyle,
    ) -> ImprintResult<()>;

    /// Blocking preview window, dismissed with Escape or the close button.
    fn show(&self, image: &Image, title: &str) -> ImprintResult<()>;

    /// Encodes to `path`, format chosen from the extension.
    fn save(&self, image: &Image, path: &Path) -> ImprintResult<()>;

    /// Blends `source` onto `destination` at `(x, y)` in place.
    fn composite(
        &self,
        source: &Image,
        destination: &mut Image,
        x: u32,
        y: u32,
    ) -> ImprintResult<()> {
        blend::draw_on(source, destination, x, y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Software,
}

pub fn create_backend(kind: BackendKind) -> Box<dyn GraphicsBackend> {
    match kind {
        BackendKind::Software => Box::new(crate::backend_software::SoftwareBackend::new()),
    }
}
