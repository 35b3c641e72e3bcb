use std::path::Path;

use anyhow::Context as _;

use crate::backend::GraphicsBackend;
use crate::error::{ImprintError, ImprintResult};
use crate::font::{self, TextStyle};
use crate::geom::{Resample, Size};
use crate::raster::{Channels, Image, Pixmap};

/// CPU implementation of every backend capability: `image` for decode,
/// resample, and encode, `fontdue` for glyphs, `minifb` for the preview
/// window.
#[derive(Debug, Default)]
pub struct SoftwareBackend;

impl SoftwareBackend {
    pub fn new() -> Self {
        Self
    }
}

impl GraphicsBackend for SoftwareBackend {
    fn load(&self, path: &Path) -> ImprintResult<Image> {
        let bytes = std::fs::read(path)
            .map_err(|e| ImprintError::load(format!("read '{}': {e}", path.display())))?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| ImprintError::load(format!("decode '{}': {e}", path.display())))?;
        Ok(Image::from_pixmap(pixmap_from_dynamic(decoded)?))
    }

    fn resize(&self, image: &Image, size: Size, resample: Resample) -> ImprintResult<Image> {
        let src = image.pixmap()?;
        if size.width == 0 || size.height == 0 {
            return Err(ImprintError::invalid_dimension(format!(
                "resize target {}x{} must be positive",
                size.width, size.height
            )));
        }

        let filter = filter_for(resample);
        let out = match src.channels() {
            Channels::Rgb => {
                let buf: image::RgbImage =
                    image::ImageBuffer::from_raw(src.width(), src.height(), src.data().to_vec())
                        .ok_or_else(|| {
                            ImprintError::invalid_dimension(
                                "pixel buffer does not match its extents",
                            )
                        })?;
                let resized = image::imageops::resize(&buf, size.width, size.height, filter);
                Pixmap::from_vec(size.width, size.height, Channels::Rgb, resized.into_raw())?
            }
            Channels::Rgba => {
                let buf: image::RgbaImage =
                    image::ImageBuffer::from_raw(src.width(), src.height(), src.data().to_vec())
                        .ok_or_else(|| {
                            ImprintError::invalid_dimension(
                                "pixel buffer does not match its extents",
                            )
                        })?;
                let resized = image::imageops::resize(&buf, size.width, size.height, filter);
                Pixmap::from_vec(size.width, size.height, Channels::Rgba, resized.into_raw())?
            }
        };
        Ok(Image::from_pixmap(out))
    }

    fn render_text(
        &self,
        image: &mut Image,
        text: &str,
        x: u32,
        y: u32,
        style: &TextStyle,
    ) -> ImprintResult<()> {
        font::draw_text(image, text, x, y, style)
    }

    fn show(&self, image: &Image, title: &str) -> ImprintResult<()> {
        let pixmap = image.pixmap()?;
        let width = pixmap.width() as usize;
        let height = pixmap.height() as usize;
        let framebuffer = pack_0rgb(pixmap);

        let mut window =
            minifb::Window::new(title, width, height, minifb::WindowOptions::default())
                .map_err(|e| ImprintError::window(format!("create '{title}': {e}")))?;

        while window.is_open() && !window.is_key_down(minifb::Key::Escape) {
            window
                .update_with_buffer(&framebuffer, width, height)
                .map_err(|e| ImprintError::window(format!("present frame: {e}")))?;
        }

        Ok(())
    }

    fn save(&self, image: &Image, path: &Path) -> ImprintResult<()> {
        let pixmap = image.pixmap()?;
        let format = image::ImageFormat::from_path(path)
            .with_context(|| format!("image format for '{}'", path.display()))?;
        let color = match pixmap.channels() {
            Channels::Rgb => image::ColorType::Rgb8,
            Channels::Rgba => image::ColorType::Rgba8,
        };
        image::save_buffer_with_format(
            path,
            pixmap.data(),
            pixmap.width(),
            pixmap.height(),
            color,
            format,
        )
        .with_context(|| format!("write image '{}'", path.display()))?;
        Ok(())
    }
}

fn filter_for(resample: Resample) -> image::imageops::FilterType {
    match resample {
        Resample::Nearest => image::imageops::FilterType::Nearest,
        // image has no dedicated area kernel; Triangle's support widens with
        // the shrink ratio, which averages the same way on downscale.
        Resample::Bilinear | Resample::Area => image::imageops::FilterType::Triangle,
    }
}

fn pixmap_from_dynamic(decoded: image::DynamicImage) -> ImprintResult<Pixmap> {
    if decoded.color().has_alpha() {
        let buf = decoded.to_rgba8();
        let (width, height) = buf.dimensions();
        Pixmap::from_vec(width, height, Channels::Rgba, buf.into_raw())
    } else {
        let buf = decoded.to_rgb8();
        let (width, height) = buf.dimensions();
        Pixmap::from_vec(width, height, Channels::Rgb, buf.into_raw())
    }
}

/// Rows packed as minifb's 0RGB u32 format; alpha is dropped for display.
fn pack_0rgb(pixmap: &Pixmap) -> Vec<u32> {
    let bpp = pixmap.channels().count();
    pixmap
        .data()
        .chunks_exact(bpp)
        .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]))
        .collect()
}
