use crate::error::{ImprintError, ImprintResult};
use crate::geom::Size;

/// Channel layout of a pixel buffer. Three channels are opaque RGB, four
/// carry an alpha plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    pub const fn count(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }
}

/// An owned, row-major u8 pixel grid. Dimensions are positive by
/// construction; the buffer length is always `width * height * channels`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl Pixmap {
    /// A zeroed pixmap. Zero extents are rejected.
    pub fn new(width: u32, height: u32, channels: Channels) -> ImprintResult<Self> {
        let len = Self::buffer_len(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0; len],
        })
    }

    /// Wraps an existing buffer, validating its length against the extents.
    pub fn from_vec(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> ImprintResult<Self> {
        let len = Self::buffer_len(width, height, channels)?;
        if data.len() != len {
            return Err(ImprintError::invalid_dimension(format!(
                "buffer of {} bytes does not match {}x{} with {} channels",
                data.len(),
                width,
                height,
                channels.count()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    fn buffer_len(width: u32, height: u32, channels: Channels) -> ImprintResult<usize> {
        if width == 0 || height == 0 {
            return Err(ImprintError::invalid_dimension(format!(
                "pixmap size {width}x{height} must be positive"
            )));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels.count()))
            .ok_or_else(|| {
                ImprintError::invalid_dimension(format!("pixmap size {width}x{height} overflows"))
            })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn channels(&self) -> Channels {
        self.channels
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The components of one pixel. Callers keep `x < width` and
    /// `y < height`; like slice indexing, out of range panics.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let bpp = self.channels.count();
        let i = (y as usize * self.width as usize + x as usize) * bpp;
        &self.data[i..i + bpp]
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let bpp = self.channels.count();
        let i = (y as usize * self.width as usize + x as usize) * bpp;
        &mut self.data[i..i + bpp]
    }

    /// A copy converted to `channels`: promoting adds a fully opaque alpha
    /// plane, demoting drops the alpha plane.
    pub fn with_channels(&self, channels: Channels) -> Self {
        if channels == self.channels {
            return self.clone();
        }

        let pixel_count = self.width as usize * self.height as usize;
        let mut data = Vec::with_capacity(pixel_count * channels.count());
        match (self.channels, channels) {
            (Channels::Rgb, Channels::Rgba) => {
                for px in self.data.chunks_exact(3) {
                    data.extend_from_slice(px);
                    data.push(255);
                }
            }
            (Channels::Rgba, Channels::Rgb) => {
                for px in self.data.chunks_exact(4) {
                    data.extend_from_slice(&px[..3]);
                }
            }
            _ => unreachable!("equal channel counts handled above"),
        }

        Self {
            width: self.width,
            height: self.height,
            channels,
            data,
        }
    }
}

/// An image handle that is either loaded (owns a [`Pixmap`]) or a distinct
/// unloaded state. Operations on an unloaded image fail with `NotLoaded`;
/// a loaded image is never zero-sized.
#[derive(Clone, Debug, Default)]
pub struct Image {
    pixmap: Option<Pixmap>,
}

impl Image {
    pub const fn unloaded() -> Self {
        Self { pixmap: None }
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            pixmap: Some(pixmap),
        }
    }

    pub const fn is_loaded(&self) -> bool {
        self.pixmap.is_some()
    }

    pub fn pixmap(&self) -> ImprintResult<&Pixmap> {
        self.pixmap
            .as_ref()
            .ok_or_else(|| ImprintError::not_loaded("image has no pixel data"))
    }

    pub fn pixmap_mut(&mut self) -> ImprintResult<&mut Pixmap> {
        self.pixmap
            .as_mut()
            .ok_or_else(|| ImprintError::not_loaded("image has no pixel data"))
    }

    pub fn into_pixmap(self) -> ImprintResult<Pixmap> {
        self.pixmap
            .ok_or_else(|| ImprintError::not_loaded("image has no pixel data"))
    }
}
