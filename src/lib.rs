//! Imprint stamps overlays and captions onto images (CPU, no event loop).
//!
//! The demo flow is: load a background, load and aspect-fit an overlay,
//! caption it, source-over composite it onto the background, then show or
//! save. The fit math ([`compute_size`]) and the compositor ([`draw_on`])
//! are backend-agnostic; decoding, resampling, glyph rasterization, and the
//! preview window sit behind the [`GraphicsBackend`] capability trait.
#![forbid(unsafe_code)]

pub mod backend;
pub mod backend_software;
pub mod blend;
pub mod error;
pub mod font;
pub mod geom;
pub mod pipeline;
pub mod raster;
pub mod scene;

pub use backend::{BackendKind, GraphicsBackend, create_backend};
pub use backend_software::SoftwareBackend;
pub use blend::draw_on;
pub use error::{ImprintError, ImprintResult};
pub use font::{TextStyle, draw_text};
pub use geom::{Rect, Resample, Size, compute_size};
pub use pipeline::{compose_scene, load_fitted};
pub use raster::{Channels, Image, Pixmap};
pub use scene::{CaptionSpec, FitSpec, OverlaySpec, Scene};
