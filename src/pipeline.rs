use std::path::{Path, PathBuf};

use crate::backend::GraphicsBackend;
use crate::error::ImprintResult;
use crate::geom::{self, Resample, Size};
use crate::raster::Image;
use crate::scene::{FitSpec, Scene};

/// Loads `path` and, when `fit` is present, scales the decoded image into
/// the fit box.
///
/// Without an explicit resample kind the choice falls back to
/// [`Resample::suggest`], so downscales get an averaging kernel and
/// upscales stay smooth.
#[tracing::instrument(skip(backend))]
pub fn load_fitted(
    backend: &dyn GraphicsBackend,
    path: &Path,
    fit: Option<&FitSpec>,
) -> ImprintResult<Image> {
    let image = backend.load(path)?;
    let Some(fit) = fit else {
        return Ok(image);
    };

    let src = image.pixmap()?.size();
    let fitted = geom::compute_size(src, Size::new(fit.width, fit.height), fit.keep_aspect)?;
    if fitted == src {
        return Ok(image);
    }

    let resample = fit
        .resample
        .unwrap_or_else(|| Resample::suggest(src, fitted));
    backend.resize(&image, fitted, resample)
}

/// Runs a whole scene: load the background, load and fit the overlay,
/// caption the overlay, then blend it onto the background.
///
/// Relative paths in the scene resolve against `scene_root`.
#[tracing::instrument(skip(backend, scene))]
pub fn compose_scene(
    backend: &dyn GraphicsBackend,
    scene: &Scene,
    scene_root: &Path,
) -> ImprintResult<Image> {
    scene.validate()?;

    let mut canvas = backend.load(&resolve(scene_root, &scene.background))?;
    let mut overlay = load_fitted(
        backend,
        &resolve(scene_root, &scene.overlay.path),
        scene.overlay.fit.as_ref(),
    )?;

    if let Some(caption) = &scene.caption {
        let mut style = caption.style();
        if let Some(font) = style.font.take() {
            style.font = Some(resolve(scene_root, font));
        }
        backend.render_text(&mut overlay, &caption.text, caption.x, caption.y, &style)?;
    }

    backend.composite(&overlay, &mut canvas, scene.overlay.x, scene.overlay.y)?;
    Ok(canvas)
}

fn resolve(root: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
