//! Writing sweeps to GIF files
//!
//! [`export`] is strict and returns every failure. [`save_animations`] is the
//! best-effort batch used by the command line: a failure ends the batch and is
//! turned into a printable diagnostic instead of an error.
//!
use std::borrow::Borrow;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::animation::Animation;
use crate::error::ExportError;
use crate::frame::FrameState;
use crate::render::FrameRenderer;

/// Playback rate of exported animations.
pub const DEFAULT_FPS: u32 = 2;

pub fn output_file_name(dataset: &str) -> String {
    format!("{}_max_depth_animation.gif", dataset)
}

/// Writes every frame of `animation` to a GIF at `path`, one frame every
/// `1000 / fps` milliseconds.
pub fn export(animation: &Animation, path: &Path, fps: u32) -> Result<(), ExportError> {
    export_with(animation, path, fps, &FrameRenderer::default())
}

/// Like [`export`], drawing with `renderer`. Frames are fitted as they are
/// written.
pub fn export_with(
    animation: &Animation,
    path: &Path,
    fps: u32,
    renderer: &FrameRenderer,
) -> Result<(), ExportError> {
    write_gif(animation, animation.frames(), path, fps, renderer)
}

/// Writes frames that were already computed from `animation`.
pub fn export_frames(
    animation: &Animation,
    frames: &[FrameState],
    path: &Path,
    fps: u32,
    renderer: &FrameRenderer,
) -> Result<(), ExportError> {
    write_gif(animation, frames.iter().map(Ok), path, fps, renderer)
}

#[cfg(feature = "gif")]
#[tracing::instrument(skip(animation, frames, renderer), fields(label = animation.label()))]
fn write_gif<F, I>(
    animation: &Animation,
    frames: I,
    path: &Path,
    fps: u32,
    renderer: &FrameRenderer,
) -> Result<(), ExportError>
where
    F: Borrow<FrameState>,
    I: IntoIterator<Item = crate::Result<F>>,
{
    use plotters::prelude::*;

    if fps == 0 {
        return Err(ExportError::InvalidFrameRate);
    }
    let write_error = |e: &dyn std::fmt::Display| ExportError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let backend = BitMapBackend::gif(path, renderer.size, 1000 / fps).map_err(|e| write_error(&e))?;
    let root = backend.into_drawing_area();
    let mut written = 0;
    for frame in frames {
        let frame = frame?;
        renderer.draw(&root, animation, frame.borrow())?;
        root.present().map_err(|e| write_error(&e))?;
        written += 1;
    }
    tracing::info!(path = %path.display(), frames = written, "wrote animation");
    Ok(())
}

#[cfg(not(feature = "gif"))]
fn write_gif<F, I>(
    _animation: &Animation,
    _frames: I,
    _path: &Path,
    fps: u32,
    _renderer: &FrameRenderer,
) -> Result<(), ExportError>
where
    F: Borrow<FrameState>,
    I: IntoIterator<Item = crate::Result<F>>,
{
    if fps == 0 {
        return Err(ExportError::InvalidFrameRate);
    }
    Err(ExportError::BackendUnavailable)
}

/// Outcome of [`save_animations`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub diagnostic: Option<String>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.diagnostic.is_none()
    }
}

fn remedy(err: &ExportError) -> &'static str {
    match err {
        ExportError::BackendUnavailable => "rebuild with the `gif` feature enabled",
        ExportError::InvalidFrameRate => "pass a frame rate of at least 1 fps",
        ExportError::Write { .. } => "check that the output directory exists and is writable",
        ExportError::Sweep(_) => "check the depth sequence and input points",
    }
}

/// Exports each `(animation, path)` pair in order, stopping at the first
/// failure. Never fails itself.
pub fn save_animations(jobs: &[(&Animation, PathBuf)], fps: u32) -> ExportReport {
    save_each(
        jobs.iter()
            .map(|(animation, path)| (path, move || export(animation, path, fps))),
    )
}

/// [`save_animations`] for frames the caller already computed.
pub fn save_rendered(jobs: &[(&Animation, &[FrameState], PathBuf)], fps: u32) -> ExportReport {
    save_each(jobs.iter().map(|(animation, frames, path)| {
        (path, move || {
            export_frames(animation, frames, path, fps, &FrameRenderer::default())
        })
    }))
}

fn save_each<'a, W>(jobs: impl Iterator<Item = (&'a PathBuf, W)>) -> ExportReport
where
    W: FnOnce() -> Result<(), ExportError>,
{
    let mut report = ExportReport::default();
    for (path, write) in jobs {
        if let Err(err) = write() {
            warn!(path = %path.display(), error = %err, "export failed");
            report.diagnostic = Some(format!(
                "Could not save animations: {}. Try: {}",
                err,
                remedy(&err)
            ));
            break;
        }
        report.written.push(path.clone());
    }
    report
}
