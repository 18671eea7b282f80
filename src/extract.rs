use crate::{
    command,
    error::GiftoaError,
    sort::sort_naturally,
    types::frame_source::FrameSource,
};
use anyhow::{Context, Result};
use image::ImageFormat;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Formats the frame converter can read.
pub const RECOGNIZED_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png];

/// File name pattern handed to the decomposer, one file per frame.
const FRAME_PATTERN: &str = "%d.jpg";

pub fn is_recognized_image(path: &Path) -> bool {
    path.extension()
        .and_then(ImageFormat::from_extension)
        .is_some_and(|format| RECOGNIZED_FORMATS.contains(&format))
}

/// Recognized images directly inside `dir`, in natural order.
fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read frames directory: {dir:?}"))?;

    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read frames directory: {dir:?}"))?
            .path();
        if path.is_file() && is_recognized_image(&path) {
            images.push(path);
        }
    }

    sort_naturally(&mut images);
    Ok(images)
}

/// Splits an animated image into one still per frame inside `scratch`,
/// flattening every frame onto a transparent canvas of the full size.
fn decompose(input: &Path, decomposer: &str, scratch: &Path) -> Result<Vec<PathBuf>> {
    let mut split = command::from_spec(decomposer);
    split
        .args(["-background", "none"])
        .arg(input)
        .args(["-coalesce", "-bordercolor", "none", "-frame", "0"])
        .arg(scratch.join(FRAME_PATTERN));

    command::log("decomposer", &split);
    let status = split
        .status()
        .map_err(|e| command::spawn_error("the decomposer", &split, e))?;

    if !status.success() {
        return Err(GiftoaError::DecomposerFailed {
            input: input.to_path_buf(),
            status,
        }
        .into());
    }

    let frames = collect_images(scratch)?;
    if frames.is_empty() {
        return Err(GiftoaError::NoFrames(input.to_path_buf()).into());
    }
    Ok(frames)
}

/// Produces the ordered frame files for `source`. Decomposed frames are
/// written into `scratch`, a directory source is only read.
pub fn extract_frames(
    source: &FrameSource,
    decomposer: &str,
    scratch: &Path,
) -> Result<Vec<PathBuf>> {
    let frames = match source {
        FrameSource::Animation(input) => {
            info!("Splitting {input:?} into frames...");
            decompose(input, decomposer, scratch)?
        }
        FrameSource::Directory(dir) => {
            info!("Scanning frames directory: {dir:?}");
            let images = collect_images(dir)?;
            if images.is_empty() {
                return Err(GiftoaError::NoImages(dir.clone()).into());
            }
            images
        }
    };

    info!("Found {} frames.", frames.len());
    Ok(frames)
}
