//! giftoa: turns an animated image into a standalone terminal program that
//! plays it as ASCII art.
//!
//! The build is a straight pipeline: frames are extracted, each frame is
//! rendered by an external ASCII converter, the text is embedded in a C
//! player and the player is compiled.

pub mod command;
pub mod compile;
pub mod convert;
pub mod error;
pub mod extract;
pub mod interrupt;
pub mod player;
pub mod sort;
pub mod source;
pub mod types;

use anyhow::{Context, Result};
use convert::FrameConverter;
use player::Pacing;
use std::{env, fs, path::Path};
use tracing::info;
use types::{cleanup_guard::CleanupGuard, config::Config};

/// Name of the generated source inside the scratch directory.
pub const SOURCE_FILE: &str = "program.c";

/// Runs a build with scratch files under the system temp dir.
pub fn run(config: &Config) -> Result<()> {
    run_in(config, &env::temp_dir())
}

/// Runs a build with its scratch directory created inside `temp_root`.
/// The scratch directory is gone when this returns, whatever the outcome.
pub fn run_in(config: &Config, temp_root: &Path) -> Result<()> {
    let scratch = CleanupGuard::new_in(temp_root)?;

    let frames = extract::extract_frames(&config.source, &config.decomposer, scratch.path())?;

    let converter = FrameConverter::new(&config.converter, &config.converter_args);
    let texts = converter.convert_all(&frames)?;

    let generated = source::generate(&texts, config.delay, Pacing::new(config.delay_compensation));
    let program = scratch.path().join(SOURCE_FILE);
    fs::write(&program, &generated.text)
        .with_context(|| format!("Failed to write generated source: {program:?}"))?;

    if let Some(path) = &config.emit_source {
        fs::write(path, &generated.text)
            .with_context(|| format!("Failed to write generated source: {path:?}"))?;
        info!("Wrote generated source to {path:?}");
    }

    interrupt::check()?;
    compile::compile(&config.compiler, &program, &config.output)?;

    info!(
        "Built {:?} ({} frames, {:?} per frame).",
        config.output,
        generated.frame_count,
        config.delay.as_duration()
    );
    Ok(())
}
