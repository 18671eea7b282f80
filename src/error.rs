use std::{io, path::PathBuf, process::ExitStatus};
use thiserror::Error;

/// Exit code used when the run was cut short by Ctrl+C.
pub const EXIT_INTERRUPTED: u8 = 130;

/// Failures of the build pipeline after the command line was accepted.
#[derive(Debug, Error)]
pub enum GiftoaError {
    #[error("failed to run {role} \"{command}\"")]
    Spawn {
        role: &'static str,
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("the decomposer failed on \"{}\" ({status})", .input.display())]
    DecomposerFailed { input: PathBuf, status: ExitStatus },

    #[error("no frames were produced from \"{}\"", .0.display())]
    NoFrames(PathBuf),

    #[error("no recognized images (jpg, png) found in directory \"{}\"", .0.display())]
    NoImages(PathBuf),

    #[error("the converter reported errors for frame {index} (\"{}\")", .path.display())]
    ConverterDiagnostics { index: usize, path: PathBuf },

    #[error("the converter failed on frame {index} (\"{}\", {status})", .path.display())]
    ConverterFailed {
        index: usize,
        path: PathBuf,
        status: ExitStatus,
    },

    #[error("the compiler \"{command}\" failed ({status})")]
    CompilerFailed { command: String, status: ExitStatus },

    #[error("interrupted")]
    Interrupted,
}

impl GiftoaError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Interrupted => EXIT_INTERRUPTED,
            Self::CompilerFailed { status, .. } => status
                .code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }
}
