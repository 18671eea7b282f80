use crate::{command, error::GiftoaError, interrupt};
use anyhow::Result;
use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};
use tracing::info;

/// `TERM` given to the converter when the caller has none, so it renders
/// the same way when run from scripts or cron.
pub const DEFAULT_TERM: &str = "xterm";

/// ASCII rendering of one frame: its rows, each ending in a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameText {
    pub index: usize,
    pub text: String,
}

/// Keeps the non-empty rows of the converter output, right-trimmed.
pub fn ascii_rows(stdout: &str) -> String {
    stdout
        .lines()
        .filter(|line| !line.is_empty())
        .fold(String::new(), |mut text, line| {
            text.push_str(line.trim_end());
            text.push('\n');
            text
        })
}

/// Runs the external ASCII renderer once per frame.
pub struct FrameConverter<'a> {
    command: &'a str,
    args: &'a [OsString],
    term: OsString,
}

impl<'a> FrameConverter<'a> {
    pub fn new(command: &'a str, args: &'a [OsString]) -> Self {
        Self::with_parent_term(command, args, env::var_os("TERM"))
    }

    /// Like [`FrameConverter::new`], with the caller's `TERM` given
    /// explicitly instead of read from the environment.
    pub fn with_parent_term(
        command: &'a str,
        args: &'a [OsString],
        parent_term: Option<OsString>,
    ) -> Self {
        Self {
            command,
            args,
            term: parent_term.unwrap_or_else(|| DEFAULT_TERM.into()),
        }
    }

    /// Converts a single frame. Anything the converter writes to stderr is
    /// echoed and fails the frame.
    pub fn convert(&self, index: usize, path: &Path) -> Result<FrameText> {
        let mut convert = command::from_spec(self.command);
        convert.arg(path).args(self.args);
        convert.env("TERM", &self.term);

        command::log("converter", &convert);
        let output = convert
            .output()
            .map_err(|e| command::spawn_error("the converter", &convert, e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut diagnostics = false;
        for line in stderr.lines().filter(|line| !line.is_empty()) {
            eprintln!("{line}");
            diagnostics = true;
        }
        if diagnostics {
            return Err(GiftoaError::ConverterDiagnostics {
                index,
                path: path.to_path_buf(),
            }
            .into());
        }

        if !output.status.success() {
            return Err(GiftoaError::ConverterFailed {
                index,
                path: path.to_path_buf(),
                status: output.status,
            }
            .into());
        }

        Ok(FrameText {
            index,
            text: ascii_rows(&String::from_utf8_lossy(&output.stdout)),
        })
    }

    /// Converts every frame in order, stopping at the first failure.
    pub fn convert_all(&self, frames: &[PathBuf]) -> Result<Vec<FrameText>> {
        let mut texts = Vec::with_capacity(frames.len());

        for (index, path) in frames.iter().enumerate() {
            interrupt::check()?;
            texts.push(self.convert(index, path)?);

            if texts.len() % 10 == 0 {
                info!("Processed ASCII frames: {}", texts.len());
            }
        }

        info!("Converted {} frames.", texts.len());
        Ok(texts)
    }
}
