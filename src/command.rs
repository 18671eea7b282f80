use crate::error::GiftoaError;
use std::process::Command;
use tracing::debug;

/// Builds a `Command` from a user supplied command string such as
/// `gcc -O2` or `gm convert`: the first word is the program, the rest are
/// leading arguments. Words are split on whitespace, quoting is not supported.
pub fn from_spec(spec: &str) -> Command {
    let mut words = spec.split_whitespace();
    let mut command = Command::new(words.next().unwrap_or_default());
    command.args(words);
    command
}

/// Renders a command line for log messages.
pub fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn spawn_error(role: &'static str, command: &Command, source: std::io::Error) -> GiftoaError {
    GiftoaError::Spawn {
        role,
        command: command.get_program().to_string_lossy().into_owned(),
        source,
    }
}

pub fn log(role: &str, command: &Command) {
    debug!("Running {role}: {}", describe(command));
}
