use crate::{command, error::GiftoaError};
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Library the player links against.
pub const CURSES_LIB: &str = "-lcurses";

/// Compiles `source` into the executable `output`. The compiler's own
/// output goes straight to the terminal.
pub fn compile(compiler: &str, source: &Path, output: &Path) -> Result<()> {
    let mut cc = command::from_spec(compiler);
    cc.arg(source).arg("-o").arg(output).arg(CURSES_LIB);

    info!("Compiling {output:?}...");
    command::log("compiler", &cc);
    let status = cc
        .status()
        .map_err(|e| command::spawn_error("the compiler", &cc, e))?;

    if !status.success() {
        return Err(GiftoaError::CompilerFailed {
            command: compiler.to_string(),
            status,
        }
        .into());
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_is_a_build_error() {
        let err = compile("false", Path::new("program.c"), Path::new("out")).unwrap_err();
        let err = err.downcast_ref::<GiftoaError>().unwrap();
        assert!(matches!(err, GiftoaError::CompilerFailed { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_compiler_is_a_spawn_error() {
        let err = compile("giftoa-test-no-such-cc", Path::new("program.c"), Path::new("out"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GiftoaError>(),
            Some(GiftoaError::Spawn { .. })
        ));
    }

    #[test]
    fn success_is_ok() {
        compile("true", Path::new("program.c"), Path::new("out")).unwrap();
    }
}
