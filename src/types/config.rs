use crate::types::{
    build_args::BuildArgs,
    frame_delay::{FrameDelay, MAX_FPS, MAX_NANOSECONDS, MAX_SECONDS},
    frame_source::FrameSource,
};
use std::{ffi::OsString, path::PathBuf};
use thiserror::Error;

/// A command line that parsed but does not describe a valid build.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("the input \"{}\" does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("--output is required when the input \"{}\" is a directory", .0.display())]
    OutputRequired(PathBuf),

    #[error("cannot derive an output name from \"{}\", pass --output", .0.display())]
    OutputUnnamed(PathBuf),

    #[error(
        "--frames-per-second cannot be combined with --framesleep-seconds or --framesleep-nanoseconds"
    )]
    ConflictingTiming,

    #[error("{option} must be between {min} and {max}, got {value}")]
    OutOfRange {
        option: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{option} cannot be empty")]
    EmptyCommand { option: &'static str },
}

/// Everything one build needs, fully validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: FrameSource,
    pub output: PathBuf,
    pub delay: FrameDelay,
    pub compiler: String,
    pub decomposer: String,
    pub converter: String,
    pub converter_args: Vec<OsString>,
    pub emit_source: Option<PathBuf>,
    pub delay_compensation: bool,
}

fn check_range(option: &'static str, value: i64, min: i64, max: i64) -> Result<i64, ConfigError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            option,
            value,
            min,
            max,
        })
    }
}

fn check_command(option: &'static str, command: String) -> Result<String, ConfigError> {
    if command.trim().is_empty() {
        Err(ConfigError::EmptyCommand { option })
    } else {
        Ok(command)
    }
}

/// FPS excludes both sleep options; the sleep options may be combined.
fn resolve_delay(args: &BuildArgs) -> Result<FrameDelay, ConfigError> {
    let sleep_given = args.framesleep_seconds.is_some() || args.framesleep_nanoseconds.is_some();

    match args.fps {
        Some(_) if sleep_given => Err(ConfigError::ConflictingTiming),
        Some(fps) => {
            let fps = check_range("--frames-per-second", fps, 1, MAX_FPS)?;
            Ok(FrameDelay::from_fps(fps as u32))
        }
        None if sleep_given => {
            let seconds = check_range(
                "--framesleep-seconds",
                args.framesleep_seconds.unwrap_or(0),
                0,
                MAX_SECONDS,
            )?;
            let nanoseconds = check_range(
                "--framesleep-nanoseconds",
                args.framesleep_nanoseconds.unwrap_or(0),
                0,
                MAX_NANOSECONDS,
            )?;
            Ok(FrameDelay::new(seconds as u32, nanoseconds as u32))
        }
        None => Ok(FrameDelay::default()),
    }
}

impl Config {
    /// Validates parsed arguments. Only inspects the filesystem, never spawns
    /// anything.
    pub fn from_args(args: BuildArgs, converter_args: Vec<OsString>) -> Result<Self, ConfigError> {
        let source = FrameSource::detect(&args.input)
            .ok_or_else(|| ConfigError::InputNotFound(args.input.clone()))?;

        let output = match (&args.output, &source) {
            (Some(output), _) => output.clone(),
            (None, FrameSource::Directory(dir)) => {
                return Err(ConfigError::OutputRequired(dir.clone()));
            }
            (None, FrameSource::Animation(file)) => file
                .file_stem()
                .map(PathBuf::from)
                .ok_or_else(|| ConfigError::OutputUnnamed(file.clone()))?,
        };

        let delay = resolve_delay(&args)?;

        Ok(Self {
            source,
            output,
            delay,
            compiler: check_command("--compiler", args.compiler)?,
            decomposer: check_command("--decomposer", args.decomposer)?,
            converter: check_command("--converter", args.converter)?,
            converter_args,
            emit_source: args.emit_source,
            delay_compensation: !args.no_delay_compensation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        gif: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let gif = dir.path().join("dancing-cat.gif");
        fs::write(&gif, b"GIF89a").unwrap();
        Fixture { dir, gif }
    }

    fn validate(argv: &[&str]) -> Result<Config, ConfigError> {
        let (args, passthrough) = BuildArgs::parse_split(argv.iter().copied()).unwrap();
        Config::from_args(args, passthrough)
    }

    #[test]
    fn defaults_for_a_gif() {
        let f = fixture();
        let config = validate(&["giftoa", "-i", f.gif.to_str().unwrap()]).unwrap();
        assert_eq!(config.source, FrameSource::Animation(f.gif.clone()));
        assert_eq!(config.output, PathBuf::from("dancing-cat"));
        assert_eq!(config.delay, FrameDelay::new(0, 100_000_000));
        assert_eq!(config.compiler, "cc");
        assert_eq!(config.converter, "jp2a");
        assert!(config.delay_compensation);
        assert!(config.converter_args.is_empty());
    }

    #[test]
    fn missing_input_is_rejected() {
        let f = fixture();
        let missing = f.dir.path().join("nope.gif");
        let err = validate(&["giftoa", "-i", missing.to_str().unwrap()]).unwrap_err();
        assert_eq!(err, ConfigError::InputNotFound(missing));
    }

    #[test]
    fn directory_needs_an_output_name() {
        let f = fixture();
        let dir = f.dir.path().to_str().unwrap();
        let err = validate(&["giftoa", "-i", dir]).unwrap_err();
        assert_eq!(err, ConfigError::OutputRequired(f.dir.path().to_path_buf()));
        assert!(err.to_string().contains("--output is required"));

        let config = validate(&["giftoa", "-i", dir, "-o", "anim"]).unwrap();
        assert_eq!(config.source, FrameSource::Directory(f.dir.path().to_path_buf()));
        assert_eq!(config.output, PathBuf::from("anim"));
    }

    #[test]
    fn fps_is_normalized() {
        let f = fixture();
        let gif = f.gif.to_str().unwrap();
        let config = validate(&["giftoa", "-i", gif, "-fps", "1"]).unwrap();
        assert_eq!(config.delay, FrameDelay::new(1, 0));
        let config = validate(&["giftoa", "-i", gif, "--frames-per-second", "10"]).unwrap();
        assert_eq!(config.delay, FrameDelay::new(0, 100_000_000));
    }

    #[test]
    fn explicit_sleep_fills_missing_part_with_zero() {
        let f = fixture();
        let gif = f.gif.to_str().unwrap();
        let config = validate(&["giftoa", "-i", gif, "-fss", "2"]).unwrap();
        assert_eq!(config.delay, FrameDelay::new(2, 0));
        let config = validate(&["giftoa", "-i", gif, "-fss", "1", "-fsn", "5"]).unwrap();
        assert_eq!(config.delay, FrameDelay::new(1, 5));
    }

    // The old tool only checked `fps or nanoseconds`, letting fps plus
    // seconds through. Both combinations must be rejected.
    #[test]
    fn fps_conflicts_with_either_sleep_option() {
        let f = fixture();
        let gif = f.gif.to_str().unwrap();
        for extra in [
            &["-fss", "1"][..],
            &["-fsn", "1"][..],
            &["-fss", "0", "-fsn", "0"][..],
        ] {
            let mut argv = vec!["giftoa", "-i", gif, "-fps", "5"];
            argv.extend_from_slice(extra);
            assert_eq!(validate(&argv).unwrap_err(), ConfigError::ConflictingTiming);
        }
    }

    #[test]
    fn conflict_is_reported_before_ranges() {
        let f = fixture();
        let gif = f.gif.to_str().unwrap();
        let err = validate(&["giftoa", "-i", gif, "-fps", "0", "-fsn", "-1"]).unwrap_err();
        assert_eq!(err, ConfigError::ConflictingTiming);
    }

    #[test]
    fn ranges_are_enforced() {
        let f = fixture();
        let gif = f.gif.to_str().unwrap();
        let cases = [
            ("-fps", "0", "--frames-per-second", 1, MAX_FPS),
            ("-fps", "1000000001", "--frames-per-second", 1, MAX_FPS),
            ("-fss", "-1", "--framesleep-seconds", 0, MAX_SECONDS),
            ("-fss", "2147483648", "--framesleep-seconds", 0, MAX_SECONDS),
            ("-fsn", "-1", "--framesleep-nanoseconds", 0, MAX_NANOSECONDS),
            ("-fsn", "1000000000", "--framesleep-nanoseconds", 0, MAX_NANOSECONDS),
        ];
        for (flag, value, option, min, max) in cases {
            let err = validate(&["giftoa", "-i", gif, flag, value]).unwrap_err();
            assert_eq!(
                err,
                ConfigError::OutOfRange {
                    option,
                    value: value.parse().unwrap(),
                    min,
                    max,
                }
            );
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let f = fixture();
        let gif = f.gif.to_str().unwrap();
        let config =
            validate(&["giftoa", "-i", gif, "-fss", "2147483647", "-fsn", "999999999"]).unwrap();
        assert_eq!(config.delay, FrameDelay::new(2_147_483_647, 999_999_999));
        let config = validate(&["giftoa", "-i", gif, "-fps", "1000000000"]).unwrap();
        assert_eq!(config.delay, FrameDelay::new(0, 1));
    }

    #[test]
    fn empty_compiler_is_rejected() {
        let f = fixture();
        let err = validate(&["giftoa", "-i", f.gif.to_str().unwrap(), "-cc", " "]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyCommand { option: "--compiler" });
    }

    #[test]
    fn unknown_arguments_reach_the_converter() {
        let f = fixture();
        let config = validate(&[
            "giftoa",
            "--width=60",
            "-i",
            f.gif.to_str().unwrap(),
            "--invert",
        ])
        .unwrap();
        assert_eq!(
            config.converter_args,
            vec![OsString::from("--width=60"), OsString::from("--invert")]
        );
    }
}
