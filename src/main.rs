use anyhow::{Context, Result};
use giftoa::{
    error::GiftoaError,
    interrupt,
    types::{build_args::BuildArgs, config::Config},
};
use std::{env, process::ExitCode, time::Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit code for command lines that parse but fail validation, matching clap's.
const EXIT_USAGE: u8 = 2;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn try_main(config: Config) -> Result<()> {
    ctrlc::set_handler(interrupt::request).with_context(|| "Failed to set Ctrl+C handler")?;

    let start_time = Instant::now();
    giftoa::run(&config)?;

    let duration = start_time.elapsed();
    info!("Build completed in: {duration:.2?}");
    Ok(())
}

fn main() -> ExitCode {
    let (args, passthrough) = match BuildArgs::parse_split(env::args_os()) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    let config = match Config::from_args(args, passthrough) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}\n\nFor more information, try '--help'.");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    init_logging();

    match try_main(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            // a converter killed by the same Ctrl+C fails before the flag is checked
            let code = if interrupt::is_requested() {
                GiftoaError::Interrupted.exit_code()
            } else {
                e.downcast_ref::<GiftoaError>()
                    .map_or(1, GiftoaError::exit_code)
            };
            ExitCode::from(code)
        }
    }
}
