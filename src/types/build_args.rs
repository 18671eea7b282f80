use clap::{CommandFactory, Parser};
use std::{ffi::OsString, path::PathBuf};

/// Raw command line of the `giftoa` binary, before range checks.
///
/// Numeric options are kept as wide signed integers so out-of-range input
/// reaches [`Config`](super::config::Config) validation instead of being
/// rejected by the parser with a less specific message.
#[derive(Parser, Debug)]
#[command(
    name = "giftoa",
    author,
    version,
    about = "Compile a GIF into a native executable that plays it as ASCII art with curses",
    after_help = "All arguments not listed above are passed as options to the frame \
                  converter (jp2a). The single-dash spellings -fps, -fss, -fsn and -cc \
                  are also accepted. Requires a C compiler, curses development files, \
                  jp2a and ImageMagick/GraphicsMagick."
)]
pub struct BuildArgs {
    /// The GIF file, or a directory of still frames
    #[arg(short, long)]
    pub input: PathBuf,

    /// Name of the output executable (defaults to the GIF's name without extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Playback rate, cannot be combined with the framesleep options
    #[arg(long = "frames-per-second", allow_negative_numbers = true)]
    pub fps: Option<i64>,

    /// Whole seconds to sleep between frames (0..=2147483647)
    #[arg(long, allow_negative_numbers = true)]
    pub framesleep_seconds: Option<i64>,

    /// Nanoseconds to sleep between frames, in addition to the seconds (0..=999999999)
    #[arg(long, allow_negative_numbers = true)]
    pub framesleep_nanoseconds: Option<i64>,

    /// Command used to invoke the C compiler
    #[arg(long, default_value = "cc")]
    pub compiler: String,

    /// Command used to split the GIF into still frames
    #[arg(long, default_value = "convert")]
    pub decomposer: String,

    /// Command used to render a still frame as ASCII art
    #[arg(long, default_value = "jp2a")]
    pub converter: String,

    /// Also write the generated C source to this path
    #[arg(long)]
    pub emit_source: Option<PathBuf>,

    /// Sleep the full frame delay instead of subtracting the drawing time
    #[arg(long)]
    pub no_delay_compensation: bool,
}

/// Old single-dash spellings, rewritten to their long form before parsing.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-fps", "--frames-per-second"),
    ("-fss", "--framesleep-seconds"),
    ("-fsn", "--framesleep-nanoseconds"),
    ("-cc", "--compiler"),
];

/// Command line split into the part `BuildArgs` understands and the part
/// that is handed to the frame converter untouched.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitArgs {
    pub known: Vec<OsString>,
    pub passthrough: Vec<OsString>,
}

#[derive(Debug, Clone, Copy)]
struct KnownFlag {
    takes_value: bool,
}

/// Flag table taken from the clap command itself, so adding an option to
/// `BuildArgs` is enough for it to stop being forwarded.
struct FlagTable {
    shorts: Vec<(char, KnownFlag)>,
    longs: Vec<(String, KnownFlag)>,
}

impl FlagTable {
    fn new() -> Self {
        let mut command = BuildArgs::command();
        command.build();

        let mut shorts = Vec::new();
        let mut longs = Vec::new();
        for arg in command.get_arguments() {
            let flag = KnownFlag {
                takes_value: arg.get_action().takes_values(),
            };
            if let Some(short) = arg.get_short() {
                shorts.push((short, flag));
            }
            if let Some(long) = arg.get_long() {
                longs.push((long.to_string(), flag));
            }
        }
        Self { shorts, longs }
    }

    fn long(&self, name: &str) -> Option<KnownFlag> {
        self.longs
            .iter()
            .find(|(long, _)| long == name)
            .map(|(_, flag)| *flag)
    }

    fn short(&self, name: char) -> Option<KnownFlag> {
        self.shorts
            .iter()
            .find(|(short, _)| *short == name)
            .map(|(_, flag)| *flag)
    }

    /// Returns the flag and whether its value is attached to the same token.
    fn lookup(&self, token: &str) -> Option<(KnownFlag, bool)> {
        if let Some(long) = token.strip_prefix("--") {
            return match long.split_once('=') {
                Some((name, _)) => self.long(name).filter(|f| f.takes_value).map(|f| (f, true)),
                None => self.long(long).map(|f| (f, false)),
            };
        }

        let mut chars = token.strip_prefix('-')?.chars();
        let flag = self.short(chars.next()?)?;
        match chars.next() {
            None => Some((flag, false)),
            Some(_) if flag.takes_value => Some((flag, true)),
            Some(_) => None,
        }
    }
}

fn rewrite_legacy(token: &str) -> Option<String> {
    let (name, value) = match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    };
    let (_, long) = LEGACY_FLAGS.iter().find(|(legacy, _)| *legacy == name)?;
    Some(match value {
        Some(value) => format!("{long}={value}"),
        None => (*long).to_string(),
    })
}

/// Splits `args` (program name first) into recognized options and
/// pass-through arguments, keeping the relative order of both.
///
/// Everything after a literal `--` is passed through.
pub fn split_known_args<I, T>(args: I) -> SplitArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let table = FlagTable::new();
    let mut args = args.into_iter().map(Into::into);
    let mut split = SplitArgs::default();

    if let Some(program) = args.next() {
        split.known.push(program);
    }

    while let Some(arg) = args.next() {
        let Some(token) = arg.to_str() else {
            split.passthrough.push(arg);
            continue;
        };

        if token == "--" {
            split.passthrough.extend(args.by_ref());
            break;
        }

        let token = rewrite_legacy(token).unwrap_or_else(|| token.to_string());
        match table.lookup(&token) {
            Some((flag, attached)) => {
                split.known.push(token.into());
                if flag.takes_value && !attached {
                    if let Some(value) = args.next() {
                        split.known.push(value);
                    }
                }
            }
            None => split.passthrough.push(arg),
        }
    }

    split
}

impl BuildArgs {
    /// Parses a full command line, returning the typed options and the
    /// arguments meant for the frame converter.
    pub fn parse_split<I, T>(args: I) -> Result<(Self, Vec<OsString>), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let split = split_known_args(args);
        let parsed = Self::try_parse_from(split.known)?;
        Ok((parsed, split.passthrough))
    }
}
