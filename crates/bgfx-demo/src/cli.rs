#![forbid(unsafe_code)]

//! Command-line argument parsing for the viewer.
//!
//! Args are parsed by hand. Every flag has a `BGFX_*` environment override;
//! precedence is defaults < environment < flags.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
bgfx - warped field-map background viewer

USAGE:
    bgfx [OPTIONS]

OPTIONS:
    --dir=PATH            Background directory (default: bg)
    --fps=N               Frame cap, 0 = uncapped (default: 30)
    --scale=N             Pixel step when drawing, 0 = fit the terminal (default: 0)
    --seed=N              Seed for 'randomize' (default: time based)
    --log-file=PATH       Log file in terminal mode (default: bgfx.log)
    --exit-after-ms=N     Quit after N milliseconds, 0 = never (default: 0)
    --snapshot=PATH       Render headless and write the last frame as PNG
    --frames=N            Frames to render with --snapshot (default: 1)
    --help, -h            Show this help message
    --version, -V         Show version

KEYBINDINGS:
    ESC / q / Ctrl+C      Quit
    ] / [                 Next / previous image
    Up / Down             Select parameter
    Right / Left          Increase / decrease parameter
    r                     Randomize parameters
    Space                 Reset parameters
    h                     Toggle help
    p                     Write the color report to the log

ENVIRONMENT VARIABLES:
    BGFX_DIR              Override --dir
    BGFX_FPS              Override --fps
    BGFX_SCALE            Override --scale
    BGFX_SEED             Override --seed
    BGFX_LOG_FILE         Override --log-file
    BGFX_EXIT_AFTER_MS    Override --exit-after-ms
    BGFX_SNAPSHOT         Override --snapshot
    BGFX_FRAMES           Override --frames
    BGFX_LOG              Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Directory scanned for backgrounds.
    pub dir: PathBuf,
    /// Frame cap (0 = uncapped).
    pub fps: u32,
    /// Pixel step (0 = fit the terminal).
    pub scale: usize,
    /// Randomize seed; `None` derives one from the clock.
    pub seed: Option<u64>,
    /// Log destination while the terminal is in raw mode.
    pub log_file: PathBuf,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Headless output path.
    pub snapshot: Option<PathBuf>,
    /// Frames rendered in headless mode.
    pub frames: u32,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("bg"),
            fps: 30,
            scale: 0,
            seed: None,
            log_file: PathBuf::from("bgfx.log"),
            exit_after_ms: 0,
            snapshot: None,
            frames: 1,
        }
    }
}

/// Outcome of parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Opts),
    Help,
    Version,
}

/// A flag the parser could not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    InvalidValue { flag: &'static str, value: String },
    Unknown(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::Unknown(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

fn number<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version` or a bad flag.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Parsed::Run(opts)) => opts,
            Ok(Parsed::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Parsed::Version) => {
                println!("bgfx {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with `env` as the environment lookup.
    ///
    /// Unparseable environment values are ignored; unparseable flags are
    /// errors.
    pub fn parse_from<I, F>(args: I, env: F) -> Result<Parsed, CliError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = env("BGFX_DIR") {
            opts.dir = PathBuf::from(val);
        }
        if let Some(n) = env("BGFX_FPS").and_then(|v| v.parse().ok()) {
            opts.fps = n;
        }
        if let Some(n) = env("BGFX_SCALE").and_then(|v| v.parse().ok()) {
            opts.scale = n;
        }
        if let Some(n) = env("BGFX_SEED").and_then(|v| v.parse().ok()) {
            opts.seed = Some(n);
        }
        if let Some(val) = env("BGFX_LOG_FILE") {
            opts.log_file = PathBuf::from(val);
        }
        if let Some(n) = env("BGFX_EXIT_AFTER_MS").and_then(|v| v.parse().ok()) {
            opts.exit_after_ms = n;
        }
        if let Some(val) = env("BGFX_SNAPSHOT") {
            opts.snapshot = Some(PathBuf::from(val));
        }
        if let Some(n) = env("BGFX_FRAMES").and_then(|v| v.parse().ok()) {
            opts.frames = n;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Parsed::Help),
                "--version" | "-V" => return Ok(Parsed::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--dir=") {
                        opts.dir = PathBuf::from(val);
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = number("--fps", val)?;
                    } else if let Some(val) = other.strip_prefix("--scale=") {
                        opts.scale = number("--scale", val)?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = Some(number("--seed", val)?);
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = PathBuf::from(val);
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = number("--exit-after-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--snapshot=") {
                        opts.snapshot = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--frames=") {
                        opts.frames = number("--frames", val)?;
                    } else {
                        return Err(CliError::Unknown(other.to_string()));
                    }
                }
            }
        }

        Ok(Parsed::Run(opts))
    }

    /// Target duration of one frame, or `None` when uncapped.
    pub fn frame_budget(&self) -> Option<Duration> {
        (self.fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(self.fps)))
    }

    /// Auto-exit deadline, or `None` when disabled.
    pub fn exit_after(&self) -> Option<Duration> {
        (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms))
    }
}
