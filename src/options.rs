use std::{
    env,
    fmt::{Display, Formatter},
    path::PathBuf,
    process,
    str::FromStr,
};

use log::LevelFilter;

use crate::{
    Error, Result, backend::BackendChoice, quantize::DEFAULT_APPROXIMATION_MULTIPLIER,
};

const DEFAULT_TIMEOUT_SECS: f64 = 2.0;
const DEFAULT_RANDOM_SEED: u64 = 12_345;

/// Library-level knobs for one seriation.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriateOptions {
    /// Distances are multiplied by this and floored to integer arc costs.
    pub approximation_multiplier: u32,
    /// Seconds per solve. `0` retries with doubling budgets until a tour is found.
    pub timeout: f64,
    pub backend: BackendChoice,
    /// LKH executable used by the `lkh` and `auto` backends.
    pub lkh_exe: Option<PathBuf>,
    /// Parent directory for LKH scratch files.
    pub work_dir: PathBuf,
    /// Remove LKH scratch files after each solve.
    pub cleanup: bool,
    pub random_seed: u64,
}

impl Default for SeriateOptions {
    fn default() -> Self {
        Self {
            approximation_multiplier: DEFAULT_APPROXIMATION_MULTIPLIER,
            timeout: DEFAULT_TIMEOUT_SECS,
            backend: BackendChoice::default(),
            lkh_exe: None,
            work_dir: default_work_dir(),
            cleanup: true,
            random_seed: DEFAULT_RANDOM_SEED,
        }
    }
}

impl SeriateOptions {
    pub fn with_timeout(mut self, secs: f64) -> Self {
        self.timeout = secs;
        self
    }

    pub fn with_approximation_multiplier(mut self, multiplier: u32) -> Self {
        self.approximation_multiplier = multiplier;
        self
    }

    pub fn with_backend(mut self, backend: BackendChoice) -> Self {
        self.backend = backend;
        self
    }
}

impl Display for SeriateOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "approximation_multiplier={} timeout={} backend={} lkh_exe={} work_dir={} cleanup={} random_seed={}",
            self.approximation_multiplier,
            self.timeout,
            self.backend,
            self.lkh_exe
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| p.display().to_string()),
            self.work_dir.display(),
            self.cleanup,
            self.random_seed
        )
    }
}

fn default_work_dir() -> PathBuf {
    env::temp_dir().join(format!("seriate-{}", process::id()))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_argument(format!(
                "Invalid value for --log-level: {value} (expected error, warn, info, debug, trace or off)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_argument(format!(
                "Invalid value for --log-format: {value} (expected compact or pretty)"
            ))),
        }
    }
}

/// Options of the `seriate` binary.
#[derive(Clone, Debug, PartialEq)]
pub struct CliOptions {
    pub seriate: SeriateOptions,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    /// Prefix log lines with a millisecond timestamp.
    pub log_timestamp: bool,
    /// Log file path. Empty means stderr.
    pub log_output: String,
    /// Distance matrix file. Empty means stdin.
    pub input: String,
    /// Ordering file. Empty means stdout.
    pub output: String,
    /// `--help` was given; nothing else was parsed.
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            seriate: SeriateOptions::default(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
            help: false,
        }
    }
}

impl CliOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    /// `--help` stops parsing and sets [`CliOptions::help`]; later arguments are ignored.
    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Ok(Self {
                    help: true,
                    ..Self::default()
                });
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_argument(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };
            if raw_name.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);
            options.apply(&name, value)?;
        }

        Ok(options)
    }

    fn apply(&mut self, name: &str, value: Option<String>) -> Result<()> {
        match name {
            "approximation-multiplier" => {
                self.seriate.approximation_multiplier = parse_value(name, value)?;
            }
            "timeout" => self.seriate.timeout = parse_value(name, value)?,
            "backend" => self.seriate.backend = parse_value(name, value)?,
            "lkh-exe" => self.seriate.lkh_exe = Some(parse_value(name, value)?),
            "work-dir" => self.seriate.work_dir = parse_value(name, value)?,
            "seed" => self.seriate.random_seed = parse_value(name, value)?,
            "cleanup" => self.seriate.cleanup = parse_flag(name, value)?,
            "no-cleanup" => {
                reject_value(name, value)?;
                self.seriate.cleanup = false;
            }
            "log-level" => self.log_level = parse_value(name, value)?,
            "log-format" => self.log_format = parse_value(name, value)?,
            "log-timestamp" => self.log_timestamp = parse_flag(name, value)?,
            "no-log-timestamp" => {
                reject_value(name, value)?;
                self.log_timestamp = false;
            }
            "log-output" => self.log_output = parse_value(name, value)?,
            "input" => self.input = parse_value(name, value)?,
            "output" => self.output = parse_value(name, value)?,
            _ => {
                return Err(Error::invalid_argument(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }
        Ok(())
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  seriate [options] < dists.txt\n\n",
            "Input is one line of condensed distances or several lines of square rows,\n",
            "separated by whitespace or commas. A single line is always condensed, so `0`\n",
            "describes two elements. The ordering is written one index per line.\n\n",
            "Options:\n",
            "  --approximation-multiplier <u32>  Distance scale before flooring (default 1000)\n",
            "  --timeout <seconds>               Solver budget, 0 = adaptive (default 2)\n",
            "  --backend <native|lkh|auto>       Solver backend (default native)\n",
            "  --lkh-exe <path>                  LKH executable for the lkh backend\n",
            "  --work-dir <path>                 Scratch directory for LKH files\n",
            "  --seed <u64>                      Solver random seed\n",
            "  --cleanup[=<bool>] | --no-cleanup\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>] | --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  seriate --timeout=0 --input dists.txt\n",
            "  seriate --backend lkh --lkh-exe /usr/local/bin/LKH < dists.txt\n",
        )
    }
}

impl Display for CliOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} input={} output={}",
            self.seriate,
            display_or_std(&self.input, "stdin"),
            display_or_std(&self.output, "stdout")
        )
    }
}

fn display_or_std<'a>(path: &'a str, fallback: &'a str) -> &'a str {
    if path.is_empty() { fallback } else { path }
}

fn parse_value<T>(name: &str, value: Option<String>) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = value.ok_or_else(|| Error::invalid_argument(format!("Missing value for --{name}")))?;
    raw.parse::<T>()
        .map_err(|e| Error::invalid_argument(format!("Invalid value for --{name}: {raw} ({e})")))
}

fn parse_flag(name: &str, value: Option<String>) -> Result<bool> {
    match value {
        Some(v) => parse_bool(name, &v),
        None => Ok(true),
    }
}

fn reject_value(name: &str, value: Option<String>) -> Result<()> {
    match value {
        Some(_) => Err(Error::invalid_argument(format!(
            "Flag --{name} does not take a value"
        ))),
        None => Ok(()),
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_argument(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}

fn split_arg(
    raw_name: &str,
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") => args.next(),
        _ => None,
    };

    (raw_name.to_string(), value)
}
