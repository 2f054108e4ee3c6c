use std::{
    fs::File,
    io::{self, Write},
};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::Level;

use crate::options::{CliOptions, LogFormat};

/// Installs the global logger for the binary. Library code only uses the `log` facade.
pub fn init_logger(options: &CliOptions) -> io::Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let target = if options.log_output.is_empty() {
        Target::Stderr
    } else {
        Target::Pipe(Box::new(File::create(&options.log_output)?))
    };

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .target(target)
        .format(move |buf: &mut Formatter, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }

            match log_format {
                LogFormat::Compact => {
                    writeln!(buf, "{} {}", level_tag(record.level()), record.args())
                }
                LogFormat::Pretty => writeln!(
                    buf,
                    "{:<5} [{}] {}",
                    level_tag(record.level()),
                    record.target(),
                    record.args()
                ),
            }
        });

    builder.try_init().map_err(io::Error::other)
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
