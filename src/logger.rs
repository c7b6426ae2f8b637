use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes log records to stderr so they never mix with the session on stdout.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}{}", prefix(record.level()), record.args());
        }
    }

    fn flush(&self) {}
}

fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "[ERROR] ",
        Level::Warn => "[WARN]  ",
        Level::Info => "[INFO]  ",
        Level::Debug => "[DEBUG] ",
        Level::Trace => "[TRACE] ",
    }
}

pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the logger. Each `-v` on the command line raises the level by one step.
pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level_filter(verbosity));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_filter(0), LevelFilter::Warn);
        assert_eq!(level_filter(1), LevelFilter::Info);
        assert_eq!(level_filter(2), LevelFilter::Debug);
        assert_eq!(level_filter(7), LevelFilter::Trace);
    }

    #[test]
    fn prefixes_line_up() {
        let widths: Vec<usize> = [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace]
            .into_iter()
            .map(|level| prefix(level).len())
            .collect();

        assert!(widths.iter().all(|&width| width == 8));
    }
}
