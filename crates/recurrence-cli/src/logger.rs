// A minimal `log` backend that writes every record to stderr. Filtering is
// left to `log::set_max_level`.

use log::Log;

#[derive(Debug)]
pub struct Logger;

impl Logger {
    /// Install the logger globally. Fails if another logger is already set.
    pub fn init() -> Result<&'static Logger, log::SetLoggerError> {
        static LOGGER: Logger = Logger;
        log::set_logger(&LOGGER)?;
        Ok(&LOGGER)
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                eprintln!("{}|{}|{}:{}: {}", now, record.level(), file, line, record.args());
            }
            _ => {
                eprintln!("{}|{}|{}: {}", now, record.level(), record.target(), record.args());
            }
        }
    }

    fn flush(&self) {
        // eprintln! is unbuffered.
    }
}
