use log::{Record, Metadata, LevelFilter, SetLoggerError};
use chrono::Local;

use crate::config::Config;


pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Logger { level }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {} - {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.target(), record.level(), record.args());
        }
    }

    fn flush(&self) {}
}


// Sentry stays disabled unless a DSN is configured. The guard must outlive the program.
pub fn init_logger(config: &Config) -> Result<Option<sentry::ClientInitGuard>, SetLoggerError> {
    let logger = Logger::new(config.log_level);

    let guard = match config.sentry_dsn {
        Some(ref dsn) => {
            let guard = sentry::init((dsn.as_str(), sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            }));

            log::set_boxed_logger(Box::new(sentry_log::SentryLogger::with_dest(logger)))?;
            Some(guard)
        },
        None => {
            log::set_boxed_logger(Box::new(logger))?;
            None
        },
    };

    log::set_max_level(config.log_level);

    Ok(guard)
}


#[cfg(test)]
mod tests {
    use super::*;
    use log::{Log, Level};

    #[test]
    fn filters_by_level() {
        let logger = Logger::new(LevelFilter::Warn);

        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();

        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }
}
