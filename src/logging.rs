//! Logger setup for the `log` facade
//!
//! The browser build hands records to `console_log`, which routes them to the
//! matching `console.*` method. The native preview uses `env_logger` with
//! `[HH:MM:SS] [LEVEL] message` lines on stderr. `RUST_LOG` still overrides
//! the configured level there.

use log::{LevelFilter, SetLoggerError};

/// Install the logger. Fails if a logger is already installed.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    console_log::init_with_level(level.to_level().unwrap_or(log::Level::Error))?;
    log::set_max_level(level);
    Ok(())
}

/// Install the logger. Fails if a logger is already installed.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    use std::io::Write;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(buf, "{}", format_line(&timestamp_now(), record.level(), &record.args().to_string()))
        })
        .try_init()
}

#[cfg(not(target_arch = "wasm32"))]
fn timestamp_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(not(target_arch = "wasm32"))]
fn format_line(timestamp: &str, level: log::Level, message: &str) -> String {
    format!("[{}] [{}] {}", timestamp, level, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line("12:30:05", Level::Warn, "[HOST] No host video element found"),
            "[12:30:05] [WARN] [HOST] No host video element found"
        );
    }

    #[test]
    fn test_second_init_is_rejected() {
        init(LevelFilter::Debug).ok();
        assert!(init(LevelFilter::Warn).is_err());
    }
}
