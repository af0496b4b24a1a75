use std::fs;
use std::path::Path;

use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

/// Initialize the file logger at `~/.local/share/cc-hookcheck/hookcheck.log`.
/// Best-effort: failures are silently ignored (logging must never block the
/// hook).
pub fn init(level: &str) {
    let filter = match level {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    if filter == LevelFilter::Off {
        return;
    }

    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let log_dir = Path::new(&home).join(".local/share/cc-hookcheck");
    let _ = fs::create_dir_all(&log_dir);

    let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("hookcheck.log"))
    else {
        return;
    };

    let _ = WriteLogger::init(filter, LogConfig::default(), file);
}
