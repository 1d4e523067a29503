//! Logger of the test image. Records go to stderr or to a log file, never to
//! stdout, which carries the test result.

use anyhow::{bail, Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;
use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{stderr, Write};
use std::path::PathBuf;
use std::str::FromStr;

pub static LOG_FILE: OnceCell<Option<File>> = OnceCell::new();
pub const LOG_LEVEL_ENV_NAME: &str = "CAPABILITY_TESTS_LOG_LEVEL";
const LOG_FORMAT_TEXT: &str = "text";
const LOG_FORMAT_JSON: &str = "json";

#[derive(Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

/// If in debug mode, default level is debug to get maximum logging
#[cfg(debug_assertions)]
const DEFAULT_LOG_LEVEL: &str = "debug";

/// If not in debug mode, default level is info so the operator-sdk version still shows up
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize the logger, must be called before accessing the logger
pub fn init(debug: bool, log_file: Option<PathBuf>, log_format: Option<String>) -> Result<()> {
    let level = detect_log_level(debug).context("failed to parse log level")?;
    let format =
        detect_log_format(log_format.as_deref()).context("failed to detect log format")?;
    let file = log_file
        .map(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed opening log file {:?}", path))
        })
        .transpose()?;
    let _ = LOG_FILE.set(file);

    let logger = ImageLogger::new(level.to_level(), format);
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(level))
        .context("set logger failed")?;

    Ok(())
}

fn detect_log_format(log_format: Option<&str>) -> Result<LogFormat> {
    match log_format {
        None | Some(LOG_FORMAT_TEXT) => Ok(LogFormat::Text),
        Some(LOG_FORMAT_JSON) => Ok(LogFormat::Json),
        Some(unknown) => bail!("unknown log format: {}", unknown),
    }
}

fn detect_log_level(is_debug: bool) -> Result<LevelFilter> {
    let filter: Cow<str> = if is_debug {
        "debug".into()
    } else if let Ok(level) = std::env::var(LOG_LEVEL_ENV_NAME) {
        level.into()
    } else {
        DEFAULT_LOG_LEVEL.into()
    };
    Ok(LevelFilter::from_str(filter.as_ref())?)
}

struct ImageLogger {
    /// Indicates level up to which logs are to be printed
    level: Option<log::Level>,
    format: LogFormat,
}

impl ImageLogger {
    fn new(level: Option<log::Level>, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Log for ImageLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if let Some(level) = self.level {
            metadata.level() <= level
        } else {
            false
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_msg = match self.format {
                LogFormat::Text => text_format(record),
                LogFormat::Json => json_format(record),
            };
            // if log file is set, write to it, else write to stderr
            if let Some(mut log_file) = log_file() {
                let _ = writeln!(log_file, "{}", log_msg);
            } else {
                let _ = writeln!(stderr(), "{}", log_msg);
            }
        }
    }

    fn flush(&self) {
        if let Some(mut log_file) = log_file() {
            let _ = log_file.flush();
        } else {
            let _ = stderr().flush();
        }
    }
}

fn log_file() -> Option<&'static File> {
    LOG_FILE.get().and_then(Option::as_ref)
}

fn json_format(record: &Record) -> String {
    serde_json::to_string(&serde_json::json!({
        "level": record.level().to_string(),
        "time": chrono::Local::now().to_rfc3339(),
        "message": record.args().to_string(),
    }))
    .expect("serde::to_string with string keys will not fail")
}

fn text_format(record: &Record) -> String {
    match (record.file(), record.line()) {
        (Some(file), Some(line)) => format!(
            "[{} {}:{}] {} {}",
            record.level(),
            file,
            line,
            chrono::Local::now().to_rfc3339(),
            record.args()
        ),
        (_, _) => format!(
            "[{}] {} {}",
            record.level(),
            chrono::Local::now().to_rfc3339(),
            record.args()
        ),
    }
}
