// Copyright 2020 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics logger backing the `log` macros.
//!
//! Log lines never go to standard output, which carries the report. They are written to standard
//! error, or to the file named by `HELLO_WORLD_LOG_PATH`, in the following format:
//!
//! ```text
//! <timestamp> [<instance id>:<thread>:<level>:<file path>:<line number>] <message>
//! ```
//!
//! The level and origin parts of the tag are optional.

use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{LockResult, Mutex, MutexGuard, OnceLock};
use std::thread;

use log::{Log, Metadata, Record};
use utils::time::LocalTime;

/// Default level filter, errors and warnings only.
pub const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Warn;
/// Instance id used when none was set.
pub const DEFAULT_INSTANCE_ID: &str = "hello-world";
/// Instance id, the name of the running program.
pub static INSTANCE_ID: OnceLock<String> = OnceLock::new();

/// Environment variable holding the level filter.
pub const ENV_LOG_LEVEL: &str = "HELLO_WORLD_LOG_LEVEL";
/// Environment variable holding the path of the log file.
pub const ENV_LOG_PATH: &str = "HELLO_WORLD_LOG_PATH";
/// Environment variable toggling the level in the log tag.
pub const ENV_LOG_SHOW_LEVEL: &str = "HELLO_WORLD_LOG_SHOW_LEVEL";
/// Environment variable toggling the origin in the log tag.
pub const ENV_LOG_SHOW_ORIGIN: &str = "HELLO_WORLD_LOG_SHOW_ORIGIN";

/// The logger.
pub static LOGGER: Logger = Logger(Mutex::new(LoggerConfiguration {
    target: None,
    format: LogFormat {
        show_level: true,
        show_log_origin: false,
    },
}));

/// Error type for [`Logger::init`].
pub type LoggerInitError = log::SetLoggerError;

/// Error type for [`Logger::update`].
#[derive(Debug, thiserror::Error)]
#[error("Failed to open target file: {0}")]
pub struct LoggerUpdateError(pub std::io::Error);

/// Errors found while reading the logger configuration from the environment.
#[derive(Debug, PartialEq, Eq, thiserror::Error, displaydoc::Display)]
pub enum LoggerConfigError {
    /// Invalid value for {0}: {1}
    Level(&'static str, LevelFilterFromStrError),
    /// Invalid value for {0}: expected `true` or `false`, got `{1}`
    Bool(&'static str, String),
}

fn extract_guard<G>(lock_result: LockResult<G>) -> G {
    match lock_result {
        Ok(guard) => guard,
        // If a thread panics while holding this lock, the writer within should still be usable.
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl Logger {
    /// Initialize the logger.
    pub fn init(&'static self) -> Result<(), LoggerInitError> {
        log::set_logger(self)?;
        log::set_max_level(DEFAULT_LEVEL);
        Ok(())
    }

    /// Applies the given logger configuration the logger.
    pub fn update(&self, config: LoggerConfig) -> Result<(), LoggerUpdateError> {
        let mut guard = self.lock();
        log::set_max_level(
            config
                .level
                .map(log::LevelFilter::from)
                .unwrap_or(DEFAULT_LEVEL),
        );

        if let Some(log_path) = config.log_path {
            let file = std::fs::OpenOptions::new()
                .custom_flags(libc::O_NONBLOCK)
                .write(true)
                .append(true)
                .open(log_path)
                .map_err(LoggerUpdateError)?;

            guard.target = Some(file);
        };

        if let Some(show_level) = config.show_level {
            guard.format.show_level = show_level;
        }

        if let Some(show_log_origin) = config.show_log_origin {
            guard.format.show_log_origin = show_log_origin;
        }

        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, LoggerConfiguration> {
        extract_guard(self.0.lock())
    }

    fn format(&self, record: &Record) -> String {
        let guard = self.lock();
        let thread = thread::current().name().unwrap_or("-").to_string();
        let level = match guard.format.show_level {
            true => format!(":{}", record.level()),
            false => String::new(),
        };

        let origin = match guard.format.show_log_origin {
            true => {
                let file = record.file().unwrap_or("?");
                let line = match record.line() {
                    Some(x) => x.to_string(),
                    None => String::from("?"),
                };
                format!(":{file}:{line}")
            }
            false => String::new(),
        };

        let timestamp = match LocalTime::now() {
            Some(time) => time.to_string(),
            None => String::from("-"),
        };

        format!(
            "{timestamp} [{}:{thread}{level}{origin}] {}\n",
            INSTANCE_ID
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_INSTANCE_ID),
            record.args()
        )
    }
}

#[derive(Debug)]
pub struct LogFormat {
    pub show_level: bool,
    pub show_log_origin: bool,
}
#[derive(Debug)]
pub struct LoggerConfiguration {
    pub target: Option<std::fs::File>,
    pub format: LogFormat,
}
#[derive(Debug)]
pub struct Logger(pub Mutex<LoggerConfiguration>);

impl Log for Logger {
    // No additional filters to <https://docs.rs/log/latest/log/fn.max_level.html>.
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let message = self.format(record);
        let mut guard = self.lock();
        // A failed diagnostic write has nowhere else to go, so it is dropped.
        let _ = match &mut guard.target {
            Some(file) => file.write_all(message.as_bytes()),
            None => std::io::stderr().write_all(message.as_bytes()),
        };
    }

    fn flush(&self) {}
}

/// Strongly typed structure used to describe the logger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Named pipe or file used as output for logs.
    pub log_path: Option<PathBuf>,
    /// The level of the Logger.
    pub level: Option<LevelFilter>,
    /// Whether to show the log level in the log.
    pub show_level: Option<bool>,
    /// Whether to show the log origin in the log.
    pub show_log_origin: Option<bool>,
}

impl LoggerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, LoggerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let level = get(ENV_LOG_LEVEL)
            .map(|value| LevelFilter::from_str(&value))
            .transpose()
            .map_err(|err| LoggerConfigError::Level(ENV_LOG_LEVEL, err))?;

        Ok(LoggerConfig {
            log_path: get(ENV_LOG_PATH).map(PathBuf::from),
            level,
            show_level: parse_bool(ENV_LOG_SHOW_LEVEL, get(ENV_LOG_SHOW_LEVEL))?,
            show_log_origin: parse_bool(ENV_LOG_SHOW_ORIGIN, get(ENV_LOG_SHOW_ORIGIN))?,
        })
    }
}

fn parse_bool(key: &'static str, value: Option<String>) -> Result<Option<bool>, LoggerConfigError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(LoggerConfigError::Bool(key, raw)),
    }
}

/// Level filter accepted in the environment; `warning` is taken as an alias of `warn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelFilter {
    /// [`log::LevelFilter::Off`]
    Off,
    /// [`log::LevelFilter::Trace`]
    Trace,
    /// [`log::LevelFilter::Debug`]
    Debug,
    /// [`log::LevelFilter::Info`]
    Info,
    /// [`log::LevelFilter::Warn`]
    Warn,
    /// [`log::LevelFilter::Error`]
    Error,
}
impl From<LevelFilter> for log::LevelFilter {
    fn from(filter: LevelFilter) -> log::LevelFilter {
        match filter {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Trace => log::LevelFilter::Trace,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Error => log::LevelFilter::Error,
        }
    }
}

/// Error type for [`<LevelFilter as FromStr>::from_str`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Failed to parse string to level filter: {0}")]
pub struct LevelFilterFromStrError(String);

impl FromStr for LevelFilter {
    type Err = LevelFilterFromStrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LevelFilterFromStrError(String::from(s))),
        }
    }
}

/// Sets the instance id, installs [`LOGGER`] and applies the environment configuration.
///
/// Problems are reported on standard error and never stop the program.
pub fn init_from_env(instance_id: &str) {
    let _ = INSTANCE_ID.set(instance_id.to_string());

    if let Err(err) = LOGGER.init() {
        eprintln!("Failed to set the logger: {err}");
        return;
    }

    let config = match LoggerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}, using the default logger configuration");
            return;
        }
    };
    if let Err(err) = LOGGER.update(config) {
        log::warn!("{err}, logging to standard error");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use log::Level;
    use vmm_sys_util::tempfile::TempFile;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn levelfilter_from_levelfilter() {
        assert_eq!(
            log::LevelFilter::from(LevelFilter::Off),
            log::LevelFilter::Off
        );
        assert_eq!(
            log::LevelFilter::from(LevelFilter::Trace),
            log::LevelFilter::Trace
        );
        assert_eq!(
            log::LevelFilter::from(LevelFilter::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LevelFilter::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LevelFilter::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LevelFilter::Error),
            log::LevelFilter::Error
        );
    }

    #[test]
    fn levelfilter_from_str_all_variants() {
        for (level, level_enum) in [
            ("off", LevelFilter::Off),
            ("trace", LevelFilter::Trace),
            ("debug", LevelFilter::Debug),
            ("info", LevelFilter::Info),
            ("warn", LevelFilter::Warn),
            ("warning", LevelFilter::Warn),
            ("error", LevelFilter::Error),
        ] {
            assert_eq!(LevelFilter::from_str(level), Ok(level_enum));
            assert_eq!(
                LevelFilter::from_str(&level.to_ascii_uppercase()),
                Ok(level_enum)
            );
            let mut mixed = level.to_string();
            mixed[..1].make_ascii_uppercase();
            assert_eq!(LevelFilter::from_str(&mixed), Ok(level_enum));
        }
        assert_eq!(
            LevelFilter::from_str("bad"),
            Err(LevelFilterFromStrError(String::from("bad")))
        );
    }

    #[test]
    fn config_from_lookup() {
        assert_eq!(
            LoggerConfig::from_lookup(lookup(&[])).unwrap(),
            LoggerConfig::default()
        );

        let config = LoggerConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, "Debug"),
            (ENV_LOG_PATH, "/tmp/hello.log"),
            (ENV_LOG_SHOW_LEVEL, "FALSE"),
            (ENV_LOG_SHOW_ORIGIN, "true"),
        ]))
        .unwrap();
        assert_eq!(
            config,
            LoggerConfig {
                log_path: Some(PathBuf::from("/tmp/hello.log")),
                level: Some(LevelFilter::Debug),
                show_level: Some(false),
                show_log_origin: Some(true),
            }
        );

        // Empty values are ignored.
        assert_eq!(
            LoggerConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, ""), (ENV_LOG_PATH, "")])).unwrap(),
            LoggerConfig::default()
        );
    }

    #[test]
    fn config_from_lookup_errors() {
        let err = LoggerConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for HELLO_WORLD_LOG_LEVEL: Failed to parse string to level filter: loud"
        );

        let err = LoggerConfig::from_lookup(lookup(&[(ENV_LOG_SHOW_ORIGIN, "yes")])).unwrap_err();
        assert_eq!(
            err,
            LoggerConfigError::Bool(ENV_LOG_SHOW_ORIGIN, "yes".to_string())
        );
        assert_eq!(
            err.to_string(),
            "Invalid value for HELLO_WORLD_LOG_SHOW_ORIGIN: expected `true` or `false`, got `yes`"
        );
    }

    #[test]
    fn logger() {
        let file = TempFile::new().unwrap();
        let path = file.as_path().to_path_buf();

        let logger = Logger(Mutex::new(LoggerConfiguration {
            target: None,
            format: LogFormat {
                show_level: false,
                show_log_origin: false,
            },
        }));
        logger
            .update(LoggerConfig {
                log_path: Some(path.clone()),
                level: Some(LevelFilter::Debug),
                show_level: Some(true),
                show_log_origin: Some(true),
            })
            .unwrap();

        assert!(logger.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Debug).build()));

        let metadata = Metadata::builder().level(Level::Error).build();
        let record = Record::builder()
            .args(format_args!("Error!"))
            .metadata(metadata)
            .file(Some("dir/app.rs"))
            .line(Some(200))
            .module_path(Some("module::server"))
            .build();
        logger.log(&record);
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        let (_time, rest) = contents.split_once(' ').unwrap();
        let thread = thread::current().name().unwrap_or("-").to_string();
        assert_eq!(
            rest,
            format!("[{DEFAULT_INSTANCE_ID}:{thread}:ERROR:dir/app.rs:200] Error!\n")
        );
    }

    #[test]
    fn logger_update_error() {
        let logger = Logger(Mutex::new(LoggerConfiguration {
            target: None,
            format: LogFormat {
                show_level: true,
                show_log_origin: false,
            },
        }));
        let err = logger
            .update(LoggerConfig {
                log_path: Some(PathBuf::from("/nonexistent/dir/hello.log")),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to open target file: "));
        assert!(logger.lock().target.is_none());
    }
}
