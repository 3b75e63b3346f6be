use crate::errors::QueryError;
use log::LevelFilter;
use log4rs::Handle;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::devlog::DEV_TARGET;

const ROLL_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const ENCODER_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

// log4rs can only be installed once per process; later configurations swap
// the config on the retained handle.
static HANDLE: LazyLock<Mutex<Option<Handle>>> = LazyLock::new(|| Mutex::new(None));

/// Initializes the logging system from the default file `log4rs.yaml` in the working directory.
/// A missing file or an already installed logger is not an error.
/// Prefer `configure_logging` for programmatic control.
pub fn init() {
    let _ = log4rs::init_file("log4rs.yaml", log4rs::config::Deserializers::default());
}

/// Initializes the logging system from a specific config file path.
///
/// # Errors
/// Returns an error if the file cannot be read or the logger is already installed.
pub fn init_path(path: &Path) -> Result<(), QueryError> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())
        .map_err(|e| QueryError::Logging(e.to_string()))
}

/// Parse a level name (`error|warn|info|debug|trace`), defaulting to `info`.
#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Configure logging globally for the process. If a configuration was already installed
/// through this module, it is replaced.
/// - dir: base directory for logs; if None, current directory.
/// - level: error|warn|info|debug|trace
/// - retention: number of rolled files to keep (default 7)
///
/// # Errors
/// Returns an error if the appenders cannot be built or another logger owns the process.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
) -> Result<(), QueryError> {
    configure_logging_with_dev(dir, level, retention, false)
}

/// Configure logging globally with optional dev6 (developer-level) routing to files.
/// If `enable_dev6` is true, messages logged via the `dev6!` macro (target `recquery::dev6`)
/// are also persisted to a `dev6.log` rolling file in the base directory.
///
/// # Errors
/// Returns an error if the appenders cannot be built or another logger owns the process.
pub fn configure_logging_with_dev(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
    enable_dev6: bool,
) -> Result<(), QueryError> {
    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let keep = u32::try_from(retention.unwrap_or(7)).unwrap_or(u32::MAX);
    let lvl = parse_level(level);

    let mut builder = Config::builder()
        .appender(Appender::builder().build("app", Box::new(rolling(&base, "app", keep)?)));
    if enable_dev6 {
        builder = builder
            .appender(Appender::builder().build("dev6", Box::new(rolling(&base, "dev6", keep)?)))
            .logger(
                Logger::builder()
                    .appender("dev6")
                    .additive(false)
                    .build(DEV_TARGET, LevelFilter::Trace),
            );
    } else {
        // Allow runtime visibility even without file routing (for debugging)
        builder = builder.logger(Logger::builder().additive(false).build(DEV_TARGET, LevelFilter::Trace));
    }
    let config = builder
        .build(Root::builder().appender("app").build(lvl))
        .map_err(|e| QueryError::Logging(e.to_string()))?;
    install(config)
}

fn rolling(base: &Path, stem: &str, keep: u32) -> Result<RollingFileAppender, QueryError> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join(format!("{stem}.{{}}.log")).display()), keep)
        .map_err(|e| QueryError::Logging(e.to_string()))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE_BYTES)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(ENCODER_PATTERN)))
        .build(base.join(format!("{stem}.log")), Box::new(policy))
        .map_err(|e| QueryError::Logging(e.to_string()))
}

fn install(config: Config) -> Result<(), QueryError> {
    let mut slot = HANDLE.lock();
    if let Some(handle) = slot.as_ref() {
        handle.set_config(config);
        return Ok(());
    }
    let handle = log4rs::init_config(config).map_err(|e| QueryError::Logging(e.to_string()))?;
    *slot = Some(handle);
    Ok(())
}

/// Configure logging from environment variables if present:
/// - RECQUERY_LOG_DIR
/// - RECQUERY_LOG_LEVEL
/// - RECQUERY_LOG_RETENTION
/// - RECQUERY_DEV6
///
/// # Errors
/// Propagates errors from `configure_logging_with_dev`.
pub fn configure_from_env() -> Result<(), QueryError> {
    let dir = std::env::var("RECQUERY_LOG_DIR").ok().map(PathBuf::from);
    let level = std::env::var("RECQUERY_LOG_LEVEL").ok();
    let retention =
        std::env::var("RECQUERY_LOG_RETENTION").ok().and_then(|s| s.parse::<usize>().ok());
    let dev6_enabled = std::env::var("RECQUERY_DEV6")
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    configure_logging_with_dev(dir.as_deref(), level.as_deref(), retention, dev6_enabled)
}
