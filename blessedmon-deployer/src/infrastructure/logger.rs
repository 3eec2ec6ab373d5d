use std::fs;
use std::str::FromStr;

use tracing::Level;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub enable_console: bool,
    /// Daily rolling log file directory; no file output when unset.
    pub log_directory: Option<String>,
    pub enable_colors: bool,
    pub enable_thread_ids: bool,
    pub enable_file_line: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_console: true,
            log_directory: None,
            enable_colors: true,
            enable_thread_ids: false,
            enable_file_line: false,
        }
    }
}

impl LogConfig {
    pub fn with_level(level: &str) -> Self {
        Self {
            level: level.to_string(),
            log_directory: std::env::var("DEPLOYER_LOG_DIR").ok().filter(|d| !d.is_empty()),
            ..Self::default()
        }
    }

    fn level(&self) -> Level {
        Level::from_str(&self.level).unwrap_or(Level::INFO)
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> String {
        let level = self.level().to_string().to_lowercase();
        format!("blessedmon_deployer={level},blessedmon_wallet_core={level},ethers=warn")
    }
}

pub struct Logger;

impl Logger {
    /// Install the global subscriber. `log` records are bridged into it.
    ///
    /// Keep the returned guard alive for the life of the process, the file
    /// writer stops flushing once it is dropped.
    pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

        let mut layers: Vec<Box<dyn Layer<_> + Send + Sync>> = Vec::new();
        let mut guard = None;

        if config.enable_console {
            let console_layer = fmt::layer()
                .with_timer(UtcTime::rfc_3339())
                .with_thread_ids(config.enable_thread_ids)
                .with_file(config.enable_file_line)
                .with_line_number(config.enable_file_line)
                .with_ansi(config.enable_colors)
                .with_writer(std::io::stderr);
            layers.push(Box::new(console_layer));
        }

        if let Some(directory) = &config.log_directory {
            if let Err(e) = fs::create_dir_all(directory) {
                eprintln!("Failed to create log directory {directory}: {e}");
            } else {
                let file_appender = rolling::daily(directory, "blessedmon_deployer.log");
                let (writer, file_guard) = non_blocking(file_appender);
                let file_layer = fmt::layer()
                    .with_timer(UtcTime::rfc_3339())
                    .with_thread_ids(config.enable_thread_ids)
                    .with_file(config.enable_file_line)
                    .with_line_number(config.enable_file_line)
                    .with_ansi(false)
                    .with_writer(writer);
                layers.push(Box::new(file_layer));
                guard = Some(file_guard);
            }
        }

        if let Err(e) = Registry::default().with(env_filter).with(layers).try_init() {
            eprintln!("Logger already initialized: {e}");
        }
        guard
    }
}
