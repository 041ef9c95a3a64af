//! Configuration for the dashboard
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/hookspy/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default poll cadence in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1400;

/// Default bound on how many recent events a refresh fetches
pub const DEFAULT_EVENT_LIMIT: usize = 50;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the webhook-capture backend
    pub backend_url: String,

    /// Poll cadence for the refresh loop
    pub poll_interval_ms: u64,

    /// How many recent events to fetch per refresh cycle
    pub event_limit: usize,

    /// Webhook token forwarded on POST /api/webhook when the backend
    /// requires one (x-webhook-token header)
    pub webhook_token: Option<String>,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            event_limit: DEFAULT_EVENT_LIMIT,
            webhook_token: None,
            enable_tui: true,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            "never" => Self::Never,
            _ => Self::Daily, // Default to daily for unknown values
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to the TUI buffer or stdout)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file rotation strategy
    pub file_rotation: LogRotation,
    /// Prefix for log file names (e.g., "hookspy" -> "hookspy.2026-08-29.log")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false, // Opt-in feature
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "hookspy".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Create from file config with defaults
    fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::parse(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub backend_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub event_limit: Option<usize>,
    pub webhook_token: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/hookspy/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("hookspy").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be parsed is a fatal error:
    /// failing fast with a clear message beats silently falling back to
    /// defaults while the user debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: failed to parse config file {}", path.display());
                    eprintln!("  {}", e);
                    eprintln!("  To reset, delete the file and restart hookspy.");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("Error: cannot read config file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        let defaults = Self::default();

        // Backend URL: env > file > default
        let backend_url = std::env::var("HOOKSPY_URL")
            .ok()
            .or(file.backend_url)
            .unwrap_or(defaults.backend_url);
        // Trailing slash would double up when endpoint paths are appended
        let backend_url = backend_url.trim_end_matches('/').to_string();

        // Poll cadence: env > file > default
        let poll_interval_ms = std::env::var("HOOKSPY_POLL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.poll_interval_ms)
            .unwrap_or(defaults.poll_interval_ms);

        // Event window: env > file > default
        let event_limit = std::env::var("HOOKSPY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.event_limit)
            .unwrap_or(defaults.event_limit);

        // Webhook token: env > file (no default)
        let webhook_token = std::env::var("HOOKSPY_TOKEN")
            .ok()
            .or(file.webhook_token)
            .filter(|t| !t.trim().is_empty());

        // TUI toggle: env only (runtime flag)
        let enable_tui = std::env::var("HOOKSPY_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            backend_url,
            poll_interval_ms,
            event_limit,
            webhook_token,
            enable_tui,
            logging,
        }
    }

    /// Full URL of the backend's webhook endpoint (also embedded in the
    /// synthesized curl commands)
    pub fn webhook_url(&self) -> String {
        format!("{}/api/webhook", self.backend_url)
    }

    /// Serialize to TOML for config file generation.
    /// Single source of truth for the config file format.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# hookspy configuration
# Precedence: environment variables > this file > built-in defaults
# Env vars: HOOKSPY_URL, HOOKSPY_POLL_MS, HOOKSPY_LIMIT, HOOKSPY_TOKEN, HOOKSPY_NO_TUI

# Base URL of the webhook-capture backend
backend_url = "{}"

# Poll cadence in milliseconds
poll_interval_ms = {}

# How many recent events to fetch per refresh
event_limit = {}

# Webhook token for POST /api/webhook (uncomment if the backend requires one)
{}

[logging]
# Log level: trace, debug, info, warn, error
level = "{}"
# Write logs to rotating files in addition to the TUI buffer
file_enabled = {}
file_dir = "{}"
# Rotation: hourly, daily, never
file_rotation = "{}"
file_prefix = "{}"
"#,
            self.backend_url,
            self.poll_interval_ms,
            self.event_limit,
            match &self.webhook_token {
                Some(token) => format!("webhook_token = \"{}\"", token),
                None => "# webhook_token = \"\"".to_string(),
            },
            self.logging.level,
            self.logging.file_enabled,
            self.logging.file_dir.display(),
            self.logging.file_rotation.as_str(),
            self.logging.file_prefix,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that serialized config can be parsed back.
    /// Catches TOML syntax errors in the template.
    #[test]
    fn config_roundtrip_default() {
        let config = Config::default();
        let toml_str = config.to_toml();

        let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
        assert!(
            parsed.is_ok(),
            "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
            toml_str,
            parsed.err()
        );
    }

    #[test]
    fn config_roundtrip_with_token() {
        let config = Config {
            webhook_token: Some("secret".to_string()),
            ..Config::default()
        };

        let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed.webhook_token.as_deref(), Some("secret"));
        assert_eq!(parsed.poll_interval_ms, Some(DEFAULT_POLL_INTERVAL_MS));

        let logging = parsed.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("info"));
        assert_eq!(logging.file_rotation.as_deref(), Some("daily"));
    }

    #[test]
    fn webhook_url_appends_endpoint() {
        let config = Config {
            backend_url: "http://localhost:9999".to_string(),
            ..Config::default()
        };
        assert_eq!(config.webhook_url(), "http://localhost:9999/api/webhook");
    }

    #[test]
    fn rotation_parse_is_forgiving() {
        assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
        assert_eq!(LogRotation::parse("bogus"), LogRotation::Daily);
    }
}
