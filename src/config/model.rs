//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML. Every field has a
//! default so the application runs against a local editor server without any
//! config file.

use crate::bridge::editor::{EditorOptions, ShowErrors};
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the editor server lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Root URL; `/gdb` and `/schema/<type>` are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Options every mounted form editor is created with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub compact: bool,
    #[serde(default = "default_show_errors")]
    pub show_errors: ShowErrors,
    #[serde(default = "default_true")]
    pub disable_edit_json: bool,
    #[serde(default = "default_true")]
    pub disable_collapse: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            compact: true,
            show_errors: default_show_errors(),
            disable_edit_json: true,
            disable_collapse: true,
        }
    }
}

impl From<&EditorConfig> for EditorOptions {
    fn from(cfg: &EditorConfig) -> Self {
        Self {
            theme: cfg.theme.clone(),
            compact: cfg.compact,
            show_errors: cfg.show_errors,
            disable_edit_json: cfg.disable_edit_json,
            disable_collapse: cfg.disable_collapse,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw tick while a load is in flight.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

/// Diagnostic log settings. The terminal belongs to the UI, so logs go to
/// a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or
    /// `gdb_ui=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_theme() -> String {
    "bootstrap4".to_string()
}

fn default_show_errors() -> ShowErrors {
    ShowErrors::Always
}

fn default_tick_rate() -> u64 {
    100
}

fn default_log_dir() -> String {
    "~/.local/share/gdb-ui/logs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
