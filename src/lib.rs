//! Delv Shell: application shell controller for the Delv recruiting dashboard.
//!
//! The shell owns everything around the individual screens:
//! - Session lifecycle: restore on startup, login, logout
//! - Navigation across a closed set of screens with a bounded back stack
//! - A single-slot modal overlay
//! - Responsive layout: breakpoint tiers and the sidebar policy
//! - View dispatch with failure isolation for screens

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal host (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Event loop
//! │  - Scheduler (timers + frames)                      │
//! │  - Resize coalescing, host seam                     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Reducer
//! │  - Session, navigation, modal, viewport state       │
//! │  - Event handling, actions, screen palette          │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Dispatch    │   │ - JSON record │   │ - checkAuth   │
//! │ - Views       │   │ - In-memory   │   │ - login       │
//! │ - Rendering   │   │               │   │ - logout      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Screen/modal ids, user, errors (domain/)         │
//! │  - Data directory (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry spans to a rotating OTLP JSON file │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: state blocks, events, actions and the reducer
//! - [`domain`]: screen and modal ids, user, error types
//! - [`infrastructure`]: data directory resolution
//! - [`runtime`]: scheduler, resize coalescer, host seam, [`Shell`]
//! - [`storage`]: persisted session record
//! - [`worker`]: deferred session operations
//! - [`ui`]: view dispatch, view contracts, ANSI rendering
//! - [`observability`]: tracing setup
//!
//! # Configuration
//!
//! ```toml
//! data_dir = "~/.local/share/delv-shell"
//! theme = "delv-light"
//! trace_level = "debug"
//! viewport_width = 900
//! login_latency_ms = 1000
//! check_auth_latency_ms = 500
//! logout_latency_ms = 300
//! resize_debounce_ms = 150
//! ```
//!
//! # Example
//!
//! ```
//! use delv_shell::runtime::{ManualScheduler, RecordingHost, Shell};
//! use delv_shell::storage::MemorySessionStore;
//! use delv_shell::{initialize, Config, Credentials};
//! use std::time::Duration;
//!
//! let config = Config::default();
//! let mut shell = Shell::new(
//!     initialize(&config),
//!     Box::new(MemorySessionStore::new()),
//!     ManualScheduler::new(),
//!     RecordingHost::new(),
//! )
//! .with_latency(config.latency());
//!
//! shell.start();
//! shell.advance(Duration::from_millis(500));
//! shell.login(Credentials::new("admin@delv.global", "admin123"));
//! shell.advance(Duration::from_secs(1));
//!
//! assert!(shell.state().is_authenticated());
//! assert_eq!(shell.host().messages(), ["Welcome back, Alexandra"]);
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{Credentials, ModalId, Result, ScreenId, ShellError, User};
pub use runtime::Shell;
pub use ui::Theme;

use crate::infrastructure::{expand_tilde, get_data_dir};
use crate::worker::Latency;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// Shell configuration.
///
/// Every field has a default, so an empty TOML file or map is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the session record and trace files live.
    pub data_dir: PathBuf,

    /// Built-in theme name. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Custom TOML theme; takes precedence over `theme_name`.
    pub theme_file: Option<PathBuf>,

    /// `EnvFilter` directive. Default: `"info"`.
    pub trace_level: Option<String>,

    /// Initial viewport width in px.
    pub viewport_width: u32,

    pub login_latency_ms: u64,
    pub check_auth_latency_ms: u64,
    pub logout_latency_ms: u64,
    pub resize_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let latency = Latency::default();
        Self {
            data_dir: get_data_dir(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            login_latency_ms: millis(latency.login),
            check_auth_latency_ms: millis(latency.check_auth),
            logout_latency_ms: millis(latency.logout),
            resize_debounce_ms: millis(runtime::DEFAULT_DEBOUNCE),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file. Paths may start with `~`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ShellError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ShellError::Config(format!("failed to parse {}: {e}", path.display())))?;
        Ok(config.with_expanded_paths())
    }

    /// Builds configuration from `key=value` pairs.
    ///
    /// Unknown keys are ignored; values that fail to parse keep their default.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use delv_shell::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("theme".to_string(), "delv-light".to_string());
    /// map.insert("viewport_width".to_string(), "wide".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.theme_name.as_deref(), Some("delv-light"));
    /// assert_eq!(config.viewport_width, 1280);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merged(map)
    }

    /// Overrides fields of `self` with the pairs present in `map`.
    #[must_use]
    pub fn merged(self, map: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let number = |key: &str, fallback: u64| text(key).and_then(|v| v.parse().ok()).unwrap_or(fallback);

        Self {
            data_dir: text("data_dir").map_or(self.data_dir, expand_tilde),
            theme_name: text("theme").map(String::from).or(self.theme_name),
            theme_file: text("theme_file").map(expand_tilde).or(self.theme_file),
            trace_level: text("trace_level").map(String::from).or(self.trace_level),
            viewport_width: text("viewport_width")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.viewport_width),
            login_latency_ms: number("login_latency_ms", self.login_latency_ms),
            check_auth_latency_ms: number("check_auth_latency_ms", self.check_auth_latency_ms),
            logout_latency_ms: number("logout_latency_ms", self.logout_latency_ms),
            resize_debounce_ms: number("resize_debounce_ms", self.resize_debounce_ms),
        }
    }

    fn with_expanded_paths(mut self) -> Self {
        if let Some(dir) = self.data_dir.to_str() {
            self.data_dir = expand_tilde(dir);
        }
        if let Some(file) = self.theme_file.as_ref().and_then(|f| f.to_str()) {
            self.theme_file = Some(expand_tilde(file));
        }
        self
    }

    /// Simulated latency of the session operations.
    #[must_use]
    pub const fn latency(&self) -> Latency {
        Latency {
            check_auth: Duration::from_millis(self.check_auth_latency_ms),
            login: Duration::from_millis(self.login_latency_ms),
            logout: Duration::from_millis(self.logout_latency_ms),
        }
    }

    #[must_use]
    pub const fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Resolves the theme and builds the startup state.
///
/// Theme precedence: `theme_file`, then `theme_name`, then `delv-dark`. A theme
/// that fails to load is logged and replaced by the default.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(viewport_width = config.viewport_width, "initializing shell state");
    AppState::new(resolve_theme(config), config.viewport_width)
}

fn resolve_theme(config: &Config) -> Theme {
    if let Some(file) = &config.theme_file {
        return Theme::from_file(file).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %file.display(), error = %e, "failed to load theme file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_deref().map_or_else(Theme::default, |name| {
        Theme::from_name(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "unknown theme, using default");
            Theme::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.login_latency_ms, 1000);
        assert_eq!(config.check_auth_latency_ms, 500);
        assert_eq!(config.logout_latency_ms, 300);
        assert_eq!(config.resize_debounce(), Duration::from_millis(150));
    }

    #[test]
    fn map_overrides_and_ignores_garbage() {
        let map: BTreeMap<String, String> = [
            ("login_latency_ms", "5"),
            ("logout_latency_ms", "soon"),
            ("trace_level", "  "),
            ("data_dir", "/tmp/delv"),
            ("colour", "blue"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(config.latency().login, Duration::from_millis(5));
        assert_eq!(config.logout_latency_ms, 300);
        assert_eq!(config.trace_level, None);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/delv"));
    }

    #[test]
    fn toml_file_with_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delv.toml");
        std::fs::write(&path, "theme = \"delv-light\"\nviewport_width = 700\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.theme_name.as_deref(), Some("delv-light"));
        assert_eq!(config.viewport_width, 700);
        assert_eq!(config.check_auth_latency_ms, 500);

        let state = initialize(&config);
        assert_eq!(state.theme.name, "delv-light");
        assert_eq!(state.viewport.width_px, 700);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delv.toml");
        std::fs::write(&path, "viewport_width = \"wide\"").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ShellError::Config(_))));
        assert!(matches!(Config::from_file(dir.path().join("none.toml")), Err(ShellError::Config(_))));
    }

    #[test]
    fn unknown_theme_falls_back() {
        let config = Config {
            theme_name: Some("solarized".into()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "delv-dark");

        let config = Config {
            theme_file: Some(PathBuf::from("/nonexistent/theme.toml")),
            theme_name: Some("delv-light".into()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "delv-dark");
    }
}
