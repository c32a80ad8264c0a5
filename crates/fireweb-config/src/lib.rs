//! Configuration management for fireweb
//!
//! Loads the client configuration from YAML: where the bridge API lives,
//! how routes are resolved and which host element the app mounts to.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the bridge server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Prefix prepended to every endpoint path
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Seconds before an in-flight request fails
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            base_path: default_base_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_base_path() -> String {
    "/api".to_string()
}

fn default_timeout_secs() -> u64 {
    100
}

/// How browser locations map onto route paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Route path follows the deployment base, e.g. `/static/recent-transactions`
    #[default]
    Web,
    /// Route path lives in the fragment, e.g. `/static/#/recent-transactions`
    Hash,
}

impl std::str::FromStr for HistoryMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "web" => Ok(HistoryMode::Web),
            "hash" => Ok(HistoryMode::Hash),
            _ => Err(format!("Invalid history mode: {}", s)),
        }
    }
}

impl std::fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryMode::Web => write!(f, "web"),
            HistoryMode::Hash => write!(f, "hash"),
        }
    }
}

/// Which route table the deployment registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteSet {
    /// Home and recent transactions; recent transactions loaded lazily
    #[default]
    Standard,
    /// Standard routes plus a lazily loaded about page
    Extended,
}

impl std::str::FromStr for RouteSet {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(RouteSet::Standard),
            "extended" => Ok(RouteSet::Extended),
            _ => Err(format!("Invalid route set: {}", s)),
        }
    }
}

impl std::fmt::Display for RouteSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteSet::Standard => write!(f, "standard"),
            RouteSet::Extended => write!(f, "extended"),
        }
    }
}

/// Client-side routing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub history: HistoryMode,
    /// Base deployment path for the app's static assets
    #[serde(default = "default_router_base")]
    pub base: String,
    #[serde(default)]
    pub routes: RouteSet,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history: HistoryMode::default(),
            base: default_router_base(),
            routes: RouteSet::default(),
        }
    }
}

fn default_router_base() -> String {
    "/static/".to_string()
}

/// Default component size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComponentSize {
    Large,
    #[default]
    Default,
    Small,
}

impl std::fmt::Display for ComponentSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentSize::Large => write!(f, "large"),
            ComponentSize::Default => write!(f, "default"),
            ComponentSize::Small => write!(f, "small"),
        }
    }
}

/// Global UI options applied at bootstrap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub size: ComponentSize,
    /// Starting z-index for popups and overlays
    #[serde(default = "default_z_index")]
    pub z_index: u32,
    /// Host element selector the app mounts to
    #[serde(default = "default_mount")]
    pub mount: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            size: ComponentSize::default(),
            z_index: default_z_index(),
            mount: default_mount(),
        }
    }
}

fn default_z_index() -> u32 {
    2000
}

fn default_mount() -> String {
    "#app".to_string()
}

/// Element id named by an id selector such as `#app`
///
/// The id is one run of ASCII letters, digits, `-` or `_`; anything else
/// (class selectors, descendant selectors, a bare `#`) yields `None`.
pub fn mount_id(selector: &str) -> Option<&str> {
    let id = selector.trim().strip_prefix('#')?;
    let valid = !id.is_empty()
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => ConfigError::IoError { message: e.to_string() },
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty document is a valid all-defaults config
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if !self.router.base.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "router.base".to_string(),
                reason: "Base path must start with '/'".to_string(),
            });
        }

        if mount_id(&self.ui.mount).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "ui.mount".to_string(),
                reason: "Mount target must be an id selector such as '#app'".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.api.timeout_secs)
    }
}
