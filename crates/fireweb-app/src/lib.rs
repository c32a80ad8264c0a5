//! Application bootstrap
//!
//! Wires the pieces together exactly once per process:
//! - global UI options (component size, z-index)
//! - every icon of the icon set in the [`ComponentRegistry`]
//! - the router selected by config
//! - the API client
//!
//! and finally mounts onto a single host element. There is no teardown.

pub mod error;
pub mod icons;
pub mod registry;

use fireweb_api::ApiClient;
use fireweb_config::{mount_id, ComponentSize, Config, UiConfig};
use fireweb_router::{Navigation, Router};
use serde::Serialize;

pub use error::{AppError, AppResult};
pub use icons::{Icon, IconSet};
pub use registry::ComponentRegistry;

/// Global options every component sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UiOptions {
    pub size: ComponentSize,
    pub z_index: u32,
}

impl From<&UiConfig> for UiOptions {
    fn from(config: &UiConfig) -> Self {
        Self {
            size: config.size,
            z_index: config.z_index,
        }
    }
}

/// Element the app is rendered into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostElement {
    id: String,
}

impl HostElement {
    /// Accepts id selectors only: `#app`
    pub fn parse(selector: &str) -> AppResult<Self> {
        let id = mount_id(selector).ok_or_else(|| AppError::InvalidMountTarget {
            selector: selector.to_string(),
        })?;
        Ok(Self { id: id.to_string() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn selector(&self) -> String {
        format!("#{}", self.id)
    }
}

#[derive(Debug)]
pub struct App {
    options: UiOptions,
    registry: ComponentRegistry,
    router: Router,
    api: ApiClient,
    host: Option<HostElement>,
}

impl App {
    /// Build the app root without mounting it
    pub fn bootstrap(config: &Config, icons: &IconSet) -> AppResult<Self> {
        config.validate()?;

        let options = UiOptions::from(&config.ui);

        let mut registry = ComponentRegistry::new();
        for icon in icons.iter() {
            registry.register(icon.clone())?;
        }
        log::debug!(target: "fireweb::app", "Registered {} icon components", registry.len());

        let router = Router::from_config(&config.router)?;
        let api = ApiClient::from_config(&config.api)?;

        log::info!(
            target: "fireweb::app",
            "App initialized: size={} z_index={} api={}",
            options.size,
            options.z_index,
            api.base()
        );

        Ok(Self {
            options,
            registry,
            router,
            api,
            host: None,
        })
    }

    /// Bootstrap and mount onto the configured host element
    pub fn start(config: &Config, icons: &IconSet) -> AppResult<Self> {
        let mut app = Self::bootstrap(config, icons)?;
        app.mount(&config.ui.mount)?;
        Ok(app)
    }

    /// Attach the app to its host element; only once per app
    pub fn mount(&mut self, selector: &str) -> AppResult<&HostElement> {
        if let Some(host) = &self.host {
            return Err(AppError::AlreadyMounted {
                id: host.id().to_string(),
            });
        }
        let host = HostElement::parse(selector)?;
        log::info!(target: "fireweb::app", "Mounted on {}", host.selector());
        Ok(self.host.insert(host))
    }

    pub fn host(&self) -> Option<&HostElement> {
        self.host.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.host.is_some()
    }

    pub fn options(&self) -> UiOptions {
        self.options
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Navigate the app's router to a path
    pub async fn navigate(&mut self, path: &str) -> AppResult<&Navigation> {
        Ok(self.router.push(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fireweb_config::{ConfigError, RouteSet};

    #[test]
    fn test_bootstrap_registers_every_icon_once() {
        let icons = IconSet::builtin();
        let app = App::bootstrap(&Config::default(), &icons).unwrap();

        assert_eq!(app.registry().len(), icons.len());
        for icon in icons.iter() {
            assert_eq!(app.registry().get(icon.name()), Some(icon));
        }
        assert!(!app.is_mounted());
    }

    #[test]
    fn test_bootstrap_rejects_duplicate_icons() {
        let icons = IconSet::new(vec![Icon::new("Wallet"), Icon::new("Wallet")]);
        let err = App::bootstrap(&Config::default(), &icons).unwrap_err();
        assert!(matches!(err, AppError::DuplicateComponent { .. }));
    }

    #[test]
    fn test_global_options() {
        let app = App::bootstrap(&Config::default(), &IconSet::default()).unwrap();
        assert_eq!(
            app.options(),
            UiOptions {
                size: ComponentSize::Default,
                z_index: 2000
            }
        );
        assert_eq!(app.api().base(), "http://127.0.0.1:5001/api");
    }

    #[test]
    fn test_start_mounts_once() {
        let mut app = App::start(&Config::default(), &IconSet::builtin()).unwrap();
        assert_eq!(app.host().map(HostElement::id), Some("app"));

        let err = app.mount("#other").unwrap_err();
        assert!(matches!(err, AppError::AlreadyMounted { ref id } if id == "app"));
    }

    #[test]
    fn test_mount_target_validation() {
        assert_eq!(HostElement::parse("#app").unwrap().selector(), "#app");
        assert_eq!(HostElement::parse(" #main-root ").unwrap().id(), "main-root");
        for selector in ["app", "#", ".app", "#app div", ""] {
            assert!(HostElement::parse(selector).is_err(), "{selector}");
        }
    }

    #[test]
    fn test_compound_mount_rejected_by_config() {
        let err = Config::from_yaml("ui:\n  mount: \"#app div\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "ui.mount"));

        let mut config = Config::default();
        config.ui.mount = "#app div".to_string();
        let err = App::start(&config, &IconSet::builtin()).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        let err = App::bootstrap(&config, &IconSet::builtin()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_navigate_uses_configured_routes() {
        let mut config = Config::default();
        config.router.routes = RouteSet::Extended;
        let mut app = App::start(&config, &IconSet::builtin()).unwrap();

        let nav = app.navigate("/about").await.unwrap();
        assert_eq!(nav.view().map(|v| v.id.as_str()), Some("about"));

        let nav = app.navigate("/recent-transactions").await.unwrap();
        assert_eq!(nav.view().map(|v| v.id.as_str()), Some("recent-transactions"));

        let nav = app.navigate("/settings").await.unwrap();
        assert!(!nav.is_resolved());
    }
}
