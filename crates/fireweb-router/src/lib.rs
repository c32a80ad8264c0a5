//! Client-side routing
//!
//! Maps a location to exactly one view, or to nothing. Structure:
//! - routes: route records and the bundled route tables
//! - loader: eager and lazy view loaders behind one trait
//! - view: view identifiers
//!
//! The router holds a single piece of state, the current navigation. It
//! keeps no history of its own; back/forward belongs to the host.

pub mod error;
pub mod loader;
pub mod routes;
pub mod view;

use fireweb_config::{HistoryMode, RouterConfig};
use fireweb_utils::{join_path, normalize_base, normalize_path, strip_query_and_fragment};
use url::Url;

pub use error::{RouterError, RouterResult};
pub use loader::{EagerLoader, LazyLoader, ViewLoader};
pub use routes::{extended_routes, routes_for, standard_routes, RouteRecord};
pub use view::{View, ViewId};

/// Where the router currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Navigation {
    /// Nothing resolved yet, or the last path matched no route
    #[default]
    Unresolved,
    Resolved {
        route: String,
        path: String,
        view: View,
    },
}

impl Navigation {
    pub fn view(&self) -> Option<&View> {
        match self {
            Navigation::Resolved { view, .. } => Some(view),
            Navigation::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Navigation::Resolved { .. })
    }
}

#[derive(Debug)]
pub struct Router {
    routes: Vec<RouteRecord>,
    history: HistoryMode,
    /// Deployment base, always `/`-delimited on both ends
    base: String,
    current: Navigation,
}

impl Router {
    pub fn new(history: HistoryMode, base: &str) -> Self {
        Self {
            routes: Vec::new(),
            history,
            base: normalize_base(base),
            current: Navigation::Unresolved,
        }
    }

    /// Router with the route table and history mode the config selects
    pub fn from_config(config: &RouterConfig) -> RouterResult<Self> {
        let mut router = Self::new(config.history, &config.base);
        for record in routes_for(config.routes) {
            router.add_route(record)?;
        }
        log::debug!(
            target: "fireweb::router",
            "Router ready: {} routes, history={}, base={}",
            router.routes.len(),
            router.history,
            router.base
        );
        Ok(router)
    }

    /// Register a route; paths and names must be unique
    pub fn add_route(&mut self, record: RouteRecord) -> RouterResult<()> {
        if self.routes.iter().any(|r| r.matches(record.path())) {
            return Err(RouterError::DuplicatePath {
                path: record.path().to_string(),
            });
        }
        if self.routes.iter().any(|r| r.name() == record.name()) {
            return Err(RouterError::DuplicateName {
                name: record.name().to_string(),
            });
        }
        self.routes.push(record);
        Ok(())
    }

    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    pub fn history(&self) -> HistoryMode {
        self.history
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn current(&self) -> &Navigation {
        &self.current
    }

    /// Route registered for a path, without loading its view
    pub fn match_path(&self, path: &str) -> Option<&RouteRecord> {
        let normalized = normalize_path(path);
        self.routes.iter().find(|r| r.matches(&normalized))
    }

    /// Load the view for a path; `None` when no route matches
    pub async fn resolve(&self, path: &str) -> RouterResult<Option<View>> {
        match self.match_path(path) {
            Some(record) => record.loader().load().await.map(Some),
            None => Ok(None),
        }
    }

    /// Navigate programmatically
    ///
    /// An unregistered path leaves the router unresolved rather than failing.
    /// A view that fails to load keeps the previous navigation in place.
    pub async fn push(&mut self, path: &str) -> RouterResult<&Navigation> {
        let normalized = normalize_path(path);
        let next = match self.match_path(path) {
            Some(record) => {
                let view = record.loader().load().await?;
                log::debug!(target: "fireweb::router", "{} -> {}", normalized, view.id);
                Navigation::Resolved {
                    route: record.name().to_string(),
                    path: normalized,
                    view,
                }
            }
            None => {
                log::warn!(target: "fireweb::router", "No route for {}", normalized);
                Navigation::Unresolved
            }
        };
        self.current = next;
        Ok(&self.current)
    }

    /// Navigate to a browser location, e.g. `/static/recent-transactions`
    /// or `/static/#/recent-transactions` in hash mode
    pub async fn navigate_to_location(&mut self, location: &str) -> RouterResult<&Navigation> {
        let path = self.location_to_path(location);
        self.push(&path).await
    }

    /// Route path encoded in a browser location
    ///
    /// Absolute URLs lose their origin; query strings never contribute to the path.
    pub fn location_to_path(&self, location: &str) -> String {
        let (path, fragment) = split_location(location);
        match self.history {
            HistoryMode::Hash => match fragment {
                Some(fragment) => normalize_path(&fragment),
                None => "/".to_string(),
            },
            HistoryMode::Web => {
                let bare_base = self.base.trim_end_matches('/');
                if let Some(rest) = path.strip_prefix(&self.base) {
                    normalize_path(rest)
                } else if !bare_base.is_empty() && path == bare_base {
                    "/".to_string()
                } else {
                    normalize_path(&path)
                }
            }
        }
    }

    /// Browser location for a route path
    pub fn href(&self, path: &str) -> String {
        let path = normalize_path(path);
        match self.history {
            HistoryMode::Hash => format!("{}#{}", self.base, path),
            HistoryMode::Web if path == "/" => self.base.clone(),
            HistoryMode::Web => join_path(&self.base, &path),
        }
    }

    /// Browser location for a named route
    pub fn href_for(&self, name: &str) -> RouterResult<String> {
        self.routes
            .iter()
            .find(|r| r.name() == name)
            .map(|r| self.href(r.path()))
            .ok_or_else(|| RouterError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Path and fragment of a location, which is either an absolute URL or
/// a path relative to the origin
fn split_location(location: &str) -> (String, Option<String>) {
    match Url::parse(location) {
        Ok(url) if !url.cannot_be_a_base() => {
            (url.path().to_string(), url.fragment().map(str::to_string))
        }
        _ => (
            strip_query_and_fragment(location).to_string(),
            location.split_once('#').map(|(_, fragment)| fragment.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fireweb_config::RouteSet;

    fn router(routes: RouteSet, history: HistoryMode) -> Router {
        Router::from_config(&RouterConfig {
            history,
            base: "/static/".to_string(),
            routes,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolves_registered_paths() {
        let router = router(RouteSet::Standard, HistoryMode::Web);
        assert_eq!(router.resolve("/").await.unwrap().unwrap().id.as_str(), "home");
        assert_eq!(
            router.resolve("/recent-transactions").await.unwrap().unwrap().id.as_str(),
            "recent-transactions"
        );
        assert_eq!(router.resolve("/nowhere").await.unwrap(), None);
        assert_eq!(router.resolve("/about").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_matching_is_lenient() {
        let router = router(RouteSet::Standard, HistoryMode::Web);
        for path in [
            "/recent-transactions/",
            "/Recent-Transactions",
            "recent-transactions",
            "/recent-transactions?page=2",
            "/recent%2Dtransactions",
        ] {
            let view = router.resolve(path).await.unwrap();
            assert_eq!(view.map(|v| v.id), Some(ViewId::new("recent-transactions")), "{path}");
        }
        assert_eq!(router.resolve("/recent-transactions/extra").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_eager_and_lazy_tables_agree() {
        let standard = router(RouteSet::Standard, HistoryMode::Web);
        let extended = router(RouteSet::Extended, HistoryMode::Web);

        // recent-transactions is lazy in one table and eager in the other
        assert!(!standard.match_path("/recent-transactions").unwrap().loader().is_loaded());
        assert!(extended.match_path("/recent-transactions").unwrap().loader().is_loaded());

        for path in ["/", "/recent-transactions", "/missing"] {
            assert_eq!(
                standard.resolve(path).await.unwrap(),
                extended.resolve(path).await.unwrap(),
                "{path}"
            );
        }
        assert_eq!(extended.resolve("/about").await.unwrap(), Some(View::about()));
    }

    #[tokio::test]
    async fn test_push_state_machine() {
        let mut router = router(RouteSet::Standard, HistoryMode::Web);
        assert_eq!(router.current(), &Navigation::Unresolved);

        let nav = router.push("/recent-transactions").await.unwrap();
        assert_eq!(nav.view(), Some(&View::recent_transactions()));
        assert!(router.match_path("/recent-transactions").unwrap().loader().is_loaded());

        router.push("/missing").await.unwrap();
        assert!(!router.current().is_resolved());

        router.push("/").await.unwrap();
        match router.current() {
            Navigation::Resolved { route, path, view } => {
                assert_eq!(route, "home");
                assert_eq!(path, "/");
                assert_eq!(view, &View::home());
            }
            other => panic!("expected home, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_navigation() {
        let mut router = Router::new(HistoryMode::Web, "/");
        router.add_route(RouteRecord::eager("/", "home", View::home())).unwrap();
        router
            .add_route(RouteRecord::new(
                "/broken",
                "broken",
                LazyLoader::new(|| async {
                    Err(RouterError::LoadFailed {
                        view: "broken".to_string(),
                        reason: "offline".to_string(),
                    })
                }),
            ))
            .unwrap();

        router.push("/").await.unwrap();
        assert!(router.push("/broken").await.is_err());
        assert_eq!(router.current().view(), Some(&View::home()));
    }

    #[tokio::test]
    async fn test_web_history_locations() {
        let mut router = router(RouteSet::Standard, HistoryMode::Web);
        assert_eq!(router.location_to_path("/static/recent-transactions"), "/recent-transactions");
        assert_eq!(router.location_to_path("/static"), "/");
        assert_eq!(router.location_to_path("/static/"), "/");
        assert_eq!(
            router.location_to_path("http://localhost:5001/static/recent-transactions?x=1"),
            "/recent-transactions"
        );
        assert_eq!(router.location_to_path("/recent-transactions"), "/recent-transactions");

        let nav = router.navigate_to_location("/static/recent-transactions").await.unwrap();
        assert_eq!(nav.view(), Some(&View::recent_transactions()));
    }

    #[tokio::test]
    async fn test_hash_history_locations() {
        let mut router = router(RouteSet::Standard, HistoryMode::Hash);
        assert_eq!(router.location_to_path("/static/#/recent-transactions"), "/recent-transactions");
        assert_eq!(router.location_to_path("/static/"), "/");
        assert_eq!(router.location_to_path("http://localhost:5001/static/#/"), "/");

        let nav = router.navigate_to_location("/static/#/nowhere").await.unwrap();
        assert_eq!(nav, &Navigation::Unresolved);
    }

    #[tokio::test]
    async fn test_web_location_with_url_in_query() {
        let mut router = router(RouteSet::Standard, HistoryMode::Web);
        let location = "/static/recent-transactions?next=http://example.com/x";
        assert_eq!(router.location_to_path(location), "/recent-transactions");
        assert_eq!(
            router.location_to_path("/static/?next=https://example.com/recent-transactions"),
            "/"
        );
        assert_eq!(
            router.location_to_path("http://localhost:5001/static/recent-transactions?next=http://a.b/c#top"),
            "/recent-transactions"
        );

        let nav = router.navigate_to_location(location).await.unwrap();
        assert_eq!(nav.view(), Some(&View::recent_transactions()));
    }

    #[tokio::test]
    async fn test_hash_location_with_url_in_query() {
        let mut router = router(RouteSet::Standard, HistoryMode::Hash);
        let location = "/static/#/recent-transactions?next=https://a.b/c";
        assert_eq!(router.location_to_path(location), "/recent-transactions");
        assert_eq!(router.location_to_path("/static/?next=http://a.b/#/c"), "/c");
        assert_eq!(
            router.location_to_path("http://localhost:5001/static/#/recent-transactions?next=https://a.b/c"),
            "/recent-transactions"
        );

        let nav = router.navigate_to_location(location).await.unwrap();
        assert_eq!(nav.view(), Some(&View::recent_transactions()));
    }

    #[test]
    fn test_href() {
        let web = router(RouteSet::Standard, HistoryMode::Web);
        assert_eq!(web.href("/"), "/static/");
        assert_eq!(web.href("/recent-transactions"), "/static/recent-transactions");
        assert_eq!(web.href_for("recent-transactions").unwrap(), "/static/recent-transactions");

        let hash = router(RouteSet::Standard, HistoryMode::Hash);
        assert_eq!(hash.href("/recent-transactions"), "/static/#/recent-transactions");
        assert_eq!(
            hash.href_for("about").unwrap_err(),
            RouterError::NotFound { name: "about".to_string() }
        );
    }

    #[test]
    fn test_duplicate_routes_rejected() {
        let mut router = Router::new(HistoryMode::Web, "/");
        router.add_route(RouteRecord::eager("/", "home", View::home())).unwrap();

        let err = router.add_route(RouteRecord::eager("/", "index", View::home())).unwrap_err();
        assert!(matches!(err, RouterError::DuplicatePath { .. }));

        let err = router.add_route(RouteRecord::eager("/start", "home", View::home())).unwrap_err();
        assert!(matches!(err, RouterError::DuplicateName { .. }));
    }
}
