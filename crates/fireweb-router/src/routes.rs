//! Route records and the bundled route tables

use crate::loader::{EagerLoader, LazyLoader, ViewLoader};
use crate::view::View;
use fireweb_config::RouteSet;
use fireweb_utils::normalize_path;
use std::sync::Arc;

/// One path-to-view mapping
#[derive(Clone)]
pub struct RouteRecord {
    path: String,
    name: String,
    loader: Arc<dyn ViewLoader>,
}

impl RouteRecord {
    pub fn new(path: &str, name: impl Into<String>, loader: impl ViewLoader + 'static) -> Self {
        Self {
            path: normalize_path(path),
            name: name.into(),
            loader: Arc::new(loader),
        }
    }

    pub fn eager(path: &str, name: impl Into<String>, view: View) -> Self {
        Self::new(path, name, EagerLoader::new(view))
    }

    pub fn lazy(path: &str, name: impl Into<String>, view: View) -> Self {
        Self::new(path, name, LazyLoader::deferred(view))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn loader(&self) -> &dyn ViewLoader {
        self.loader.as_ref()
    }

    /// Case-insensitive match against an already normalized path
    pub(crate) fn matches(&self, normalized: &str) -> bool {
        self.path.to_lowercase() == normalized.to_lowercase()
    }
}

impl std::fmt::Debug for RouteRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRecord")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("loaded", &self.loader.is_loaded())
            .finish()
    }
}

/// Home bundled up front, recent transactions fetched on first visit
pub fn standard_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::eager("/", "home", View::home()),
        RouteRecord::lazy("/recent-transactions", "recent-transactions", View::recent_transactions()),
    ]
}

/// Home and recent transactions bundled, about fetched on first visit
pub fn extended_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::eager("/", "home", View::home()),
        RouteRecord::lazy("/about", "about", View::about()),
        RouteRecord::eager("/recent-transactions", "recent-transactions", View::recent_transactions()),
    ]
}

pub fn routes_for(set: RouteSet) -> Vec<RouteRecord> {
    match set {
        RouteSet::Standard => standard_routes(),
        RouteSet::Extended => extended_routes(),
    }
}
