//! View identifiers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A loaded view, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub id: ViewId,
    pub title: String,
}

impl View {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ViewId::new(id),
            title: title.into(),
        }
    }

    pub fn home() -> Self {
        Self::new("home", "Home")
    }

    pub fn recent_transactions() -> Self {
        Self::new("recent-transactions", "Recent Transactions")
    }

    pub fn about() -> Self {
        Self::new("about", "About")
    }
}
