//! Error types for fireweb-router

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("No route named {name}")]
    NotFound { name: String },

    #[error("Route path already registered: {path}")]
    DuplicatePath { path: String },

    #[error("Route name already registered: {name}")]
    DuplicateName { name: String },

    #[error("Failed to load view {view}: {reason}")]
    LoadFailed { view: String, reason: String },
}

pub type RouterResult<T> = Result<T, RouterError>;
