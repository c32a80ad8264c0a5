//! Error types for fireweb-app

use fireweb_api::ApiError;
use fireweb_config::ConfigError;
use fireweb_router::RouterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Component already registered: {name}")]
    DuplicateComponent { name: String },

    #[error("Invalid mount target '{selector}': expected an id selector such as #app")]
    InvalidMountTarget { selector: String },

    #[error("App is already mounted on #{id}")]
    AlreadyMounted { id: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API client error: {0}")]
    Api(#[from] ApiError),

    #[error("Router error: {0}")]
    Router(#[from] RouterError),
}

pub type AppResult<T> = Result<T, AppError>;
