//! Error types and handling for viewroute core

use thiserror::Error;

/// Result type alias for viewroute operations
pub type Result<T> = std::result::Result<T, Error>;

/// Type alias for route table and matching results
pub type RouterResult<T> = std::result::Result<T, RouterError>;

/// Type alias for component loader results
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Main error type for viewroute core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Route table and resolution errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Deferred component retrieval errors
    #[error("Navigation failed: {0}")]
    Load(#[from] LoadError),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Structured error type for router operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("No routes configured")]
    NoRoutes,

    #[error("Route name '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("Route path '{0}' is declared more than once")]
    DuplicatePath(String),

    #[error("Invalid route path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("No route matches '{0}'")]
    RouteNotFound(String),

    #[error("Route named '{0}' not found")]
    NamedRouteNotFound(String),

    #[error("Missing param '{param}' for route '{route}'")]
    MissingParam { route: String, param: String },
}

/// Errors raised while retrieving a route's component
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to load component for route '{route}': {message}")]
    Failed { route: String, message: String },
}

impl LoadError {
    /// Build a load failure for the given route
    pub fn failed(route: impl Into<String>, message: impl Into<String>) -> Self {
        LoadError::Failed {
            route: route.into(),
            message: message.into(),
        }
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}
