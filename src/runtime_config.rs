//! # Runtime Configuration Module
//!
//! Environment-variable configuration for the router's hosting environment.
//!
//! ## Environment Variables
//!
//! ### `REQUEST_METHOD`
//!
//! The CGI-style request method the host is serving. [`Router::with_config`]
//! uses it as the method for [`Router::call_route`]. Absent or unparseable
//! values fall back to `GET`.
//!
//! ### `PATHMUX_LOG_LEVEL`, `PATHMUX_LOG_FORMAT`, `PATHMUX_LOG_TARGET_FILTER`
//!
//! See [`LogConfig`].
//!
//! ## Usage
//!
//! ```rust
//! use pathmux::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Request method: {}", config.request_method);
//! ```
//!
//! [`Router::with_config`]: crate::router::Router::with_config
//! [`Router::call_route`]: crate::router::Router::call_route

use http::Method;
use std::env;
use tracing::warn;

use crate::error::{Result, RouterError};
use crate::otel::LogConfig;

/// Variable holding the host's request method
pub const REQUEST_METHOD_VAR: &str = "REQUEST_METHOD";

/// Parse a verb such as `GET` or `PURGE`; verbs are case-sensitive
pub fn parse_method(method: &str) -> Result<Method> {
    if method.is_empty() {
        return Err(RouterError::InvalidMethod {
            method: method.to_string(),
        });
    }
    Method::from_bytes(method.as_bytes()).map_err(|_| RouterError::InvalidMethod {
        method: method.to_string(),
    })
}

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Method used when dispatch is not given one explicitly (default `GET`)
    pub request_method: Method,
    /// Logging configuration
    pub log: LogConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            request_method: Method::GET,
            log: LogConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let request_method = match env::var(REQUEST_METHOD_VAR) {
            Ok(val) => parse_method(&val).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring invalid REQUEST_METHOD, using GET");
                Method::GET
            }),
            Err(_) => Method::GET,
        };
        RuntimeConfig {
            request_method,
            log: LogConfig::from_env(),
        }
    }
}
