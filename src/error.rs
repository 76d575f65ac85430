//! Error kinds surfaced by route registration, dispatch and parameter access.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RouterError>;

/// Every failure the router can report.
///
/// Registration-time kinds (`UnknownType`, `DuplicateParamName`,
/// `MalformedPlaceholder`, `InvalidTypePattern`) abort the `add_route` call that
/// produced them and leave the route table untouched. Dispatch-time and
/// access-time kinds are returned to the immediate caller; nothing is retried.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A placeholder referenced a type token that is not registered
    #[error("Unknown type token '{token}' in route template '{template}'")]
    UnknownType {
        /// The unresolved token (e.g. `x` in `[x:id]`)
        token: String,
        /// The normalized template the token came from
        template: String,
    },

    /// The same parameter name appears twice in one template
    #[error("Duplicate parameter name '{name}' in route template '{template}'")]
    DuplicateParamName {
        /// The repeated name
        name: String,
        /// The normalized template
        template: String,
    },

    /// A `[` ... `]` placeholder could not be parsed
    #[error("Malformed placeholder in route template '{template}': {reason}")]
    MalformedPlaceholder {
        /// The normalized template
        template: String,
        /// What was wrong with it
        reason: String,
    },

    /// A type registered with a fragment that is not a valid regex
    #[error("Type '{token}' has an invalid match pattern: {reason}")]
    InvalidTypePattern {
        /// The token whose fragment failed to compile
        token: String,
        /// Compiler diagnostic
        reason: String,
    },

    /// No static or dynamic route matched the method and path
    #[error("The processor was not found for the route {path} in {trace}")]
    NoRouteMatched {
        /// Requested method
        method: String,
        /// Normalized requested path
        path: String,
        /// Listing of every registered route, across methods
        trace: String,
    },

    /// The last successful match did not capture this parameter
    #[error("Parameter '{name}' was not found in the route")]
    ParamNotFound {
        /// The requested parameter name
        name: String,
    },

    /// A method string could not be parsed as an HTTP verb
    #[error("Invalid request method '{method}'")]
    InvalidMethod {
        /// The rejected input
        method: String,
    },

    /// A bound-method handler named a method its target does not provide
    #[error("Action '{action}' is not provided by the bound target")]
    ActionNotFound {
        /// The method name the handler was bound to
        action: String,
    },

    /// Failure raised by a route handler
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

impl RouterError {
    /// True for the dispatch-time "nothing matched" kind
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        matches!(self, RouterError::NoRouteMatched { .. })
    }
}
