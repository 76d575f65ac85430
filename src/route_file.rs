//! Route manifests: declaring routes in a YAML file.
//!
//! ```yaml
//! routes:
//!   - template: /catalog/[i:id]/
//!   - template: /orders/[il:ids]/
//!     methods: [GET, DELETE]
//!     response: { source: orders }
//! ```
//!
//! Each entry is registered with a handler that echoes what was matched:
//! `{ "route": template, "path": path, "params": {...}, "response": ... }`.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

use crate::dispatcher::Handler;
use crate::router::{MethodSet, Router};
use crate::runtime_config::parse_method;

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

/// One declared route
#[derive(Debug, Clone, Deserialize)]
pub struct RouteSpec {
    pub template: String,
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
    /// Static payload included in the echo response
    #[serde(default)]
    pub response: Option<Value>,
}

/// A parsed manifest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl RouteManifest {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse route manifest")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route manifest {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Register every declared route on `router`
    pub fn register(&self, router: &mut Router) -> Result<()> {
        for spec in &self.routes {
            let methods = spec
                .methods
                .iter()
                .map(String::as_str)
                .map(parse_method)
                .collect::<crate::Result<Vec<_>>>()
                .with_context(|| format!("Invalid methods for route {}", spec.template))?;

            let template = spec.template.clone();
            let response = spec.response.clone();
            let handler = Handler::function(move |path, params| {
                let mut body = json!({
                    "route": template,
                    "path": path,
                    "params": params,
                });
                if let Some(response) = &response {
                    body["response"] = response.clone();
                }
                Ok(body)
            });

            router
                .add_route(&spec.template, handler, MethodSet::from(methods))
                .with_context(|| format!("Failed to register route {}", spec.template))?;
        }

        info!(routes_count = self.routes.len(), "Route manifest registered");
        Ok(())
    }
}
