//! # CLI Module
//!
//! The `pathmux` binary loads a YAML route manifest (see
//! [`route_file`](crate::route_file)) and inspects it.
//!
//! ## Commands
//!
//! ```bash
//! # List routes per method
//! pathmux routes --routes routes.yaml
//!
//! # Dispatch a path (method from --method, REQUEST_METHOD, or GET)
//! pathmux match --routes routes.yaml --method DELETE /catalog/1024/
//! ```
//!
//! Logging is configured through `PATHMUX_LOG_*` variables or `RUST_LOG`.

mod commands;


pub use commands::{run, run_cli, Cli, Commands};
