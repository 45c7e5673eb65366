//! Voyage CLI - command line tools over the route fusion core.
//!
//! Binaries:
//! - build_route: fused route models as JSON
//! - timeline: normalized milestone timeline with progress
//! - regenerate_routes: tracking feed with rebuilt remaining routes

pub mod config;
pub mod loader;
pub mod logging;
pub mod output;

pub use config::Config;
pub use output::print_json;
