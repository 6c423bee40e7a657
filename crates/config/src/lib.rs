//! Configuration loader for the kwatch Kubernetes monitoring agent.
//!
//! This crate provides:
//! - Typed [`Settings`] with defaults for every YAML key
//! - Allow/forbid resolution of `!`-prefixed namespace and reason lists
//! - Pod label-exclusion rules compiled once at load time
//! - A loader that overlays a YAML file onto the defaults and validates it
//! - Explicit HTTPS proxy configuration for outbound clients

pub mod error;
pub mod loader;
pub mod proxy;
pub mod rules;
mod scalar;
pub mod settings;
pub mod validation;

pub use error::{ConfigError, Result};
pub use loader::{SettingsLoader, CONFIG_FILE_ENV};
pub use proxy::ProxyConfig;
pub use rules::{IgnorePodLabelRule, LabelMatcher, ListFilter, PodLabelRule};
pub use settings::Settings;
