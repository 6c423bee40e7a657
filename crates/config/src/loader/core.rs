//! Core [`SettingsLoader`]: single-pass load of the settings file at startup.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{ConfigError, Result};
use crate::settings::Settings;
use crate::validation::{validate_settings, ValidationErrors};

use super::merge::overlay;

/// Environment variable holding the settings file path.
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";

/// Loads [`Settings`] from a YAML file.
///
/// Loading runs once at process start. The returned value is read-only
/// afterwards; there is no reload path.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    path: PathBuf,
    export_proxy_env: bool,
}

impl SettingsLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            export_proxy_env: false,
        }
    }

    /// Loader for the path in [`CONFIG_FILE_ENV`].
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(CONFIG_FILE_ENV)
    }

    /// Loader for the path held in `var`. Unset or empty is an error.
    pub fn from_env_var(var: &str) -> Result<Self> {
        let path = std::env::var_os(var)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingSource {
                var: var.to_string(),
            })?;
        Ok(Self::new(PathBuf::from(path)))
    }

    /// Also export the configured proxy as `HTTPS_PROXY` after a successful
    /// load. See [`ProxyConfig::export_env`](crate::ProxyConfig::export_env)
    /// for the threading caveats.
    pub fn export_proxy_env(mut self, export: bool) -> Self {
        self.export_proxy_env = export;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, parse, merge and validate the settings file.
    pub fn load(&self) -> Result<Settings> {
        let bytes = fs::read(&self.path).map_err(|source| {
            warn!(path = %self.path.display(), error = %source, "unable to load config file");
            ConfigError::Read {
                path: self.path.clone(),
                source,
            }
        })?;

        let settings = parse_settings(&bytes, &self.path.display().to_string())?;

        if self.export_proxy_env {
            if let Some(proxy) = settings.proxy() {
                proxy.export_env();
            }
        }

        info!(
            path = %self.path.display(),
            warnings = settings.warnings().len(),
            "loaded config"
        );
        Ok(settings)
    }
}

/// Parse YAML bytes into validated [`Settings`].
///
/// The document is merged onto [`Settings::default()`], so any key it
/// omits (or sets to `null`) keeps its default. `origin` names the source in
/// error messages.
pub fn parse_settings(bytes: &[u8], origin: &str) -> Result<Settings> {
    let parse_error = |source: serde_yaml::Error| {
        warn!(origin, error = %source, "unable to parse config");
        ConfigError::Parse {
            origin: origin.to_string(),
            source,
        }
    };

    let raw: serde_yaml::Value = if is_blank(bytes) {
        serde_yaml::Value::Null
    } else {
        serde_yaml::from_slice(bytes).map_err(parse_error)?
    };

    let defaults = serde_yaml::to_value(Settings::default()).map_err(parse_error)?;
    let merged = overlay(&defaults, &raw);
    let mut settings: Settings = serde_yaml::from_value(merged).map_err(parse_error)?;

    let result = validate_settings(&mut settings, &raw);

    for warning in &result.warnings {
        warn!(origin, path = %warning.path, "{}", warning);
    }

    if !result.is_valid() {
        for error in &result.errors {
            warn!(origin, path = %error.path, kind = ?error.kind, "{}", error.message);
        }
        return Err(ValidationErrors(result.errors).into());
    }

    Ok(settings)
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

