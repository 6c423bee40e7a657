//! Semantic validation of a loaded settings document.
//!
//! Serde handles syntax; the checks here derive the allow/forbid filters,
//! compile label rules, resolve the proxy and range-check values. All
//! problems are collected, not just the first, so a single run reports
//! everything wrong with a config. Errors block the load; warnings are
//! advisory and kept on the resulting [`Settings`].

mod fuzzy;
mod key_checks;
mod settings_checks;

use std::fmt;

use serde::Serialize;

use crate::settings::{Derived, Settings};

// ── Result types ────────────────────────────────────────────────────

/// Category of a blocking validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Allow and forbid entries configured for the same list.
    Conflict,
    /// A label rule without a label, or with zero or two value sources.
    InvalidRule,
    /// A label rule pattern that is not a valid regular expression.
    Compile,
    /// A value outside its accepted range or format.
    InvalidValue,
}

/// A blocking validation error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub kind: ErrorKind,
    /// Document location, e.g. `"ignorePodLabels[2].valueRegex"`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
    /// Optional "Did you mean ...?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(s) = &self.suggestion {
            write!(f, " ({s})")?;
        }
        Ok(())
    }
}

/// Every blocking error found in one document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    /// Whether any error has the given kind.
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn error(
        &mut self,
        kind: ErrorKind,
        path: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(ValidationError {
            kind,
            path: path.into(),
            message: message.into(),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn warn_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate deserialized settings and compute their derived fields.
///
/// `raw` is the document as written (before merging with defaults); it is
/// only inspected for unknown keys. Derived fields are written to
/// `settings` even when errors are found, but callers must discard the
/// value unless the result is valid.
pub fn validate_settings(settings: &mut Settings, raw: &serde_yaml::Value) -> ValidationResult {
    let mut result = ValidationResult::new();

    key_checks::check_unknown_keys(raw, &mut result);
    key_checks::check_alert_providers(&settings.alert, &mut result);

    let namespaces =
        settings_checks::resolve_list("namespaces", &settings.namespaces, &mut result);
    let reasons = settings_checks::resolve_list("reasons", &settings.reasons, &mut result);
    settings_checks::check_entries(
        "ignoreContainerNames",
        &settings.ignore_container_names,
        &mut result,
    );
    settings_checks::check_pvc_monitor(&settings.pvc_monitor, &mut result);
    let proxy = settings_checks::resolve_proxy(&settings.app, &mut result);
    let pod_label_rules =
        settings_checks::compile_label_rules(&settings.ignore_pod_labels, &mut result);

    settings.derived = Derived {
        namespaces,
        reasons,
        pod_label_rules,
        proxy,
        warnings: result.warnings.clone(),
    };

    result
}

/// Parse raw YAML into settings and validate it, without failing fast.
///
/// Parse errors are reported as a single `InvalidValue` error at the root.
pub fn validate_yaml(yaml: &str) -> ValidationResult {
    match crate::loader::parse_settings(yaml.as_bytes(), "<inline>") {
        Ok(settings) => ValidationResult {
            errors: Vec::new(),
            warnings: settings.warnings().to_vec(),
        },
        Err(crate::ConfigError::Validation(errors)) => ValidationResult {
            errors: errors.0,
            warnings: Vec::new(),
        },
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error(ErrorKind::InvalidValue, "", e.to_string());
            result
        }
    }
}
