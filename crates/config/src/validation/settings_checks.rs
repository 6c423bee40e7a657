//! Value checks and derivation: allow/forbid lists, label rules, PVC monitor
//! ranges, and the outbound proxy.

use crate::proxy::ProxyConfig;
use crate::rules::{IgnorePodLabelRule, LabelRuleError, ListFilter, PodLabelRule, NEGATION_MARKER};
use crate::settings::{App, PvcMonitor};

use super::{ErrorKind, ValidationResult};

/// Resolve a `!`-prefixed list into a [`ListFilter`].
///
/// A list mixing allowed and forbidden entries is a conflict; the filter
/// falls back to [`ListFilter::All`] and the error blocks the load.
pub(super) fn resolve_list(field: &str, items: &[String], result: &mut ValidationResult) -> ListFilter {
    check_entries(field, items, result);

    match ListFilter::from_tokens(items) {
        Ok(filter) => filter,
        Err(conflict) => {
            result.error(ErrorKind::Conflict, field, conflict.to_string());
            ListFilter::All
        }
    }
}

/// Reject empty entries, including a bare negation marker.
pub(super) fn check_entries(field: &str, items: &[String], result: &mut ValidationResult) {
    for (i, item) in items.iter().enumerate() {
        let name = item.strip_prefix(NEGATION_MARKER).unwrap_or(item);
        if name.trim().is_empty() {
            result.error(
                ErrorKind::InvalidValue,
                format!("{field}[{i}]"),
                format!("Entry must not be empty, got '{item}'"),
            );
        }
    }
}

pub(super) fn check_pvc_monitor(pvc: &PvcMonitor, result: &mut ValidationResult) {
    if pvc.enabled && pvc.interval == 0 {
        result.error(
            ErrorKind::InvalidValue,
            "pvcMonitor.interval",
            "interval must be at least 1 minute when the PVC monitor is enabled",
        );
    }

    if !(0.0..=100.0).contains(&pvc.threshold) {
        result.error(
            ErrorKind::InvalidValue,
            "pvcMonitor.threshold",
            format!("threshold must be between 0 and 100, got {}", pvc.threshold),
        );
    }
}

pub(super) fn resolve_proxy(app: &App, result: &mut ValidationResult) -> Option<ProxyConfig> {
    if app.proxy_url.trim().is_empty() {
        return None;
    }

    match ProxyConfig::parse(&app.proxy_url) {
        Ok(proxy) => Some(proxy),
        Err(e) => {
            result.error(ErrorKind::InvalidValue, "app.proxyURL", e.to_string());
            None
        }
    }
}

/// Compile every label rule, recording a failure for each bad one.
pub(super) fn compile_label_rules(
    rules: &[IgnorePodLabelRule],
    result: &mut ValidationResult,
) -> Vec<PodLabelRule> {
    let mut compiled = Vec::with_capacity(rules.len());

    for (i, rule) in rules.iter().enumerate() {
        let path = format!("ignorePodLabels[{i}]");
        match rule.compile() {
            Ok(c) => compiled.push(c),
            Err(e @ LabelRuleError::MissingLabel) => {
                result.error(ErrorKind::InvalidRule, format!("{path}.label"), e.to_string());
            }
            Err(e @ (LabelRuleError::MissingValue { .. } | LabelRuleError::AmbiguousValue { .. })) => {
                result.error(ErrorKind::InvalidRule, path, e.to_string());
            }
            Err(e @ LabelRuleError::InvalidPattern { .. }) => {
                result.error(ErrorKind::Compile, format!("{path}.valueRegex"), e.to_string());
            }
        }
    }

    compiled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolve_list_conflict_falls_back_to_all() {
        let mut result = ValidationResult::new();
        let filter = resolve_list("namespaces", &strings(&["a", "!b"]), &mut result);
        assert!(filter.is_all());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ErrorKind::Conflict);
    }

    #[test]
    fn bare_marker_is_an_empty_entry() {
        let mut result = ValidationResult::new();
        let filter = resolve_list("reasons", &strings(&["!"]), &mut result);
        assert_eq!(filter, ListFilter::Forbid(vec![String::new()]));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "reasons[0]");
        assert_eq!(result.errors[0].kind, ErrorKind::InvalidValue);
    }

    #[test]
    fn pvc_monitor_ranges() {
        let mut result = ValidationResult::new();
        check_pvc_monitor(&PvcMonitor::default(), &mut result);
        assert!(result.is_valid());

        let pvc = PvcMonitor {
            enabled: true,
            interval: 0,
            threshold: 120.0,
        };
        check_pvc_monitor(&pvc, &mut result);
        let paths: Vec<_> = result.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["pvcMonitor.interval", "pvcMonitor.threshold"]);
    }

    #[test]
    fn disabled_pvc_monitor_allows_zero_interval() {
        let mut result = ValidationResult::new();
        let pvc = PvcMonitor {
            enabled: false,
            interval: 0,
            ..PvcMonitor::default()
        };
        check_pvc_monitor(&pvc, &mut result);
        assert!(result.is_valid());
    }

    #[test]
    fn invalid_proxy_is_an_error() {
        let mut result = ValidationResult::new();
        let app = App {
            proxy_url: "ftp://proxy.local".to_string(),
            ..App::default()
        };
        assert!(resolve_proxy(&app, &mut result).is_none());
        assert_eq!(result.errors[0].path, "app.proxyURL");
    }

    #[test]
    fn empty_proxy_is_none_without_error() {
        let mut result = ValidationResult::new();
        assert!(resolve_proxy(&App::default(), &mut result).is_none());
        assert!(result.is_valid());
    }

    #[test]
    fn good_rules_survive_bad_neighbours() {
        let rules = vec![
            IgnorePodLabelRule {
                label: "app".into(),
                value: Some("web".into()),
                value_regex: None,
            },
            IgnorePodLabelRule {
                label: "team".into(),
                value: None,
                value_regex: Some("[".into()),
            },
        ];
        let mut result = ValidationResult::new();
        let compiled = compile_label_rules(&rules, &mut result);
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].label(), "app");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ErrorKind::Compile);
    }
}
