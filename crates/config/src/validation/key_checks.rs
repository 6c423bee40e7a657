//! Unknown-key detection: misspelled or unsupported keys are ignored by the
//! deserializer, so they are surfaced here as warnings.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use super::fuzzy::fuzzy_match;
use super::ValidationResult;

// ── Known keys ──────────────────────────────────────────────────────

const TOP_LEVEL_KEYS: &[&str] = &[
    "app",
    "upgrader",
    "pvcMonitor",
    "maxRecentLogLines",
    "ignoreFailedGracefulShutdown",
    "namespaces",
    "reasons",
    "ignoreContainerNames",
    "ignorePodLabels",
    "alert",
];

/// Keys that name computed fields. Present in some hand-written configs but
/// never read from the document.
const DERIVED_KEYS: &[(&str, &str)] = &[
    ("allowedNamespaces", "namespaces"),
    ("forbiddenNamespaces", "namespaces"),
    ("allowedReasons", "reasons"),
    ("forbiddenReasons", "reasons"),
];

const APP_KEYS: &[&str] = &["proxyURL", "clusterName", "disableStartupMessage"];
const UPGRADER_KEYS: &[&str] = &["disableUpdateCheck"];
const PVC_MONITOR_KEYS: &[&str] = &["enabled", "interval", "threshold"];
const LABEL_RULE_KEYS: &[&str] = &["label", "value", "valueRegex"];

/// Alert providers the notification dispatcher knows how to build.
pub(crate) const KNOWN_PROVIDERS: &[&str] = &[
    "slack",
    "pagerduty",
    "telegram",
    "teams",
    "discord",
    "email",
    "rocketchat",
    "mattermost",
    "opsgenie",
    "matrix",
    "dingtalk",
    "feishu",
    "zenduty",
    "googlechat",
    "webhook",
];

// ── Checks ──────────────────────────────────────────────────────────

pub(super) fn check_unknown_keys(raw: &Value, result: &mut ValidationResult) {
    let Some(root) = raw.as_mapping() else {
        return;
    };

    for (key, value) in root {
        let Some(name) = key_name(key, "", result) else {
            continue;
        };

        if let Some((_, source)) = DERIVED_KEYS.iter().find(|(k, _)| *k == name) {
            result.warn(
                name,
                format!("'{name}' is computed from '{source}' and is ignored when set directly"),
            );
            continue;
        }

        match name {
            "app" => check_section(value, "app", APP_KEYS, result),
            "upgrader" => check_section(value, "upgrader", UPGRADER_KEYS, result),
            "pvcMonitor" => check_section(value, "pvcMonitor", PVC_MONITOR_KEYS, result),
            "ignorePodLabels" => {
                if let Some(rules) = value.as_sequence() {
                    for (i, rule) in rules.iter().enumerate() {
                        let path = format!("ignorePodLabels[{i}]");
                        check_section(rule, &path, LABEL_RULE_KEYS, result);
                    }
                }
            }
            other if !TOP_LEVEL_KEYS.contains(&other) => {
                unknown_key(other, other, TOP_LEVEL_KEYS, result);
            }
            _ => {}
        }
    }
}

pub(super) fn check_alert_providers<V>(
    alert: &BTreeMap<String, V>,
    result: &mut ValidationResult,
) {
    for provider in alert.keys() {
        if KNOWN_PROVIDERS.contains(&provider.as_str()) {
            continue;
        }
        let path = format!("alert.{provider}");
        let message = format!("Unknown alert provider '{provider}'");
        match fuzzy_match(provider, KNOWN_PROVIDERS) {
            Some(s) => result.warn_with_suggestion(path, message, format!("Did you mean '{s}'?")),
            None => result.warn(path, message),
        }
    }
}

fn check_section(value: &Value, prefix: &str, known: &[&str], result: &mut ValidationResult) {
    let Some(section) = value.as_mapping() else {
        return;
    };
    check_mapping_keys(section, prefix, known, result);
}

fn check_mapping_keys(
    section: &Mapping,
    prefix: &str,
    known: &[&str],
    result: &mut ValidationResult,
) {
    for key in section.keys() {
        let Some(name) = key_name(key, prefix, result) else {
            continue;
        };
        if !known.contains(&name) {
            unknown_key(name, &format!("{prefix}.{name}"), known, result);
        }
    }
}

fn key_name<'a>(key: &'a Value, prefix: &str, result: &mut ValidationResult) -> Option<&'a str> {
    match key.as_str() {
        Some(name) => Some(name),
        None => {
            result.warn(prefix, format!("Ignoring non-string key {key:?}"));
            None
        }
    }
}

fn unknown_key(name: &str, path: &str, known: &[&str], result: &mut ValidationResult) {
    let message = format!("Unknown key '{name}' is ignored");
    match fuzzy_match(name, known) {
        Some(s) => result.warn_with_suggestion(path, message, format!("Did you mean '{s}'?")),
        None => result.warn(path, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warnings_for(yaml: &str) -> Vec<super::super::ValidationWarning> {
        let raw: Value = serde_yaml::from_str(yaml).unwrap();
        let mut result = ValidationResult::new();
        check_unknown_keys(&raw, &mut result);
        result.warnings
    }

    #[test]
    fn known_keys_produce_no_warnings() {
        let warnings = warnings_for(
            r#"
app:
  proxyURL: http://proxy:3128
  clusterName: prod
  disableStartupMessage: true
upgrader:
  disableUpdateCheck: true
pvcMonitor:
  enabled: true
  interval: 10
  threshold: 90
maxRecentLogLines: 50
ignoreFailedGracefulShutdown: true
namespaces: [default]
reasons: [OOMKilled]
ignoreContainerNames: [istio-proxy]
ignorePodLabels:
  - label: app
    value: web
alert:
  slack:
    webhook: https://hooks.slack.com/services/x
"#,
        );
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn nested_typo_is_reported_with_path() {
        let warnings = warnings_for("app:\n  proxyUrl: http://proxy\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "app.proxyUrl");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("Did you mean 'proxyURL'?"));
    }

    #[test]
    fn label_rule_typo_is_reported_with_index() {
        let warnings = warnings_for("ignorePodLabels:\n  - label: a\n    valueRegexp: x\n");
        assert_eq!(warnings[0].path, "ignorePodLabels[0].valueRegexp");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("Did you mean 'valueRegex'?"));
    }

    #[test]
    fn non_mapping_root_is_left_to_the_parser() {
        assert!(warnings_for("- a\n- b\n").is_empty());
    }

    #[test]
    fn unknown_alert_provider_warns() {
        let mut alert: BTreeMap<String, ()> = BTreeMap::new();
        alert.insert("slak".to_string(), ());
        alert.insert("discord".to_string(), ());
        let mut result = ValidationResult::new();
        check_alert_providers(&alert, &mut result);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "alert.slak");
        assert_eq!(result.warnings[0].suggestion.as_deref(), Some("Did you mean 'slack'?"));
    }
}
