//! The typed settings document and its derived data.
//!
//! [`Settings`] mirrors the YAML file key for key. Its `derived` state is
//! computed by validation after loading and is skipped by serde, so a
//! document can never set it.

mod sections;


pub use sections::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::proxy::ProxyConfig;
use crate::rules::{IgnorePodLabelRule, ListFilter, PodLabelRule};
use crate::validation::ValidationWarning;

/// Per-provider alert configuration, e.g. `{"slack": {"webhook": "URL"}}`.
pub type AlertConfig = BTreeMap<String, BTreeMap<String, serde_yaml::Value>>;

// ── Top-level settings ────────────────────────────────────────

/// The loaded configuration.
///
/// The filter and rule lists are only readable: the filters and compiled
/// rules derived from them are fixed at load time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub app: App,
    pub upgrader: Upgrader,
    pub pvc_monitor: PvcMonitor,
    /// Log lines attached to notifications; 0 attaches all of them.
    pub max_recent_log_lines: u64,
    /// Do not report containers killed after a failed graceful shutdown.
    pub ignore_failed_graceful_shutdown: bool,
    #[serde(deserialize_with = "crate::scalar::string_list")]
    pub(crate) namespaces: Vec<String>,
    #[serde(deserialize_with = "crate::scalar::string_list")]
    pub(crate) reasons: Vec<String>,
    #[serde(deserialize_with = "crate::scalar::string_list")]
    pub(crate) ignore_container_names: Vec<String>,
    pub(crate) ignore_pod_labels: Vec<IgnorePodLabelRule>,
    pub alert: AlertConfig,

    #[serde(skip)]
    pub(crate) derived: Derived,
}

/// Values computed from the document during validation.
#[derive(Debug, Clone, Default)]
pub(crate) struct Derived {
    pub(crate) namespaces: ListFilter,
    pub(crate) reasons: ListFilter,
    pub(crate) pod_label_rules: Vec<PodLabelRule>,
    pub(crate) proxy: Option<ProxyConfig>,
    pub(crate) warnings: Vec<ValidationWarning>,
}

impl Settings {
    /// Parse and validate settings from YAML text.
    pub fn from_yaml_str(yaml: &str) -> crate::Result<Self> {
        crate::loader::parse_settings(yaml.as_bytes(), "<inline>")
    }

    // ── Source lists ──────────────────────────────────────────

    /// Namespaces to watch, or `!name` entries to exclude. Not both.
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Event reasons to watch, or `!reason` entries to exclude. Not both.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn ignore_container_names(&self) -> &[String] {
        &self.ignore_container_names
    }

    /// Label rules as written; see [`Settings::pod_label_rules`] for the
    /// compiled form.
    pub fn ignore_pod_labels(&self) -> &[IgnorePodLabelRule] {
        &self.ignore_pod_labels
    }

    // ── Derived accessors ─────────────────────────────────────

    pub fn namespace_filter(&self) -> &ListFilter {
        &self.derived.namespaces
    }

    pub fn reason_filter(&self) -> &ListFilter {
        &self.derived.reasons
    }

    pub fn allowed_namespaces(&self) -> &[String] {
        self.derived.namespaces.allowed()
    }

    pub fn forbidden_namespaces(&self) -> &[String] {
        self.derived.namespaces.forbidden()
    }

    pub fn allowed_reasons(&self) -> &[String] {
        self.derived.reasons.allowed()
    }

    pub fn forbidden_reasons(&self) -> &[String] {
        self.derived.reasons.forbidden()
    }

    /// Compiled label-exclusion rules, in document order.
    pub fn pod_label_rules(&self) -> &[PodLabelRule] {
        &self.derived.pod_label_rules
    }

    /// The outbound proxy, if `app.proxyURL` is set.
    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.derived.proxy.as_ref()
    }

    /// Advisory warnings found while loading.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.derived.warnings
    }

    // ── Event filtering ───────────────────────────────────────

    pub fn watches_namespace(&self, namespace: &str) -> bool {
        self.derived.namespaces.permits(namespace)
    }

    pub fn watches_reason(&self, reason: &str) -> bool {
        self.derived.reasons.permits(reason)
    }

    pub fn ignores_container(&self, container: &str) -> bool {
        self.ignore_container_names.iter().any(|c| c == container)
    }

    /// The first label rule that excludes a pod with these labels.
    pub fn pod_exclusion<I, K, V>(&self, labels: I) -> Option<&PodLabelRule>
    where
        I: IntoIterator<Item = (K, V)> + Clone,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.derived
            .pod_label_rules
            .iter()
            .find(|rule| rule.matches_labels(labels.clone()))
    }

    /// Maximum log lines per notification, `None` for unlimited.
    pub fn log_line_limit(&self) -> Option<u64> {
        (self.max_recent_log_lines > 0).then_some(self.max_recent_log_lines)
    }

    pub fn alert_provider(&self, name: &str) -> Option<&BTreeMap<String, serde_yaml::Value>> {
        self.alert.get(name)
    }

    pub fn alert_providers(&self) -> impl Iterator<Item = &str> {
        self.alert.keys().map(String::as_str)
    }

    // ── Reporting ─────────────────────────────────────────────

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (cluster: {}):", self.cluster_label());
        tracing::info!(
            "  namespaces:  {}",
            describe_filter(self.namespace_filter())
        );
        tracing::info!("  reasons:     {}", describe_filter(self.reason_filter()));
        tracing::info!(
            "  pvcMonitor:  enabled={}, interval={}m, threshold={}%",
            self.pvc_monitor.enabled,
            self.pvc_monitor.interval,
            self.pvc_monitor.threshold
        );
        tracing::info!(
            "  ignore:      containers={}, podLabelRules={}",
            self.ignore_container_names.len(),
            self.pod_label_rules().len()
        );
        tracing::info!(
            "  alert:       {}",
            self.alert_providers().collect::<Vec<_>>().join(", ")
        );
        tracing::info!(
            "  proxy:       {}",
            self.proxy().map(ProxyConfig::redacted).as_deref().unwrap_or("(none)")
        );
    }

    /// A view safe for display: no alert credentials, proxy password masked.
    pub fn redacted_summary(&self) -> serde_json::Value {
        let alert: BTreeMap<&str, Vec<&str>> = self
            .alert
            .iter()
            .map(|(provider, cfg)| (provider.as_str(), cfg.keys().map(String::as_str).collect()))
            .collect();

        serde_json::json!({
            "app": {
                "clusterName": self.app.cluster_name,
                "disableStartupMessage": self.app.disable_startup_message,
                "proxy": self.proxy().map(ProxyConfig::redacted),
            },
            "upgrader": { "disableUpdateCheck": self.upgrader.disable_update_check },
            "pvcMonitor": {
                "enabled": self.pvc_monitor.enabled,
                "interval": self.pvc_monitor.interval,
                "threshold": self.pvc_monitor.threshold,
            },
            "maxRecentLogLines": self.log_line_limit(),
            "ignoreFailedGracefulShutdown": self.ignore_failed_graceful_shutdown,
            "namespaces": self.namespace_filter(),
            "reasons": self.reason_filter(),
            "ignoreContainerNames": self.ignore_container_names,
            "ignorePodLabels": self.ignore_pod_labels,
            "alert": alert,
            "warnings": self.warnings(),
        })
    }

    fn cluster_label(&self) -> &str {
        if self.app.cluster_name.is_empty() {
            "(unnamed)"
        } else {
            &self.app.cluster_name
        }
    }
}

fn describe_filter(filter: &ListFilter) -> String {
    match filter {
        ListFilter::All => "all".to_string(),
        ListFilter::Allow(items) => format!("only {}", items.join(", ")),
        ListFilter::Forbid(items) => format!("all except {}", items.join(", ")),
    }
}
