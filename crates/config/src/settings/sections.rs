//! Nested settings groups.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ── App ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct App {
    /// Proxy for outgoing alert requests. Kubernetes API traffic never uses it.
    #[serde(rename = "proxyURL", deserialize_with = "crate::scalar::string")]
    pub proxy_url: String,
    /// Cluster name shown in notifications.
    #[serde(deserialize_with = "crate::scalar::string")]
    pub cluster_name: String,
    /// Skip the welcome message sent to alert providers on startup.
    pub disable_startup_message: bool,
}

// ── Upgrader ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Upgrader {
    /// Do not check for or announce new releases.
    pub disable_update_check: bool,
}

// ── PVC monitor ───────────────────────────────────────────────

/// Periodic check of persistent volume claim usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PvcMonitor {
    pub enabled: bool,
    /// Minutes between checks.
    pub interval: u32,
    /// Usage percentage above which a notification is sent.
    pub threshold: f64,
}

impl Default for PvcMonitor {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 5,
            threshold: 80.0,
        }
    }
}

impl PvcMonitor {
    pub fn interval_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval) * 60)
    }

    /// Whether a usage percentage should trigger a notification.
    pub fn exceeds_threshold(&self, usage_percent: f64) -> bool {
        usage_percent > self.threshold
    }
}
