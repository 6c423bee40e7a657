//! Pod label-exclusion rules.
//!
//! A rule names a pod label and either an exact value or a regular
//! expression. Rules are loaded as [`IgnorePodLabelRule`] and compiled once
//! into an immutable [`PodLabelRule`] during validation.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A label-exclusion rule as written in the `ignorePodLabels` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnorePodLabelRule {
    /// Name of the pod label to inspect.
    #[serde(default, deserialize_with = "crate::scalar::string")]
    pub label: String,
    /// Exact label value identifying pods to ignore.
    #[serde(
        default,
        deserialize_with = "crate::scalar::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    /// Regular expression identifying pods to ignore.
    #[serde(
        default,
        deserialize_with = "crate::scalar::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_regex: Option<String>,
}

/// Reasons a label rule is rejected.
#[derive(Debug, thiserror::Error)]
pub enum LabelRuleError {
    #[error("no label supplied")]
    MissingLabel,

    #[error("either value or valueRegex must be set for label '{label}'")]
    MissingValue { label: String },

    #[error("value and valueRegex are both set for label '{label}'; set only one")]
    AmbiguousValue { label: String },

    #[error("invalid valueRegex {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl IgnorePodLabelRule {
    /// Exact value, treating an empty string as unset.
    pub fn exact_value(&self) -> Option<&str> {
        non_empty(&self.value)
    }

    /// Regex pattern, treating an empty string as unset.
    pub fn pattern(&self) -> Option<&str> {
        non_empty(&self.value_regex)
    }

    /// Check the rule is well-formed and compile it.
    ///
    /// Requires a non-empty label and exactly one of `value` / `valueRegex`.
    /// A pattern is compiled here so that a bad expression is reported at
    /// load time rather than on the first match attempt.
    pub fn compile(&self) -> Result<PodLabelRule, LabelRuleError> {
        if self.label.is_empty() {
            return Err(LabelRuleError::MissingLabel);
        }

        let matcher = match (self.exact_value(), self.pattern()) {
            (Some(_), Some(_)) => {
                return Err(LabelRuleError::AmbiguousValue {
                    label: self.label.clone(),
                })
            }
            (None, None) => {
                return Err(LabelRuleError::MissingValue {
                    label: self.label.clone(),
                })
            }
            (Some(value), None) => LabelMatcher::Exact(value.to_string()),
            (None, Some(pattern)) => {
                let regex = Regex::new(pattern).map_err(|source| LabelRuleError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
                LabelMatcher::Pattern(regex)
            }
        };

        Ok(PodLabelRule {
            label: self.label.clone(),
            matcher,
        })
    }
}

/// How a compiled rule compares a label value.
#[derive(Debug, Clone)]
pub enum LabelMatcher {
    Exact(String),
    Pattern(Regex),
}

impl LabelMatcher {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            LabelMatcher::Exact(expected) => expected == value,
            LabelMatcher::Pattern(regex) => regex.is_match(value),
        }
    }
}

/// A validated label-exclusion rule. Immutable once built.
#[derive(Debug, Clone)]
pub struct PodLabelRule {
    label: String,
    matcher: LabelMatcher,
}

impl PodLabelRule {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matcher(&self) -> &LabelMatcher {
        &self.matcher
    }

    /// Whether a value of this rule's label matches.
    pub fn matches(&self, value: &str) -> bool {
        self.matcher.matches(value)
    }

    /// Whether a pod's label set carries this rule's label with a matching
    /// value. A pod without the label never matches.
    pub fn matches_labels<I, K, V>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        labels
            .into_iter()
            .any(|(k, v)| k.as_ref() == self.label && self.matches(v.as_ref()))
    }
}
