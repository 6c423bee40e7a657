//! Allow/forbid resolution for namespace and reason lists.

use serde::Serialize;

/// Leading marker that routes a token to the forbid list.
pub const NEGATION_MARKER: char = '!';

/// Split tokens into `(allow, forbid)`, preserving relative order.
///
/// Tokens starting with [`NEGATION_MARKER`] go to the forbid list with exactly
/// one leading marker stripped; every other token goes to the allow list as is.
pub fn split_allow_forbid<S: AsRef<str>>(items: &[S]) -> (Vec<String>, Vec<String>) {
    let mut allow = Vec::new();
    let mut forbid = Vec::new();
    for item in items {
        let item = item.as_ref();
        match item.strip_prefix(NEGATION_MARKER) {
            Some(clean) => forbid.push(clean.to_string()),
            None => allow.push(item.to_string()),
        }
    }
    (allow, forbid)
}

/// Both allowed and forbidden entries were configured for one list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("either allowed or forbidden entries may be set, not both (allowed: {allowed:?}, forbidden: {forbidden:?})")]
pub struct AllowForbidConflict {
    pub allowed: Vec<String>,
    pub forbidden: Vec<String>,
}

/// Resolved filter mode for a namespace or reason list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "items", rename_all = "snake_case")]
pub enum ListFilter {
    /// Nothing configured: everything passes.
    #[default]
    All,
    /// Only the listed entries pass.
    Allow(Vec<String>),
    /// Everything except the listed entries passes.
    Forbid(Vec<String>),
}

impl ListFilter {
    /// Resolve a raw token list, rejecting mixed allow/forbid entries.
    pub fn from_tokens<S: AsRef<str>>(items: &[S]) -> Result<Self, AllowForbidConflict> {
        let (allow, forbid) = split_allow_forbid(items);
        match (allow.is_empty(), forbid.is_empty()) {
            (true, true) => Ok(ListFilter::All),
            (false, true) => Ok(ListFilter::Allow(allow)),
            (true, false) => Ok(ListFilter::Forbid(forbid)),
            (false, false) => Err(AllowForbidConflict {
                allowed: allow,
                forbidden: forbid,
            }),
        }
    }

    /// Whether `item` passes this filter.
    pub fn permits(&self, item: &str) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Allow(list) => list.iter().any(|a| a == item),
            ListFilter::Forbid(list) => !list.iter().any(|f| f == item),
        }
    }

    pub fn allowed(&self) -> &[String] {
        match self {
            ListFilter::Allow(list) => list,
            _ => &[],
        }
    }

    pub fn forbidden(&self) -> &[String] {
        match self {
            ListFilter::Forbid(list) => list,
            _ => &[],
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ListFilter::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_mixed_tokens() {
        let (allow, forbid) = split_allow_forbid(&["a", "!b", "c"]);
        assert_eq!(allow, vec!["a", "c"]);
        assert_eq!(forbid, vec!["b"]);
    }

    #[test]
    fn split_forbid_only() {
        let (allow, forbid) = split_allow_forbid(&["!x", "!y"]);
        assert!(allow.is_empty());
        assert_eq!(forbid, vec!["x", "y"]);
    }

    #[test]
    fn split_empty_input_yields_empty_lists() {
        let (allow, forbid) = split_allow_forbid::<String>(&[]);
        assert!(allow.is_empty());
        assert!(forbid.is_empty());
    }

    #[test]
    fn split_strips_single_marker_only() {
        let (allow, forbid) = split_allow_forbid(&["!!kube-system", "a!b"]);
        assert_eq!(allow, vec!["a!b"]);
        assert_eq!(forbid, vec!["!kube-system"]);
    }

    #[test]
    fn split_partitions_every_token() {
        let inputs: Vec<Vec<&str>> = vec![
            vec![],
            vec!["default"],
            vec!["!default", "monitoring", "!", "!!x", ""],
            vec!["a", "b", "!c", "d", "!e", "!f"],
        ];
        for tokens in inputs {
            let (allow, forbid) = split_allow_forbid(&tokens);
            assert_eq!(allow.len() + forbid.len(), tokens.len());

            // Re-prefixing forbid entries reproduces the originals in order.
            let negated: Vec<String> = tokens
                .iter()
                .filter(|t| t.starts_with('!'))
                .map(|t| t.to_string())
                .collect();
            let reprefixed: Vec<String> = forbid.iter().map(|f| format!("!{f}")).collect();
            assert_eq!(reprefixed, negated);

            let plain: Vec<&str> = tokens.iter().copied().filter(|t| !t.starts_with('!')).collect();
            assert_eq!(allow, plain);
        }
    }

    #[test]
    fn filter_from_tokens_modes() {
        assert_eq!(ListFilter::from_tokens::<&str>(&[]).unwrap(), ListFilter::All);
        assert_eq!(
            ListFilter::from_tokens(&["default"]).unwrap(),
            ListFilter::Allow(vec!["default".to_string()])
        );
        assert_eq!(
            ListFilter::from_tokens(&["!x", "!y"]).unwrap(),
            ListFilter::Forbid(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn filter_from_tokens_rejects_mixed() {
        let err = ListFilter::from_tokens(&["a", "!b"]).unwrap_err();
        assert_eq!(err.allowed, vec!["a"]);
        assert_eq!(err.forbidden, vec!["b"]);
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn filter_permits() {
        let allow = ListFilter::Allow(vec!["default".to_string()]);
        assert!(allow.permits("default"));
        assert!(!allow.permits("kube-system"));

        let forbid = ListFilter::Forbid(vec!["kube-system".to_string()]);
        assert!(forbid.permits("default"));
        assert!(!forbid.permits("kube-system"));

        assert!(ListFilter::All.permits("anything"));
    }

    #[test]
    fn filter_accessors() {
        let allow = ListFilter::Allow(vec!["a".to_string()]);
        assert_eq!(allow.allowed(), ["a".to_string()]);
        assert!(allow.forbidden().is_empty());
        assert!(!allow.is_all());
        assert!(ListFilter::default().is_all());
    }
}
