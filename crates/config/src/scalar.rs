//! Serde helpers for text fields that accept any YAML scalar.
//!
//! Unquoted `2`, `1.5` or `true` parse as numbers and booleans, but label
//! values, cluster names and list entries are text. These helpers read such
//! scalars back as their literal text, so `value: 2` means `"2"`.

use serde::de::{Error, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

fn scalar_text<E: Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Sequence(_) => Err(E::invalid_type(Unexpected::Seq, &"a string")),
        Value::Mapping(_) => Err(E::invalid_type(Unexpected::Map, &"a string")),
        Value::Tagged(_) => Err(E::invalid_type(Unexpected::Other("tagged value"), &"a string")),
    }
}

/// A scalar as text; `null` reads as the empty string.
pub(crate) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    scalar_text(Value::deserialize(d)?).map(Option::unwrap_or_default)
}

/// A scalar as text; `null` reads as `None`.
pub(crate) fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    scalar_text(Value::deserialize(d)?)
}

/// A list of scalars as text. Null entries become empty strings, which
/// validation then reports.
pub(crate) fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Option::<Vec<Value>>::deserialize(d)?
        .unwrap_or_default()
        .into_iter()
        .map(|v| scalar_text(v).map(Option::unwrap_or_default))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Doc {
        #[serde(deserialize_with = "super::string")]
        name: String,
        #[serde(deserialize_with = "super::opt_string")]
        value: Option<String>,
        #[serde(deserialize_with = "super::string_list")]
        items: Vec<String>,
    }

    fn parse(yaml: &str) -> Result<Doc, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn numbers_and_booleans_read_as_text() {
        let doc = parse("name: 2024\nvalue: true\nitems: [1, 2.5, false, x]\n").unwrap();
        assert_eq!(doc.name, "2024");
        assert_eq!(doc.value.as_deref(), Some("true"));
        assert_eq!(doc.items, ["1", "2.5", "false", "x"]);
    }

    #[test]
    fn nulls() {
        let doc = parse("name: ~\nvalue: ~\nitems: [a, ~]\n").unwrap();
        assert_eq!(doc.name, "");
        assert_eq!(doc.value, None);
        assert_eq!(doc.items, ["a", ""]);

        assert!(parse("items: ~\n").unwrap().items.is_empty());
    }

    #[test]
    fn collections_are_rejected() {
        let err = parse("name: [a, b]\n").unwrap_err();
        assert!(err.to_string().contains("expected a string"), "got {err}");
        assert!(parse("value: {a: b}\n").is_err());
        assert!(parse("items: [[nested]]\n").is_err());
        assert!(parse("items: {a: b}\n").is_err());
    }
}
