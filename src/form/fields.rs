//! Placeholder values and their substitution into cell content.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::BTreeMap;

use super::definition::Content;

pub const CLIENT_NAME: &str = "client_name";
pub const BRANCH_ADDRESS: &str = "branch_address";
pub const MOBILE: &str = "mobile";
pub const CUSTOMER_NAME: &str = "customer_name";
pub const ADDRESS1: &str = "address1";
pub const EMAIL: &str = "email";

/// Contact address printed in the applicant's email cell.
pub const DEFAULT_EMAIL: &str = "info@kslegal.co.in";

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern");
}

/// Values for the form's named placeholders.
///
/// Keys the form does not reference are kept but never rendered. A key the
/// form references but the map lacks renders as empty text (or as the
/// fallback for a conditional cell).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldValues {
    values: BTreeMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// The values the form carries when nobody supplies any.
    pub fn with_defaults() -> Self {
        let mut fields = Self::new();
        fields.insert(EMAIL, DEFAULT_EMAIL);
        fields
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// True when the field exists and is not the empty string.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of `self`; values in `other` win.
    pub fn merged(mut self, other: &FieldValues) -> Self {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), value.clone());
        }
        self
    }

    /// Produce the final text for one piece of cell content.
    pub fn resolve(&self, content: &Content) -> String {
        match content {
            Content::Literal(text) => text.clone(),
            Content::Template(text) => self.substitute(text),
            Content::Conditional { field, fallback } => {
                if self.is_present(field) {
                    self.get(field).unwrap_or_default().to_string()
                } else {
                    fallback.clone()
                }
            }
        }
    }

    fn substitute(&self, template: &str) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| {
                self.get(&caps[1]).unwrap_or_default().to_string()
            })
            .into_owned()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_substitution() {
        let fields = FieldValues::new().with(CLIENT_NAME, "Acme Corp");
        let content = Content::template("{{client_name}}");
        assert_eq!(fields.resolve(&content), "Acme Corp");
    }

    #[test]
    fn test_missing_placeholder_becomes_empty() {
        let fields = FieldValues::new();
        assert_eq!(fields.resolve(&Content::template("{{mobile}}")), "");
        assert_eq!(
            fields.resolve(&Content::template("Tel: {{ mobile }}.")),
            "Tel: ."
        );
    }

    #[test]
    fn test_literal_is_not_substituted() {
        let fields = FieldValues::new().with(CLIENT_NAME, "Acme Corp");
        assert_eq!(
            fields.resolve(&Content::literal("{{client_name}}")),
            "{{client_name}}"
        );
    }

    #[test]
    fn test_conditional_uses_value_or_fallback() {
        let content = Content::conditional(ADDRESS1);

        let present = FieldValues::new().with(ADDRESS1, "456 Side Rd");
        assert_eq!(present.resolve(&content), "456 Side Rd");

        let empty = FieldValues::new().with(ADDRESS1, "");
        assert_eq!(empty.resolve(&content), "________________");

        assert_eq!(FieldValues::new().resolve(&content), "________________");
    }

    #[test]
    fn test_defaults_carry_email() {
        let fields = FieldValues::with_defaults();
        assert_eq!(fields.get(EMAIL), Some(DEFAULT_EMAIL));
        assert!(!fields.is_present(CLIENT_NAME));
    }

    #[test]
    fn test_merged_prefers_overlay() {
        let base = FieldValues::with_defaults().with(MOBILE, "1");
        let overlay = FieldValues::new().with(MOBILE, "2");
        let merged = base.merged(&overlay);
        assert_eq!(merged.get(MOBILE), Some("2"));
        assert_eq!(merged.get(EMAIL), Some(DEFAULT_EMAIL));
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let json = r#"{"client_name": "Acme Corp", "unknown_key": "ignored"}"#;
        let fields: FieldValues = serde_json::from_str(json).unwrap();
        assert_eq!(fields.get(CLIENT_NAME), Some("Acme Corp"));
        assert_eq!(fields.len(), 2);
    }
}
