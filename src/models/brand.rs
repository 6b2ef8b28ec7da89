use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A single brand record as it appears in `brands.json`.
///
/// Fields are read leniently: a field of the wrong JSON type never rejects
/// the document, it just yields an empty reference or no badge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Brand {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub logo: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub background: String,
    #[serde(default, deserialize_with = "badge_text")]
    pub cashback: Option<String>,
}

/// Strings pass through, anything else becomes the empty string.
fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

/// Formats a number the way it prints on a page: `3.0` reads `3`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Keeps truthy cashback values as badge text: a non-empty string, a
/// non-zero number, `true`, or any array or object.
fn badge_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let text = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(text) => Some(text),
        Value::Number(number) => number
            .as_f64()
            .filter(|value| *value != 0.0 && !value.is_nan())
            .map(format_number),
        other => Some(other.to_string()),
    };
    Ok(text.filter(|text| !text.is_empty()))
}

impl Brand {
    #[cfg(test)]
    pub fn new(name: &str, logo: &str, background: &str) -> Self {
        Self {
            name: name.to_string(),
            logo: logo.to_string(),
            background: background.to_string(),
            cashback: None,
        }
    }

    #[cfg(test)]
    pub fn with_cashback(mut self, cashback: &str) -> Self {
        self.cashback = Some(cashback.to_string());
        self
    }

    /// Badge text, present only for a non-empty cashback value.
    pub fn badge(&self) -> Option<&str> {
        self.cashback.as_deref().filter(|text| !text.is_empty())
    }
}

/// Where an image reference points once resolved against the catalog directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Local(PathBuf),
    Remote(String),
    Missing,
}

impl AssetSource {
    /// Resolves `reference` the way a page resolves a relative `src` attribute.
    pub fn resolve(base_dir: &Path, reference: &str) -> Self {
        let reference = reference.trim();
        if reference.is_empty() {
            return Self::Missing;
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Self::Remote(reference.to_string());
        }
        let reference = reference.strip_prefix("file://").unwrap_or(reference);
        let path = Path::new(reference);
        if path.is_absolute() {
            Self::Local(path.to_path_buf())
        } else {
            Self::Local(base_dir.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_requires_non_empty_cashback() {
        let plain = Brand::new("Acme", "acme.png", "acme-bg.jpg");
        assert_eq!(plain.badge(), None);

        let empty = plain.clone().with_cashback("");
        assert_eq!(empty.badge(), None);

        let offer = plain.with_cashback("5% back");
        assert_eq!(offer.badge(), Some("5% back"));
    }

    #[test]
    fn test_resolve_relative_reference() {
        let source = AssetSource::resolve(Path::new("/srv/page"), "img/logo.png");
        assert_eq!(source, AssetSource::Local(PathBuf::from("/srv/page/img/logo.png")));
    }

    #[test]
    fn test_resolve_absolute_and_file_url() {
        let base = Path::new("/srv/page");
        assert_eq!(
            AssetSource::resolve(base, "/opt/logo.png"),
            AssetSource::Local(PathBuf::from("/opt/logo.png"))
        );
        assert_eq!(
            AssetSource::resolve(base, "file:///opt/logo.png"),
            AssetSource::Local(PathBuf::from("/opt/logo.png"))
        );
    }

    #[test]
    fn test_resolve_remote_and_missing() {
        let base = Path::new("/srv/page");
        assert!(matches!(
            AssetSource::resolve(base, "https://cdn.example.com/a.png"),
            AssetSource::Remote(_)
        ));
        assert_eq!(AssetSource::resolve(base, "  "), AssetSource::Missing);
    }
}
