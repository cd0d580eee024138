//! GNU gettext `.po` catalogs.
//!
//! Entries are appended as
//!
//! ```text
//!
//! #: templates/page.twig
//! msgid "Hello"
//! msgstr ""
//! ```
//!
//! Each entry starts with a newline, so consecutive entries (and the existing
//! catalog content) stay separated by a blank line.

use super::{CatalogFormat, ExistingKeys};
use crate::transform::normalize_placeholders;
use regex::Regex;
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::LazyLock;

static MSGID_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^msgid\s+"(.*)""#).expect("msgid pattern"));

static CONTINUATION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"(.*)"$"#).expect("continuation pattern"));

/// The `.po` dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct PoFormat;

impl PoFormat {
    /// Escapes a key as it appears between the quotes of a `msgid`.
    fn escape(key: &str) -> String {
        key.replace('"', "\\\"").replace('\n', "\\n")
    }
}

impl CatalogFormat for PoFormat {
    fn parse_existing_keys(&self, catalog: &str) -> ExistingKeys {
        let mut keys = ExistingKeys::new();
        let mut current: Option<String> = None;

        for line in catalog.lines() {
            let line = line.trim();

            // msgid "" followed by wrapped "..." lines
            if let Some(key) = current.as_mut()
                && let Some(capture) = CONTINUATION_LINE.captures(line)
            {
                key.push_str(&capture[1]);
                continue;
            }
            if let Some(key) = current.take() {
                keys.insert(key);
            }

            if let Some(capture) = MSGID_LINE.captures(line) {
                current = Some(capture[1].to_string());
            }
        }
        if let Some(key) = current {
            keys.insert(key);
        }

        tracing::debug!(keys = keys.len(), "parsed existing po keys");
        keys
    }

    fn normalize_for_comparison(&self, raw_tag: &str) -> String {
        Self::escape(&normalize_placeholders(raw_tag))
    }

    /// `tag` is already a canonical key; only the quoting escapes are applied.
    fn serialize_entry(&self, tag: &str, occurrences: &[PathBuf]) -> String {
        let mut entry = String::new();
        for path in occurrences {
            let _ = write!(entry, "\n#: {}", path.display());
        }
        let _ = write!(entry, "\nmsgid \"{}\"\nmsgstr \"\"\n", Self::escape(tag));
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"

#: templates/index.twig
msgid "Hello"
msgstr "Hola"

msgid "Say \"hi\""
msgstr ""

   msgid "Indented"
msgstr ""

msgid ""
"Wrapped "
"message"
msgstr ""

msgid "apple"
msgid_plural "apples"
msgstr[0] ""

#~ msgid "Obsolete"
#~ msgstr ""
"#;

    #[test]
    fn test_parse_existing_keys() {
        let keys = PoFormat.parse_existing_keys(CATALOG);
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "",
                "Hello",
                "Say \\\"hi\\\"",
                "Indented",
                "Wrapped message",
                "apple"
            ]
        );
    }

    #[test]
    fn test_parse_existing_keys_malformed() {
        assert!(PoFormat.parse_existing_keys("").is_empty());
        assert!(PoFormat
            .parse_existing_keys("not a catalog\nmsgid without quotes\n")
            .is_empty());
    }

    #[test]
    fn test_normalize_for_comparison() {
        assert_eq!(PoFormat.normalize_for_comparison("Hi {{ name }}"), "Hi %name%");
        assert_eq!(
            PoFormat.normalize_for_comparison("Say \"hi\""),
            "Say \\\"hi\\\""
        );
        assert_eq!(PoFormat.normalize_for_comparison("a\nb"), "a\\nb");
    }

    #[test]
    fn test_quoted_key_matches_existing() {
        let keys = PoFormat.parse_existing_keys(CATALOG);
        assert!(keys.contains(&PoFormat.normalize_for_comparison("Say \"hi\"")));
        assert!(keys.contains(&PoFormat.normalize_for_comparison("Hello")));
        assert!(!keys.contains(&PoFormat.normalize_for_comparison("Obsolete")));
    }

    #[test]
    fn test_serialize_entry() {
        let entry = PoFormat.serialize_entry(
            "Bye",
            &[PathBuf::from("a/one.twig"), PathBuf::from("b/two.twig")],
        );
        assert_eq!(
            entry,
            "\n#: a/one.twig\n#: b/two.twig\nmsgid \"Bye\"\nmsgstr \"\"\n"
        );
    }

    #[test]
    fn test_serialize_entry_escapes_quotes() {
        let entry = PoFormat.serialize_entry("Say \"hi\" to %name%", &[PathBuf::from("x.twig")]);
        assert!(entry.contains("msgid \"Say \\\"hi\\\" to %name%\""));
    }

    #[test]
    fn test_serialize_entry_keeps_canonical_key() {
        let key = normalize_placeholders("Use {{{{x}}}} here");
        let entry = PoFormat.serialize_entry(&key, &[PathBuf::from("x.twig")]);
        let keys = PoFormat.parse_existing_keys(&entry);
        assert!(keys.contains(&PoFormat.normalize_for_comparison("Use {{{{x}}}} here")));
    }

    #[test]
    fn test_serialized_entry_is_parsed_back() {
        let entry = PoFormat.serialize_entry("Hi %name%", &[PathBuf::from("x.twig")]);
        let keys = PoFormat.parse_existing_keys(&entry);
        assert!(keys.contains("Hi %name%"));
    }
}
