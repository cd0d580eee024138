//! Locating translatable tags in template text.
//!
//! Patterns are compiled multi-line, dot-matches-newline and *ungreedy*: `.*`
//! is lazy and `.*?` is greedy. Custom patterns written for other tag finders
//! (`{{(.*)}}`) therefore keep their usual meaning.

use crate::error::{Result, TransfindError};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Tag name used by the default pattern.
pub const DEFAULT_TAG: &str = "trans";

/// Default pattern with `__TAG__` standing for the tag name.
///
/// Group 1 is the singular text. The optional plural clause is marked `??`,
/// which is greedy under swapped greed, so a `{% plural %}` block is split off
/// instead of being swallowed by group 1. Groups 2 and 3 hold the plural
/// expression and text.
const DEFAULT_PATTERN_TEMPLATE: &str = r"\{%\s*__TAG__\s*%\}(.*)(?:\{%\s*plural\b(.*)%\}(.*))??\{%\s*end__TAG__\s*%\}";

/// Plural clause attached to a tag. Parsed but never used as a catalog key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralClause {
    pub expression: String,
    pub text: String,
}

/// A raw capture from a template, before placeholder normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    /// Text of the first capture group
    pub text: String,
    /// Plural clause, when the pattern captured one
    pub plural: Option<PluralClause>,
}

/// A compiled tag pattern
#[derive(Debug, Clone)]
pub struct TagPattern {
    source: String,
    regex: Regex,
}

impl TagPattern {
    /// Default `{% trans %}...{% endtrans %}` pattern.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in pattern can't be compiled.
    pub fn default_pattern() -> Result<Self> {
        Self::for_tag(DEFAULT_TAG)
    }

    /// Default pattern for another tag name, closed by `end<name>`.
    ///
    /// # Errors
    ///
    /// Returns `TransfindError::InvalidTagName` for empty names or names with whitespace.
    pub fn for_tag(name: &str) -> Result<Self> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(TransfindError::InvalidTagName {
                name: name.to_string(),
            });
        }

        let source = DEFAULT_PATTERN_TEMPLATE.replace("__TAG__", &regex::escape(name));
        let regex = build(&source)?;
        Ok(Self { source, regex })
    }

    /// User-supplied pattern. Group 1 is taken as the tag text.
    ///
    /// # Errors
    ///
    /// Returns `TransfindError::InvalidPattern` if the pattern doesn't compile.
    pub fn custom(pattern: &str) -> Result<Self> {
        let regex = build(pattern).map_err(|source| TransfindError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        if regex.captures_len() < 2 {
            tracing::warn!(
                pattern,
                "tag pattern has no capture group, no tags will be extracted"
            );
        }

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern source as compiled
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern has a group to extract tags from
    #[must_use]
    pub fn has_capture_group(&self) -> bool {
        self.regex.captures_len() >= 2
    }

    /// Finds all tags in `text`, each distinct tag text reported once in order of
    /// first appearance.
    #[must_use]
    pub fn find_tags(&self, text: &str) -> Vec<RawTag> {
        if !self.has_capture_group() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut tags = Vec::new();

        for capture in self.regex.captures_iter(text) {
            let Some(tag_text) = capture.get(1) else {
                continue;
            };
            if !seen.insert(tag_text.as_str()) {
                continue;
            }

            let plural = match (capture.get(2), capture.get(3)) {
                (Some(expression), Some(plural_text)) => Some(PluralClause {
                    expression: expression.as_str().trim().to_string(),
                    text: plural_text.as_str().to_string(),
                }),
                _ => None,
            };
            if plural.is_some() {
                tracing::debug!(
                    tag = tag_text.as_str(),
                    "plural clause found and ignored, plurals are not supported"
                );
            }

            tags.push(RawTag {
                text: tag_text.as_str().to_string(),
                plural,
            });
        }

        tags
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        Self::default_pattern().expect("built-in tag pattern compiles")
    }
}

fn build(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .dot_matches_new_line(true)
        .swap_greed(true)
        .build()
}
