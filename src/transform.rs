//! Conversion of raw template tags into catalog keys.

use regex::Regex;
use std::sync::LazyLock;

/// `{{ name }}` with exactly one space of padding on each side.
static SPACED_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{ (.*?) \}\}").expect("spaced placeholder pattern"));

/// `{{name}}` with no padding (or any padding the spaced form didn't consume).
static TIGHT_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("tight placeholder pattern"));

/// Rewrites template placeholders into catalog placeholders:
/// `Hi {{ name }}` becomes `Hi %name%`.
///
/// Rewriting repeats until no placeholder is left, so nested braces such as
/// `{{{{x}}}}` settle on one key and the function is idempotent.
#[must_use]
pub fn normalize_placeholders(raw: &str) -> String {
    let mut key = raw.to_string();
    while let Some(next) = rewrite_once(&key) {
        key = next;
    }
    key
}

/// One spaced pass then one tight pass; `None` once nothing changes.
fn rewrite_once(key: &str) -> Option<String> {
    let spaced = SPACED_PLACEHOLDER.replace_all(key, "%${1}%");
    let tight = TIGHT_PLACEHOLDER.replace_all(&spaced, "%${1}%").into_owned();
    (tight != key).then_some(tight)
}
