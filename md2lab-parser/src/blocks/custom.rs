//! Title extraction and class slugs for `custom` blocks.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static QUOTED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^custom\s+"(.+)"$"#).expect("quoted title pattern is valid"));

#[allow(clippy::expect_used)]
static BARE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^custom\s+(.*)$").expect("bare title pattern is valid"));

#[allow(clippy::expect_used)]
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("non-word pattern is valid"));

/// Extracts the title of a `custom` block from its (trimmed) info string.
///
/// `custom "Quoted Title"` is tried before `custom Bare Title`. Returns `None`
/// when no title is present.
#[must_use]
pub fn custom_title(info: &str) -> Option<String> {
    let info = info.trim();
    let captured = QUOTED_TITLE
        .captures(info)
        .or_else(|| BARE_TITLE.captures(info))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())?;
    (!captured.is_empty()).then_some(captured)
}

/// Derives a CSS class token from a title: lowercase, runs of non-word
/// characters collapsed to one hyphen, no leading or trailing hyphens.
#[must_use]
pub fn class_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("custom \"My Cool Tip!\"", Some("My Cool Tip!"))]
    #[case("custom Bare Title", Some("Bare Title"))]
    #[case("custom   \"  padded  \"", Some("padded"))]
    #[case("custom \"unbalanced", Some("\"unbalanced"))]
    #[case("custom", None)]
    #[case("custom   ", None)]
    fn test_custom_title(#[case] info: &str, #[case] expected: Option<&str>) {
        assert_eq!(custom_title(info).as_deref(), expected);
    }

    #[rstest::rstest]
    #[case("My Cool Tip!", "my-cool-tip")]
    #[case("  Lab 2: Setup & Teardown ", "lab-2-setup-teardown")]
    #[case("snake_case stays", "snake_case-stays")]
    #[case("---", "")]
    fn test_class_slug(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(class_slug(title), expected);
    }
}
