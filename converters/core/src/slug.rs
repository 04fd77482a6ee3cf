/// Lowercases `text`, drops everything but ASCII word characters, hyphens and
/// whitespace, then joins the remaining words with single hyphens.
///
/// ```
/// assert_eq!(md2lab_converters_core::slugify("Intro to Widgets!"), "intro-to-widgets");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    tracing::debug!(text, "slugifying");
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("Intro to Widgets", "intro-to-widgets")]
    #[case("  Splunk   Enterprise: Admin 101 ", "splunk-enterprise-admin-101")]
    #[case("Data-Driven_Alerts", "data-driven_alerts")]
    #[case("Café & Crème", "caf-crme")]
    #[case("!!!", "")]
    fn test_slugify(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(slugify(text), expected);
    }
}
