//! Helpers for picking apart assembled HTML in tests.

/// Extracts the `<section>` elements of an assembled document in order, as
/// `(data-file, inner html)` pairs.
///
/// # Example
///
/// ```
/// use md2lab_converters_dev::output::sections;
///
/// let html = "<section class=\"section\" data-file=\"intro\">\n<p>Hi</p>\n</section>";
/// assert_eq!(sections(html), vec![("intro".to_string(), "<p>Hi</p>".to_string())]);
/// ```
#[must_use]
pub fn sections(html: &str) -> Vec<(String, String)> {
    const OPEN: &str = "<section class=\"section\" data-file=\"";
    let mut found = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(OPEN) {
        let after = rest.get(start + OPEN.len()..).unwrap_or_default();
        let Some((file, body)) = after.split_once("\">") else {
            break;
        };
        let Some((inner, tail)) = body.split_once("</section>") else {
            break;
        };
        found.push((file.to_string(), inner.trim().to_string()));
        rest = tail;
    }
    found
}
