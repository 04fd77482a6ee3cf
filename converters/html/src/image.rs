//! Inlining of local Markdown images as `data:` URIs.

use std::{path::Path, sync::LazyLock};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use regex::{Captures, Regex};

#[allow(clippy::expect_used)]
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern is valid"));

fn is_remote(target: &str) -> bool {
    let lowered = target.to_ascii_lowercase();
    ["http://", "https://", "data:", "//"]
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// MIME type for an image path, from its extension.
#[must_use]
pub fn mime_type(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "" => "application/octet-stream".to_string(),
        "jpg" => "image/jpeg".to_string(),
        "svg" => "image/svg+xml".to_string(),
        other => format!("image/{other}"),
    }
}

/// Replaces every `![alt](path)` whose path resolves (relative to
/// `base_dir`) to a readable file with a base64 `data:` URI. Anything else is
/// left as written; unresolved local paths log a warning.
#[must_use]
pub fn embed_local_images(markdown: &str, base_dir: &Path) -> String {
    IMAGE
        .replace_all(markdown, |caps: &Captures<'_>| embed(caps, base_dir))
        .into_owned()
}

fn embed(caps: &Captures<'_>, base_dir: &Path) -> String {
    let original = caps.get(0).map_or("", |m| m.as_str()).to_string();
    let alt = caps.get(1).map_or("", |m| m.as_str());
    let target = caps.get(2).map_or("", |m| m.as_str()).trim();

    // `path "title"`: only the path is resolved, the title is kept.
    let (image_path, title) = match target.split_once(char::is_whitespace) {
        Some((path, title)) => (path, Some(title.trim())),
        None => (target, None),
    };

    if image_path.is_empty() || is_remote(image_path) {
        return original;
    }

    let resolved = base_dir.join(image_path);
    if !resolved.is_file() {
        tracing::warn!(
            image = image_path,
            resolved = %resolved.display(),
            "image not found"
        );
        return original;
    }

    let bytes = match std::fs::read(&resolved) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(image = image_path, error = %e, "could not read image");
            return original;
        }
    };

    let data = format!(
        "data:{};base64,{}",
        mime_type(&resolved),
        STANDARD.encode(bytes)
    );
    tracing::debug!(image = image_path, "embedded image");
    match title {
        Some(title) => format!("![{alt}]({data} {title})"),
        None => format!("![{alt}]({data})"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[rstest::rstest]
    #[case("shot.png", "image/png")]
    #[case("photo.JPG", "image/jpeg")]
    #[case("photo.jpeg", "image/jpeg")]
    #[case("diagram.svg", "image/svg+xml")]
    #[case("anim.gif", "image/gif")]
    #[case("noext", "application/octet-stream")]
    fn test_mime_type(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(mime_type(Path::new(path)), expected);
    }

    #[test]
    fn test_embeds_existing_image() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/dot.png"), b"png-bytes").unwrap();

        let output = embed_local_images("See ![a dot](images/dot.png) here.", dir.path());
        assert_eq!(
            output,
            format!("See ![a dot](data:image/png;base64,{}) here.", STANDARD.encode(b"png-bytes"))
        );
    }

    #[test]
    fn test_keeps_title() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.gif"), b"gif").unwrap();
        let output = embed_local_images("![x](x.gif \"Caption\")", dir.path());
        assert_eq!(output, "![x](data:image/gif;base64,Z2lm \"Caption\")");
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_missing_image_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let source = "![gone](missing.png)";
        assert_eq!(embed_local_images(source, dir.path()), source);
        assert!(logs_contain("image not found"));
    }

    #[test]
    fn test_remote_and_data_urls_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let source = "![r](https://example.com/a.png) ![d](data:image/png;base64,AAAA)";
        assert_eq!(embed_local_images(source, dir.path()), source);
    }
}
