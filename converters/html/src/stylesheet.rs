//! The document's single `<style>` block.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use cssparser::{ParseError, Parser, ParserInput, SourceLocation, Token};
use md2lab_converters_core::Assets;

use crate::Error;

/// Bundled base stylesheet.
pub const DEFAULT_CSS: &str = include_str!("../assets/style.css");

/// Family name the bundled stylesheet asks for.
pub const FONT_FAMILY: &str = "Splunk Data Sans Pro";

type LintError<'i> = ParseError<'i, ()>;

/// `@font-face` rule embedding a TrueType font.
#[must_use]
pub fn font_face(font: &[u8]) -> String {
    format!(
        "@font-face {{\n  font-family: \"{FONT_FAMILY}\";\n  src: url(data:font/truetype;charset=utf-8;base64,{}) format('truetype');\n}}\n",
        STANDARD.encode(font)
    )
}

/// Builds the stylesheet: embedded font (when the file exists), the bundled
/// styles, then the override stylesheet (when it exists), optionally linted.
///
/// # Errors
///
/// Fails only when an existing font or override file cannot be read.
#[tracing::instrument(skip_all)]
pub fn build(assets: &Assets, validate_css: bool) -> Result<String, Error> {
    let mut css = String::new();

    let font = assets.font();
    if font.is_file() {
        let bytes = std::fs::read(font).map_err(|e| Error::io(font, e))?;
        css.push_str(&font_face(&bytes));
        css.push_str("\n\n");
    } else {
        tracing::warn!(font = %font.display(), "font not found, using fallback fonts");
    }

    css.push_str(DEFAULT_CSS);

    let custom = assets.custom_css();
    if custom.is_file() {
        let custom_css = std::fs::read_to_string(custom).map_err(|e| Error::io(custom, e))?;
        if validate_css {
            report_issues(custom, &custom_css);
        }
        css.push_str("\n\n/* Custom Styles */\n");
        css.push_str(&custom_css);
        tracing::info!(path = %custom.display(), "applying custom stylesheet");
    }

    Ok(css)
}

/// A problem found while tokenizing a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssIssue {
    /// One-based line number.
    pub line: u32,
    /// One-based column number.
    pub column: u32,
    pub message: &'static str,
}

impl CssIssue {
    fn at(location: SourceLocation, message: &'static str) -> Self {
        Self {
            line: location.line + 1,
            column: location.column,
            message,
        }
    }
}

impl std::fmt::Display for CssIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (line {}, column {})", self.message, self.line, self.column)
    }
}

/// Tokenizes `css` and collects the issues a browser would silently
/// recover from: unterminated strings, malformed `url()`s and closing
/// brackets with no opener.
#[must_use]
pub fn lint(css: &str) -> Vec<CssIssue> {
    let mut issues = Vec::new();
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    lint_recursive(&mut parser, &mut issues);
    issues
}

fn lint_recursive(parser: &mut Parser<'_, '_>, issues: &mut Vec<CssIssue>) {
    loop {
        let location = parser.current_source_location();
        let Ok(token) = parser.next_including_whitespace_and_comments() else {
            break;
        };
        if let Token::BadString(_) = token {
            issues.push(CssIssue::at(location, "unterminated string"));
        } else if let Token::BadUrl(_) = token {
            issues.push(CssIssue::at(location, "malformed url()"));
        } else if matches!(
            token,
            Token::CloseCurlyBracket | Token::CloseParenthesis | Token::CloseSquareBracket
        ) {
            issues.push(CssIssue::at(location, "unmatched closing bracket"));
        } else if matches!(
            token,
            Token::Function(_)
                | Token::ParenthesisBlock
                | Token::SquareBracketBlock
                | Token::CurlyBracketBlock
        ) {
            let _ = parser.parse_nested_block(|p| {
                lint_recursive(p, issues);
                Ok::<_, LintError<'_>>(())
            });
        }
    }
}

fn report_issues(path: &Path, css: &str) {
    let issues = lint(css);
    if issues.is_empty() {
        tracing::info!(path = %path.display(), "validated stylesheet");
        return;
    }
    tracing::warn!(path = %path.display(), count = issues.len(), "issues found in stylesheet");
    for issue in issues {
        tracing::warn!(path = %path.display(), "  {issue}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_clean_stylesheet() {
        assert_eq!(lint(DEFAULT_CSS), vec![]);
        assert_eq!(lint("a { color: red; background: url(x.png); }"), vec![]);
    }

    #[test]
    fn test_detects_problems() {
        let issues = lint("a { content: \"oops\n; }\n}\nb { background: url(a b.png); }");
        let messages: Vec<_> = issues.iter().map(|issue| issue.message).collect();
        assert!(messages.contains(&"unterminated string"));
        assert!(messages.contains(&"malformed url()"));
        assert!(messages.contains(&"unmatched closing bracket"));
    }

    #[test]
    fn test_issue_location() {
        let issues = lint("a {}\n}");
        assert_eq!(
            issues,
            vec![CssIssue {
                line: 2,
                column: 1,
                message: "unmatched closing bracket",
            }]
        );
    }

    #[test]
    fn test_font_face() {
        let face = font_face(b"ttf");
        assert!(face.contains("font-family: \"Splunk Data Sans Pro\";"));
        assert!(face.contains("base64,dHRm) format('truetype')"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_build_with_assets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/font.ttf"), b"ttf").unwrap();
        std::fs::write(dir.path().join("custom.css"), "h1 { color: teal; }\n}").unwrap();

        let css = build(&Assets::for_source_dir(dir.path()), true).unwrap();
        assert!(css.starts_with("@font-face"));
        assert!(css.contains(DEFAULT_CSS));
        assert!(css.ends_with("/* Custom Styles */\nh1 { color: teal; }\n}"));
        assert!(logs_contain("issues found in stylesheet"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_build_without_assets() {
        let dir = tempfile::tempdir().unwrap();
        let css = build(&Assets::for_source_dir(dir.path()), false).unwrap();
        assert_eq!(css, DEFAULT_CSS);
        assert!(logs_contain("font not found"));
    }
}
