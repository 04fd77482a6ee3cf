//! HTML rendering of a (filtered) token stream.
//!
//! The whole stream is rendered in one Markdown pass so reference links and
//! footnotes resolve across container boundaries. Container markup is spliced
//! into the Markdown source as single-line raw HTML blocks, each followed by
//! a blank line so the body after it is parsed as Markdown again.

use pulldown_cmark::{Options, Parser, html};

use crate::{BlockKind, ContainerOptions, Token, TokenKind, class_slug, custom_title};

const CLOSE_MARKUP: &str = "</div></div>";

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Renders `tokens` to HTML.
///
/// Tokens already marked for removal render as nothing, as does every
/// `answers` token when `options` exclude answers, so this is safe to call on
/// an unfiltered stream too.
#[must_use]
pub fn render(tokens: &[Token], options: &ContainerOptions) -> String {
    let mut source = String::new();
    for token in tokens {
        match token.kind {
            TokenKind::Markdown => source.push_str(&token.content),
            TokenKind::ContainerOpen(kind) => {
                if let Some(markup) = open_markup(kind, token, options) {
                    push_html_block(&mut source, token.indent, &markup);
                }
            }
            TokenKind::ContainerClose(kind) => {
                if kind != BlockKind::Answers || options.include_answers() {
                    tracing::debug!(%kind, "rendering end of block");
                    push_html_block(&mut source, token.indent, CLOSE_MARKUP);
                }
            }
        }
    }

    let mut output = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut output, Parser::new_ext(&source, markdown_options()));
    output
}

fn push_html_block(source: &mut String, indent: usize, markup: &str) {
    if !source.is_empty() && !source.ends_with('\n') {
        source.push('\n');
    }
    source.push_str(&" ".repeat(indent));
    source.push_str(markup);
    source.push_str("\n\n");
}

fn open_markup(kind: BlockKind, token: &Token, options: &ContainerOptions) -> Option<String> {
    if token.marked_for_removal || (kind == BlockKind::Answers && !options.include_answers()) {
        tracing::debug!("skipping answers block");
        return None;
    }

    let (class, title) = match kind {
        BlockKind::Custom => match custom_title(&token.info) {
            Some(title) => {
                tracing::debug!(%title, "custom admonition");
                let slug = class_slug(&title);
                let class = if slug.is_empty() {
                    kind.name().to_string()
                } else {
                    slug
                };
                (class, Some(title))
            }
            None => (kind.name().to_string(), None),
        },
        BlockKind::Caution
        | BlockKind::Danger
        | BlockKind::Hint
        | BlockKind::Info
        | BlockKind::Note
        | BlockKind::Tip
        | BlockKind::Warning
        | BlockKind::Scenario
        | BlockKind::Answers => (kind.name().to_string(), Some(kind.default_title())),
    };

    tracing::debug!(%kind, "rendering start of block");
    let mut markup = format!("<div class=\"admonition {class}\">");
    if let Some(title) = title {
        markup.push_str("<div class=\"admonition-title\">");
        markup.push_str(&escape_html(&title));
        markup.push_str("</div>");
    }
    markup.push_str("<div class=\"admonition-content\">");
    Some(markup)
}

/// Escapes `text` for use in HTML element content or a quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = pulldown_cmark_escape::escape_html(&mut escaped, text);
    escaped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tokenize;

    #[test]
    fn test_note_block() {
        let html = render(&tokenize("::: note\nBody\n:::\n"), &ContainerOptions::default());
        assert_eq!(
            html,
            "<div class=\"admonition note\"><div class=\"admonition-title\">Note</div><div class=\"admonition-content\">\n<p>Body</p>\n</div></div>\n"
        );
    }

    #[test]
    fn test_custom_block_titled() {
        let html = render(
            &tokenize("::: custom \"My Cool Tip!\"\nBody\n:::\n"),
            &ContainerOptions::default(),
        );
        assert!(html.starts_with(
            "<div class=\"admonition my-cool-tip\"><div class=\"admonition-title\">My Cool Tip!</div>"
        ));
    }

    #[test]
    fn test_custom_block_untitled() {
        let html = render(&tokenize("::: custom\nBody\n:::\n"), &ContainerOptions::default());
        assert!(html.starts_with(
            "<div class=\"admonition custom\"><div class=\"admonition-content\">\n"
        ));
        assert!(!html.contains("admonition-title"));
    }

    #[test]
    fn test_custom_title_escaped() {
        let html = render(
            &tokenize("::: custom \"<b>&</b>\"\nBody\n:::\n"),
            &ContainerOptions::default(),
        );
        assert!(html.contains("<div class=\"admonition-title\">&lt;b&gt;&amp;&lt;/b&gt;</div>"));
        assert!(html.contains("class=\"admonition b-b\""));
    }

    #[test]
    fn test_answers_included() {
        let html = render(
            &tokenize("::: answers\nSecret\n:::\n"),
            &ContainerOptions::with_answers(),
        );
        assert!(html.contains(
            "<div class=\"admonition answers\"><div class=\"admonition-title\">Answers</div>"
        ));
        assert!(html.contains("<p>Secret</p>"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_answers_wrapper_suppressed_without_filtering() {
        let html = render(
            &tokenize("::: answers\nSecret\n:::\n"),
            &ContainerOptions::without_answers(),
        );
        assert!(!html.contains("admonition"));
        assert!(logs_contain("skipping answers block"));
    }

    #[test]
    fn test_reference_links_resolve_across_blocks() {
        let html = render(
            &tokenize("See [the docs][docs].\n\n::: note\nHi\n:::\n\n[docs]: https://example.com\n"),
            &ContainerOptions::default(),
        );
        assert!(html.starts_with("<p>See <a href=\"https://example.com\">the docs</a>.</p>\n"));
    }

    #[test]
    fn test_block_inside_list_item() {
        let html = render(
            &tokenize("1. Step\n\n    ::: note\n    Careful\n    :::\n"),
            &ContainerOptions::default(),
        );
        assert_eq!(
            html,
            "<ol>\n<li>\n<p>Step</p>\n<div class=\"admonition note\"><div class=\"admonition-title\">Note</div><div class=\"admonition-content\">\n<p>Careful</p>\n</div></div>\n</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_markdown_extensions() {
        let html = render(
            &tokenize("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n"),
            &ContainerOptions::default(),
        );
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }
}
