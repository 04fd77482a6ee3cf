//! Container blocks for lab-guide Markdown.
//!
//! Lab guides use `:::` fenced containers for admonitions:
//!
//! ```markdown
//! ::: note
//! Remember to save your work.
//! :::
//!
//! :::: answers
//! ::: tip
//! Nested blocks need a shorter marker run than their parent.
//! :::
//! ::::
//! ```
//!
//! Conversion is an explicit three-stage pipeline: [`tokenize`] the source,
//! [`exclude`] answers blocks according to [`ContainerOptions`], then
//! [`render`] the remaining tokens to HTML.
//!
//! ```
//! use md2lab_parser::{BlockContainers, ContainerOptions};
//!
//! let containers = BlockContainers::register(ContainerOptions::without_answers());
//! let html = containers.to_html("::: answers\n42\n:::\n\nDone.\n");
//! assert_eq!(html, "<p>Done.</p>\n");
//! ```
pub mod answers;
mod blocks;
mod error;
mod exclude;
pub mod fence;
mod options;
mod render;
mod token;
mod tokenizer;

pub use blocks::{BlockKind, class_slug, custom_title};
pub use error::Error;
pub use exclude::{exclude, mark_excluded, splice_marked};
pub use options::ContainerOptions;
pub use render::{escape_html, render};
pub use token::{Token, TokenKind};
pub use tokenizer::tokenize;

/// The container extension, configured for one rendering variant.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockContainers {
    options: ContainerOptions,
}

impl BlockContainers {
    /// Registers every [`BlockKind`] with the given per-variant options.
    #[must_use]
    pub fn register(options: ContainerOptions) -> Self {
        tracing::trace!(kinds = ?BlockKind::ALL, ?options, "registering containers");
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    #[must_use]
    pub fn parse(&self, source: &str) -> Vec<Token> {
        tokenize(source)
    }

    #[must_use]
    pub fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        exclude(tokens, &self.options)
    }

    #[must_use]
    pub fn render(&self, tokens: &[Token]) -> String {
        render(tokens, &self.options)
    }

    /// Parses, filters and renders `source`.
    #[tracing::instrument(skip_all, fields(include_answers = self.options.include_answers()))]
    #[must_use]
    pub fn to_html(&self, source: &str) -> String {
        let tokens = self.filter(self.parse(source));
        self.render(&tokens)
    }
}

/// Shorthand for [`BlockContainers::register`] followed by
/// [`BlockContainers::to_html`].
#[must_use]
pub fn to_html(source: &str, options: &ContainerOptions) -> String {
    BlockContainers::register(*options).to_html(source)
}
