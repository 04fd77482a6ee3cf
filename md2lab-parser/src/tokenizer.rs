//! Splits Markdown source into container tokens and plain Markdown runs.

use crate::{
    BlockKind, Token,
    blocks::{
        list::ListIndents,
        marker::{self, MARKER},
    },
    fence::CodeFence,
};

/// Deepest container nesting recognised. Opening lines beyond it are kept as
/// plain Markdown.
pub const MAX_NESTING: usize = 100;

/// Tokenizes `source` into a flat stream where every container contributes
/// an open token, the tokens of its body, and a close token.
///
/// A closing line ends the outermost open container it can close, along
/// with every container opened inside it. Containers still open at the end
/// of the source are closed there.
#[tracing::instrument(skip_all)]
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let lines: Vec<&str> = source.lines().collect();
    let mut tokens = Vec::new();
    let mut run = MarkdownRun::default();
    let mut open: Vec<OpenContainer> = Vec::new();
    let mut lists = ListIndents::default();
    let mut index = 0;

    while let Some(line) = lines.get(index).copied() {
        let base = lists.observe(line);

        if let Some(fence) = CodeFence::open_within(line, base) {
            let last = fence
                .find_close(&lines, index + 1, lines.len())
                .unwrap_or(lines.len() - 1);
            for (offset, fenced) in lines.iter().enumerate().take(last + 1).skip(index) {
                run.push(offset, fenced);
            }
            index = last + 1;
            continue;
        }

        if let Some(depth) = open
            .iter()
            .position(|container| marker::closes(line, container.markers, container.base))
        {
            run.flush(&mut tokens);
            for (nested, container) in open.drain(depth..).enumerate().rev() {
                if nested > 0 {
                    tracing::debug!(
                        kind = %container.kind,
                        line = index + 1,
                        "container closed by its parent"
                    );
                }
                tokens.push(container.close(index));
            }
            index += 1;
            continue;
        }

        if let Some(opening) = marker::opening(line, base) {
            if open.len() < MAX_NESTING {
                run.flush(&mut tokens);
                let container = OpenContainer {
                    kind: opening.kind,
                    markers: opening.markers,
                    base,
                };
                tokens.push(Token::open(
                    opening.kind,
                    &container.markup(),
                    opening.info,
                    base,
                    index,
                ));
                open.push(container);
                index += 1;
                continue;
            }
            tracing::warn!(
                line = index + 1,
                max = MAX_NESTING,
                "container nesting too deep, keeping line as text"
            );
        }

        run.push(index, line);
        index += 1;
    }

    run.flush(&mut tokens);
    while let Some(container) = open.pop() {
        tracing::debug!(kind = %container.kind, "unterminated container runs to end of file");
        tokens.push(container.close(lines.len()));
    }
    tokens
}

#[derive(Debug)]
struct OpenContainer {
    kind: BlockKind,
    markers: usize,
    base: usize,
}

impl OpenContainer {
    fn markup(&self) -> String {
        MARKER.to_string().repeat(self.markers)
    }

    fn close(&self, line: usize) -> Token {
        Token::close(self.kind, &self.markup(), self.base, line)
    }
}

/// Accumulates consecutive non-container lines into one Markdown token.
#[derive(Default)]
struct MarkdownRun {
    start: Option<usize>,
    content: String,
}

impl MarkdownRun {
    fn push(&mut self, index: usize, line: &str) {
        self.start.get_or_insert(index);
        self.content.push_str(line);
        self.content.push('\n');
    }

    fn flush(&mut self, tokens: &mut Vec<Token>) {
        let content = std::mem::take(&mut self.content);
        if let Some(start) = self.start.take()
            && !content.trim().is_empty()
        {
            tokens.push(Token::markdown(content, start));
        }
    }
}
