use crate::BlockKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    ContainerOpen(BlockKind),
    ContainerClose(BlockKind),
    Markdown,
}

/// One element of the parsed token stream.
///
/// Containers produce an open/close pair around the tokens of their body;
/// everything else is a run of plain Markdown source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct Token {
    pub kind: TokenKind,
    /// Trimmed text following the marker run of an opening line.
    pub info: String,
    /// The marker run (`:::`, `::::`, ...) for container tokens.
    pub markup: String,
    /// Markdown source for [`TokenKind::Markdown`] tokens.
    pub content: String,
    /// Content column of the list item a container sits in, zero outside
    /// lists.
    pub indent: usize,
    /// Zero-based index of the first source line this token covers.
    pub line: usize,
    pub marked_for_removal: bool,
}

impl Token {
    #[must_use]
    pub fn open(kind: BlockKind, markup: &str, info: &str, indent: usize, line: usize) -> Self {
        Self {
            kind: TokenKind::ContainerOpen(kind),
            info: info.to_string(),
            markup: markup.to_string(),
            content: String::new(),
            indent,
            line,
            marked_for_removal: false,
        }
    }

    #[must_use]
    pub fn close(kind: BlockKind, markup: &str, indent: usize, line: usize) -> Self {
        Self {
            kind: TokenKind::ContainerClose(kind),
            info: String::new(),
            markup: markup.to_string(),
            content: String::new(),
            indent,
            line,
            marked_for_removal: false,
        }
    }

    #[must_use]
    pub fn markdown(content: String, line: usize) -> Self {
        Self {
            kind: TokenKind::Markdown,
            info: String::new(),
            markup: String::new(),
            content,
            indent: 0,
            line,
            marked_for_removal: false,
        }
    }

    /// +1 for an opening token, -1 for a closing one, 0 otherwise.
    #[must_use]
    pub fn nesting_delta(&self) -> i32 {
        match self.kind {
            TokenKind::ContainerOpen(_) => 1,
            TokenKind::ContainerClose(_) => -1,
            TokenKind::Markdown => 0,
        }
    }

    #[must_use]
    pub fn block_kind(&self) -> Option<BlockKind> {
        match self.kind {
            TokenKind::ContainerOpen(kind) | TokenKind::ContainerClose(kind) => Some(kind),
            TokenKind::Markdown => None,
        }
    }

    #[must_use]
    pub fn opens(&self, kind: BlockKind) -> bool {
        self.kind == TokenKind::ContainerOpen(kind)
    }
}
