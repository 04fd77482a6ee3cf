//! Fenced code block detection.
//!
//! Container markers and headings inside fenced code are literal text, so
//! every line scanner in the workspace skips over fences with [`CodeFence`].

use crate::blocks::marker::indentation;

const MIN_FENCE: usize = 3;

/// An open ```` ``` ```` or `~~~` fence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeFence {
    marker: char,
    len: usize,
    base: usize,
}

impl CodeFence {
    /// Returns the fence opened by `line`, if it opens one.
    #[must_use]
    pub fn open(line: &str) -> Option<Self> {
        Self::open_within(line, 0)
    }

    /// Like [`CodeFence::open`], for a line inside a list item whose content
    /// starts at column `base`.
    #[must_use]
    pub fn open_within(line: &str, base: usize) -> Option<Self> {
        if indentation(line) > base + 3 {
            return None;
        }
        let rest = line.trim_start();
        let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = rest.chars().take_while(|c| *c == marker).count();
        if len < MIN_FENCE {
            return None;
        }
        // A backtick fence's info string may not contain backticks.
        if marker == '`' && rest.get(len..).is_some_and(|info| info.contains('`')) {
            return None;
        }
        Some(Self { marker, len, base })
    }

    #[must_use]
    pub fn is_closed_by(&self, line: &str) -> bool {
        if indentation(line) > self.base + 3 {
            return false;
        }
        let rest = line.trim_start();
        let len = rest.chars().take_while(|c| *c == self.marker).count();
        len >= self.len
            && rest
                .get(len * self.marker.len_utf8()..)
                .is_some_and(|tail| tail.trim().is_empty())
    }

    /// Index of the line closing this fence, searching `from..end` of `lines`.
    #[must_use]
    pub fn find_close(&self, lines: &[&str], from: usize, end: usize) -> Option<usize> {
        (from..end).find(|&index| {
            lines
                .get(index)
                .is_some_and(|line| self.is_closed_by(line))
        })
    }
}
