//! Tracking of the list items enclosing a line.
//!
//! Containers and fences inside a list item are indented to the item's
//! content, so marker recognition needs to know where that content starts.
//! This is a line-level approximation of CommonMark list items: a line
//! indented less than an item's content ends the item, blank lines never do.

use super::marker::indentation;

const MAX_ORDINAL_DIGITS: usize = 9;

/// Content columns of the open list items, innermost last.
#[derive(Debug, Default)]
pub(crate) struct ListIndents {
    items: Vec<usize>,
}

impl ListIndents {
    pub(crate) fn base(&self) -> usize {
        self.items.last().copied().unwrap_or(0)
    }

    /// Updates the open items for `line` and returns the column block markers
    /// on this line are relative to.
    pub(crate) fn observe(&mut self, line: &str) -> usize {
        if line.trim().is_empty() {
            return self.base();
        }
        let indent = indentation(line);
        while self.items.last().is_some_and(|content| indent < *content) {
            self.items.pop();
        }
        let base = self.base();
        if indent <= base + 3
            && let Some(width) = item_marker_width(line.trim_start())
        {
            self.items.push(indent + width);
        }
        base
    }
}

/// Width from the list marker to the item's content, when `rest` starts a
/// list item.
fn item_marker_width(rest: &str) -> Option<usize> {
    let marker = if rest.starts_with(['-', '+', '*']) {
        1
    } else {
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 || digits > MAX_ORDINAL_DIGITS {
            return None;
        }
        let delimiter = rest.get(digits..)?.chars().next()?;
        if delimiter != '.' && delimiter != ')' {
            return None;
        }
        digits + 1
    };

    let after = rest.get(marker..)?;
    if after.trim().is_empty() {
        return Some(marker + 1);
    }
    let spaces = indentation(after);
    match spaces {
        0 => None,
        1..=4 => Some(marker + spaces),
        // Five or more spaces start an indented code block in the item.
        _ => Some(marker + 1),
    }
}
