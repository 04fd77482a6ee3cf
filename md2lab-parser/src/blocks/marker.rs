//! Recognition of `:::` opening and closing lines.

use super::BlockKind;

pub(crate) const MARKER: char = ':';
pub(crate) const MIN_MARKERS: usize = 3;

/// An opening line that starts a container block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Opening<'a> {
    pub(crate) kind: BlockKind,
    pub(crate) markers: usize,
    pub(crate) info: &'a str,
}

/// Width of the leading whitespace, with tabs expanded to the next multiple of four.
pub(crate) fn indentation(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4 - (width % 4),
            _ => break,
        }
    }
    width
}

/// Marker lines may be indented up to three columns past `base`, the content
/// indentation of the list item they sit in (zero outside lists).
fn marker_run(line: &str, base: usize) -> Option<(usize, &str)> {
    if indentation(line) > base + 3 {
        return None;
    }
    let rest = line.trim_start();
    let markers = rest.chars().take_while(|c| *c == MARKER).count();
    if markers < MIN_MARKERS {
        return None;
    }
    // `:` is a single byte, so the marker count is also a byte offset.
    rest.get(markers..).map(|params| (markers, params))
}

pub(crate) fn opening(line: &str, base: usize) -> Option<Opening<'_>> {
    let (markers, params) = marker_run(line, base)?;
    let kind = BlockKind::recognize(params)?;
    Some(Opening {
        kind,
        markers,
        info: params.trim(),
    })
}

/// A closing line has at least as many markers as the opening one and nothing
/// but whitespace after them.
pub(crate) fn closes(line: &str, opening_markers: usize, base: usize) -> bool {
    marker_run(line, base)
        .is_some_and(|(markers, rest)| markers >= opening_markers && rest.trim().is_empty())
}
