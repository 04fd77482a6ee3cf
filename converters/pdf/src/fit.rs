//! Fitting the course title into the footer gap.
//!
//! Every function takes a `measure` closure returning the rendered width of a
//! string, so the layout logic is independent of the font in use.

use md2lab_converters_core::TitlePolicy;

pub const ELLIPSIS: &str = "…";

/// Lines a wrapped title may occupy.
pub const MAX_LINES: usize = 2;

/// Shortens `text` one character at a time until it plus [`ELLIPSIS`] fits
/// in `max_width`, then appends the ellipsis. Trailing whitespace before the
/// ellipsis is dropped. Returns an empty string when not even the ellipsis
/// fits.
pub fn ellipsize<F>(text: &str, max_width: f32, measure: F) -> String
where
    F: Fn(&str) -> f32,
{
    let mut kept = text.strip_suffix(ELLIPSIS).unwrap_or(text).to_string();
    while !kept.is_empty() && measure(&format!("{kept}{ELLIPSIS}")) > max_width {
        kept.pop();
    }
    let kept = kept.trim_end();
    if kept.is_empty() && measure(ELLIPSIS) > max_width {
        return String::new();
    }
    format!("{kept}{ELLIPSIS}")
}

/// `text` unchanged when it fits, [`ellipsize`]d otherwise.
pub fn truncate_to_width<F>(text: &str, max_width: f32, measure: F) -> String
where
    F: Fn(&str) -> f32,
{
    if measure(text) <= max_width {
        text.to_string()
    } else {
        ellipsize(text, max_width, measure)
    }
}

/// Greedy word wrap into at most `max_lines` lines.
///
/// A word wider than `max_width` on its own is truncated. When the words do
/// not fit in `max_lines` lines the last line is cut short and ends with
/// [`ELLIPSIS`].
pub fn wrap_lines<F>(text: &str, max_width: f32, max_lines: usize, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current = truncate_to_width(word, max_width, &measure);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if max_lines == 0 {
        return Vec::new();
    }
    if lines.len() > max_lines {
        tracing::debug!(needed = lines.len(), max_lines, "title overflows footer");
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = ellipsize(last, max_width, &measure);
        }
    }
    lines
}

/// Lays out `title` under `policy`: one line for [`TitlePolicy::Truncate`],
/// up to [`MAX_LINES`] for [`TitlePolicy::Wrap`].
pub fn fit_title<F>(title: &str, max_width: f32, policy: TitlePolicy, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let title = title.trim();
    if title.is_empty() {
        return Vec::new();
    }
    match policy {
        TitlePolicy::Truncate => {
            let line = truncate_to_width(title, max_width, measure);
            if line.is_empty() { Vec::new() } else { vec![line] }
        }
        TitlePolicy::Wrap => wrap_lines(title, max_width, MAX_LINES, measure),
    }
}
