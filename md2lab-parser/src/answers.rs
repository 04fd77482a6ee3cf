//! Line-level removal of `answers` blocks, applied to raw source before it is
//! tokenized.
//!
//! This scanner tracks a single open/close pair. It does not count nesting:
//! the first bare `:::` line after an opening ends exclusion, even when it
//! closes a block nested inside the answers. The token-level pass in
//! [`crate::exclude`] handles nesting and runs afterwards.

use std::sync::LazyLock;

use regex::Regex;

const OPENING: &str = "::: answers";
const CLOSING: &str = ":::";

#[allow(clippy::expect_used)]
static ANSWERS_OPENING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("::: *answers").expect("answers pattern is valid"));

/// Drops every line from an answers opening through the next bare `:::`.
#[must_use]
pub fn strip_answers_blocks(markdown: &str) -> String {
    let mut kept = Vec::new();
    let mut inside_answers = false;

    for line in markdown.split('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with(OPENING) {
            tracing::debug!("found answers block, skipping content");
            inside_answers = true;
            continue;
        }
        if inside_answers && trimmed == CLOSING {
            tracing::debug!("ending answers block");
            inside_answers = false;
            continue;
        }
        if !inside_answers {
            kept.push(line);
        }
    }

    kept.join("\n")
}

/// Whether `content` contains anything that looks like an answers opening.
#[must_use]
pub fn has_answers_block(content: &str) -> bool {
    ANSWERS_OPENING.is_match(content)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_strips_block() {
        let source = "# Lab\n\n::: answers\nThe answer is 42.\n:::\n\nNext step\n";
        assert_eq!(strip_answers_blocks(source), "# Lab\n\n\nNext step\n");
    }

    #[test]
    fn test_indented_markers() {
        let source = "a\n  ::: answers  \nhidden\n  :::  \nb";
        assert_eq!(strip_answers_blocks(source), "a\nb");
    }

    #[test]
    fn test_unchanged_without_answers() {
        let source = "# Title\n\n::: note\nKeep me\n:::\n";
        assert_eq!(strip_answers_blocks(source), source);
        assert_eq!(strip_answers_blocks(&strip_answers_blocks(source)), source);
    }

    #[test]
    fn test_unterminated_block_drops_rest() {
        assert_eq!(strip_answers_blocks("keep\n::: answers\nlost\nlost too"), "keep");
    }

    #[test]
    fn test_nested_marker_ends_exclusion_early() {
        // A nested block's `:::` ends exclusion: its tail and the outer
        // closing marker leak through to the token-level pass.
        let source = "::: answers\n::: tip\nhidden\n:::\nleaked\n:::\n";
        assert_eq!(strip_answers_blocks(source), "leaked\n:::\n");
    }

    #[test]
    fn test_longer_runs_are_left_to_token_pass() {
        let source = ":::: answers\nkept\n::::\n";
        assert_eq!(strip_answers_blocks(source), source);
    }

    #[rstest::rstest]
    #[case("::: answers\n", true)]
    #[case(":::answers\n", true)]
    #[case(":::   answers", true)]
    #[case(":::: answers", true)]
    #[case("::: note\nanswers\n", false)]
    #[case("no blocks here", false)]
    fn test_has_answers_block(#[case] content: &str, #[case] expected: bool) {
        assert_eq!(has_answers_block(content), expected);
    }
}
