//! Token-level removal of `answers` blocks.

use crate::{BlockKind, ContainerOptions, Token};

/// Marks every `answers` opening token for removal when `options` exclude
/// answers. Returns how many tokens were marked.
pub fn mark_excluded(tokens: &mut [Token], options: &ContainerOptions) -> usize {
    if options.include_answers() {
        return 0;
    }
    let mut marked = 0;
    for token in tokens
        .iter_mut()
        .filter(|token| token.opens(BlockKind::Answers))
    {
        token.marked_for_removal = true;
        marked += 1;
    }
    marked
}

/// Splices out each marked token together with everything up to and
/// including the token where accumulated nesting returns to zero.
///
/// Marked tokens inside an already removed range go with it, so nested
/// blocks never leave orphaned open or close tokens behind.
#[must_use]
pub fn splice_marked(tokens: Vec<Token>) -> Vec<Token> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut depth = 0;
    for token in tokens {
        if depth > 0 {
            depth += token.nesting_delta();
            continue;
        }
        if token.marked_for_removal {
            depth = token.nesting_delta().max(0);
            continue;
        }
        kept.push(token);
    }
    kept
}

/// Runs [`mark_excluded`] then [`splice_marked`].
#[tracing::instrument(skip_all, fields(include_answers = options.include_answers()))]
#[must_use]
pub fn exclude(mut tokens: Vec<Token>, options: &ContainerOptions) -> Vec<Token> {
    let marked = mark_excluded(&mut tokens, options);
    if marked == 0 {
        return tokens;
    }
    tracing::debug!(marked, "removing answers blocks");
    splice_marked(tokens)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{TokenKind, tokenize};

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|token| token.kind).collect()
    }

    #[test]
    fn test_answers_kept_when_included() {
        let tokens = tokenize("::: answers\nSecret\n:::\n");
        let filtered = exclude(tokens.clone(), &ContainerOptions::with_answers());
        assert_eq!(filtered, tokens);
    }

    #[test]
    fn test_answers_removed_with_nested_blocks() {
        let source = "Before\n\n:::: answers\n::: tip\nInner\n:::\nOuter\n::::\n\nAfter\n";
        let filtered = exclude(tokenize(source), &ContainerOptions::without_answers());
        assert_eq!(kinds(&filtered), vec![TokenKind::Markdown, TokenKind::Markdown]);
        assert!(filtered.iter().all(|token| !token.content.contains("Inner")));
        assert!(filtered.iter().all(|token| !token.content.contains("Outer")));
        let depth: i32 = filtered.iter().map(Token::nesting_delta).sum();
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_nested_answers_inside_answers() {
        let source = "::::: answers\n:::: answers\nDeep\n::::\n:::::\nTail\n";
        let filtered = exclude(tokenize(source), &ContainerOptions::without_answers());
        assert_eq!(kinds(&filtered), vec![TokenKind::Markdown]);
        assert_eq!(
            filtered.first().map(|token| token.content.as_str()),
            Some("Tail\n")
        );
    }

    #[test]
    fn test_other_blocks_untouched() {
        let source = "::: note\nKeep\n:::\n::: answers\nDrop\n:::\n";
        let filtered = exclude(tokenize(source), &ContainerOptions::without_answers());
        assert_eq!(
            kinds(&filtered),
            vec![
                TokenKind::ContainerOpen(BlockKind::Note),
                TokenKind::Markdown,
                TokenKind::ContainerClose(BlockKind::Note),
            ]
        );
    }

    #[test]
    fn test_mark_counts() {
        let mut tokens = tokenize("::: answers\na\n:::\n::: answers\nb\n:::\n");
        assert_eq!(mark_excluded(&mut tokens, &ContainerOptions::with_answers()), 0);
        assert_eq!(mark_excluded(&mut tokens, &ContainerOptions::without_answers()), 2);
    }
}
