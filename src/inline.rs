use crate::block::InlineSpan;

/// Split a line into plain and emphasized spans.
///
/// Each `*` opens a pair that closes at the next `*`. Pairs don't nest, and a
/// `*` with no partner is kept verbatim in the trailing plain text. Empty spans
/// are dropped and neighbouring plain runs are merged, so `**bold**` comes out
/// as plain `bold`.
pub fn tokenize(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find('*') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('*') else {
            break;
        };
        push_plain(&mut spans, &rest[..open]);
        push_emphasis(&mut spans, &after_open[..close]);
        rest = &after_open[close + 1..];
    }

    push_plain(&mut spans, rest);
    spans
}

fn push_plain(spans: &mut Vec<InlineSpan>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(InlineSpan::PlainText(prev)) = spans.last_mut() {
        prev.push_str(text);
    } else {
        spans.push(InlineSpan::PlainText(text.to_string()));
    }
}

fn push_emphasis(spans: &mut Vec<InlineSpan>, text: &str) {
    if !text.is_empty() {
        spans.push(InlineSpan::Emphasis(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> InlineSpan {
        InlineSpan::PlainText(s.to_string())
    }

    fn em(s: &str) -> InlineSpan {
        InlineSpan::Emphasis(s.to_string())
    }

    #[test]
    fn plain_line() {
        assert_eq!(tokenize("just words"), vec![plain("just words")]);
    }

    #[test]
    fn empty_line() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn single_pair() {
        assert_eq!(
            tokenize("hello *world*"),
            vec![plain("hello "), em("world")]
        );
    }

    #[test]
    fn pairs_are_non_greedy() {
        assert_eq!(
            tokenize("*a* and *b*"),
            vec![em("a"), plain(" and "), em("b")]
        );
    }

    #[test]
    fn odd_asterisk_count_leaves_trailing_plain() {
        assert_eq!(
            tokenize("a *b* c *d"),
            vec![plain("a "), em("b"), plain(" c *d")]
        );
    }

    #[test]
    fn lone_asterisk() {
        assert_eq!(tokenize("5 * 3"), vec![plain("5 * 3")]);
    }

    #[test]
    fn double_asterisks_collapse_to_plain() {
        assert_eq!(tokenize("**bold**"), vec![plain("bold")]);
        assert_eq!(tokenize("a**b"), vec![plain("ab")]);
    }

    #[test]
    fn emphasis_keeps_inner_whitespace() {
        assert_eq!(tokenize("* spaced *"), vec![em(" spaced ")]);
    }

    #[test]
    fn multibyte_text() {
        assert_eq!(
            tokenize("café *naïve* 🚀"),
            vec![plain("café "), em("naïve"), plain(" 🚀")]
        );
    }
}
