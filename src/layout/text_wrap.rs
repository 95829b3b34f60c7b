//! Line breaking for a fixed-pitch font.
//!
//! Two primitives: [`break_lines`] splits plain text by character count, and
//! [`wrap_words`] packs styled words into lines by approximate width in
//! points.

use crate::config::PageSettings;
use crate::elements::{ContentNode, StyledWord};

/// Number of characters of width `char_width` points that fit in `inches`.
pub fn chars_per_line(inches: f32, char_width: f32) -> usize {
    if char_width <= 0.0 {
        return 0;
    }
    (PageSettings::points(inches) / char_width).max(0.0) as usize
}

/// Break plain text into lines of fewer than `chars_per_line` characters.
///
/// Words are separated by single spaces. A new line starts when appending the
/// next word (and its separating space) would bring the line to
/// `chars_per_line` characters or more. A word longer than the line still
/// gets a line of its own; words are never split.
pub fn break_lines(text: &str, chars_per_line: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if line_chars > 0 && line_chars + 1 + word_chars >= chars_per_line {
            lines.push(std::mem::take(&mut line));
            line_chars = 0;
        }
        if line_chars > 0 {
            line.push(' ');
            line_chars += 1;
        }
        line.push_str(word);
        line_chars += word_chars;
    }

    if line_chars > 0 {
        lines.push(line);
    }
    lines
}

/// One output line of wrapped rich text.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    /// Words on the line, in order
    pub words: Vec<StyledWord>,
    /// Consumed width in points, counting one trailing space per word
    pub width: f32,
    /// Horizontal offset from the margin in points
    pub indent: f32,
}

/// Pack words into lines no wider than `width` points.
///
/// Each word consumes `len * char_width` plus one `char_width` for the space
/// that follows it. The space after the last word on a line does not count
/// against `width`. A word wider than `width` on its own is placed alone on a
/// line. `indent` receives each finished line's consumed width and returns
/// its horizontal offset, which is how callers center or right-align.
pub fn wrap_words(
    words: Vec<StyledWord>,
    width: f32,
    char_width: f32,
    indent: impl Fn(f32) -> f32,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut buffer: Vec<StyledWord> = Vec::new();
    let mut consumed = 0.0f32;

    for word in words {
        let to_add = word.word.chars().count() as f32 * char_width;
        if !buffer.is_empty() && consumed + to_add > width {
            lines.push(WrappedLine {
                words: std::mem::take(&mut buffer),
                width: consumed,
                indent: indent(consumed),
            });
            consumed = 0.0;
        }
        buffer.push(word);
        consumed += to_add + char_width;
    }

    if !buffer.is_empty() {
        lines.push(WrappedLine {
            words: buffer,
            width: consumed,
            indent: indent(consumed),
        });
    }
    lines
}

/// Linearize `node` and wrap its words. See [`wrap_words`].
pub fn wrap_content(
    node: &ContentNode,
    width: f32,
    char_width: f32,
    indent: impl Fn(f32) -> f32,
) -> Vec<WrappedLine> {
    wrap_words(node.linearize(), width, char_width, indent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::FontStyle;
    use proptest::prelude::*;

    fn plain(words: &[&str]) -> Vec<StyledWord> {
        words
            .iter()
            .map(|w| StyledWord::new(*w, FontStyle::Plain))
            .collect()
    }

    #[test]
    fn test_break_lines_basic() {
        let lines = break_lines("the quick brown fox jumps", 12);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_break_lines_collapses_whitespace() {
        assert_eq!(break_lines("  a \n b\t c ", 80), vec!["a b c"]);
    }

    #[test]
    fn test_break_lines_empty() {
        assert!(break_lines("", 10).is_empty());
        assert!(break_lines("   \n ", 10).is_empty());
    }

    #[test]
    fn test_break_lines_long_word_alone() {
        let lines = break_lines("a supercalifragilistic b", 8);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_chars_per_line() {
        // 6 inches at 7.21pt per character
        assert_eq!(chars_per_line(6.0, 7.21), 59);
        assert_eq!(chars_per_line(1.9, 7.21), 18);
        assert_eq!(chars_per_line(1.0, 0.0), 0);
    }

    #[test]
    fn test_two_words_per_line() {
        let words = plain(&["aaaaa", "bbbbb", "ccccc", "ddddd", "eeeee"]);
        let lines = wrap_words(words, 120.0, 10.0, |_| 0.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].words.len(), 2);
        assert_eq!(lines[2].words.len(), 1);
        assert_eq!(lines[0].width, 120.0);
    }

    #[test]
    fn test_indent_receives_consumed_width() {
        let lines = wrap_words(plain(&["THE", "END"]), 100.0, 10.0, |w| (100.0 - w) / 2.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 80.0);
        assert_eq!(lines[0].indent, 10.0);
    }

    #[test]
    fn test_oversized_word_gets_own_line() {
        let lines = wrap_words(plain(&["a", "bbbbbbbbbbbbbbbbbbbb", "c"]), 50.0, 10.0, |_| 0.0);
        let counts: Vec<usize> = lines.iter().map(|l| l.words.len()).collect();
        assert_eq!(counts, vec![1, 1, 1]);
    }

    #[test]
    fn test_no_words_no_lines() {
        assert!(wrap_words(Vec::new(), 100.0, 10.0, |_| 0.0).is_empty());
    }

    #[test]
    fn test_wrap_content_keeps_styles() {
        let node = ContentNode::Container(vec![
            ContentNode::text("say"),
            ContentNode::styled(FontStyle::Bold, vec![ContentNode::text("NOW")]),
        ]);
        let lines = wrap_content(&node, 500.0, 7.21, |_| 0.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].words[1], StyledWord::new("NOW", FontStyle::Bold));
    }

    proptest! {
        #[test]
        fn prop_lines_fit_when_words_fit(
            lens in prop::collection::vec(1usize..8, 1..40),
            budget in 8usize..30,
        ) {
            let words: Vec<StyledWord> = lens
                .iter()
                .map(|n| StyledWord::new("x".repeat(*n), FontStyle::Plain))
                .collect();
            let total = words.len();
            let lines = wrap_words(words, budget as f32, 1.0, |_| 0.0);

            let placed: usize = lines.iter().map(|l| l.words.len()).sum();
            prop_assert_eq!(placed, total);
            for line in &lines {
                let visible: usize = line.words.iter().map(|w| w.word.len()).sum::<usize>()
                    + line.words.len() - 1;
                prop_assert!(visible <= budget);
            }
        }

        #[test]
        fn prop_break_lines_preserves_words(text in "[a-z ]{0,200}", width in 5usize..40) {
            let lines = break_lines(&text, width);
            let rejoined = lines.join(" ");
            let original: Vec<&str> = text.split_whitespace().collect();
            prop_assert_eq!(rejoined.split_whitespace().collect::<Vec<_>>(), original);
        }
    }
}
