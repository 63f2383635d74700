use syntect::highlighting::{HighlightIterator, HighlightState, Highlighter, Theme};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

use super::style_map::StyleMap;

/// Full highlight of the document text. One style char per byte.
pub fn highlight_full(
    text: &str,
    syntax: &SyntaxReference,
    syntax_set: &SyntaxSet,
    theme: &Theme,
    style_map: &mut StyleMap,
) -> String {
    let highlighter = Highlighter::new(theme);
    let mut parse_state = ParseState::new(syntax);
    let mut highlight_state = HighlightState::new(&highlighter, ScopeStack::new());
    let mut style_string = String::with_capacity(text.len());

    for line in LinesWithEndings::new(text) {
        let ops = match parse_state.parse_line(line, syntax_set) {
            Ok(ops) => ops,
            Err(e) => {
                log::debug!("Parse error, remaining text left unstyled: {}", e);
                break;
            }
        };
        let iter = HighlightIterator::new(&mut highlight_state, &ops, line, &highlighter);
        for (style, piece) in iter {
            let ch = style_map.get_or_insert(style.foreground);
            // One style char per byte (not per char) for UTF-8 correctness
            for _ in 0..piece.len() {
                style_string.push(ch);
            }
        }
    }

    // Pad after an early stop so the style buffer always matches the text.
    while style_string.len() < text.len() {
        style_string.push('A');
    }
    style_string
}

/// Iterator that yields lines including their line endings.
pub(super) struct LinesWithEndings<'a> {
    text: &'a str,
}

impl<'a> LinesWithEndings<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl<'a> Iterator for LinesWithEndings<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.text.is_empty() {
            return None;
        }
        let end = self.text.find('\n').map(|i| i + 1).unwrap_or(self.text.len());
        let line = &self.text[..end];
        self.text = &self.text[end..];
        Some(line)
    }
}
