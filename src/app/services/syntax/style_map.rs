use std::collections::HashMap;

use fltk::enums::{Color, Font};
use fltk::text::StyleTableEntry;
use syntect::highlighting::Color as SyntectColor;

use crate::app::domain::theme::Rgb;

/// Maps syntect RGB colors to FLTK style characters ('A', 'B', 'C', ...).
/// Dynamically builds a StyleTableEntry table as new colors are encountered.
/// 'A' is always the theme's plain text color.
pub struct StyleMap {
    color_to_char: HashMap<Rgb, char>,
    entries: Vec<StyleTableEntry>,
    font: Font,
    font_size: i32,
}

impl StyleMap {
    pub fn new(font: Font, font_size: i32) -> Self {
        let mut map = Self {
            color_to_char: HashMap::new(),
            entries: Vec::new(),
            font,
            font_size,
        };
        map.reset(None);
        map
    }

    /// Get the style character for a syntect color, inserting a new entry if needed.
    pub fn get_or_insert(&mut self, color: SyntectColor) -> char {
        let key = (color.r, color.g, color.b);
        if let Some(&ch) = self.color_to_char.get(&key) {
            return ch;
        }

        let idx = self.entries.len();
        // 'A'..='Z'; colors past the 26th share the last slot
        if idx >= 26 {
            return (b'A' + 25) as char;
        }
        let ch = (b'A' + idx as u8) as char;
        self.entries.push(StyleTableEntry {
            color: Color::from_rgb(color.r, color.g, color.b),
            font: self.font,
            size: self.font_size,
        });
        self.color_to_char.insert(key, ch);
        ch
    }

    /// Get the style table entries for FLTK's set_highlight_data.
    pub fn entries(&self) -> &[StyleTableEntry] {
        &self.entries
    }

    /// Clear all mappings (used on theme change). `plain` is the new 'A' color.
    pub fn reset(&mut self, plain: Option<Rgb>) {
        self.color_to_char.clear();
        self.entries.clear();
        let color = match plain {
            Some((r, g, b)) => {
                self.color_to_char.insert((r, g, b), 'A');
                Color::from_rgb(r, g, b)
            }
            None => Color::Foreground,
        };
        self.entries.push(StyleTableEntry {
            color,
            font: self.font,
            size: self.font_size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(r: u8, g: u8, b: u8) -> SyntectColor {
        SyntectColor { r, g, b, a: 255 }
    }

    #[test]
    fn test_plain_color_is_a() {
        let mut map = StyleMap::new(Font::Courier, 14);
        map.reset(Some((10, 20, 30)));
        assert_eq!(map.get_or_insert(color(10, 20, 30)), 'A');
        assert_eq!(map.entries().len(), 1);
    }

    #[test]
    fn test_new_colors_get_next_chars() {
        let mut map = StyleMap::new(Font::Courier, 14);
        assert_eq!(map.get_or_insert(color(1, 1, 1)), 'B');
        assert_eq!(map.get_or_insert(color(2, 2, 2)), 'C');
        assert_eq!(map.get_or_insert(color(1, 1, 1)), 'B');
        assert_eq!(map.entries().len(), 3);
    }

    #[test]
    fn test_overflow_shares_last_slot() {
        let mut map = StyleMap::new(Font::Courier, 14);
        for i in 0..40u8 {
            map.get_or_insert(color(i, 100, 100));
        }
        assert_eq!(map.entries().len(), 26);
        assert_eq!(map.get_or_insert(color(250, 0, 0)), 'Z');
    }

    #[test]
    fn test_entries_use_font() {
        let mut map = StyleMap::new(Font::Screen, 18);
        map.get_or_insert(color(1, 2, 3));
        assert!(map.entries().iter().all(|e| e.size == 18 && e.font == Font::Screen));
    }
}
