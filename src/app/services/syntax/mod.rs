mod highlighter;
mod style_map;

use std::path::Path;
use std::rc::Rc;

use fltk::enums::Font;
use fltk::text::StyleTableEntry;
use syntect::highlighting::Theme;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::app::domain::language::LanguageExtension;
use crate::app::infrastructure::error::{AppError, Result};
use style_map::StyleMap;

const PLAIN_TEXT: &str = "Plain Text";

/// Load the bundled grammars plus any `.sublime-syntax` files under
/// `extra`. Expensive; share the result between hosts.
pub fn load_syntax_set(extra: Option<&Path>) -> Rc<SyntaxSet> {
    let set = match extra {
        Some(folder) => with_folder(folder).unwrap_or_else(|e| {
            log::warn!("Could not load extra syntaxes: {}. Using bundled syntaxes.", e);
            SyntaxSet::load_defaults_newlines()
        }),
        None => SyntaxSet::load_defaults_newlines(),
    };
    Rc::new(set)
}

fn with_folder(folder: &Path) -> Result<SyntaxSet> {
    let mut builder = SyntaxSet::load_defaults_newlines().into_builder();
    builder
        .add_from_folder(folder, true)
        .map_err(|e| AppError::Syntax(format!("{}: {}", folder.display(), e)))?;
    Ok(builder.build())
}

/// Turns editor text into an FLTK style string for one editor host.
pub struct SyntaxHighlighter {
    syntax_set: Rc<SyntaxSet>,
    theme_key: Option<String>,
    style_map: StyleMap,
}

impl SyntaxHighlighter {
    pub fn new(syntax_set: Rc<SyntaxSet>, font: Font, font_size: i32) -> Self {
        Self {
            syntax_set,
            theme_key: None,
            style_map: StyleMap::new(font, font_size),
        }
    }

    /// First grammar that any of the extensions resolves to.
    pub fn resolve_syntax(&self, extensions: &[LanguageExtension]) -> Option<&SyntaxReference> {
        extensions.iter().find_map(|ext| {
            ext.candidates()
                .find_map(|name| self.syntax_set.find_syntax_by_name(name))
                .or_else(|| self.syntax_set.find_syntax_by_token(ext.token))
                .filter(|syntax| syntax.name != PLAIN_TEXT)
        })
    }

    /// Style string for `text`, one char per byte. Unresolved extensions
    /// produce plain text.
    pub fn highlight(
        &mut self,
        text: &str,
        extensions: &[LanguageExtension],
        theme_key: &str,
        theme: &Theme,
    ) -> String {
        if self.theme_key.as_deref() != Some(theme_key) {
            let plain = theme.settings.foreground.map(|c| (c.r, c.g, c.b));
            self.style_map.reset(plain);
            self.theme_key = Some(theme_key.to_string());
        }

        let syntax = match self.resolve_syntax(extensions) {
            Some(s) => s.clone(),
            None => return make_default_style(text),
        };
        highlighter::highlight_full(
            text,
            &syntax,
            &self.syntax_set,
            theme,
            &mut self.style_map,
        )
    }

    /// Get the style table for FLTK's set_highlight_data.
    pub fn style_table(&self) -> Vec<StyleTableEntry> {
        self.style_map.entries().to_vec()
    }
}

fn make_default_style(text: &str) -> String {
    std::iter::repeat_n('A', text.len()).collect()
}
