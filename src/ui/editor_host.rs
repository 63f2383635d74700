use std::cell::Cell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    enums::{Color, Font},
    group::Flex,
    prelude::*,
    text::{TextBuffer, TextEditor},
};
use syntect::parsing::SyntaxSet;

use crate::app::domain::{EditorConfig, EditorHeight, EditorTheme, LanguageExtension, Message, Page, ThemeCatalogue};
use crate::app::services::syntax::SyntaxHighlighter;

/// Vertical padding FLTK adds around each text line.
const LINE_PADDING: i32 = 4;

/// A syntax-highlighting editor widget driven by an [`EditorConfig`].
///
/// User edits send `Message::EditorChanged(page)`; text applied through
/// [`EditorHost::configure`] does not.
pub struct EditorHost {
    parent: Flex,
    editor: TextEditor,
    buffer: TextBuffer,
    style_buffer: TextBuffer,
    highlighter: SyntaxHighlighter,
    catalogue: Rc<ThemeCatalogue>,
    font_size: i32,
    applied_value: Option<String>,
    extensions: Vec<LanguageExtension>,
    /// `None` until the first configure.
    theme: Option<EditorTheme>,
    height: EditorHeight,
    auto_focus: bool,
    suppress_change: Rc<Cell<bool>>,
}

impl EditorHost {
    /// Create the editor as the next child of `parent`.
    pub fn new(
        parent: &Flex,
        page: Page,
        sender: Sender<Message>,
        syntax_set: Rc<SyntaxSet>,
        catalogue: Rc<ThemeCatalogue>,
        font_size: i32,
    ) -> Self {
        let mut buffer = TextBuffer::default();
        let style_buffer = TextBuffer::default();
        let mut editor = TextEditor::new(0, 0, 0, 0, "");
        editor.set_buffer(buffer.clone());
        editor.set_text_font(Font::Courier);
        editor.set_text_size(font_size);
        editor.set_linenumber_width(40);
        editor.set_linenumber_size(font_size - 2);

        let suppress_change = Rc::new(Cell::new(false));
        let suppress = Rc::clone(&suppress_change);
        let mut style_buf = style_buffer.clone();
        buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted == 0 && deleted == 0 {
                return;
            }
            if deleted > 0 {
                style_buf.remove(pos, pos + deleted);
            }
            if inserted > 0 {
                let filler: String = std::iter::repeat_n('A', inserted as usize).collect();
                style_buf.insert(pos, &filler);
            }
            if !suppress.get() {
                sender.send(Message::EditorChanged(page));
            }
        });

        Self {
            parent: parent.clone(),
            editor,
            buffer,
            style_buffer,
            highlighter: SyntaxHighlighter::new(syntax_set, Font::Courier, font_size),
            catalogue,
            font_size,
            applied_value: None,
            extensions: Vec::new(),
            theme: None,
            height: EditorHeight::Auto,
            auto_focus: false,
            suppress_change,
        }
    }

    /// Forget the applied value and focus flag so the next configure
    /// behaves like a fresh mount.
    pub fn reset(&mut self) {
        self.applied_value = None;
        self.auto_focus = false;
    }

    /// Apply a configuration. The buffer is only replaced when `value`
    /// differs from the last applied value, so user edits survive theme and
    /// height changes.
    pub fn configure(&mut self, config: &EditorConfig) {
        let replaced = self.applied_value.as_deref() != Some(config.value.as_str());
        if replaced {
            self.suppress_change.set(true);
            self.buffer.set_text(&config.value);
            self.suppress_change.set(false);
            self.applied_value = Some(config.value.clone());
        }

        self.extensions = config.extensions.clone();
        if self.theme.as_ref() != Some(&config.theme) {
            self.theme = Some(config.theme.clone());
            self.apply_colors(&config.theme);
        }
        self.rehighlight();

        self.height = config.height;
        self.resize();

        if should_take_focus(self.auto_focus, config.auto_focus, replaced) {
            let _ = self.editor.take_focus();
        }
        self.auto_focus = config.auto_focus;
    }

    /// The user typed: restyle, and grow or shrink an auto-height editor.
    pub fn on_user_edit(&mut self) {
        self.rehighlight();
        if self.height == EditorHeight::Auto {
            self.resize();
        }
    }

    /// Recompute the style buffer from the current text.
    fn rehighlight(&mut self) {
        let text = self.buffer.text();
        let theme = self.theme.clone().unwrap_or_default();
        let key = theme.theme_key().to_string();
        let styles = match self.catalogue.theme(&theme) {
            Some(theme) => self.highlighter.highlight(&text, &self.extensions, &key, theme),
            None => {
                log::warn!("Theme '{}' is not in the catalogue", key);
                std::iter::repeat_n('A', text.len()).collect()
            }
        };
        self.style_buffer.set_text(&styles);
        self.editor
            .set_highlight_data(self.style_buffer.clone(), self.highlighter.style_table());
        self.editor.redraw();
    }

    fn resize(&mut self) {
        let height = editor_height(self.height, &self.buffer.text(), self.font_size);
        self.parent.fixed(&self.editor, height);
        self.parent.redraw();
    }

    fn apply_colors(&mut self, theme: &EditorTheme) {
        let Some(def) = self.catalogue.definition(theme) else {
            return;
        };
        let rgb = |(r, g, b): (u8, u8, u8)| Color::from_rgb(r, g, b);
        self.editor.set_color(rgb(def.background));
        self.editor.set_text_color(rgb(def.foreground));
        self.editor.set_cursor_color(rgb(def.caret));
        self.editor.set_selection_color(rgb(def.selection));
        if def.is_dark {
            self.editor.set_linenumber_bgcolor(Color::from_rgb(40, 40, 40));
            self.editor.set_linenumber_fgcolor(Color::from_rgb(150, 150, 150));
        } else {
            self.editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
            self.editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));
        }
    }
}

/// Pixel height for `text` shown at `font_size`.
fn editor_height(height: EditorHeight, text: &str, font_size: i32) -> i32 {
    let line_count = text.split('\n').count();
    height.resolve(line_count, font_size + LINE_PADDING)
}

/// Focus is taken when autofocus is switched on, or when new content is
/// applied while it is on. Theme and height changes leave focus alone.
fn should_take_focus(was_enabled: bool, enabled: bool, content_replaced: bool) -> bool {
    enabled && (!was_enabled || content_replaced)
}
