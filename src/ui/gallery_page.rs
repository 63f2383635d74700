use std::rc::Rc;

use fltk::{
    app::Sender,
    enums::{Align, Font},
    frame::Frame,
    group::{Flex, FlexType, Group},
    menu::Choice,
    misc::HelpView,
    prelude::*,
};
use syntect::parsing::SyntaxSet;

use super::editor_host::EditorHost;
use super::main_window::PageArea;
use super::select::labeled_choice;
use crate::app::domain::{Message, Page, ThemeCatalogue};
use crate::app::services::markdown::{THEMES_DOCUMENT, render_markdown, wrap_html_for_helpview};

/// Entry at index 0 of the theme drop-down; selecting it clears the choice.
pub const PLACEHOLDER: &str = "Select Theme";

pub struct GalleryWidgets {
    pub group: Group,
    pub host: EditorHost,
    pub theme: Choice,
    /// Catalogue keys, in menu order after the placeholder.
    pub theme_names: Vec<String>,
}

impl GalleryWidgets {
    pub fn reset_choice(&mut self) {
        self.theme.set_value(0);
    }
}

/// Catalogue key for a drop-down index. Index 0 is the placeholder.
pub fn theme_for_index(names: &[String], index: i32) -> Option<String> {
    let index = usize::try_from(index).ok()?;
    index.checked_sub(1).and_then(|i| names.get(i)).cloned()
}

pub fn build_gallery_page(
    area: PageArea,
    sender: &Sender<Message>,
    syntax_set: Rc<SyntaxSet>,
    catalogue: Rc<ThemeCatalogue>,
    font_size: i32,
) -> GalleryWidgets {
    let mut group = Group::new(area.x, area.y, area.w, area.h, Page::ThemeGallery.label());

    let mut col = Flex::new(area.x, area.y, area.w, area.h, None);
    col.set_type(FlexType::Column);
    col.set_margin(10);
    col.set_pad(8);

    let mut title = Frame::default()
        .with_label("Themes")
        .with_align(Align::Left | Align::Inside);
    title.set_label_font(Font::HelveticaBold);
    title.set_label_size(22);
    col.fixed(&title, 40);

    let host = EditorHost::new(&col, Page::ThemeGallery, *sender, syntax_set, Rc::clone(&catalogue), font_size);

    let mut row = Flex::default();
    row.set_type(FlexType::Row);
    let theme_names: Vec<String> = catalogue.keys().map(str::to_string).collect();
    let mut options: Vec<&str> = vec![PLACEHOLDER];
    options.extend(theme_names.iter().map(String::as_str));
    let mut theme = labeled_choice(&mut row, "Theme", &options, Some(0));
    theme.set_callback({
        let s = *sender;
        let names = theme_names.clone();
        move |c| s.send(Message::SelectGalleryTheme(theme_for_index(&names, c.value())))
    });
    row.fixed(&theme, 220);
    Frame::default();
    row.end();
    col.fixed(&row, 30);

    let mut notes = HelpView::default();
    notes.set_text_size(14);
    notes.set_value(&wrap_html_for_helpview(&render_markdown(THEMES_DOCUMENT)));

    col.end();
    group.end();
    group.resizable(&col);

    GalleryWidgets {
        group,
        host,
        theme,
        theme_names,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_for_index() {
        let names = vec!["InspiredGitHub".to_string(), "Solarized (dark)".to_string()];
        assert_eq!(theme_for_index(&names, 0), None);
        assert_eq!(theme_for_index(&names, 1).as_deref(), Some("InspiredGitHub"));
        assert_eq!(theme_for_index(&names, 2).as_deref(), Some("Solarized (dark)"));
        assert_eq!(theme_for_index(&names, 3), None);
        assert_eq!(theme_for_index(&names, -1), None);
    }
}
