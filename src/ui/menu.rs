use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::{Message, Page};

pub const REPOSITORY_URL: &str = "https://github.com/fltk-rs/fltk-rs";
pub const SYNTAX_DOCS_URL: &str = "https://docs.rs/syntect";
pub const MARKDOWN_DOCS_URL: &str = "https://docs.rs/pulldown-cmark";

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, initial_dark_mode: bool) {
    let s = sender;

    // File
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Quit) });

    // View
    menu.add("View/Demo", Shortcut::Ctrl | '1', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Navigate(Page::Demo)) });
    menu.add("View/Themes", Shortcut::Ctrl | '2', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Navigate(Page::ThemeGallery)) });
    let dm_flag = if initial_dark_mode { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Dark Mode", Shortcut::Ctrl | 'd', dm_flag, { let s = *s; move |_| s.send(Message::ToggleAmbientScheme) });

    // Help
    menu.add("Help/FLTK Repository", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenLink(REPOSITORY_URL)) });
    menu.add("Help/Syntax Highlighting Docs", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenLink(SYNTAX_DOCS_URL)) });
    menu.add("Help/Markdown Docs", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenLink(MARKDOWN_DOCS_URL)) });
}

/// Keep the dark mode toggle in step with the ambient scheme when it
/// changes outside the menu.
pub fn sync_dark_mode_item(menu: &mut MenuBar, is_dark: bool) {
    if let Some(mut item) = menu.find_item("View/Toggle Dark Mode") {
        if is_dark {
            item.set();
        } else {
            item.clear();
        }
    }
}
