use fltk::{
    app::{self, Sender},
    enums::Event,
    group::Tabs,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::domain::{Message, Page};

pub const WINDOW_WIDTH: i32 = 1000;
pub const WINDOW_HEIGHT: i32 = 860;
const MENU_HEIGHT: i32 = 30;
const TAB_HEIGHT: i32 = 25;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub tabs: Tabs,
}

/// Client area available to each page group inside the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArea {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Create the window, menu bar and tab strip. The tab strip is left open so
/// the page groups built next become its children; call
/// [`finish_main_window`] afterwards.
pub fn build_main_window(sender: &Sender<Message>) -> (MainWidgets, PageArea) {
    let mut wind = Window::new(100, 100, WINDOW_WIDTH, WINDOW_HEIGHT, "Editor Showcase");
    wind.set_xclass("EditorShowcase");

    let menu = MenuBar::new(0, 0, WINDOW_WIDTH, MENU_HEIGHT, "");

    let mut tabs = Tabs::new(0, MENU_HEIGHT, WINDOW_WIDTH, WINDOW_HEIGHT - MENU_HEIGHT, "");
    tabs.set_callback({
        let s = *sender;
        move |t| {
            if let Some(page) = t.value().and_then(|g| Page::from_label(&g.label())) {
                s.send(Message::Navigate(page));
            }
        }
    });

    wind.set_callback({
        let s = *sender;
        move |_| {
            if app::event() == Event::Close {
                s.send(Message::Quit);
            }
        }
    });

    let area = PageArea {
        x: 0,
        y: MENU_HEIGHT + TAB_HEIGHT,
        w: WINDOW_WIDTH,
        h: WINDOW_HEIGHT - MENU_HEIGHT - TAB_HEIGHT,
    };
    (MainWidgets { wind, menu, tabs }, area)
}

pub fn finish_main_window(widgets: &mut MainWidgets) {
    widgets.tabs.end();
    widgets.wind.end();
    widgets.wind.resizable(&widgets.tabs);
}
