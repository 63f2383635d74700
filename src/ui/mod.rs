pub mod demo_page;
pub mod editor_host;
pub mod gallery_page;
pub mod main_window;
pub mod menu;
pub mod select;
pub mod theme;
