use std::rc::Rc;
use std::time::Duration;

use fltk::{
    app::{self, Sender},
    group::Tabs,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::controllers::demo::DemoController;
use super::controllers::gallery::GalleryController;
use super::domain::{AppSettings, ColorScheme, LanguageRegistry, Message, Page, ThemeCatalogue, ThemeMode};
use super::infrastructure::color_scheme::ColorSchemeBus;
use super::infrastructure::platform::{AmbientWatcher, resolve_ambient};
use super::services::markdown::load_readme;
use super::services::samples::SampleLoader;
use super::services::syntax::load_syntax_set;
use crate::ui::demo_page::build_demo_page;
use crate::ui::gallery_page::build_gallery_page;
use crate::ui::main_window::{MainWidgets, build_main_window, finish_main_window};
use crate::ui::menu::{build_menu, sync_dark_mode_item};
use crate::ui::theme::apply_chrome_theme;

pub struct AppState {
    pub window: Window,
    pub menu: MenuBar,
    pub tabs: Tabs,
    pub demo: DemoController,
    pub gallery: GalleryController,
    pub bus: ColorSchemeBus,
    pub sender: Sender<Message>,
    pub settings: AppSettings,
    pub active_page: Page,
    watcher: Option<AmbientWatcher>,
}

impl AppState {
    /// Build the window and both pages. Nothing is mounted until [`AppState::start`].
    pub fn new(settings: AppSettings, sender: Sender<Message>) -> Self {
        let ambient = resolve_ambient(settings.ambient_mode);
        let bus = ColorSchemeBus::new(ambient);
        log::info!("Ambient color scheme: {}", ambient.as_str());

        let registry = Rc::new(LanguageRegistry::new());
        let catalogue = Rc::new(load_catalogue(&settings));
        let syntax_set = load_syntax_set(settings.syntaxes_dir.as_deref());
        let loader = SampleLoader::from_settings(settings.samples_dir.clone());
        let readme = load_readme(settings.readme_path.as_deref());
        let font_size = settings.font_size as i32;

        let (mut main, area) = build_main_window(&sender);
        let demo_widgets = build_demo_page(
            area,
            &sender,
            Rc::clone(&syntax_set),
            Rc::clone(&catalogue),
            &registry,
            font_size,
        );
        let gallery_widgets = build_gallery_page(area, &sender, syntax_set, Rc::clone(&catalogue), font_size);
        finish_main_window(&mut main);
        build_menu(&mut main.menu, &sender, ambient.is_dark());

        let MainWidgets { wind, menu, tabs } = main;
        let demo = DemoController::new(demo_widgets, registry, loader, sender, &settings, &readme);
        let gallery = GalleryController::new(gallery_widgets, catalogue, bus.clone(), sender);

        Self {
            window: wind,
            menu,
            tabs,
            demo,
            gallery,
            bus,
            sender,
            settings,
            active_page: Page::Demo,
            watcher: None,
        }
    }

    /// Show the window, mount the demo page and start following the OS scheme.
    pub fn start(&mut self) {
        self.window.show();
        self.apply_chrome();

        self.show_page(Page::Demo);

        if self.settings.ambient_mode == ThemeMode::SystemDefault && self.settings.ambient_poll_secs > 0 {
            let s = self.sender;
            self.watcher = Some(AmbientWatcher::spawn(
                Duration::from_secs(self.settings.ambient_poll_secs),
                self.bus.current(),
                move |scheme| {
                    s.send(Message::AmbientSchemeChanged(scheme));
                    app::awake();
                },
            ));
        }
    }

    /// Handle one message. Returns `false` when the application should exit.
    pub fn handle_message(&mut self, msg: Message) -> bool {
        match msg {
            Message::Navigate(page) => self.show_page(page),
            Message::Quit => {
                self.shutdown();
                return false;
            }

            Message::SelectLanguage(language) => self.demo.select_language(&language),
            Message::SampleLoaded { ticket, result } => self.demo.on_sample_loaded(ticket, result),
            Message::SelectScheme(scheme) => self.demo.select_scheme(scheme),
            Message::SelectHeight(height) => self.demo.select_height(height),
            Message::MutateContent => self.demo.mutate_content(),
            Message::SetAutoFocus(auto_focus) => self.demo.set_auto_focus(auto_focus),
            Message::OpenLink(url) => {
                if let Err(e) = open::that(url) {
                    log::warn!("Failed to open {}: {}", url, e);
                }
            }

            Message::SelectGalleryTheme(name) => self.gallery.select_theme(name),
            Message::RefreshGallery => self.gallery.refresh(),

            Message::EditorChanged(Page::Demo) => self.demo.on_editor_changed(),
            Message::EditorChanged(Page::ThemeGallery) => self.gallery.on_editor_changed(),

            Message::AmbientSchemeChanged(scheme) => self.set_ambient(scheme),
            Message::ToggleAmbientScheme => self.toggle_ambient(),
        }
        true
    }

    /// Mount `page` and unmount the other one.
    pub fn show_page(&mut self, page: Page) {
        let group = match page {
            Page::Demo => self.demo.widgets.group.clone(),
            Page::ThemeGallery => self.gallery.widgets.group.clone(),
        };
        if self.tabs.set_value(&group).is_err() {
            log::warn!("Page '{}' is not part of the tab strip", page.label());
        }
        self.active_page = page;

        match page {
            Page::Demo => {
                self.gallery.unmount();
                self.demo.mount();
            }
            Page::ThemeGallery => {
                self.demo.unmount();
                self.gallery.mount();
            }
        }
        self.window.redraw();
    }

    fn set_ambient(&mut self, scheme: ColorScheme) {
        if scheme == self.bus.current() {
            return;
        }
        log::info!("Switching ambient color scheme to {}", scheme.as_str());
        self.bus.publish(scheme);
        sync_dark_mode_item(&mut self.menu, scheme.is_dark());
        self.apply_chrome();
    }

    /// Manual override: pin the scheme, stop following the OS and remember
    /// the choice.
    fn toggle_ambient(&mut self) {
        let scheme = self.bus.current().toggled();
        self.watcher = None;
        self.settings.ambient_mode = if scheme.is_dark() { ThemeMode::Dark } else { ThemeMode::Light };
        if let Err(e) = self.settings.save() {
            log::warn!("Failed to save settings: {}", e);
        }
        self.set_ambient(scheme);
    }

    fn apply_chrome(&mut self) {
        let scheme = self.bus.current();
        apply_chrome_theme(&mut self.window, &mut self.menu, &mut self.tabs, scheme);
    }

    fn shutdown(&mut self) {
        log::info!("Shutting down");
        self.demo.unmount();
        self.gallery.unmount();
        self.watcher = None;
        self.window.hide();
    }
}

fn load_catalogue(settings: &AppSettings) -> ThemeCatalogue {
    match settings.themes_dir.as_deref() {
        Some(dir) => ThemeCatalogue::with_folder(dir).unwrap_or_else(|e| {
            log::warn!("Could not load extra themes: {}. Using bundled themes.", e);
            ThemeCatalogue::load_defaults()
        }),
        None => ThemeCatalogue::load_defaults(),
    }
}
