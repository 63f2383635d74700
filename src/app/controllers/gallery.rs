use std::cell::RefCell;
use std::rc::Rc;

use fltk::app::Sender;

use crate::app::domain::{
    EditorConfig, EditorHeight, EditorTheme, LanguageMode, Message, ThemeCatalogue, ThemeSelection,
};
use crate::app::infrastructure::color_scheme::{ColorSchemeBus, Subscription};
use crate::app::services::markdown::THEMES_DOCUMENT;
use crate::ui::gallery_page::GalleryWidgets;

const GALLERY_HEIGHT: EditorHeight = EditorHeight::Fixed(300);

struct Mounted {
    selection: Rc<RefCell<ThemeSelection>>,
    _subscription: Subscription,
}

/// Drives the theme gallery: an explicit catalogue choice, falling back to
/// the ambient scheme while nothing is chosen.
pub struct GalleryController {
    pub widgets: GalleryWidgets,
    catalogue: Rc<ThemeCatalogue>,
    bus: ColorSchemeBus,
    sender: Sender<Message>,
    mounted: Option<Mounted>,
}

impl GalleryController {
    pub fn new(
        widgets: GalleryWidgets,
        catalogue: Rc<ThemeCatalogue>,
        bus: ColorSchemeBus,
        sender: Sender<Message>,
    ) -> Self {
        Self {
            widgets,
            catalogue,
            bus,
            sender,
            mounted: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Read the ambient scheme once, then follow it until unmount.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }
        log::debug!("Mounting theme gallery");
        let selection = Rc::new(RefCell::new(ThemeSelection::new(self.bus.current())));
        let subscription = self.bus.subscribe({
            let selection = Rc::clone(&selection);
            let s = self.sender;
            move |scheme| {
                selection.borrow_mut().set_ambient(scheme);
                s.send(Message::RefreshGallery);
            }
        });
        self.mounted = Some(Mounted {
            selection,
            _subscription: subscription,
        });
        self.widgets.reset_choice();
        self.widgets.host.reset();
        self.apply();
    }

    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            log::debug!("Unmounting theme gallery");
        }
    }

    /// `None` restores the ambient theme.
    pub fn select_theme(&mut self, name: Option<String>) {
        let Some(mounted) = self.mounted.as_ref() else {
            return;
        };
        if let Some(name) = name.as_deref()
            && self.catalogue.get(name).is_none()
        {
            log::warn!("Theme '{}' is not in the catalogue", name);
        }
        mounted.selection.borrow_mut().select(name);
        self.apply();
    }

    pub fn refresh(&mut self) {
        self.apply();
    }

    pub fn on_editor_changed(&mut self) {
        if self.is_mounted() {
            log::trace!("Gallery editor changed");
            self.widgets.host.on_user_edit();
        }
    }

    fn apply(&mut self) {
        let Some(mounted) = self.mounted.as_ref() else {
            return;
        };
        let theme = mounted.selection.borrow().effective(&self.catalogue);
        log::debug!("Gallery theme is {}", theme.theme_key());
        self.widgets.host.configure(&gallery_config(theme));
    }
}

fn gallery_config(theme: EditorTheme) -> EditorConfig {
    EditorConfig {
        value: THEMES_DOCUMENT.to_string(),
        theme,
        extensions: vec![LanguageMode::Markdown.produce()],
        height: GALLERY_HEIGHT,
        auto_focus: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::ColorScheme;

    #[test]
    fn test_gallery_config() {
        let config = gallery_config(EditorTheme::Preset(ColorScheme::Dark));
        assert_eq!(config.value, THEMES_DOCUMENT);
        assert_eq!(config.height, EditorHeight::Fixed(300));
        assert_eq!(config.extensions, vec![LanguageMode::Markdown.produce()]);
        assert!(!config.auto_focus);
    }

    #[test]
    fn test_selection_follows_bus_until_dropped() {
        let catalogue = ThemeCatalogue::load_defaults();
        let bus = ColorSchemeBus::new(ColorScheme::Light);
        let selection = Rc::new(RefCell::new(ThemeSelection::new(bus.current())));
        let sub = bus.subscribe({
            let selection = Rc::clone(&selection);
            move |scheme| selection.borrow_mut().set_ambient(scheme)
        });

        bus.publish(ColorScheme::Dark);
        assert_eq!(selection.borrow().effective(&catalogue), EditorTheme::Preset(ColorScheme::Dark));

        selection.borrow_mut().select(Some("InspiredGitHub".to_string()));
        bus.publish(ColorScheme::Light);
        assert_eq!(selection.borrow().effective(&catalogue).theme_key(), "InspiredGitHub");

        drop(sub);
        bus.publish(ColorScheme::Dark);
        assert_eq!(selection.borrow().ambient(), ColorScheme::Light);
    }
}
