use std::rc::Rc;

use fltk::app::Sender;

use crate::app::domain::{
    AppSettings, ColorScheme, EditorHeight, EditorSession, FailurePolicy, LanguageRegistry, LoadOutcome,
    LoadTicket, Message,
};
use crate::app::services::markdown::render_readme;
use crate::app::services::samples::SampleLoader;
use crate::ui::demo_page::DemoWidgets;

/// Selections a freshly mounted demo page starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoDefaults {
    pub language: String,
    pub scheme: ColorScheme,
    pub height: EditorHeight,
}

impl DemoDefaults {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            language: settings.default_language.clone(),
            scheme: settings.default_scheme,
            height: settings.default_height,
        }
    }
}

/// Drives the demo page: language switching, theme and height selection,
/// and the "change code" action.
pub struct DemoController {
    pub widgets: DemoWidgets,
    registry: Rc<LanguageRegistry>,
    loader: SampleLoader,
    sender: Sender<Message>,
    defaults: DemoDefaults,
    failure_policy: FailurePolicy,
    /// Present while the page is mounted.
    session: Option<EditorSession>,
}

impl DemoController {
    pub fn new(
        mut widgets: DemoWidgets,
        registry: Rc<LanguageRegistry>,
        loader: SampleLoader,
        sender: Sender<Message>,
        settings: &AppSettings,
        readme: &str,
    ) -> Self {
        widgets.set_readme_html(&render_readme(readme));
        Self {
            widgets,
            registry,
            loader,
            sender,
            defaults: DemoDefaults::from_settings(settings),
            failure_policy: settings.load_failure,
            session: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    /// Start a fresh session and load the default language.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }
        log::debug!("Mounting demo page");
        self.session = Some(EditorSession::new(
            &self.defaults.language,
            self.defaults.scheme,
            self.defaults.height,
        ));
        self.widgets.host.reset();
        self.widgets.auto_focus.set_checked(false);
        self.apply();
        let language = self.defaults.language.clone();
        self.select_language(&language);
    }

    /// Drop the session. Samples still in flight are ignored when they land.
    pub fn unmount(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Unmounting demo page");
        }
    }

    pub fn select_language(&mut self, language: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let ticket = session.begin_load(language);
        log::debug!("Requesting sample for '{}' (request {})", language, ticket.token.0);

        let s = self.sender;
        self.loader.request(ticket, move |ticket, result| {
            s.send(Message::SampleLoaded {
                ticket,
                result: result.map_err(|e| e.to_string()),
            });
            fltk::app::awake();
        });
        self.apply();
    }

    pub fn on_sample_loaded(&mut self, ticket: LoadTicket, result: Result<String, String>) {
        let Some(session) = self.session.as_mut() else {
            log::debug!("Sample for '{}' arrived after unmount", ticket.language);
            return;
        };
        let error = result.as_ref().err().cloned();
        match session.complete_load(&ticket, result, &self.registry) {
            LoadOutcome::Applied => match session.extensions().and_then(|e| e.first()) {
                Some(ext) => log::info!("Loaded sample for '{}' as {}", ticket.language, ext.describe()),
                None => log::info!("Loaded sample for '{}' as plain text", ticket.language),
            },
            LoadOutcome::Fallback => {
                if self.failure_policy == FailurePolicy::Log {
                    log::warn!(
                        "Sample for '{}' unavailable: {}",
                        ticket.language,
                        error.unwrap_or_default()
                    );
                }
            }
            LoadOutcome::Stale => {
                log::debug!("Discarding stale sample for '{}' (request {})", ticket.language, ticket.token.0);
                return;
            }
        }
        self.apply();
    }

    pub fn select_scheme(&mut self, scheme: ColorScheme) {
        if let Some(session) = self.session.as_mut() {
            session.set_scheme(scheme);
            self.apply();
        }
    }

    pub fn select_height(&mut self, height: EditorHeight) {
        if let Some(session) = self.session.as_mut() {
            session.set_height(height);
            self.apply();
        }
    }

    /// Replace the editor content with a numbered snippet.
    pub fn mutate_content(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let content = session.mutate_content();
            log::debug!("Content changed to {}", content);
            self.apply();
        }
    }

    pub fn set_auto_focus(&mut self, auto_focus: bool) {
        if let Some(session) = self.session.as_mut() {
            session.set_auto_focus(auto_focus);
            self.apply();
        }
    }

    /// User typed in the editor. The session content is not written back.
    pub fn on_editor_changed(&mut self) {
        if self.is_mounted() {
            log::trace!("Demo editor changed");
            self.widgets.host.on_user_edit();
        }
    }

    fn apply(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        self.widgets
            .show_selection(session.mode(), session.scheme(), session.height());
        self.widgets.host.configure(&session.config());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::LanguageMode;
    use crate::app::services::samples::{BundledSamples, SampleSource};
    use std::sync::mpsc;
    use std::time::Duration;

    fn fresh_session(defaults: &DemoDefaults) -> EditorSession {
        EditorSession::new(&defaults.language, defaults.scheme, defaults.height)
    }

    #[test]
    fn test_fresh_mount_loads_default_language() {
        let defaults = DemoDefaults::from_settings(&AppSettings::default());
        let registry = LanguageRegistry::new();
        let loader = SampleLoader::from_settings(None);
        let mut session = fresh_session(&defaults);

        let ticket = session.begin_load(&defaults.language);
        let fetched = loader.fetch_blocking(&ticket);
        let outcome = session.complete_load(&ticket, fetched, &registry);

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(session.mode(), "javascript");
        assert_eq!(session.content(), BundledSamples.fetch("javascript").unwrap());
        assert_eq!(session.extensions(), Some(&[LanguageMode::JavaScript.produce()][..]));
    }

    #[test]
    fn test_worker_result_applies_to_session() {
        let defaults = DemoDefaults::from_settings(&AppSettings::default());
        let registry = LanguageRegistry::new();
        let loader = SampleLoader::from_settings(None);
        let mut session = fresh_session(&defaults);

        let ticket = session.begin_load(&defaults.language);
        let (tx, rx) = mpsc::channel();
        loader.request(ticket, move |ticket, result| {
            let _ = tx.send((ticket, result.map_err(|e| e.to_string())));
        });
        let (ticket, result) = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(session.complete_load(&ticket, result, &registry), LoadOutcome::Applied);
        assert_eq!(session.config().extensions, vec![LanguageMode::JavaScript.produce()]);
        assert!(!session.content().is_empty());
    }

    #[test]
    fn test_missing_sample_falls_back_through_loader() {
        let registry = LanguageRegistry::new();
        let loader = SampleLoader::from_settings(None);
        let mut session = EditorSession::new("javascript", ColorScheme::Light, EditorHeight::Fixed(500));
        let first = session.begin_load("javascript");
        let text = loader.fetch_blocking(&first);
        session.complete_load(&first, text, &registry);

        let ticket = session.begin_load("swift");
        let fetched = loader.fetch_blocking(&ticket);
        assert_eq!(session.complete_load(&ticket, fetched, &registry), LoadOutcome::Fallback);
        assert_eq!(session.content(), "");
        assert_eq!(session.extensions(), Some(&[][..]));
        assert_eq!(session.mode(), "swift");
    }

    #[test]
    fn test_defaults_from_settings() {
        let mut settings = AppSettings::default();
        settings.default_language = "rust".to_string();
        settings.default_scheme = ColorScheme::Dark;
        settings.default_height = EditorHeight::Auto;

        let defaults = DemoDefaults::from_settings(&settings);
        assert_eq!(defaults.language, "rust");
        assert_eq!(defaults.scheme, ColorScheme::Dark);
        assert_eq!(defaults.height, EditorHeight::Auto);
    }

    #[test]
    fn test_stock_defaults() {
        let defaults = DemoDefaults::from_settings(&AppSettings::default());
        assert_eq!(defaults.language, "javascript");
        assert_eq!(defaults.scheme, ColorScheme::Light);
        assert_eq!(defaults.height, EditorHeight::Fixed(500));
    }
}
