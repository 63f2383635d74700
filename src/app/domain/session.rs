use std::sync::atomic::{AtomicU64, Ordering};

use super::height::EditorHeight;
use super::language::{LanguageExtension, LanguageRegistry};
use super::theme::{ColorScheme, EditorTheme};

/// Everything an editor host needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub value: String,
    pub theme: EditorTheme,
    pub extensions: Vec<LanguageExtension>,
    pub height: EditorHeight,
    pub auto_focus: bool,
}

/// Identifies one sample request. Later requests carry larger tokens,
/// across sessions as well as within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

impl RequestToken {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub token: RequestToken,
    /// Language name exactly as selected.
    pub language: String,
}

impl LoadTicket {
    /// Name used to locate the sample asset.
    pub fn sample_key(&self) -> String {
        self.language.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Sample text applied.
    Applied,
    /// Fetch failed; session reset to empty content and no extensions.
    Fallback,
    /// A newer request was issued; result discarded.
    Stale,
}

/// Demo screen editor state. Lives from mount to unmount.
#[derive(Debug, Clone)]
pub struct EditorSession {
    content: String,
    mode: String,
    /// `None` until a load sets it.
    extensions: Option<Vec<LanguageExtension>>,
    scheme: ColorScheme,
    height: EditorHeight,
    auto_focus: bool,
    mutation_count: u32,
    latest: Option<RequestToken>,
}

impl EditorSession {
    pub fn new(mode: &str, scheme: ColorScheme, height: EditorHeight) -> Self {
        Self {
            content: String::new(),
            mode: mode.to_string(),
            extensions: None,
            scheme,
            height,
            auto_focus: false,
            mutation_count: 0,
            latest: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn extensions(&self) -> Option<&[LanguageExtension]> {
        self.extensions.as_deref()
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn height(&self) -> EditorHeight {
        self.height
    }

    pub fn auto_focus(&self) -> bool {
        self.auto_focus
    }

    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }

    pub fn set_height(&mut self, height: EditorHeight) {
        self.height = height;
    }

    pub fn set_auto_focus(&mut self, auto_focus: bool) {
        self.auto_focus = auto_focus;
    }

    /// Issue a new sample request. Any earlier request becomes stale.
    pub fn begin_load(&mut self, language: &str) -> LoadTicket {
        let token = RequestToken::next();
        self.latest = Some(token);
        LoadTicket {
            token,
            language: language.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.latest == Some(ticket.token)
    }

    /// Apply a settled sample request.
    ///
    /// On success the content, then the extensions (only for registered
    /// names), then the mode are updated. On failure the session ends with
    /// empty content, an empty extension list and the requested mode.
    pub fn complete_load<E>(
        &mut self,
        ticket: &LoadTicket,
        result: Result<String, E>,
        registry: &LanguageRegistry,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(text) => {
                self.content = text;
                if let Some(mode) = registry.lookup(&ticket.language) {
                    self.extensions = Some(vec![mode.produce()]);
                }
                self.mode = ticket.language.clone();
                LoadOutcome::Applied
            }
            Err(_) => {
                self.extensions = Some(Vec::new());
                self.mode = ticket.language.clone();
                self.content.clear();
                LoadOutcome::Fallback
            }
        }
    }

    /// Replace the content with a freshly numbered snippet.
    pub fn mutate_content(&mut self) -> &str {
        self.mutation_count += 1;
        self.content = format!("console.log(\"Hello World! {}\")", self.mutation_count);
        &self.content
    }

    pub fn config(&self) -> EditorConfig {
        EditorConfig {
            value: self.content.clone(),
            theme: EditorTheme::Preset(self.scheme),
            extensions: self.extensions.clone().unwrap_or_default(),
            height: self.height,
            auto_focus: self.auto_focus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::language::LanguageMode;

    fn session() -> EditorSession {
        EditorSession::new("javascript", ColorScheme::Light, EditorHeight::Fixed(500))
    }

    #[test]
    fn test_new_session_is_empty() {
        let s = session();
        assert_eq!(s.content(), "");
        assert_eq!(s.mode(), "javascript");
        assert!(s.extensions().is_none());
        assert!(!s.auto_focus());
    }

    #[test]
    fn test_registered_language_success() {
        let registry = LanguageRegistry::new();
        for name in registry.names() {
            let mut s = session();
            let ticket = s.begin_load(name);
            let text = format!("sample for {}", name);
            let outcome = s.complete_load::<()>(&ticket, Ok(text.clone()), &registry);

            assert_eq!(outcome, LoadOutcome::Applied);
            assert_eq!(s.mode(), name);
            assert_eq!(s.content(), text);
            let expected = registry.lookup(name).unwrap().produce();
            assert_eq!(s.extensions(), Some(&[expected][..]));
        }
    }

    #[test]
    fn test_unregistered_language_success() {
        let registry = LanguageRegistry::new();
        let mut s = session();
        let ticket = s.begin_load("cobol");
        let outcome = s.complete_load::<()>(&ticket, Ok("IDENTIFICATION DIVISION.".into()), &registry);

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(s.mode(), "cobol");
        assert_eq!(s.content(), "IDENTIFICATION DIVISION.");
        assert!(s.extensions().is_none());
    }

    #[test]
    fn test_failed_load_resets_state() {
        let registry = LanguageRegistry::new();
        let mut s = session();
        let ticket = s.begin_load("rust");
        s.complete_load::<()>(&ticket, Ok("fn main() {}".into()), &registry);

        let ticket = s.begin_load("swift");
        let outcome = s.complete_load(&ticket, Err("missing"), &registry);

        assert_eq!(outcome, LoadOutcome::Fallback);
        assert_eq!(s.content(), "");
        assert_eq!(s.extensions(), Some(&[][..]));
        assert_eq!(s.mode(), "swift");
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let registry = LanguageRegistry::new();
        let mut s = session();
        let first = s.begin_load("python");
        let second = s.begin_load("go");
        assert!(second.token > first.token);

        let outcome = s.complete_load::<()>(&second, Ok("package main".into()), &registry);
        assert_eq!(outcome, LoadOutcome::Applied);

        let outcome = s.complete_load::<()>(&first, Ok("print('hi')".into()), &registry);
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(s.mode(), "go");
        assert_eq!(s.content(), "package main");
        assert_eq!(s.extensions().unwrap()[0].mode, LanguageMode::Go);
    }

    #[test]
    fn test_stale_failure_does_not_clear() {
        let registry = LanguageRegistry::new();
        let mut s = session();
        let first = s.begin_load("swift");
        let second = s.begin_load("json");
        s.complete_load::<()>(&second, Ok("{}".into()), &registry);

        assert_eq!(s.complete_load(&first, Err(()), &registry), LoadOutcome::Stale);
        assert_eq!(s.content(), "{}");
    }

    #[test]
    fn test_ticket_from_previous_session_is_stale() {
        let registry = LanguageRegistry::new();
        let mut old = session();
        let old_ticket = old.begin_load("rust");

        let mut fresh = session();
        let _current = fresh.begin_load("javascript");
        let outcome = fresh.complete_load::<()>(&old_ticket, Ok("fn main() {}".into()), &registry);
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(fresh.content(), "");
    }

    #[test]
    fn test_unrequested_result_is_stale() {
        let registry = LanguageRegistry::new();
        let mut s = session();
        let ticket = LoadTicket {
            token: RequestToken(0),
            language: "rust".to_string(),
        };
        assert_eq!(s.complete_load::<()>(&ticket, Ok(String::new()), &registry), LoadOutcome::Stale);
    }

    #[test]
    fn test_mutate_content_is_monotonic() {
        let mut s = session();
        let first = s.mutate_content().to_string();
        let second = s.mutate_content().to_string();
        assert_eq!(first, "console.log(\"Hello World! 1\")");
        assert_eq!(second, "console.log(\"Hello World! 2\")");
        assert_ne!(first, second);
        assert_eq!(s.content(), second);
    }

    #[test]
    fn test_sample_key_is_lowercase() {
        let mut s = session();
        let ticket = s.begin_load("PowerShell");
        assert_eq!(ticket.sample_key(), "powershell");
        assert_eq!(ticket.language, "PowerShell");
    }

    #[test]
    fn test_config_reflects_state() {
        let registry = LanguageRegistry::new();
        let mut s = session();
        s.set_scheme(ColorScheme::Dark);
        s.set_height(EditorHeight::Auto);
        s.set_auto_focus(true);
        assert!(s.config().extensions.is_empty());

        let ticket = s.begin_load("css");
        s.complete_load::<()>(&ticket, Ok("a { color: red; }".into()), &registry);

        let config = s.config();
        assert_eq!(config.value, "a { color: red; }");
        assert_eq!(config.theme, EditorTheme::Preset(ColorScheme::Dark));
        assert_eq!(config.height, EditorHeight::Auto);
        assert!(config.auto_focus);
        assert_eq!(config.extensions.len(), 1);
    }
}
