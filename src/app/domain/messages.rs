use super::height::EditorHeight;
use super::session::LoadTicket;
use super::theme::ColorScheme;

/// The two screens reachable from the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Demo,
    ThemeGallery,
}

impl Page {
    pub fn label(self) -> &'static str {
        match self {
            Self::Demo => "Demo",
            Self::ThemeGallery => "Themes",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Demo" => Some(Self::Demo),
            "Themes" => Some(Self::ThemeGallery),
            _ => None,
        }
    }
}

/// All messages that can be sent through the FLTK channel.
/// Each widget callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    Navigate(Page),
    Quit,

    // Demo page
    SelectLanguage(String),
    SampleLoaded {
        ticket: LoadTicket,
        result: Result<String, String>,
    },
    SelectScheme(ColorScheme),
    SelectHeight(EditorHeight),
    MutateContent,
    SetAutoFocus(bool),
    OpenLink(&'static str),

    // Theme gallery
    SelectGalleryTheme(Option<String>),
    RefreshGallery,

    // Shared editor hosts
    EditorChanged(Page),

    // Ambient color scheme
    AmbientSchemeChanged(ColorScheme),
    ToggleAmbientScheme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_labels_round_trip() {
        for page in [Page::Demo, Page::ThemeGallery] {
            assert_eq!(Page::from_label(page.label()), Some(page));
        }
        assert_eq!(Page::from_label("Settings"), None);
    }
}
