//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Language modes and their registry
//! - Demo editor session state
//! - Theme catalogue and selection
//! - Application settings
//! - Message types for the event system

pub mod height;
pub mod language;
pub mod messages;
pub mod session;
pub mod settings;
pub mod theme;

pub use height::EditorHeight;
pub use language::{LanguageExtension, LanguageMode, LanguageRegistry};
pub use messages::{Message, Page};
pub use session::{EditorConfig, EditorSession, LoadOutcome, LoadTicket, RequestToken};
pub use settings::{AppSettings, FailurePolicy};
pub use theme::{ColorScheme, EditorTheme, ThemeCatalogue, ThemeDefinition, ThemeMode, ThemeSelection};
