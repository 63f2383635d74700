//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (languages, session, themes, settings, messages)
//! - `controllers/` - Orchestration (demo page, theme gallery)
//! - `services/` - Business operations (samples, markdown, syntax)
//! - `infrastructure/` - External integrations (ambient color scheme, platform, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use domain::{AppSettings, ColorScheme, LanguageRegistry, Message, Page, ThemeMode};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::platform::detect_system_dark_mode;
