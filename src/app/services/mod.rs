//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Sample text loading
//! - Markdown rendering
//! - Syntax highlighting

pub mod markdown;
pub mod samples;
pub mod syntax;
