//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Platform-specific color scheme detection and polling
//! - The process-wide ambient color scheme bus
//! - Error types

pub mod color_scheme;
pub mod error;
pub mod platform;
