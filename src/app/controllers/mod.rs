//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - The demo page and its editor session
//! - The theme gallery and its ambient subscription

pub mod demo;
pub mod gallery;
