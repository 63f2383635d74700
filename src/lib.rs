//! Editor Showcase - a demo page and theme gallery for a syntax-highlighting
//! FLTK editor widget.

pub mod app;
pub mod ui;
