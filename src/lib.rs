//! Circular lettered badge icons for browser extensions.
//!
//! [`icon_gen::generate_icons`] writes `icon16.png`, `icon32.png`, `icon48.png`
//! and `icon128.png`; [`badge::render`] draws a single icon.

pub mod badge;
pub mod font;
pub mod icon_gen;
