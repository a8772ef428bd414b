//! A paged tab strip: a flip view whose tab header follows the swipe offset,
//! highlights the dominant tab, and walks page by page on `scroll_to_index`.
//!
//! The control lives in [`core`] and talks to its host through
//! [`core::TabHost`].  [`config`] holds the user configuration shared with the
//! terminal demo binary.

pub mod config;
pub mod core;
