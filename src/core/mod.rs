//! Core tab-strip logic: offset tracking, selection resolution, feedback and
//! navigation.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Hosts plug
//! in through the [`TabHost`] trait.

pub mod control;
pub mod error;
pub mod feedback;
pub mod gate;
pub mod headless;
pub mod host;
pub mod navigation;
pub mod observable;
pub mod offset;
pub mod options;
pub mod resolver;
pub mod tab_set;

pub use control::{TabFlipView, TabTemplate, TabTemplateSelector};
pub use error::TabError;
pub use feedback::{FeedbackEvent, FeedbackPolicy};
pub use host::{ScrollAlignment, TabColor, TabHost, TabState};
pub use navigation::{NavigationOutcome, NavigationPolicy};
pub use options::ControlOptions;
