//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! The tab control's terminal host lives here too: it turns the control's
//! outbound calls into a record the strip widget draws from.

pub mod layout;
pub mod page_view;
pub mod smooth_scroll;
pub mod tab_host;
pub mod tab_strip;
pub mod theme;
