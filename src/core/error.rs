//! Error taxonomy for the tab control's public property surface.
//!
//! Most failure modes (offsets before layout, missing containers, unknown
//! clicks) are absorbed locally and only logged.  What remains here is caller
//! misuse that the caller can act on.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("tab index {index} is out of range (tab count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("tab items are fixed once the tab strip has been measured")]
    AlreadyInitialized,
}

pub type Result<T> = std::result::Result<T, TabError>;
