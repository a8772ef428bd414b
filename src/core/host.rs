//! The capability set the tab control needs from whatever draws it.
//!
//! The control never measures or paints anything itself.  A terminal UI, a
//! GPU toolkit, or the headless recorder in [`super::headless`] each provide
//! one implementation of [`TabHost`].

use std::fmt::Debug;

/// Plain RGB color handed to the host when painting tabs or the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TabColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const DEEP_PINK: Self = Self::rgb(0xFF, 0x14, 0x93);
    pub const DARK_GRAY: Self = Self::rgb(0xA9, 0xA9, 0xA9);

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Highlight state of a single tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabState {
    Active,
    Inactive,
}

/// Where [`TabHost::scroll_into_view`] should place the target tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlignment {
    /// Scroll the minimum amount needed to make the tab visible.
    #[default]
    Default,
    Leading,
}

/// Outbound calls the tab control makes into its host.
///
/// All calls happen while the control holds its internal lock, so an
/// implementation must not call back into the control.
pub trait TabHost: Send {
    /// Host-side handle for one realized tab.  May be recycled by the host,
    /// so the control only ever keys its own bookkeeping by index.
    type Container: Clone + PartialEq + Debug + Send;

    /// The realized container for `index`, if the host currently has one.
    fn container_for_index(&mut self, index: usize) -> Option<Self::Container>;

    fn index_for_container(&self, container: &Self::Container) -> Option<usize>;

    /// Force a measure pass so [`TabHost::desired_width`] is current.
    fn measure(&mut self, container: &Self::Container);

    fn desired_width(&self, container: &Self::Container) -> f64;

    fn set_width(&mut self, container: &Self::Container, width: f64);

    fn scroll_into_view(&mut self, index: usize, alignment: ScrollAlignment);

    /// Apply a tab's highlight.  Only called under the direct-paint policy
    /// and for the initial paint of freshly loaded tabs.
    fn paint_tab(&mut self, _container: &Self::Container, _state: TabState, _color: TabColor) {}

    /// Horizontal translation of the indicator bar, in host width units.
    fn translate_indicator(&mut self, _x: f64) {}

    fn set_indicator_width(&mut self, _width: f64) {}
}
