//! Tooltip state owned by a single tooltip controller

use serde::{Deserialize, Serialize};

use crate::{Point, RegionDescriptor};

/// Represents the state of one floating tooltip panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    /// Whether the panel is currently shown
    pub visible: bool,

    /// Where the panel is drawn, in the panel's positioning coordinates
    pub anchor: Point,

    /// Content of the hovered region, `None` while hidden
    pub content: Option<RegionDescriptor>,
}

impl TooltipState {
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Key of the region currently described, if any
    pub fn active_key(&self) -> Option<&str> {
        self.content.as_ref().map(|d| d.key.as_str())
    }
}
