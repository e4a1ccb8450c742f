//! Editor settings.
//!
//! The host passes these once when the engine is created (usually as JSON
//! from the page). Every field has a default, so a partial object, or none at
//! all, yields a working editor with snapping off and unconstrained placement.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    ALIGN_THRESHOLD_PX, DEFAULT_ELEMENT_HEIGHT_PX, DEFAULT_ELEMENT_WIDTH_PX, GRID_SIZE_PX, HIT_THRESHOLD_PX,
    MIN_DRAG_DISTANCE_PX, MIN_ELEMENT_SIZE_PX, PAGE_HEIGHT_PX, PAGE_WIDTH_PX,
};
use crate::geometry::{Handle, Rect, Size, resize_from_handle, resize_uniform_from_handle};

/// How corner handles scale an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Each axis follows its own delta.
    #[default]
    Independent,
    /// Corners keep the starting aspect ratio.
    Uniform,
}

impl ResizeMode {
    /// Dispatch to the matching geometry helper.
    #[must_use]
    pub fn resize(self, handle: Handle, start: Rect, dx: f64, dy: f64, min_size: f64) -> Rect {
        match self {
            Self::Independent => resize_from_handle(handle, start, dx, dy, min_size),
            Self::Uniform => resize_uniform_from_handle(handle, start, dx, dy, min_size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub page_width: f64,
    pub page_height: f64,
    pub grid_size: f64,
    /// Guides are reported strictly below this distance.
    pub align_threshold: f64,
    /// Width of the border band that counts as a resize handle.
    pub hit_threshold: f64,
    pub min_size: f64,
    /// Palette drags shorter than this are treated as clicks and discarded.
    pub min_drag_distance: f64,
    pub default_width: f64,
    pub default_height: f64,
    pub resize_mode: ResizeMode,
    /// Keep moved elements fully on the page.
    pub clamp_to_page: bool,
    /// Pull moved elements onto the first guide per axis.
    pub clamp_to_guides: bool,
    pub snap_to_grid: bool,
    pub snap_to_elements: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            page_width: PAGE_WIDTH_PX,
            page_height: PAGE_HEIGHT_PX,
            grid_size: GRID_SIZE_PX,
            align_threshold: ALIGN_THRESHOLD_PX,
            hit_threshold: HIT_THRESHOLD_PX,
            min_size: MIN_ELEMENT_SIZE_PX,
            min_drag_distance: MIN_DRAG_DISTANCE_PX,
            default_width: DEFAULT_ELEMENT_WIDTH_PX,
            default_height: DEFAULT_ELEMENT_HEIGHT_PX,
            resize_mode: ResizeMode::Independent,
            clamp_to_page: false,
            clamp_to_guides: false,
            snap_to_grid: false,
            snap_to_elements: false,
        }
    }
}

impl EditorSettings {
    /// Parse settings from a JSON object. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when a known key has the wrong type.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[must_use]
    pub fn page_size(&self) -> Size {
        Size::new(self.page_width, self.page_height)
    }

    #[must_use]
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }
}
