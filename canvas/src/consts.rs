//! Shared numeric constants for the canvas crate.
//!
//! These are the defaults behind [`crate::config::EditorSettings`]; hosts that
//! need different values override the settings rather than these constants.

// ── Page ────────────────────────────────────────────────────────

/// A4 width (210mm) in CSS pixels at 96 dpi, rounded.
pub const PAGE_WIDTH_PX: f64 = 794.0;

/// A4 height (297mm) in CSS pixels at 96 dpi, rounded.
pub const PAGE_HEIGHT_PX: f64 = 1123.0;

// ── Snapping ────────────────────────────────────────────────────

/// Grid pitch used when grid snapping is enabled.
pub const GRID_SIZE_PX: f64 = 10.0;

/// Maximum distance between two alignment lines that still reports a guide.
pub const ALIGN_THRESHOLD_PX: f64 = 8.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Band inside an element's border that counts as a resize edge or corner.
pub const HIT_THRESHOLD_PX: f64 = 6.0;

/// Hit radius of the rotate affordance and the drawn handle squares.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the top edge to the rotate affordance.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Elements ────────────────────────────────────────────────────

/// Floor applied to width and height by every resize.
pub const MIN_ELEMENT_SIZE_PX: f64 = 20.0;

/// Size given to an element placed from the palette.
pub const DEFAULT_ELEMENT_WIDTH_PX: f64 = 200.0;

/// Size given to an element placed from the palette.
pub const DEFAULT_ELEMENT_HEIGHT_PX: f64 = 100.0;

/// Travel below this distance turns a palette drag into a click (no placement).
pub const MIN_DRAG_DISTANCE_PX: f64 = 10.0;
