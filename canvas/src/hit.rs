//! Hit-testing against placed elements.
//!
//! Points are in page coordinates. Rotated elements are tested in their own
//! frame: the pointer is rotated back about the element center before the
//! zone test, so handles follow the element's visual orientation.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{DocStore, ElementId};
use crate::geometry::{Handle, HitZone, Point, Rect, hit_zone, rotate_point};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// Body or border band of the box.
    Zone(HitZone),
    /// The rotate affordance above the selected element.
    RotateHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub id: ElementId,
    pub part: HitPart,
}

/// Find the element under `page_pt`, topmost first.
///
/// The selected element's rotate handle is checked before any element body,
/// since it sits outside the element's box and may overlap a neighbour.
#[must_use]
pub fn hit_test(page_pt: Point, doc: &DocStore, threshold: f64) -> Option<Hit> {
    if let Some(selected) = doc.selected_element() {
        let handle = rotate_handle_position(selected.rect(), selected.rotation);
        if page_pt.distance_to(handle) <= HANDLE_RADIUS_PX {
            return Some(Hit { id: selected.id.clone(), part: HitPart::RotateHandle });
        }
    }

    doc.iter().rev().find_map(|element| {
        let rect = element.rect();
        let local = rotate_point(page_pt, rect.center(), -element.rotation);
        hit_zone(local, rect, threshold).map(|zone| Hit { id: element.id.clone(), part: HitPart::Zone(zone) })
    })
}

/// Page-space position of the rotate affordance for a box rotated by `rotation`.
#[must_use]
pub fn rotate_handle_position(rect: Rect, rotation: f64) -> Point {
    let unrotated = Point::new(rect.x + rect.width / 2.0, rect.y - ROTATE_HANDLE_OFFSET_PX);
    rotate_point(unrotated, rect.center(), rotation)
}

/// Page-space positions of the eight resize handles, in [`Handle::ALL`] order.
#[must_use]
pub fn resize_handle_positions(rect: Rect, rotation: f64) -> [(Handle, Point); 8] {
    let center = rect.center();
    Handle::ALL.map(|h| (h, rotate_point(rect.handle_point(h), center, rotation)))
}

/// CSS cursor for hovering `part`, given whether the rotate modifier is held.
#[must_use]
pub fn cursor_for(part: HitPart, rotate_modifier: bool) -> &'static str {
    match part {
        HitPart::RotateHandle => "grab",
        HitPart::Zone(zone) if rotate_modifier && zone.is_rotate_eligible() => "grab",
        HitPart::Zone(HitZone::Resize(handle)) => handle.cursor(),
        HitPart::Zone(HitZone::Move) => "move",
    }
}
