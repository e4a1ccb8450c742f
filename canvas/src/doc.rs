//! Document model: placed elements and the ordered in-memory store.
//!
//! This module defines what is on the page (`Element`, `ElementId`), a sparse
//! update type for incremental edits (`ElementPatch`), and the store that owns
//! every live element plus the editor's focus (`DocStore`).
//!
//! DESIGN
//! ======
//! Paint order is the sequence order: later elements draw on top, so z-order
//! changes are moves within the `Vec`. The palette preview ("ghost") lives in
//! its own slot outside the sequence, which makes "at most one ghost" hold by
//! construction and keeps it out of every snapshot. Selection, the open
//! content editor and the element under an active drag are store-level focus
//! fields rather than per-element flags, so at most one of each exists.
//!
//! ERROR HANDLING
//! ==============
//! Operations on unknown ids are silent no-ops that report `false` or `None`.
//! The interaction loop routinely works with ids that a reload may have made
//! stale, and must never fail because of it.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::content::{ContentError, ElementContent, ElementKind};
use crate::geometry::{Point, Rect, Size, normalize_degrees};

// =============================================================
// Ids
// =============================================================

/// Unique identifier of a placed element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// A fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

// =============================================================
// Element
// =============================================================

/// One placed item on the page.
///
/// The kind is carried by the content variant, so it cannot change without
/// replacing the content wholesale (which [`DocStore::update`] refuses).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct Element {
    pub id: ElementId,
    pub content: ElementContent,
    /// Top-left corner in page pixels. Unconstrained.
    pub position: Point,
    pub size: Size,
    /// Clockwise degrees about the element center, in `[0, 360)`.
    pub rotation: f64,
}

impl Element {
    /// A new element of `kind` with its default content and a fresh id.
    #[must_use]
    pub fn new(kind: ElementKind, position: Point, size: Size) -> Self {
        Self {
            id: ElementId::generate(),
            content: ElementContent::default_for(kind),
            position,
            size,
            rotation: 0.0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    /// Unrotated bounding box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

/// Wire shape accepted on input. Transient UI flags such as `isDragging`,
/// `isPreview` or `isSelected` are unknown fields here and get dropped.
#[derive(Deserialize)]
struct RawElement {
    id: ElementId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: serde_json::Value,
    position: Point,
    size: Size,
    #[serde(default)]
    rotation: f64,
}

impl TryFrom<RawElement> for Element {
    type Error = ContentError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let kind = ElementKind::parse(&raw.kind).ok_or(ContentError::UnknownKind(raw.kind))?;
        Ok(Self {
            id: raw.id,
            content: ElementContent::from_value(kind, raw.content)?,
            position: raw.position,
            size: raw.size,
            rotation: normalize_degrees(raw.rotation),
        })
    }
}

#[derive(Serialize)]
struct ElementWire<'a> {
    id: &'a ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    content: &'a ElementContent,
    position: Point,
    size: Size,
    rotation: f64,
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ElementWire {
            id: &self.id,
            kind: self.kind(),
            content: &self.content,
            position: self.position,
            size: self.size,
            rotation: self.rotation,
        }
        .serialize(serializer)
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub rotation: Option<f64>,
    /// Must be the element's own kind; a mismatch rejects the whole patch.
    pub content: Option<ElementContent>,
}

impl ElementPatch {
    #[must_use]
    pub fn position(position: Point) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    #[must_use]
    pub fn rect(rect: Rect) -> Self {
        Self { position: Some(rect.origin()), size: Some(rect.size()), ..Self::default() }
    }

    #[must_use]
    pub fn rotation(degrees: f64) -> Self {
        Self { rotation: Some(degrees), ..Self::default() }
    }

    #[must_use]
    pub fn content(content: ElementContent) -> Self {
        Self { content: Some(content), ..Self::default() }
    }
}

// =============================================================
// DocStore
// =============================================================

/// Ordered element sequence plus ghost slot and editor focus.
#[derive(Debug, Default)]
pub struct DocStore {
    elements: Vec<Element>,
    ghost: Option<Element>,
    selected: Option<ElementId>,
    editing: Option<ElementId>,
    dragging: Option<ElementId>,
}

impl DocStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `element` on top of the z-order and return its id.
    ///
    /// An id that is already taken is replaced with a fresh one.
    pub fn add(&mut self, mut element: Element) -> ElementId {
        if self.contains(&element.id) {
            let fresh = ElementId::generate();
            warn!(id = %element.id, %fresh, "duplicate element id on add; reassigned");
            element.id = fresh;
        }
        let id = element.id.clone();
        debug!(%id, kind = %element.kind(), "element added");
        self.elements.push(element);
        id
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of `id` in paint order.
    #[must_use]
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    /// Merge `patch` into the element. Returns false if the id is unknown or
    /// the patch carries content of another kind (nothing is applied then).
    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| &e.id == id) else {
            return false;
        };
        if let Some(ref content) = patch.content {
            if content.kind() != element.kind() {
                warn!(%id, expected = %element.kind(), found = %content.kind(), "content kind mismatch; patch rejected");
                return false;
            }
        }

        if let Some(position) = patch.position {
            element.position = position;
        }
        if let Some(size) = patch.size {
            element.size = size;
        }
        if let Some(rotation) = patch.rotation {
            element.rotation = normalize_degrees(rotation);
        }
        if let Some(ref content) = patch.content {
            element.content = content.clone();
        }
        true
    }

    /// Delete an element. Selection, editor and drag focus on it are cleared.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        let element = self.elements.remove(index);
        self.clear_focus_on(id);
        debug!(%id, "element removed");
        Some(element)
    }

    /// Move the element to the end of the sequence (drawn last).
    pub fn bring_to_front(&mut self, id: &ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let element = self.elements.remove(index);
        self.elements.push(element);
        true
    }

    /// Move the element to the start of the sequence (drawn first).
    pub fn send_to_back(&mut self, id: &ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let element = self.elements.remove(index);
        self.elements.insert(0, element);
        true
    }

    // --- focus ---

    /// Set or clear the sole selection. Selecting an unknown id is a no-op
    /// returning false.
    pub fn select(&mut self, id: Option<ElementId>) -> bool {
        match id {
            Some(id) if !self.contains(&id) => false,
            id => {
                self.selected = id;
                true
            }
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Open the content editor for an existing element.
    pub fn open_editor(&mut self, id: &ElementId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.editing = Some(id.clone());
        true
    }

    /// Close the content editor, returning the id it was open for.
    pub fn close_editor(&mut self) -> Option<ElementId> {
        self.editing.take()
    }

    #[must_use]
    pub fn editing(&self) -> Option<&ElementId> {
        self.editing.as_ref()
    }

    pub(crate) fn set_dragging(&mut self, id: Option<ElementId>) {
        self.dragging = id;
    }

    #[must_use]
    pub fn is_dragging(&self, id: &ElementId) -> bool {
        self.dragging.as_ref() == Some(id)
    }

    // --- ghost ---

    /// Replace the ghost slot outright.
    pub fn set_ghost(&mut self, ghost: Option<Element>) {
        self.ghost = ghost;
    }

    #[must_use]
    pub fn ghost(&self) -> Option<&Element> {
        self.ghost.as_ref()
    }

    /// Reposition the ghost. Returns false when there is none.
    pub fn move_ghost(&mut self, position: Point) -> bool {
        let Some(ghost) = self.ghost.as_mut() else {
            return false;
        };
        ghost.position = position;
        true
    }

    /// Turn the ghost into a real element with a fresh id on top of the
    /// z-order. No-op when there is no ghost.
    pub fn commit_ghost(&mut self) -> Option<ElementId> {
        let mut ghost = self.ghost.take()?;
        ghost.id = ElementId::generate();
        Some(self.add(ghost))
    }

    /// Clear the ghost slot. Returns whether a ghost was present.
    pub fn discard_ghost(&mut self) -> bool {
        self.ghost.take().is_some()
    }

    // --- whole document ---

    /// Replace the whole sequence. Selection and the open editor survive when
    /// their id is still present; the ghost and any drag focus are dropped.
    /// Repeated ids in `elements` are reassigned so ids stay unique.
    pub fn load(&mut self, elements: Vec<Element>) {
        let mut seen = HashSet::with_capacity(elements.len());
        self.elements = elements
            .into_iter()
            .map(|mut element| {
                if !seen.insert(element.id.clone()) {
                    let fresh = ElementId::generate();
                    warn!(id = %element.id, %fresh, "duplicate element id on load; reassigned");
                    element.id = fresh.clone();
                    seen.insert(fresh);
                }
                element
            })
            .collect();

        self.ghost = None;
        self.dragging = None;
        if self.selected.as_ref().is_some_and(|id| !seen.contains(id)) {
            self.selected = None;
        }
        if self.editing.as_ref().is_some_and(|id| !seen.contains(id)) {
            self.editing = None;
        }
        debug!(count = self.elements.len(), "document loaded");
    }

    /// Committed elements in paint order, ghost excluded.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// Committed elements in paint order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements.iter()
    }

    /// Bounding boxes of every committed element except `id`.
    pub fn rects_except<'a>(&'a self, id: &'a ElementId) -> impl Iterator<Item = Rect> + 'a {
        self.elements.iter().filter(move |e| &e.id != id).map(Element::rect)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn clear_focus_on(&mut self, id: &ElementId) {
        for slot in [&mut self.selected, &mut self.editing, &mut self.dragging] {
            if slot.as_ref() == Some(id) {
                *slot = None;
            }
        }
    }
}
