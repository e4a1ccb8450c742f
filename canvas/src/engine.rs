//! Editor engine: turns pointer, key and palette events into store mutations.
//!
//! DESIGN
//! ======
//! `EngineCore` owns the element store, the page frame, the settings, and the
//! single active gesture (`InputState`). Every handler returns the `Action`s
//! the host must react to: persisting a final mutation, updating the cursor,
//! opening or closing the content editor, or scheduling a repaint.
//!
//! Intermediate pointer moves mutate the store directly and only ask for a
//! repaint. The final `ElementUpdated` carrying the settled fields is emitted
//! once, on release, and only if the gesture actually changed something.
//!
//! Pointer coordinates are canvas pixels. The host forwards move and up events
//! from the whole window, so a drag that leaves the canvas is still tracked
//! and may still be released over the page.
//!
//! ERROR HANDLING
//! ==============
//! Events that make no sense in the current state (a press while a gesture is
//! active, a release while idle, an id that vanished) are ignored and yield no
//! actions. Only `commit_content` returns an error, since a rejected content
//! edit is something the user has to see.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::EditorSettings;
use crate::content::{ContentError, ElementContent, ElementKind};
use crate::doc::{DocStore, Element, ElementId, ElementPatch};
use crate::geometry::{HitZone, Point, Rect, Size, pin_rotated_anchor, rotate_from_pointers, rotate_point};
use crate::hit::{self, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, UiState};
use crate::page::PageFrame;
use crate::render::{self, ContentPainter, TextPainter};
use crate::snap::{Guide, alignment_guides, guide_offset, snap_point, snap_resized};
use crate::surface;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A palette drop placed a new element.
    ElementCreated(Element),
    /// A gesture or edit settled; `patch` holds the fields that changed.
    ElementUpdated { id: ElementId, patch: ElementPatch },
    ElementDeleted { id: ElementId },
    /// Paint order changed (bring to front / send to back).
    ElementsReordered,
    SelectionChanged(Option<ElementId>),
    EditorOpened { id: ElementId },
    EditorClosed,
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub page: PageFrame,
    pub settings: EditorSettings,
    pub ui: UiState,
    pub input: InputState,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_settings(EditorSettings::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page at the canvas origin, sized from `settings`.
    #[must_use]
    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            doc: DocStore::new(),
            page: PageFrame::new(Point::new(0.0, 0.0), settings.page_size()),
            settings,
            ui: UiState { cursor: "default", ..UiState::default() },
            input: InputState::Idle,
        }
    }

    /// Re-center the page for a canvas of the given CSS size.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.page = PageFrame::centered(self.settings.page_size(), Size::new(width, height));
        vec![Action::RenderNeeded]
    }

    // --- Document ---

    /// Replace every element. Any gesture in flight is dropped without
    /// restoring, since the element it acted on was replaced too.
    pub fn load_document(&mut self, elements: Vec<Element>) -> Vec<Action> {
        let had_selection = self.doc.selected().is_some();
        let had_editor = self.doc.editing().is_some();

        self.input = InputState::Idle;
        self.ui.guides.clear();
        self.doc.load(elements);

        let mut actions = Vec::new();
        if had_selection && self.doc.selected().is_none() {
            actions.push(Action::SelectionChanged(None));
        }
        if had_editor && self.doc.editing().is_none() {
            actions.push(Action::EditorClosed);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Committed elements in paint order, ghost excluded.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.doc.snapshot()
    }

    // --- Commands ---

    /// Delete an element, clearing selection and closing its editor.
    pub fn delete(&mut self, id: &ElementId) -> Vec<Action> {
        let was_selected = self.doc.is_selected(id);
        let was_editing = self.doc.editing() == Some(id);
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        if self.input.target() == Some(id) {
            self.input = InputState::Idle;
            self.ui.guides.clear();
        }

        let mut actions = vec![Action::ElementDeleted { id: id.clone() }];
        if was_selected {
            actions.push(Action::SelectionChanged(None));
        }
        if was_editing {
            actions.push(Action::EditorClosed);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn bring_to_front(&mut self, id: &ElementId) -> Vec<Action> {
        if !self.doc.bring_to_front(id) {
            return Vec::new();
        }
        vec![Action::ElementsReordered, Action::RenderNeeded]
    }

    pub fn send_to_back(&mut self, id: &ElementId) -> Vec<Action> {
        if !self.doc.send_to_back(id) {
            return Vec::new();
        }
        vec![Action::ElementsReordered, Action::RenderNeeded]
    }

    /// Set or clear the selection from outside the canvas (e.g. a layer list).
    pub fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if self.doc.selected() == id.as_ref() || !self.doc.select(id.clone()) {
            return Vec::new();
        }
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    pub fn open_editor(&mut self, id: &ElementId) -> Vec<Action> {
        if self.ui.preview || !self.doc.open_editor(id) {
            return Vec::new();
        }
        vec![Action::EditorOpened { id: id.clone() }]
    }

    pub fn close_editor(&mut self) -> Vec<Action> {
        match self.doc.close_editor() {
            Some(_) => vec![Action::EditorClosed],
            None => Vec::new(),
        }
    }

    /// Replace an element's content after validating it. On success the
    /// editor closes if it was open for this element.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::KindMismatch`] if `content` belongs to another
    /// kind, or the first validation rule it breaks. The element keeps its
    /// previous content in either case.
    pub fn commit_content(&mut self, id: &ElementId, content: ElementContent) -> Result<Vec<Action>, ContentError> {
        let Some(element) = self.doc.get(id) else {
            return Ok(Vec::new());
        };
        if element.kind() != content.kind() {
            return Err(ContentError::KindMismatch { expected: element.kind(), found: content.kind() });
        }
        content.validate()?;

        let patch = ElementPatch::content(content);
        self.doc.update(id, &patch);

        let mut actions = vec![Action::ElementUpdated { id: id.clone(), patch }];
        if self.doc.editing() == Some(id) {
            self.doc.close_editor();
            actions.push(Action::EditorClosed);
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Toggle preview mode. Entering it aborts any gesture and closes the editor.
    pub fn set_preview(&mut self, preview: bool) -> Vec<Action> {
        if self.ui.preview == preview {
            return Vec::new();
        }
        let mut actions = self.cancel_gesture();
        actions.retain(|a| *a != Action::RenderNeeded);
        if preview {
            actions.extend(self.close_editor());
        }
        self.ui.preview = preview;
        actions.extend(self.set_cursor("default"));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Abort the active gesture, restoring the element to its gesture-start
    /// state or discarding the palette ghost.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        self.ui.guides.clear();
        self.doc.set_dragging(None);

        match state {
            InputState::Idle => return Vec::new(),
            InputState::DraggingFromPalette { .. } => {
                self.doc.discard_ghost();
            }
            InputState::MovingElement { id, orig, .. } => {
                self.doc.update(&id, &ElementPatch::position(orig));
            }
            InputState::ResizingElement { id, start_rect, .. } => {
                self.doc.update(&id, &ElementPatch::rect(start_rect));
            }
            InputState::RotatingElement { id, orig_rotation, .. } => {
                self.doc.update(&id, &ElementPatch::rotation(orig_rotation));
            }
        }
        debug!("gesture cancelled");
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// A palette entry was pressed: spawn a ghost of `kind` under the pointer.
    pub fn on_palette_down(&mut self, kind: ElementKind, screen_pt: Point) -> Vec<Action> {
        if self.ui.preview || !self.input.is_idle() {
            return Vec::new();
        }
        let ghost = Element::new(kind, self.ghost_origin(screen_pt), self.settings.default_size());
        self.doc.set_ghost(Some(ghost));
        self.input = InputState::DraggingFromPalette { kind, start_screen: screen_pt };
        debug!(%kind, "palette drag started");
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if self.ui.preview || button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }
        let page_pt = self.page.screen_to_page(screen_pt);

        let Some(hit) = hit::hit_test(page_pt, &self.doc, self.settings.hit_threshold) else {
            return self.select(None);
        };
        let Some(element) = self.doc.get(&hit.id) else {
            return Vec::new();
        };

        let rect = element.rect();
        self.input = match hit.part {
            HitPart::RotateHandle => rotating(element, page_pt),
            HitPart::Zone(zone) if modifiers.rotate() && zone.is_rotate_eligible() => rotating(element, page_pt),
            HitPart::Zone(HitZone::Resize(handle)) => InputState::ResizingElement {
                id: hit.id.clone(),
                handle,
                start_pointer: page_pt,
                start_rect: rect,
            },
            HitPart::Zone(HitZone::Move) => InputState::MovingElement {
                id: hit.id.clone(),
                offset: Point::new(page_pt.x - rect.x, page_pt.y - rect.y),
                orig: rect.origin(),
            },
        };
        if matches!(self.input, InputState::MovingElement { .. }) {
            self.doc.set_dragging(Some(hit.id.clone()));
        }
        debug!(id = %hit.id, state = ?self.input, "gesture started");

        let mut actions = self.select(Some(hit.id));
        if actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let page_pt = self.page.screen_to_page(screen_pt);

        match self.input.clone() {
            InputState::Idle => self.update_hover(page_pt, modifiers),
            InputState::DraggingFromPalette { .. } => {
                let origin = self.ghost_origin(screen_pt);
                self.doc.move_ghost(origin);
                vec![Action::RenderNeeded]
            }
            InputState::MovingElement { id, offset, .. } => {
                let Some(element) = self.doc.get(&id) else {
                    return Vec::new();
                };
                let candidate = Rect::from_parts(Point::new(page_pt.x - offset.x, page_pt.y - offset.y), element.size);
                let placed = self.place_moved(&id, candidate);
                self.doc.update(&id, &ElementPatch::position(placed.origin()));
                vec![Action::RenderNeeded]
            }
            InputState::ResizingElement { id, handle, start_pointer, start_rect } => {
                let Some(element) = self.doc.get(&id) else {
                    return Vec::new();
                };
                // Deltas are taken in the element's own frame so handles track a rotated box.
                let delta = rotate_point(
                    Point::new(page_pt.x - start_pointer.x, page_pt.y - start_pointer.y),
                    Point::new(0.0, 0.0),
                    -element.rotation,
                );
                let s = &self.settings;
                let mut rect = s.resize_mode.resize(handle, start_rect, delta.x, delta.y, s.min_size);
                if s.snap_to_grid {
                    rect = snap_resized(handle, start_rect, rect, s.grid_size, s.min_size);
                }
                let rect = pin_rotated_anchor(handle, start_rect, rect, element.rotation);
                self.ui.guides = self.guides_for(&id, rect);
                self.doc.update(&id, &ElementPatch::rect(rect));
                vec![Action::RenderNeeded]
            }
            InputState::RotatingElement { id, center, start_pointer, orig_rotation } => {
                let rotation = rotate_from_pointers(center, start_pointer, page_pt, orig_rotation);
                self.doc.update(&id, &ElementPatch::rotation(rotation));
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        self.ui.guides.clear();
        self.doc.set_dragging(None);

        match state {
            InputState::Idle => Vec::new(),
            InputState::DraggingFromPalette { kind, start_screen } => {
                self.finish_palette_drag(kind, start_screen, screen_pt)
            }
            InputState::MovingElement { id, orig, .. } => self.settle(&id, |e| {
                (e.position != orig).then(|| ElementPatch::position(e.position))
            }),
            InputState::ResizingElement { id, start_rect, .. } => {
                self.settle(&id, |e| (e.rect() != start_rect).then(|| ElementPatch::rect(e.rect())))
            }
            InputState::RotatingElement { id, orig_rotation, .. } => self.settle(&id, |e| {
                (e.rotation.to_bits() != orig_rotation.to_bits()).then(|| ElementPatch::rotation(e.rotation))
            }),
        }
    }

    /// Escape aborts a gesture (or closes the editor when idle); Delete and
    /// Backspace remove the selected element when idle.
    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_escape() {
            if !self.input.is_idle() {
                return self.cancel_gesture();
            }
            return self.close_editor();
        }
        if key.is_delete() && self.input.is_idle() && !self.ui.preview && self.doc.editing().is_none() {
            if let Some(id) = self.doc.selected().cloned() {
                return self.delete(&id);
            }
        }
        Vec::new()
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&ElementId> {
        self.doc.selected()
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.ui.guides
    }

    // --- Internals ---

    /// Where a ghost sits for a pointer at `screen_pt`: top-left under the
    /// pointer, grid-snapped when enabled.
    fn ghost_origin(&self, screen_pt: Point) -> Point {
        let page_pt = self.page.screen_to_page(screen_pt);
        if self.settings.snap_to_grid {
            return snap_point(page_pt, self.settings.grid_size);
        }
        page_pt
    }

    /// Apply grid, guide and page constraints to a moved box and record guides.
    fn place_moved(&mut self, id: &ElementId, candidate: Rect) -> Rect {
        let s = &self.settings;
        let mut rect = candidate;
        if s.snap_to_grid {
            rect = Rect::from_parts(snap_point(rect.origin(), s.grid_size), rect.size());
        }

        let mut guides = self.guides_for(id, rect);
        if s.clamp_to_guides && !guides.is_empty() {
            let shift = guide_offset(rect, &guides);
            rect.x += shift.x;
            rect.y += shift.y;
            guides = self.guides_for(id, rect);
        }
        if self.settings.clamp_to_page {
            rect = self.page.clamp_rect(rect);
        }

        self.ui.guides = guides;
        rect
    }

    fn guides_for(&self, id: &ElementId, rect: Rect) -> Vec<Guide> {
        if !self.settings.snap_to_elements {
            return Vec::new();
        }
        alignment_guides(rect, self.doc.rects_except(id), self.settings.align_threshold)
    }

    fn finish_palette_drag(&mut self, kind: ElementKind, start_screen: Point, end_screen: Point) -> Vec<Action> {
        let travel = start_screen.distance_to(end_screen);
        if !self.page.contains_screen(end_screen) || travel < self.settings.min_drag_distance {
            self.doc.discard_ghost();
            debug!(%kind, travel, "palette drop discarded");
            return vec![Action::RenderNeeded];
        }

        let origin = self.ghost_origin(end_screen);
        self.doc.move_ghost(origin);
        let Some(element) = self.doc.commit_ghost().and_then(|id| self.doc.get(&id)).cloned() else {
            return vec![Action::RenderNeeded];
        };
        debug!(id = %element.id, %kind, "palette drop committed");
        vec![Action::ElementCreated(element), Action::RenderNeeded]
    }

    /// Emit the final update for a released gesture if `changed` reports one.
    fn settle<F>(&mut self, id: &ElementId, changed: F) -> Vec<Action>
    where
        F: FnOnce(&Element) -> Option<ElementPatch>,
    {
        let patch = self.doc.get(id).and_then(changed);
        match patch {
            Some(patch) => vec![Action::ElementUpdated { id: id.clone(), patch }, Action::RenderNeeded],
            None => vec![Action::RenderNeeded],
        }
    }

    fn update_hover(&mut self, page_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let cursor = if self.ui.preview {
            "default"
        } else {
            hit::hit_test(page_pt, &self.doc, self.settings.hit_threshold)
                .map_or("default", |h| hit::cursor_for(h.part, modifiers.rotate()))
        };
        self.set_cursor(cursor)
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Vec<Action> {
        if self.ui.cursor == cursor {
            return Vec::new();
        }
        self.ui.cursor = cursor;
        vec![Action::SetCursor(cursor.to_owned())]
    }
}

fn rotating(element: &Element, page_pt: Point) -> InputState {
    InputState::RotatingElement {
        id: element.id.clone(),
        center: element.rect().center(),
        start_pointer: page_pt,
        orig_rotation: element.rotation,
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    painter: Box<dyn ContentPainter>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element, drawing element
    /// content with the built-in text painter.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, settings: EditorSettings) -> Self {
        Self::with_painter(canvas, settings, Box::new(TextPainter))
    }

    #[must_use]
    pub fn with_painter(canvas: HtmlCanvasElement, settings: EditorSettings, painter: Box<dyn ContentPainter>) -> Self {
        Self { canvas, painter, core: EngineCore::with_settings(settings) }
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("context is not CanvasRenderingContext2d"))?;

        let scene = surface::compose(&self.core.doc, &self.core.page, &self.core.ui);
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        render::draw(&ctx, &scene, self.painter.as_ref(), width, height)
    }

    // --- Delegated inputs ---

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.canvas.set_width(width.max(0.0).round() as u32);
        self.canvas.set_height(height.max(0.0).round() as u32);
        self.core.set_viewport(width, height)
    }

    pub fn load_document(&mut self, elements: Vec<Element>) -> Vec<Action> {
        self.core.load_document(elements)
    }

    pub fn on_palette_down(&mut self, kind: ElementKind, screen_pt: Point) -> Vec<Action> {
        self.core.on_palette_down(kind, screen_pt)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&ElementId> {
        self.core.selection()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.core.snapshot()
    }
}
