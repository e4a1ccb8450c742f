#![allow(clippy::float_cmp)]

use super::*;
use crate::config::ResizeMode;
use crate::geometry::Handle;
use crate::content::{SkillContent, TextContent};
use crate::snap::{AlignLine, Orientation};

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn id(raw: &str) -> ElementId {
    ElementId::from(raw)
}

fn make_element(raw_id: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
    Element {
        id: id(raw_id),
        content: ElementContent::default_for(ElementKind::Text),
        position: pt(x, y),
        size: Size::new(w, h),
        rotation: 0.0,
    }
}

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn alt_modifier() -> Modifiers {
    Modifiers { alt: true, ..Modifiers::default() }
}

fn key(name: &str) -> Key {
    Key(name.to_owned())
}

/// Engine with the page at the canvas origin, so screen and page coordinates agree.
fn core_with(elements: Vec<Element>) -> EngineCore {
    let mut core = EngineCore::new();
    core.load_document(elements);
    core
}

fn core_with_settings(settings: EditorSettings, elements: Vec<Element>) -> EngineCore {
    let mut core = EngineCore::with_settings(settings);
    core.load_document(elements);
    core
}

/// One element at (50,50) sized 100x100, as in the resize scenarios.
fn square() -> EngineCore {
    core_with(vec![make_element("a", 50.0, 50.0, 100.0, 100.0)])
}

fn drag(core: &mut EngineCore, from: Point, to: Point, modifiers: Modifiers) -> Vec<Action> {
    core.on_pointer_down(from, Button::Primary, modifiers);
    core.on_pointer_move(to, modifiers);
    core.on_pointer_up(to, Button::Primary, modifiers)
}

fn rect_of(core: &EngineCore, raw_id: &str) -> Rect {
    core.element(&id(raw_id)).map(Element::rect).unwrap()
}

fn has_update(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::ElementUpdated { .. }))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Palette placement
// =============================================================

#[test]
fn palette_drop_on_page_creates_element() {
    let mut core = core_with(vec![make_element("a", 0.0, 0.0, 50.0, 50.0)]);
    core.on_palette_down(ElementKind::Text, pt(500.0, 500.0));
    core.on_pointer_move(pt(300.0, 320.0), no_modifiers());
    let actions = core.on_pointer_up(pt(300.0, 320.0), Button::Primary, no_modifiers());

    let Some(Action::ElementCreated(created)) = actions.first() else {
        panic!("expected ElementCreated, got {actions:?}");
    };
    assert_eq!(created.kind(), ElementKind::Text);
    assert_eq!(created.content, ElementContent::default_for(ElementKind::Text));
    assert_eq!(created.position, pt(300.0, 320.0));
    assert_eq!(created.size, Size::new(200.0, 100.0));
    assert_eq!(actions.last(), Some(&Action::RenderNeeded));

    let snapshot = core.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[1].id, created.id);
    assert!(core.doc.ghost().is_none());
    assert!(core.input.is_idle());
}

#[test]
fn palette_drop_is_not_selected() {
    let mut core = EngineCore::new();
    core.on_palette_down(ElementKind::Skill, pt(100.0, 100.0));
    let actions = core.on_pointer_up(pt(200.0, 200.0), Button::Primary, no_modifiers());
    assert!(!actions.iter().any(|a| matches!(a, Action::SelectionChanged(_))));
    assert!(core.selection().is_none());
}

#[test]
fn palette_ghost_follows_pointer() {
    let mut core = EngineCore::new();
    core.on_palette_down(ElementKind::Shape, pt(10.0, 10.0));
    assert_eq!(core.doc.ghost().map(|g| g.position), Some(pt(10.0, 10.0)));

    let actions = core.on_pointer_move(pt(123.0, 77.0), no_modifiers());
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(core.doc.ghost().map(|g| g.position), Some(pt(123.0, 77.0)));
    assert!(core.snapshot().is_empty());
}

#[test]
fn palette_short_drag_discards_ghost() {
    let mut core = EngineCore::new();
    core.on_palette_down(ElementKind::Text, pt(300.0, 300.0));
    let actions = core.on_pointer_up(pt(305.0, 300.0), Button::Primary, no_modifiers());
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert!(core.snapshot().is_empty());
    assert!(core.doc.ghost().is_none());
}

#[test]
fn palette_drop_off_page_discards_ghost() {
    let mut core = EngineCore::new();
    core.set_viewport(1000.0, 1200.0);
    assert!(!core.page.contains_screen(pt(10.0, 10.0)));

    core.on_palette_down(ElementKind::Text, pt(500.0, 500.0));
    core.on_pointer_move(pt(10.0, 10.0), no_modifiers());
    core.on_pointer_up(pt(10.0, 10.0), Button::Primary, no_modifiers());
    assert!(core.snapshot().is_empty());
}

#[test]
fn palette_drop_converts_to_page_coordinates() {
    let mut core = EngineCore::new();
    core.set_viewport(1000.0, 1200.0);
    let origin = core.page.origin;

    core.on_palette_down(ElementKind::Header, pt(500.0, 500.0));
    let actions = core.on_pointer_up(pt(origin.x + 40.0, origin.y + 60.0), Button::Primary, no_modifiers());
    let Some(Action::ElementCreated(created)) = actions.first() else {
        panic!("expected ElementCreated");
    };
    assert_eq!(created.position, pt(40.0, 60.0));
}

#[test]
fn palette_ghost_snaps_to_grid() {
    let settings = EditorSettings { snap_to_grid: true, ..EditorSettings::default() };
    let mut core = EngineCore::with_settings(settings);
    core.on_palette_down(ElementKind::Text, pt(500.0, 500.0));
    core.on_pointer_move(pt(303.0, 297.0), no_modifiers());
    assert_eq!(core.doc.ghost().map(|g| g.position), Some(pt(300.0, 300.0)));

    let actions = core.on_pointer_up(pt(303.0, 297.0), Button::Primary, no_modifiers());
    assert!(matches!(&actions[0], Action::ElementCreated(e) if e.position == pt(300.0, 300.0)));
}

#[test]
fn palette_ignored_during_gesture() {
    let mut core = square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(core.on_palette_down(ElementKind::Text, pt(10.0, 10.0)).is_empty());
    assert!(core.doc.ghost().is_none());
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_se_corner() {
    let mut core = square();
    let actions = drag(&mut core, pt(148.0, 148.0), pt(168.0, 178.0), no_modifiers());
    assert_eq!(rect_of(&core, "a"), Rect::new(50.0, 50.0, 120.0, 130.0));
    assert_eq!(
        actions[0],
        Action::ElementUpdated { id: id("a"), patch: ElementPatch::rect(Rect::new(50.0, 50.0, 120.0, 130.0)) }
    );
}

#[test]
fn resize_nw_corner_keeps_opposite_corner() {
    let mut core = square();
    drag(&mut core, pt(52.0, 52.0), pt(62.0, 62.0), no_modifiers());
    let rect = rect_of(&core, "a");
    assert_eq!(rect, Rect::new(60.0, 60.0, 90.0, 90.0));
    assert_eq!((rect.right(), rect.bottom()), (150.0, 150.0));
}

#[test]
fn resize_edge_changes_one_axis() {
    let mut core = square();
    drag(&mut core, pt(148.0, 100.0), pt(178.0, 140.0), no_modifiers());
    assert_eq!(rect_of(&core, "a"), Rect::new(50.0, 50.0, 130.0, 100.0));
}

#[test]
fn resize_respects_minimum_size() {
    let mut core = square();
    drag(&mut core, pt(148.0, 148.0), pt(0.0, 0.0), no_modifiers());
    assert_eq!(rect_of(&core, "a"), Rect::new(50.0, 50.0, 20.0, 20.0));
}

#[test]
fn resize_uniform_mode_keeps_aspect() {
    let settings = EditorSettings { resize_mode: ResizeMode::Uniform, ..EditorSettings::default() };
    let mut core = core_with_settings(settings, vec![make_element("a", 50.0, 50.0, 100.0, 100.0)]);
    drag(&mut core, pt(148.0, 148.0), pt(168.0, 178.0), no_modifiers());
    assert_eq!(rect_of(&core, "a"), Rect::new(50.0, 50.0, 130.0, 130.0));
}

#[test]
fn resize_snaps_to_grid() {
    let settings = EditorSettings { snap_to_grid: true, ..EditorSettings::default() };
    let mut core = core_with_settings(settings, vec![make_element("a", 50.0, 50.0, 100.0, 100.0)]);
    drag(&mut core, pt(148.0, 148.0), pt(171.0, 174.0), no_modifiers());
    assert_eq!(rect_of(&core, "a"), Rect::new(50.0, 50.0, 120.0, 130.0));
}

#[test]
fn resize_rotated_element_uses_local_frame() {
    let mut rotated = make_element("a", 50.0, 50.0, 100.0, 100.0);
    rotated.rotation = 180.0;
    let mut core = core_with(vec![rotated]);

    // The local se corner sits at the page-space top-left after a half turn.
    core.on_pointer_down(pt(52.0, 52.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::ResizingElement { handle: crate::geometry::Handle::Se, .. }));
    core.on_pointer_move(pt(32.0, 22.0), no_modifiers());

    let rect = rect_of(&core, "a");
    assert!(approx(rect.width, 120.0), "{rect:?}");
    assert!(approx(rect.height, 130.0), "{rect:?}");

    // The opposite corner stays where it was drawn and the grabbed corner follows the pointer.
    let anchor = rotate_point(rect.handle_point(Handle::Nw), rect.center(), 180.0);
    assert!(approx(anchor.x, 150.0) && approx(anchor.y, 150.0), "{anchor:?}");
    let grabbed = rotate_point(rect.handle_point(Handle::Se), rect.center(), 180.0);
    assert!(approx(grabbed.x, 30.0) && approx(grabbed.y, 20.0), "{grabbed:?}");
}

#[test]
fn resize_quarter_turned_edge_keeps_opposite_edge() {
    let mut rotated = make_element("a", 50.0, 50.0, 100.0, 100.0);
    rotated.rotation = 90.0;
    let mut core = core_with(vec![rotated]);

    // A quarter turn puts the local e handle at the page-space bottom middle.
    core.on_pointer_down(pt(100.0, 150.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::ResizingElement { handle: Handle::E, .. }));
    core.on_pointer_move(pt(100.0, 190.0), no_modifiers());

    let rect = rect_of(&core, "a");
    assert!(approx(rect.width, 140.0) && approx(rect.height, 100.0), "{rect:?}");
    let anchor = rotate_point(rect.handle_point(Handle::W), rect.center(), 90.0);
    assert!(approx(anchor.x, 100.0) && approx(anchor.y, 50.0), "{anchor:?}");
}

#[test]
fn resize_without_change_emits_no_update() {
    let mut core = square();
    let actions = drag(&mut core, pt(148.0, 148.0), pt(148.0, 148.0), no_modifiers());
    assert!(!has_update(&actions));
}

// =============================================================
// Move
// =============================================================

#[test]
fn move_keeps_grab_offset() {
    let mut core = square();
    let actions = drag(&mut core, pt(100.0, 100.0), pt(133.0, 147.0), no_modifiers());
    assert_eq!(rect_of(&core, "a").origin(), pt(83.0, 97.0));
    assert!(actions.contains(&Action::ElementUpdated { id: id("a"), patch: ElementPatch::position(pt(83.0, 97.0)) }));
}

#[test]
fn move_snaps_to_grid_when_enabled() {
    let settings = EditorSettings { snap_to_grid: true, ..EditorSettings::default() };
    let mut core = core_with_settings(settings, vec![make_element("a", 50.0, 50.0, 100.0, 100.0)]);
    drag(&mut core, pt(100.0, 100.0), pt(133.0, 147.0), no_modifiers());
    assert_eq!(rect_of(&core, "a").origin(), pt(80.0, 100.0));
}

#[test]
fn move_is_unconstrained_by_default() {
    let mut core = square();
    drag(&mut core, pt(100.0, 100.0), pt(-200.0, 2000.0), no_modifiers());
    assert_eq!(rect_of(&core, "a").origin(), pt(-250.0, 1950.0));
}

#[test]
fn move_clamps_to_page_when_enabled() {
    let settings = EditorSettings { clamp_to_page: true, ..EditorSettings::default() };
    let mut core = core_with_settings(settings, vec![make_element("a", 50.0, 50.0, 100.0, 100.0)]);
    drag(&mut core, pt(100.0, 100.0), pt(-200.0, 2000.0), no_modifiers());
    assert_eq!(rect_of(&core, "a").origin(), pt(0.0, 1023.0));
}

#[test]
fn move_marks_element_dragging_until_release() {
    let mut core = square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(core.doc.is_dragging(&id("a")));
    core.on_pointer_up(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(!core.doc.is_dragging(&id("a")));
}

#[test]
fn click_without_move_emits_no_update() {
    let mut core = square();
    let actions = drag(&mut core, pt(100.0, 100.0), pt(100.0, 100.0), no_modifiers());
    assert!(!has_update(&actions));
}

#[test]
fn move_topmost_element_when_overlapping() {
    let mut core = core_with(vec![
        make_element("below", 0.0, 0.0, 200.0, 200.0),
        make_element("above", 50.0, 50.0, 100.0, 100.0),
    ]);
    drag(&mut core, pt(100.0, 100.0), pt(110.0, 100.0), no_modifiers());
    assert_eq!(rect_of(&core, "above").origin(), pt(60.0, 50.0));
    assert_eq!(rect_of(&core, "below").origin(), pt(0.0, 0.0));
}

// =============================================================
// Alignment guides
// =============================================================

fn guide_pair(settings: EditorSettings) -> EngineCore {
    core_with_settings(
        settings,
        vec![make_element("a", 100.0, 300.0, 100.0, 50.0), make_element("b", 300.0, 50.0, 100.0, 50.0)],
    )
}

fn elements_snapping() -> EditorSettings {
    EditorSettings { snap_to_elements: true, ..EditorSettings::default() }
}

#[test]
fn guide_reported_within_threshold() {
    let mut core = guide_pair(elements_snapping());
    core.on_pointer_down(pt(350.0, 75.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(154.0, 75.0), no_modifiers());

    assert!(
        core.guides()
            .iter()
            .any(|g| g.orientation == Orientation::Vertical && g.line == AlignLine::Leading && g.position == 100.0)
    );
    // Guides are advisory unless clamping is on.
    assert_eq!(rect_of(&core, "b").x, 104.0);
}

#[test]
fn no_guide_outside_threshold() {
    let mut core = guide_pair(elements_snapping());
    core.on_pointer_down(pt(350.0, 75.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(250.0, 75.0), no_modifiers());
    assert!(core.guides().is_empty());
}

#[test]
fn guides_clear_on_release() {
    let mut core = guide_pair(elements_snapping());
    drag(&mut core, pt(350.0, 75.0), pt(154.0, 75.0), no_modifiers());
    assert!(core.guides().is_empty());
}

#[test]
fn guides_off_when_element_snapping_disabled() {
    let mut core = guide_pair(EditorSettings::default());
    core.on_pointer_down(pt(350.0, 75.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(154.0, 75.0), no_modifiers());
    assert!(core.guides().is_empty());
}

#[test]
fn clamp_to_guides_pulls_element_onto_line() {
    let settings = EditorSettings { clamp_to_guides: true, ..elements_snapping() };
    let mut core = guide_pair(settings);
    drag(&mut core, pt(350.0, 75.0), pt(154.0, 75.0), no_modifiers());
    assert_eq!(rect_of(&core, "b").x, 100.0);
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn rotate_handle_drag_turns_element() {
    let mut core = square();
    core.select(Some(id("a")));

    // Rotate handle: 24px above top-center; center is (100,100).
    core.on_pointer_down(pt(100.0, 26.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::RotatingElement { .. }));
    let actions = core.on_pointer_move(pt(174.0, 100.0), no_modifiers());
    assert_eq!(actions, vec![Action::RenderNeeded]);

    let actions = core.on_pointer_up(pt(174.0, 100.0), Button::Primary, no_modifiers());
    let rotation = core.element(&id("a")).map(|e| e.rotation).unwrap();
    assert!(approx(rotation, 90.0), "{rotation}");
    assert!(has_update(&actions));
    assert_eq!(rect_of(&core, "a"), Rect::new(50.0, 50.0, 100.0, 100.0));
}

#[test]
fn alt_corner_press_rotates_instead_of_resizing() {
    let mut core = square();
    core.on_pointer_down(pt(148.0, 148.0), Button::Primary, alt_modifier());
    assert!(matches!(core.input, InputState::RotatingElement { .. }));
}

#[test]
fn alt_edge_press_still_resizes() {
    let mut core = square();
    core.on_pointer_down(pt(148.0, 100.0), Button::Primary, alt_modifier());
    assert!(matches!(core.input, InputState::ResizingElement { .. }));
}

#[test]
fn rotation_wraps_into_range() {
    let mut core = square();
    core.select(Some(id("a")));
    core.on_pointer_down(pt(100.0, 26.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(26.0, 100.0), no_modifiers());
    let rotation = core.element(&id("a")).map(|e| e.rotation).unwrap();
    assert!(approx(rotation, 270.0), "{rotation}");
}

// =============================================================
// Escape / cancel
// =============================================================

#[test]
fn escape_restores_moved_element() {
    let mut core = square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(300.0, 300.0), no_modifiers());

    let actions = core.on_key_down(&key("Escape"), no_modifiers());
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(rect_of(&core, "a").origin(), pt(50.0, 50.0));
    assert!(core.input.is_idle());
    assert!(!core.doc.is_dragging(&id("a")));

    // The release that follows is a no-op.
    assert!(core.on_pointer_up(pt(300.0, 300.0), Button::Primary, no_modifiers()).is_empty());
}

#[test]
fn escape_restores_resized_element() {
    let mut core = square();
    core.on_pointer_down(pt(148.0, 148.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(250.0, 250.0), no_modifiers());
    core.on_key_down(&key("Escape"), no_modifiers());
    assert_eq!(rect_of(&core, "a"), Rect::new(50.0, 50.0, 100.0, 100.0));
}

#[test]
fn escape_restores_rotation() {
    let mut core = square();
    core.on_pointer_down(pt(148.0, 148.0), Button::Primary, alt_modifier());
    core.on_pointer_move(pt(20.0, 148.0), alt_modifier());
    core.on_key_down(&key("Escape"), no_modifiers());
    assert_eq!(core.element(&id("a")).map(|e| e.rotation), Some(0.0));
}

#[test]
fn escape_discards_palette_ghost() {
    let mut core = EngineCore::new();
    core.on_palette_down(ElementKind::Text, pt(100.0, 100.0));
    core.on_key_down(&key("Escape"), no_modifiers());
    assert!(core.doc.ghost().is_none());
    assert!(core.input.is_idle());
}

#[test]
fn escape_when_idle_closes_editor() {
    let mut core = square();
    core.open_editor(&id("a"));
    assert_eq!(core.on_key_down(&key("Escape"), no_modifiers()), vec![Action::EditorClosed]);
    assert!(core.doc.editing().is_none());
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_key_removes_selected_element() {
    let mut core = square();
    core.select(Some(id("a")));
    let actions = core.on_key_down(&key("Delete"), no_modifiers());
    assert_eq!(
        actions,
        vec![Action::ElementDeleted { id: id("a") }, Action::SelectionChanged(None), Action::RenderNeeded]
    );
    assert!(core.snapshot().is_empty());
}

#[test]
fn backspace_also_deletes() {
    let mut core = square();
    core.select(Some(id("a")));
    core.on_key_down(&key("Backspace"), no_modifiers());
    assert!(core.element(&id("a")).is_none());
}

#[test]
fn delete_key_ignored_while_editing() {
    let mut core = square();
    core.select(Some(id("a")));
    core.open_editor(&id("a"));
    assert!(core.on_key_down(&key("Delete"), no_modifiers()).is_empty());
    assert!(core.element(&id("a")).is_some());
}

#[test]
fn delete_key_without_selection_is_noop() {
    let mut core = square();
    assert!(core.on_key_down(&key("Delete"), no_modifiers()).is_empty());
}

#[test]
fn delete_clears_selection_and_editor() {
    let mut core = square();
    core.select(Some(id("a")));
    core.open_editor(&id("a"));

    let actions = core.delete(&id("a"));
    assert!(actions.contains(&Action::SelectionChanged(None)));
    assert!(actions.contains(&Action::EditorClosed));
    assert!(core.selection().is_none());
    assert!(core.doc.editing().is_none());
}

#[test]
fn delete_unknown_id_is_noop() {
    let mut core = square();
    assert!(core.delete(&id("ghost")).is_empty());
}

#[test]
fn delete_mid_gesture_ends_gesture() {
    let mut core = square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.delete(&id("a"));
    assert!(core.input.is_idle());
}

// =============================================================
// Preview mode
// =============================================================

#[test]
fn preview_ignores_presses_and_palette() {
    let mut core = square();
    core.set_preview(true);
    assert!(core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers()).is_empty());
    assert!(core.on_palette_down(ElementKind::Text, pt(10.0, 10.0)).is_empty());
    assert!(core.open_editor(&id("a")).is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn preview_hover_keeps_default_cursor() {
    let mut core = square();
    core.set_preview(true);
    assert!(core.on_pointer_move(pt(100.0, 100.0), no_modifiers()).is_empty());
    assert_eq!(core.ui.cursor, "default");
}

#[test]
fn entering_preview_aborts_gesture_and_closes_editor() {
    let mut core = square();
    core.open_editor(&id("a"));
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(200.0, 200.0), no_modifiers());

    let actions = core.set_preview(true);
    assert!(actions.contains(&Action::EditorClosed));
    assert_eq!(actions.last(), Some(&Action::RenderNeeded));
    assert_eq!(rect_of(&core, "a").origin(), pt(50.0, 50.0));
    assert!(core.input.is_idle());
}

#[test]
fn set_preview_same_value_is_noop() {
    let mut core = EngineCore::new();
    assert!(core.set_preview(false).is_empty());
}

// =============================================================
// Content edits
// =============================================================

#[test]
fn commit_content_updates_and_closes_editor() {
    let mut core = square();
    core.open_editor(&id("a"));
    let content = ElementContent::Text(TextContent { text: "Hello".into(), ..TextContent::default() });

    let actions = core.commit_content(&id("a"), content.clone()).unwrap();
    assert_eq!(actions[0], Action::ElementUpdated { id: id("a"), patch: ElementPatch::content(content.clone()) });
    assert!(actions.contains(&Action::EditorClosed));
    assert_eq!(core.element(&id("a")).map(|e| &e.content), Some(&content));
}

#[test]
fn commit_content_rejects_other_kind() {
    let mut core = square();
    let content = ElementContent::Skill(SkillContent { skills: vec!["Rust".into()] });
    let err = core.commit_content(&id("a"), content).unwrap_err();
    assert_eq!(err, ContentError::KindMismatch { expected: ElementKind::Text, found: ElementKind::Skill });
}

#[test]
fn commit_content_rejects_invalid_and_keeps_old() {
    let mut core = square();
    core.open_editor(&id("a"));
    let content = ElementContent::Text(TextContent { text: "   ".into(), ..TextContent::default() });

    let err = core.commit_content(&id("a"), content).unwrap_err();
    assert_eq!(err, ContentError::Required { field: "text" });
    assert_eq!(core.element(&id("a")).map(|e| &e.content), Some(&ElementContent::default_for(ElementKind::Text)));
    assert_eq!(core.doc.editing(), Some(&id("a")));
}

#[test]
fn commit_content_unknown_id_is_noop() {
    let mut core = square();
    let actions = core.commit_content(&id("nope"), ElementContent::default_for(ElementKind::Text)).unwrap();
    assert!(actions.is_empty());
}

// =============================================================
// Hover cursors
// =============================================================

#[test]
fn hover_cursor_tracks_zone() {
    let mut core = square();
    assert_eq!(core.on_pointer_move(pt(100.0, 100.0), no_modifiers()), vec![Action::SetCursor("move".into())]);
    assert_eq!(
        core.on_pointer_move(pt(148.0, 148.0), no_modifiers()),
        vec![Action::SetCursor("se-resize".into())]
    );
    assert_eq!(core.on_pointer_move(pt(148.0, 148.0), alt_modifier()), vec![Action::SetCursor("grab".into())]);
    assert_eq!(core.on_pointer_move(pt(400.0, 400.0), no_modifiers()), vec![Action::SetCursor("default".into())]);
}

#[test]
fn hover_cursor_unchanged_emits_nothing() {
    let mut core = square();
    core.on_pointer_move(pt(100.0, 100.0), no_modifiers());
    assert!(core.on_pointer_move(pt(101.0, 100.0), no_modifiers()).is_empty());
}

// =============================================================
// Selection
// =============================================================

#[test]
fn press_selects_element() {
    let mut core = square();
    let actions = core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert_eq!(actions, vec![Action::SelectionChanged(Some(id("a"))), Action::RenderNeeded]);
    assert_eq!(core.selection(), Some(&id("a")));
}

#[test]
fn press_on_selected_element_only_repaints() {
    let mut core = square();
    core.select(Some(id("a")));
    let actions = core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert_eq!(actions, vec![Action::RenderNeeded]);
}

#[test]
fn press_on_empty_page_clears_selection() {
    let mut core = square();
    core.select(Some(id("a")));
    let actions = core.on_pointer_down(pt(400.0, 400.0), Button::Primary, no_modifiers());
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert!(core.input.is_idle());
}

#[test]
fn secondary_button_ignored() {
    let mut core = square();
    assert!(core.on_pointer_down(pt(100.0, 100.0), Button::Secondary, no_modifiers()).is_empty());
    assert!(core.selection().is_none());
}

#[test]
fn press_during_gesture_ignored() {
    let mut core = square();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(core.on_pointer_down(pt(148.0, 148.0), Button::Primary, no_modifiers()).is_empty());
    assert!(matches!(core.input, InputState::MovingElement { .. }));
}

#[test]
fn select_unknown_id_is_noop() {
    let mut core = square();
    assert!(core.select(Some(id("missing"))).is_empty());
    assert!(core.selection().is_none());
}

// =============================================================
// Document / z-order
// =============================================================

#[test]
fn load_keeps_selection_when_id_survives() {
    let mut core = square();
    core.select(Some(id("a")));
    let actions = core.load_document(vec![make_element("a", 0.0, 0.0, 10.0, 10.0), make_element("b", 0.0, 0.0, 10.0, 10.0)]);
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(core.selection(), Some(&id("a")));
}

#[test]
fn load_drops_vanished_selection_and_editor() {
    let mut core = square();
    core.select(Some(id("a")));
    core.open_editor(&id("a"));
    let actions = core.load_document(vec![make_element("b", 0.0, 0.0, 10.0, 10.0)]);
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::EditorClosed, Action::RenderNeeded]);
}

#[test]
fn reorder_changes_paint_order() {
    let mut core = core_with(vec![
        make_element("a", 0.0, 0.0, 10.0, 10.0),
        make_element("b", 0.0, 0.0, 10.0, 10.0),
        make_element("c", 0.0, 0.0, 10.0, 10.0),
    ]);
    assert_eq!(core.bring_to_front(&id("a")), vec![Action::ElementsReordered, Action::RenderNeeded]);
    core.send_to_back(&id("c"));
    let order: Vec<String> = core.snapshot().iter().map(|e| e.id.to_string()).collect();
    assert_eq!(order, vec!["c", "b", "a"]);
    assert!(core.bring_to_front(&id("zzz")).is_empty());
}

#[test]
fn viewport_centers_page() {
    let mut core = EngineCore::new();
    assert_eq!(core.set_viewport(1000.0, 1000.0), vec![Action::RenderNeeded]);
    assert_eq!(core.page.origin, pt(103.0, 0.0));
}
