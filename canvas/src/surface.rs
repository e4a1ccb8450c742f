//! Surface composition: what the page shows, in paint order, without touching
//! the canvas.
//!
//! [`compose`] flattens the store, the ghost, the selection and the current
//! guides into a [`Scene`] that the Canvas2D painter walks top to bottom.
//! Keeping this step pure lets the layering rules be tested natively.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::content::{ElementContent, FontWeight};
use crate::doc::{DocStore, Element, ElementId};
use crate::geometry::{Handle, Point, Rect};
use crate::hit::{resize_handle_positions, rotate_handle_position};
use crate::input::UiState;
use crate::page::PageFrame;
use crate::snap::Guide;

/// How an element is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStyle {
    Normal,
    /// Under an active move; drawn slightly faded.
    Dragging,
    /// The palette preview; drawn translucent.
    Ghost,
}

#[derive(Debug, Clone, Copy)]
pub struct SceneItem<'a> {
    pub element: &'a Element,
    pub style: ItemStyle,
}

/// Affordances drawn over the selected element, in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOverlay {
    pub id: ElementId,
    pub rect: Rect,
    pub rotation: f64,
    pub handles: [(Handle, Point); 8],
    pub rotate_handle: Point,
}

#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub page: PageFrame,
    /// Committed elements in store order, then the ghost.
    pub items: Vec<SceneItem<'a>>,
    pub selection: Option<SelectionOverlay>,
    pub guides: Vec<Guide>,
    pub preview: bool,
}

/// Build the scene for the current editor state.
///
/// Preview mode drops every editing affordance: no selection overlay and no
/// guides.
#[must_use]
pub fn compose<'a>(doc: &'a DocStore, page: &PageFrame, ui: &UiState) -> Scene<'a> {
    let mut items: Vec<SceneItem<'a>> = doc
        .iter()
        .map(|element| {
            let style = if doc.is_dragging(&element.id) { ItemStyle::Dragging } else { ItemStyle::Normal };
            SceneItem { element, style }
        })
        .collect();
    if let Some(ghost) = doc.ghost() {
        items.push(SceneItem { element: ghost, style: ItemStyle::Ghost });
    }

    let selection = if ui.preview { None } else { doc.selected_element().map(overlay_for) };
    let guides = if ui.preview { Vec::new() } else { ui.guides.clone() };

    Scene { page: *page, items, selection, guides, preview: ui.preview }
}

fn overlay_for(element: &Element) -> SelectionOverlay {
    let rect = element.rect();
    SelectionOverlay {
        id: element.id.clone(),
        rect,
        rotation: element.rotation,
        handles: resize_handle_positions(rect, element.rotation),
        rotate_handle: rotate_handle_position(rect, element.rotation),
    }
}

// =============================================================
// Text layout
// =============================================================

/// One line of text content, before wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub size: f64,
    pub bold: bool,
}

impl TextLine {
    fn new(text: impl Into<String>, size: f64, bold: bool) -> Self {
        Self { text: text.into(), size, bold }
    }
}

const BODY_PX: f64 = 12.0;
const HEADING_PX: f64 = 14.0;

/// Text the built-in painter shows for `content`. Graphic kinds (shape,
/// line, divider) have none; an image shows its alt text only when it has no
/// source yet.
#[must_use]
pub fn text_lines(content: &ElementContent) -> Vec<TextLine> {
    match content {
        ElementContent::Text(c) => vec![TextLine::new(&c.text, c.font_size, c.font_weight == FontWeight::Bold)],
        ElementContent::Summary(c) => vec![TextLine::new(&c.text, c.font_size, c.font_weight == FontWeight::Bold)],
        ElementContent::Header(c) => vec![
            TextLine::new(&c.name, c.font_size, c.font_weight == FontWeight::Bold),
            TextLine::new(&c.title, (c.font_size * 0.6).max(BODY_PX), false),
        ],
        ElementContent::Image(c) => {
            if c.src.is_empty() {
                vec![TextLine::new(&c.alt, BODY_PX, false)]
            } else {
                Vec::new()
            }
        }
        ElementContent::Experience(c) => {
            let end = if c.current { "Present" } else { c.end_date.as_str() };
            vec![
                TextLine::new(&c.title, HEADING_PX, true),
                TextLine::new(format!("{} · {}", c.company, c.location), BODY_PX, false),
                TextLine::new(format!("{} - {end}", c.start_date), BODY_PX, false),
                TextLine::new(&c.description, BODY_PX, false),
            ]
        }
        ElementContent::Education(c) => vec![
            TextLine::new(&c.degree, HEADING_PX, true),
            TextLine::new(format!("{} · {}", c.school, c.location), BODY_PX, false),
            TextLine::new(format!("{} - {}", c.start_date, c.end_date), BODY_PX, false),
            TextLine::new(&c.description, BODY_PX, false),
        ],
        ElementContent::Skill(c) => vec![TextLine::new(
            c.skills.iter().filter(|s| !s.trim().is_empty()).cloned().collect::<Vec<_>>().join(" · "),
            BODY_PX,
            false,
        )],
        ElementContent::Contact(c) => [
            Some(c.email.as_str()),
            Some(c.phone.as_str()),
            Some(c.location.as_str()),
            Some(c.website.as_str()),
            c.linkedin.as_deref(),
            c.github.as_deref(),
            c.portfolio.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|v| !v.is_empty())
        .map(|v| TextLine::new(v, BODY_PX, false))
        .collect(),
        ElementContent::Projects(c) => c
            .projects
            .iter()
            .flat_map(|p| {
                let mut lines = vec![TextLine::new(&p.name, HEADING_PX, true), TextLine::new(&p.description, BODY_PX, false)];
                if !p.technologies.is_empty() {
                    lines.push(TextLine::new(p.technologies.join(", "), BODY_PX, false));
                }
                lines
            })
            .collect(),
        ElementContent::Certifications(c) => c
            .certifications
            .iter()
            .map(|cert| TextLine::new(format!("{} · {} ({})", cert.name, cert.issuer, cert.date), BODY_PX, false))
            .collect(),
        ElementContent::Languages(c) => c
            .languages
            .iter()
            .map(|l| TextLine::new(format!("{}: {:?}", l.name, l.proficiency), BODY_PX, false))
            .collect(),
        ElementContent::References(c) => c
            .references
            .iter()
            .flat_map(|r| {
                [
                    TextLine::new(&r.name, HEADING_PX, true),
                    TextLine::new(format!("{}, {}", r.title, r.company), BODY_PX, false),
                ]
            })
            .collect(),
        ElementContent::Shape(_) | ElementContent::Line(_) | ElementContent::Divider(_) => Vec::new(),
    }
}
