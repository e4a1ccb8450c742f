//! Rendering: draws a composed [`Scene`] to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only scene from [`crate::surface::compose`] and produces
//! pixels. It does not mutate any application state.
//!
//! Per-kind content drawing goes through the [`ContentPainter`] trait so a host
//! can substitute its own element renderer. [`TextPainter`] is the built-in one.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::{FRAC_PI_2, PI};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::HANDLE_RADIUS_PX;
use crate::content::{DividerContent, DividerStyle, ElementContent, ImageContent, LineContent, LineStyle, ShapeContent, ShapeType};
use crate::doc::Element;
use crate::snap::{Guide, Orientation};
use crate::surface::{ItemStyle, Scene, SelectionOverlay, text_lines};

const SELECTION_COLOR: &str = "#3b82f6";
const GUIDE_COLOR: &str = "#ec4899";
const TEXT_COLOR: &str = "#1f2937";
const BACKDROP_COLOR: &str = "#f3f4f6";

/// Selection and guide dash segment length in pixels.
const DASH_PX: f64 = 4.0;

/// Inner radius of the star shape relative to the outer radius.
const STAR_INNER_RATIO: f64 = 0.5;

/// Padding between an element's box and its text.
const TEXT_PADDING_PX: f64 = 6.0;

/// Draws one element's content.
///
/// The context is already translated to the element center and rotated, so
/// the element box spans `(-w/2, -h/2)` to `(w/2, h/2)`.
pub trait ContentPainter {
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    fn paint(&self, ctx: &CanvasRenderingContext2d, element: &Element, preview: bool) -> Result<(), JsValue>;
}

/// Built-in painter: graphic kinds are drawn as shapes, everything else as
/// wrapped text lines from [`text_lines`].
pub struct TextPainter;

impl ContentPainter for TextPainter {
    fn paint(&self, ctx: &CanvasRenderingContext2d, element: &Element, _preview: bool) -> Result<(), JsValue> {
        let (w, h) = (element.size.width, element.size.height);
        match &element.content {
            ElementContent::Shape(c) => draw_shape(ctx, c, w, h),
            ElementContent::Line(c) => draw_line(ctx, c, w, h),
            ElementContent::Divider(c) => draw_divider(ctx, c, w, h),
            ElementContent::Image(c) => {
                draw_image_frame(ctx, c, w, h)?;
                draw_text_block(ctx, element, w, h)
            }
            _ => draw_text_block(ctx, element, w, h),
        }
    }
}

/// Draw the full scene: backdrop, page, elements, selection UI and guides.
///
/// `viewport_w` and `viewport_h` are the canvas size in pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene<'_>,
    painter: &dyn ContentPainter,
    viewport_w: f64,
    viewport_h: f64,
) -> Result<(), JsValue> {
    // Layer 1: backdrop and page.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKDROP_COLOR);
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);

    ctx.translate(scene.page.origin.x, scene.page.origin.y)?;
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, scene.page.size.width, scene.page.size.height);
    ctx.set_stroke_style_str("#d1d5db");
    ctx.set_line_width(1.0);
    ctx.stroke_rect(0.0, 0.0, scene.page.size.width, scene.page.size.height);

    // Layer 2: elements in paint order, ghost last.
    for item in &scene.items {
        ctx.save();
        translate_and_rotate(ctx, item.element)?;
        ctx.set_global_alpha(match item.style {
            ItemStyle::Normal => 1.0,
            ItemStyle::Dragging => 0.8,
            ItemStyle::Ghost => 0.5,
        });
        painter.paint(ctx, item.element, scene.preview)?;
        ctx.restore();
    }

    // Layer 3: selection UI and guides.
    if let Some(ref selection) = scene.selection {
        draw_selection(ctx, selection)?;
    }
    for guide in &scene.guides {
        draw_guide(ctx, guide)?;
    }
    Ok(())
}

// =============================================================
// Graphic kinds
// =============================================================

fn draw_shape(ctx: &CanvasRenderingContext2d, c: &ShapeContent, w: f64, h: f64) -> Result<(), JsValue> {
    let hw = w / 2.0;
    let hh = h / 2.0;

    ctx.save();
    ctx.rotate(c.rotation.to_radians())?;
    if let Some(opacity) = c.opacity {
        ctx.set_global_alpha(ctx.global_alpha() * opacity);
    }

    ctx.begin_path();
    match c.shape {
        ShapeType::Square => ctx.rect(-hw, -hh, w, h),
        ShapeType::Circle => ctx.ellipse(0.0, 0.0, hw, hh, 0.0, 0.0, 2.0 * PI)?,
        ShapeType::Triangle => {
            ctx.move_to(0.0, -hh);
            ctx.line_to(hw, hh);
            ctx.line_to(-hw, hh);
        }
        ShapeType::Diamond => {
            ctx.move_to(0.0, -hh); // top
            ctx.line_to(hw, 0.0); // right
            ctx.line_to(0.0, hh); // bottom
            ctx.line_to(-hw, 0.0); // left
        }
        ShapeType::Star => {
            for i in 0..10 {
                let angle = (PI / 5.0).mul_add(f64::from(i), -FRAC_PI_2);
                let ratio = if i % 2 == 0 { 1.0 } else { STAR_INNER_RATIO };
                let (px, py) = (hw * ratio * angle.cos(), hh * ratio * angle.sin());
                if i == 0 {
                    ctx.move_to(px, py);
                } else {
                    ctx.line_to(px, py);
                }
            }
        }
    }
    ctx.close_path();

    ctx.set_fill_style_str(&c.color);
    ctx.fill();
    if let Some(ref border) = c.border_color {
        ctx.set_stroke_style_str(border);
        ctx.set_line_width(c.border_width.unwrap_or(1.0));
        ctx.stroke();
    }

    ctx.restore();
    Ok(())
}

fn draw_line(ctx: &CanvasRenderingContext2d, c: &LineContent, w: f64, _h: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.rotate(c.angle.to_radians())?;
    set_dash(ctx, c.thickness, match c.style {
        LineStyle::Solid => None,
        LineStyle::Dashed => Some((c.thickness * 4.0, c.thickness * 3.0)),
        LineStyle::Dotted => Some((c.thickness, c.thickness * 2.0)),
    })?;
    ctx.set_stroke_style_str(&c.color);

    // The stroke spans the box width; `length` only matters to hosts that size by it.
    ctx.begin_path();
    ctx.move_to(-w / 2.0, 0.0);
    ctx.line_to(w / 2.0, 0.0);
    ctx.stroke();

    ctx.restore();
    Ok(())
}

fn draw_divider(ctx: &CanvasRenderingContext2d, c: &DividerContent, w: f64, _h: f64) -> Result<(), JsValue> {
    ctx.save();
    let thickness = if c.style == DividerStyle::Thick { c.thickness * 2.0 } else { c.thickness };
    set_dash(ctx, thickness, match c.style {
        DividerStyle::Line | DividerStyle::Thick => None,
        DividerStyle::Dots => Some((thickness, thickness * 2.0)),
        DividerStyle::Dashes => Some((thickness * 4.0, thickness * 3.0)),
    })?;
    ctx.set_stroke_style_str(&c.color);

    ctx.begin_path();
    ctx.move_to(-w / 2.0, 0.0);
    ctx.line_to(w / 2.0, 0.0);
    ctx.stroke();

    ctx.restore();
    Ok(())
}

/// Images are loaded by the host; the canvas shows the frame only.
fn draw_image_frame(ctx: &CanvasRenderingContext2d, c: &ImageContent, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.save();
    if let Some(opacity) = c.opacity {
        ctx.set_global_alpha(ctx.global_alpha() * opacity);
    }
    ctx.begin_path();
    if c.rounded {
        ctx.ellipse(0.0, 0.0, w / 2.0, h / 2.0, 0.0, 0.0, 2.0 * PI)?;
    } else {
        ctx.rect(-w / 2.0, -h / 2.0, w, h);
    }
    ctx.set_fill_style_str("#e5e7eb");
    ctx.fill();
    ctx.set_stroke_style_str(c.border_color.as_deref().unwrap_or("#9ca3af"));
    ctx.set_line_width(c.border_width.unwrap_or(1.0));
    ctx.stroke();
    ctx.restore();
    Ok(())
}

// =============================================================
// Text
// =============================================================

fn draw_text_block(ctx: &CanvasRenderingContext2d, element: &Element, w: f64, h: f64) -> Result<(), JsValue> {
    let lines = text_lines(&element.content);
    if lines.is_empty() {
        return Ok(());
    }

    let color = match &element.content {
        ElementContent::Text(c) => c.color.as_deref().unwrap_or(TEXT_COLOR),
        _ => TEXT_COLOR,
    };
    let max_w = (w - TEXT_PADDING_PX * 2.0).max(1.0);
    let left = -w / 2.0 + TEXT_PADDING_PX;
    let bottom = h / 2.0;

    ctx.save();
    ctx.set_fill_style_str(color);
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");

    let mut y = -h / 2.0 + TEXT_PADDING_PX;
    'outer: for line in &lines {
        let weight = if line.bold { "bold " } else { "" };
        ctx.set_font(&format!("{weight}{}px sans-serif", line.size));
        let line_height = line.size * 1.25;
        for wrapped in wrap_text_lines(ctx, &line.text, max_w) {
            if y + line_height > bottom {
                break 'outer;
            }
            ctx.fill_text(&wrapped, left, y)?;
            y += line_height;
        }
    }

    ctx.restore();
    Ok(())
}

fn wrap_text_lines(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() { word.to_owned() } else { format!("{current} {word}") };
            if current.is_empty() || measured_text_width(ctx, &candidate) <= max_w {
                current = candidate;
            } else {
                out.push(std::mem::replace(&mut current, word.to_owned()));
            }
        }
        if !current.is_empty() {
            out.push(fit_text_with_ellipsis(ctx, &current, max_w));
        }
    }
    out
}

fn fit_text_with_ellipsis(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> String {
    if measured_text_width(ctx, text) <= max_w {
        return text.to_owned();
    }

    let ellipsis = "...";
    let mut chars: Vec<char> = text.chars().collect();
    while chars.pop().is_some() {
        let candidate = format!("{}{ellipsis}", chars.iter().collect::<String>().trim_end());
        if measured_text_width(ctx, &candidate) <= max_w {
            return candidate;
        }
    }
    ellipsis.to_owned()
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, selection: &SelectionOverlay) -> Result<(), JsValue> {
    let rect = selection.rect;
    let center = rect.center();

    // Dashed bounding box (rotated with the element).
    ctx.save();
    ctx.translate(center.x, center.y)?;
    ctx.rotate(selection.rotation.to_radians())?;
    ctx.set_stroke_style_str(SELECTION_COLOR);
    set_dash(ctx, 1.0, Some((DASH_PX, DASH_PX)))?;
    ctx.stroke_rect(-rect.width / 2.0, -rect.height / 2.0, rect.width, rect.height);
    ctx.restore();

    // Handles are drawn unrotated at their rotated positions.
    let half = HANDLE_RADIUS_PX / 2.0;
    ctx.save();
    ctx.set_fill_style_str("#ffffff");
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0);
    for (_, pos) in &selection.handles {
        ctx.fill_rect(pos.x - half, pos.y - half, HANDLE_RADIUS_PX, HANDLE_RADIUS_PX);
        ctx.stroke_rect(pos.x - half, pos.y - half, HANDLE_RADIUS_PX, HANDLE_RADIUS_PX);
    }

    // Connecting line from the N handle to the rotate handle.
    let n_handle = selection.handles[0].1;
    let rh = selection.rotate_handle;
    ctx.begin_path();
    ctx.move_to(n_handle.x, n_handle.y);
    ctx.line_to(rh.x, rh.y);
    ctx.stroke();

    ctx.begin_path();
    ctx.arc(rh.x, rh.y, half, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.stroke();

    ctx.restore();
    Ok(())
}

fn draw_guide(ctx: &CanvasRenderingContext2d, guide: &Guide) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(GUIDE_COLOR);
    set_dash(ctx, 1.0, Some((DASH_PX, DASH_PX)))?;
    ctx.begin_path();
    match guide.orientation {
        Orientation::Vertical => {
            ctx.move_to(guide.position, guide.start);
            ctx.line_to(guide.position, guide.end);
        }
        Orientation::Horizontal => {
            ctx.move_to(guide.start, guide.position);
            ctx.line_to(guide.end, guide.position);
        }
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the element center and apply its rotation.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, element: &Element) -> Result<(), JsValue> {
    let center = element.rect().center();
    ctx.translate(center.x, center.y)?;
    ctx.rotate(element.rotation.to_radians())?;
    Ok(())
}

/// Set line width and dash pattern; `None` means a solid stroke.
fn set_dash(ctx: &CanvasRenderingContext2d, width: f64, dash: Option<(f64, f64)>) -> Result<(), JsValue> {
    ctx.set_line_width(width);
    let pattern = js_sys::Array::new();
    if let Some((on, off)) = dash {
        pattern.push(&on.into());
        pattern.push(&off.into());
    }
    ctx.set_line_dash(&pattern)
}
