//! Snapping: grid quantization and element-to-element alignment guides.
//!
//! Both modes are pure over `(candidate, others)` and independent of each
//! other. Guides are advisory: [`alignment_guides`] only reports them, and
//! [`guide_offset`] is what a caller uses if it also wants to pull the
//! candidate onto the first guide per axis.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::geometry::{Handle, Point, Rect, Size, anchor_opposite};

/// Round `value` to the nearest multiple of `grid`. A non-positive grid is a no-op.
#[must_use]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}

#[must_use]
pub fn snap_point(pt: Point, grid: f64) -> Point {
    Point::new(snap_to_grid(pt.x, grid), snap_to_grid(pt.y, grid))
}

/// Snap a dimension to the grid without letting it fall below `min_size`.
#[must_use]
pub fn snap_dimension(value: f64, grid: f64, min_size: f64) -> f64 {
    let snapped = snap_to_grid(value.max(min_size), grid);
    if snapped >= min_size || grid <= 0.0 {
        return snapped.max(min_size);
    }
    (min_size / grid).ceil() * grid
}

/// Grid-snap the result of a handle resize.
///
/// The size is snapped first and re-anchored against the edge opposite
/// `handle` in `start`, then the origin itself is snapped so that every
/// component of the result lies on the grid.
#[must_use]
pub fn snap_resized(handle: Handle, start: Rect, resized: Rect, grid: f64, min_size: f64) -> Rect {
    let size = Size::new(
        snap_dimension(resized.width, grid, min_size),
        snap_dimension(resized.height, grid, min_size),
    );
    let anchored = anchor_opposite(handle, start, size);
    Rect::from_parts(snap_point(anchored.origin(), grid), size)
}

/// Direction of a guide line on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// A line of constant `x` (from left/right/center-x alignment).
    Vertical,
    /// A line of constant `y` (from top/bottom/center-y alignment).
    Horizontal,
}

/// Which line of a box a guide aligns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignLine {
    /// Left edge (vertical) or top edge (horizontal).
    Leading,
    /// Right edge (vertical) or bottom edge (horizontal).
    Trailing,
    /// Horizontal or vertical center.
    Center,
}

/// A dashed indicator line reported while an element is transformed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub orientation: Orientation,
    pub line: AlignLine,
    /// `x` for vertical guides, `y` for horizontal ones; taken from the other element.
    pub position: f64,
    /// Extent along the guide, spanning both elements.
    pub start: f64,
    pub end: f64,
}

/// Coordinate of `line` on `rect` along the axis `orientation` measures.
#[must_use]
pub fn line_value(rect: Rect, orientation: Orientation, line: AlignLine) -> f64 {
    match (orientation, line) {
        (Orientation::Vertical, AlignLine::Leading) => rect.x,
        (Orientation::Vertical, AlignLine::Trailing) => rect.right(),
        (Orientation::Vertical, AlignLine::Center) => rect.x + rect.width / 2.0,
        (Orientation::Horizontal, AlignLine::Leading) => rect.y,
        (Orientation::Horizontal, AlignLine::Trailing) => rect.bottom(),
        (Orientation::Horizontal, AlignLine::Center) => rect.y + rect.height / 2.0,
    }
}

const LINES: [AlignLine; 3] = [AlignLine::Leading, AlignLine::Trailing, AlignLine::Center];

/// Every alignment between `active` and `others` closer than `threshold`.
///
/// For each other box, the active box's leading, trailing and center lines are
/// compared with the same lines of the other box, per axis. Vertical guides
/// come first, in `others` order, followed by horizontal ones.
#[must_use]
pub fn alignment_guides<I>(active: Rect, others: I, threshold: f64) -> Vec<Guide>
where
    I: IntoIterator<Item = Rect>,
{
    let mut vertical = Vec::new();
    let mut horizontal = Vec::new();

    for other in others {
        for line in LINES {
            let ax = line_value(active, Orientation::Vertical, line);
            let ox = line_value(other, Orientation::Vertical, line);
            if (ax - ox).abs() < threshold {
                vertical.push(Guide {
                    orientation: Orientation::Vertical,
                    line,
                    position: ox,
                    start: active.y.min(other.y),
                    end: active.bottom().max(other.bottom()),
                });
            }
        }
        for line in LINES {
            let ay = line_value(active, Orientation::Horizontal, line);
            let oy = line_value(other, Orientation::Horizontal, line);
            if (ay - oy).abs() < threshold {
                horizontal.push(Guide {
                    orientation: Orientation::Horizontal,
                    line,
                    position: oy,
                    start: active.x.min(other.x),
                    end: active.right().max(other.right()),
                });
            }
        }
    }

    vertical.extend(horizontal);
    vertical
}

/// Translation that lands `active` exactly on the first guide of each orientation.
#[must_use]
pub fn guide_offset(active: Rect, guides: &[Guide]) -> Point {
    let delta = |orientation: Orientation| {
        guides
            .iter()
            .find(|g| g.orientation == orientation)
            .map_or(0.0, |g| g.position - line_value(active, orientation, g.line))
    };
    Point::new(delta(Orientation::Vertical), delta(Orientation::Horizontal))
}
