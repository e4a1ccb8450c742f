//! Geometry primitives: points, sizes, rectangles, and the pure transform math
//! behind hit zones, handle resizing, and pointer-driven rotation.
//!
//! Everything here is side-effect free. Coordinates are canvas-local pixels
//! with a top-left origin and `y` growing downward, so a positive rotation is
//! clockwise on screen (matching `CanvasRenderingContext2d::rotate` and CSS).

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Width and height of an element, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// Unrotated position of a handle on this rectangle's border.
    #[must_use]
    pub fn handle_point(&self, handle: Handle) -> Point {
        let cx = self.x + self.width / 2.0;
        let cy = self.y + self.height / 2.0;
        match handle {
            Handle::N => Point::new(cx, self.y),
            Handle::Ne => Point::new(self.right(), self.y),
            Handle::E => Point::new(self.right(), cy),
            Handle::Se => Point::new(self.right(), self.bottom()),
            Handle::S => Point::new(cx, self.bottom()),
            Handle::Sw => Point::new(self.x, self.bottom()),
            Handle::W => Point::new(self.x, cy),
            Handle::Nw => Point::new(self.x, self.y),
        }
    }
}

/// Resize handle on an element's bounding box: four corners and four edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Handle {
    /// All handles, edges and corners interleaved clockwise from north.
    pub const ALL: [Handle; 8] = [
        Handle::N,
        Handle::Ne,
        Handle::E,
        Handle::Se,
        Handle::S,
        Handle::Sw,
        Handle::W,
        Handle::Nw,
    ];

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    /// Whether dragging this handle moves the left edge (the right edge stays fixed).
    #[must_use]
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Whether dragging this handle moves the top edge (the bottom edge stays fixed).
    #[must_use]
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// The handle across the box, which stays put while this one is dragged.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::N => Self::S,
            Self::Ne => Self::Sw,
            Self::E => Self::W,
            Self::Se => Self::Nw,
            Self::S => Self::N,
            Self::Sw => Self::Ne,
            Self::W => Self::E,
            Self::Nw => Self::Se,
        }
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N => "n-resize",
            Self::Ne => "ne-resize",
            Self::E => "e-resize",
            Self::Se => "se-resize",
            Self::S => "s-resize",
            Self::Sw => "sw-resize",
            Self::W => "w-resize",
            Self::Nw => "nw-resize",
        }
    }
}

/// Region of an element's box under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    /// Interior: the gesture moves the element.
    Move,
    /// Border band: the gesture resizes from this handle.
    Resize(Handle),
}

impl HitZone {
    /// Corner zones may be reinterpreted as rotation by the caller.
    #[must_use]
    pub fn is_rotate_eligible(self) -> bool {
        matches!(self, Self::Resize(h) if h.is_corner())
    }
}

/// Classify `pointer` against `rect`.
///
/// Returns `None` when the pointer is outside the rectangle. Inside it, a
/// pointer within `threshold` pixels of two borders is a corner; within
/// `threshold` of one border it is an edge; otherwise it is the move zone.
/// Corners win over edges.
#[must_use]
pub fn hit_zone(pointer: Point, rect: Rect, threshold: f64) -> Option<HitZone> {
    if !rect.contains(pointer) {
        return None;
    }

    let x = pointer.x - rect.x;
    let y = pointer.y - rect.y;
    let left = x < threshold;
    let right = x > rect.width - threshold;
    let top = y < threshold;
    let bottom = y > rect.height - threshold;

    let handle = if left && top {
        Handle::Nw
    } else if right && top {
        Handle::Ne
    } else if left && bottom {
        Handle::Sw
    } else if right && bottom {
        Handle::Se
    } else if left {
        Handle::W
    } else if right {
        Handle::E
    } else if top {
        Handle::N
    } else if bottom {
        Handle::S
    } else {
        return Some(HitZone::Move);
    };

    Some(HitZone::Resize(handle))
}

/// Resize `start` by dragging `handle` by `(dx, dy)`, scaling each axis independently.
///
/// Corners change both dimensions; edges change one. Both dimensions are
/// floored at `min_size`, and the corner or edge opposite the handle stays
/// where it was in `start`.
#[must_use]
pub fn resize_from_handle(handle: Handle, start: Rect, dx: f64, dy: f64, min_size: f64) -> Rect {
    let (width, height) = dragged_dimensions(handle, start, dx, dy);
    anchor_opposite(handle, start, Size::new(width.max(min_size), height.max(min_size)))
}

/// Like [`resize_from_handle`], but corner handles scale both axes by the same
/// factor so the aspect ratio of `start` is preserved. Edge handles behave
/// exactly as in the independent variant.
#[must_use]
pub fn resize_uniform_from_handle(handle: Handle, start: Rect, dx: f64, dy: f64, min_size: f64) -> Rect {
    if !handle.is_corner() || start.width <= 0.0 || start.height <= 0.0 {
        return resize_from_handle(handle, start, dx, dy, min_size);
    }

    let (width, height) = dragged_dimensions(handle, start, dx, dy);
    let scale_x = width / start.width;
    let scale_y = height / start.height;

    // Follow whichever axis the pointer moved further along.
    let scale = if (scale_x - 1.0).abs() >= (scale_y - 1.0).abs() { scale_x } else { scale_y };
    let scale = scale.max(min_size / start.width).max(min_size / start.height);

    anchor_opposite(handle, start, Size::new(start.width * scale, start.height * scale))
}

/// Place a rectangle of `size` so the side(s) opposite `handle` match `start`.
#[must_use]
pub fn anchor_opposite(handle: Handle, start: Rect, size: Size) -> Rect {
    let x = if handle.moves_left_edge() { start.right() - size.width } else { start.x };
    let y = if handle.moves_top_edge() { start.bottom() - size.height } else { start.y };
    Rect::new(x, y, size.width, size.height)
}

/// Shift a resized local-frame `rect` so that, drawn rotated by `degrees` about
/// its own center, the handle opposite `handle` lands where it did on `start`.
#[must_use]
pub fn pin_rotated_anchor(handle: Handle, start: Rect, rect: Rect, degrees: f64) -> Rect {
    let anchor = handle.opposite();
    let before = rotate_point(start.handle_point(anchor), start.center(), degrees);
    let after = rotate_point(rect.handle_point(anchor), rect.center(), degrees);
    Rect::new(rect.x + before.x - after.x, rect.y + before.y - after.y, rect.width, rect.height)
}

fn dragged_dimensions(handle: Handle, start: Rect, dx: f64, dy: f64) -> (f64, f64) {
    match handle {
        Handle::Se => (start.width + dx, start.height + dy),
        Handle::Sw => (start.width - dx, start.height + dy),
        Handle::Ne => (start.width + dx, start.height - dy),
        Handle::Nw => (start.width - dx, start.height - dy),
        Handle::E => (start.width + dx, start.height),
        Handle::W => (start.width - dx, start.height),
        Handle::S => (start.width, start.height + dy),
        Handle::N => (start.width, start.height - dy),
    }
}

/// New rotation after the pointer moved from `start_pointer` to `current_pointer`
/// around `center`, starting from `start_rotation` degrees.
///
/// `center` must be the element center captured when the gesture began.
#[must_use]
pub fn rotate_from_pointers(center: Point, start_pointer: Point, current_pointer: Point, start_rotation: f64) -> f64 {
    let start_angle = (start_pointer.y - center.y).atan2(start_pointer.x - center.x);
    let current_angle = (current_pointer.y - center.y).atan2(current_pointer.x - center.x);
    normalize_degrees(start_rotation + (current_angle - start_angle).to_degrees())
}

/// Reduce an angle in degrees into `[0, 360)`. Non-finite input maps to 0.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate `pt` about `center` by `degrees` (clockwise on screen).
#[must_use]
pub fn rotate_point(pt: Point, center: Point, degrees: f64) -> Point {
    if degrees.abs() < f64::EPSILON {
        return pt;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = pt.x - center.x;
    let dy = pt.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}
