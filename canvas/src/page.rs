#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use crate::geometry::{Point, Rect, Size};

/// Placement of the fixed-size page inside the canvas element.
///
/// `origin` is the page's top-left corner in canvas pixels. There is no zoom:
/// one page pixel is one CSS pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    pub origin: Point,
    pub size: Size,
}

impl PageFrame {
    #[must_use]
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Center a page of `size` in a canvas of `canvas` pixels, never placing
    /// it above or left of the canvas origin.
    #[must_use]
    pub fn centered(size: Size, canvas: Size) -> Self {
        let x = ((canvas.width - size.width) / 2.0).max(0.0);
        let y = ((canvas.height - size.height) / 2.0).max(0.0);
        Self::new(Point::new(x, y), size)
    }

    /// Convert a canvas-space point to page coordinates.
    #[must_use]
    pub fn screen_to_page(&self, screen: Point) -> Point {
        Point::new(screen.x - self.origin.x, screen.y - self.origin.y)
    }

    /// Convert a page-space point to canvas coordinates.
    #[must_use]
    pub fn page_to_screen(&self, page: Point) -> Point {
        Point::new(page.x + self.origin.x, page.y + self.origin.y)
    }

    /// Whether a canvas-space point lies over the page.
    #[must_use]
    pub fn contains_screen(&self, screen: Point) -> bool {
        self.screen_rect().contains(screen)
    }

    /// The page's own rectangle in page coordinates.
    #[must_use]
    pub fn page_rect(&self) -> Rect {
        Rect::from_parts(Point::new(0.0, 0.0), self.size)
    }

    #[must_use]
    pub fn screen_rect(&self) -> Rect {
        Rect::from_parts(self.origin, self.size)
    }

    /// Shift `rect` the least amount that keeps it fully on the page. Boxes
    /// larger than the page are pinned to the top-left edge.
    #[must_use]
    pub fn clamp_rect(&self, rect: Rect) -> Rect {
        let x = rect.x.min(self.size.width - rect.width).max(0.0);
        let y = rect.y.min(self.size.height - rect.height).max(0.0);
        Rect::new(x, y, rect.width, rect.height)
    }
}
