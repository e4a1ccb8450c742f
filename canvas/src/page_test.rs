#![allow(clippy::float_cmp)]

use super::*;

fn frame() -> PageFrame {
    PageFrame::new(Point::new(100.0, 20.0), Size::new(794.0, 1123.0))
}

#[test]
fn screen_to_page_subtracts_origin() {
    assert_eq!(frame().screen_to_page(Point::new(150.0, 70.0)), Point::new(50.0, 50.0));
}

#[test]
fn page_to_screen_inverts_screen_to_page() {
    let f = frame();
    let p = Point::new(-30.0, 812.5);
    assert_eq!(f.screen_to_page(f.page_to_screen(p)), p);
}

#[test]
fn contains_screen_checks_page_bounds() {
    let f = frame();
    assert!(f.contains_screen(Point::new(100.0, 20.0)));
    assert!(f.contains_screen(Point::new(894.0, 1143.0)));
    assert!(!f.contains_screen(Point::new(99.0, 500.0)));
    assert!(!f.contains_screen(Point::new(500.0, 1144.0)));
}

#[test]
fn centered_splits_margin() {
    let f = PageFrame::centered(Size::new(800.0, 1000.0), Size::new(1000.0, 1200.0));
    assert_eq!(f.origin, Point::new(100.0, 100.0));
}

#[test]
fn centered_never_negative() {
    let f = PageFrame::centered(Size::new(800.0, 1000.0), Size::new(600.0, 600.0));
    assert_eq!(f.origin, Point::new(0.0, 0.0));
}

#[test]
fn clamp_rect_keeps_box_on_page() {
    let f = frame();
    assert_eq!(f.clamp_rect(Rect::new(-10.0, 1100.0, 100.0, 50.0)), Rect::new(0.0, 1073.0, 100.0, 50.0));
    assert_eq!(f.clamp_rect(Rect::new(40.0, 40.0, 100.0, 50.0)), Rect::new(40.0, 40.0, 100.0, 50.0));
}

#[test]
fn clamp_rect_oversized_pins_to_origin() {
    let f = frame();
    assert_eq!(f.clamp_rect(Rect::new(50.0, 50.0, 900.0, 50.0)).origin(), Point::new(0.0, 50.0));
}
