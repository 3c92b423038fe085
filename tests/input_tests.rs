// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use ar_core::{Layer, Viewport};
use constants::*;
use input::*;

#[test]
fn each_layer_has_its_own_button() {
    let ids: Vec<&str> = Layer::ALL.iter().map(|&l| button_for_layer(l)).collect();
    assert_eq!(ids, [BTN_BODY, BTN_SKELETON, BTN_ORGANS]);
    assert!(!ids.contains(&BTN_PLACE));
}

#[test]
fn slider_values_parse_to_finite_numbers() {
    assert_eq!(parse_slider("1.5"), Some(1.5));
    assert_eq!(parse_slider(" 270 "), Some(270.0));
    assert_eq!(parse_slider("-45"), Some(-45.0));
    assert_eq!(parse_slider(""), None);
    assert_eq!(parse_slider("abc"), None);
    assert_eq!(parse_slider("NaN"), None);
    assert_eq!(parse_slider("inf"), None);
}

#[test]
fn tooltip_sits_below_right_of_pointer_when_room() {
    let vp = Viewport::new(0.0, 0.0, 800.0, 600.0);
    let (left, top) = tooltip_position(100.0, 100.0, &vp);
    assert_eq!(left, 100.0 + TOOLTIP_OFFSET_PX);
    assert_eq!(top, 100.0 + TOOLTIP_OFFSET_PX);
}

#[test]
fn tooltip_flips_near_right_and_bottom_edges() {
    let vp = Viewport::new(0.0, 0.0, 800.0, 600.0);
    let (left, top) = tooltip_position(790.0, 590.0, &vp);
    assert!(left + TOOLTIP_EST_WIDTH_PX <= 790.0);
    assert!(top + TOOLTIP_EST_HEIGHT_PX <= 590.0);
}

#[test]
fn tooltip_never_leaves_top_left_margin() {
    // Viewport smaller than the tooltip: both flips happen, then clamp.
    let vp = Viewport::new(10.0, 20.0, 100.0, 50.0);
    let (left, top) = tooltip_position(15.0, 25.0, &vp);
    assert_eq!(left, 10.0 + TOOLTIP_MARGIN_PX);
    assert_eq!(top, 20.0 + TOOLTIP_MARGIN_PX);
}
