use crate::constants::{
    BTN_BODY, BTN_ORGANS, BTN_SKELETON, TOOLTIP_EST_HEIGHT_PX, TOOLTIP_EST_WIDTH_PX,
    TOOLTIP_MARGIN_PX, TOOLTIP_OFFSET_PX,
};
use ar_core::{Layer, Viewport};
use web_sys as web;

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_client(ev: &web::PointerEvent) -> (f32, f32) {
    (ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
pub fn viewport_from_rect(rect: &web::DomRect) -> Viewport {
    Viewport::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

// ---------------- Control helpers ----------------
#[inline]
pub fn button_for_layer(layer: Layer) -> &'static str {
    match layer {
        Layer::Body => BTN_BODY,
        Layer::Skeleton => BTN_SKELETON,
        Layer::Organs => BTN_ORGANS,
    }
}

/// Slider `value` attribute to a finite number.
#[inline]
pub fn parse_slider(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Top-left corner for a tooltip next to the pointer, flipped and clamped so
/// it stays inside the viewport.
pub fn tooltip_position(x: f32, y: f32, viewport: &Viewport) -> (f32, f32) {
    let right = viewport.left + viewport.width;
    let bottom = viewport.top + viewport.height;
    let mut left = x + TOOLTIP_OFFSET_PX;
    let mut top = y + TOOLTIP_OFFSET_PX;
    if left + TOOLTIP_EST_WIDTH_PX > right - TOOLTIP_MARGIN_PX {
        left = x - TOOLTIP_OFFSET_PX - TOOLTIP_EST_WIDTH_PX;
    }
    if top + TOOLTIP_EST_HEIGHT_PX > bottom - TOOLTIP_MARGIN_PX {
        top = y - TOOLTIP_OFFSET_PX - TOOLTIP_EST_HEIGHT_PX;
    }
    let min_left = viewport.left + TOOLTIP_MARGIN_PX;
    let min_top = viewport.top + TOOLTIP_MARGIN_PX;
    (left.max(min_left), top.max(min_top))
}
