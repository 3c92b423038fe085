use crate::constants::*;
use crate::dom;
use crate::input;
use ar_core::{
    render_detail_html, render_tooltip_html, Layer, MessageKind, TooltipContent, UserMessage,
    ViewerConfig, Viewport,
};
use web_sys as web;

// ---------------- Message banner ----------------
pub fn show_message(document: &web::Document, msg: &UserMessage) {
    if let Some(el) = document.get_element_by_id(MESSAGE_BANNER_ID) {
        el.set_text_content(Some(&msg.text));
        let cls = match msg.kind {
            MessageKind::Warning => "message warning",
            MessageKind::Blocking => "message blocking",
        };
        el.set_class_name(cls);
        _ = el.remove_attribute("style");
    }
}

#[inline]
pub fn hide_message(document: &web::Document) {
    dom::set_shown(document, MESSAGE_BANNER_ID, false);
}

// ---------------- Tooltip + detail ----------------
pub fn show_tooltip(
    document: &web::Document,
    content: &TooltipContent,
    x: f32,
    y: f32,
    viewport: &Viewport,
) {
    if let Some(el) = document.get_element_by_id(TOOLTIP_ID) {
        el.set_inner_html(&render_tooltip_html(content));
        let (left, top) = input::tooltip_position(x, y, viewport);
        _ = el.set_attribute("style", &format!("left:{:.0}px; top:{:.0}px", left, top));
        _ = el.class_list().remove_1(HIDDEN_CLASS);
    }
}

#[inline]
pub fn hide_tooltip(document: &web::Document) {
    dom::set_shown(document, TOOLTIP_ID, false);
}

pub fn show_detail(document: &web::Document, content: &TooltipContent) {
    if let Some(body) = document.get_element_by_id(DETAIL_BODY_ID) {
        body.set_inner_html(&render_detail_html(content));
    }
    dom::set_shown(document, DETAIL_ID, true);
}

#[inline]
pub fn hide_detail(document: &web::Document) {
    dom::set_shown(document, DETAIL_ID, false);
}

// ---------------- Controls ----------------

/// Show the controls that match the current stage: enter/exit, placement
/// prompt, and the layer/transform panels that only exist after placement.
pub fn sync_controls(document: &web::Document, config: &ViewerConfig, ar_active: bool, placed: bool) {
    dom::set_shown(document, BTN_ENTER_AR, config.ar_placement && !ar_active);
    dom::set_shown(document, BTN_EXIT_AR, ar_active);
    dom::set_shown(document, BTN_PLACE, ar_active && !placed);
    dom::set_shown(document, PLACE_HINT_ID, ar_active && !placed);
    dom::set_shown(document, LAYER_CONTROLS_ID, placed);
    dom::set_shown(document, TRANSFORM_CONTROLS_ID, placed && config.transform_controls);
    if !placed {
        hide_tooltip(document);
        hide_detail(document);
    }
}

/// Surface candidate appeared or vanished.
pub fn set_surface_found(document: &web::Document, found: bool) {
    dom::set_disabled(document, BTN_PLACE, !found);
    if let Some(el) = document.get_element_by_id(PLACE_HINT_ID) {
        el.set_text_content(Some(if found {
            "Surface found. Tap Place to put the model here."
        } else {
            "Move your phone slowly to find a flat surface."
        }));
    }
}

pub fn mark_active_layer(document: &web::Document, active: Layer) {
    for layer in Layer::ALL {
        if let Some(el) = document.get_element_by_id(input::button_for_layer(layer)) {
            let cl = el.class_list();
            if layer == active {
                _ = cl.add_1(ACTIVE_CLASS);
            } else {
                _ = cl.remove_1(ACTIVE_CLASS);
            }
        }
    }
}

pub fn disable_ar_entry(document: &web::Document) {
    dom::set_disabled(document, BTN_ENTER_AR, true);
}
