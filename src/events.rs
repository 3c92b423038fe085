use crate::constants::*;
use crate::dom;
use crate::frame;
use crate::input;
use crate::overlay;
use crate::App;
use ar_core::{Camera, Layer, PickOutcome, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub fn wire_all(app: &App) {
    wire_layer_buttons(app);
    wire_placement_buttons(app);
    wire_sliders(app);
    wire_detail(app);
    wire_tap(app);
}

fn wire_layer_buttons(app: &App) {
    for layer in Layer::ALL {
        let app_layer = app.clone();
        dom::add_click_listener(&app.document, input::button_for_layer(layer), move || {
            let applied = app_layer
                .session
                .borrow_mut()
                .select_layer(layer, &mut *app_layer.scene.borrow_mut());
            if !applied {
                log::debug!("[layers] ignored {} before placement", layer);
                return;
            }
            overlay::hide_tooltip(&app_layer.document);
            overlay::mark_active_layer(&app_layer.document, layer);
        });
    }
}

fn wire_placement_buttons(app: &App) {
    let app_enter = app.clone();
    dom::add_click_listener(&app.document, BTN_ENTER_AR, move || {
        if !app_enter.session.borrow_mut().request_ar() {
            return;
        }
        let app_async = app_enter.clone();
        spawn_local(async move {
            frame::enter_ar(app_async).await;
        });
    });

    let app_exit = app.clone();
    dom::add_click_listener(&app.document, BTN_EXIT_AR, move || {
        if let Some(ctx) = app_exit.xr.borrow().as_ref() {
            ctx.end();
        }
    });

    let app_place = app.clone();
    dom::add_click_listener(&app.document, BTN_PLACE, move || {
        let result = app_place
            .session
            .borrow_mut()
            .confirm_placement(&mut *app_place.scene.borrow_mut());
        if result.is_ok() {
            app_place.scene.borrow().set_reticle(None);
            let adjust = app_place.session.borrow().adjustments();
            dom::set_input_value(&app_place.document, SCALE_SLIDER_ID, adjust.scale);
            dom::set_input_value(&app_place.document, ROTATE_SLIDER_ID, adjust.yaw_degrees);
        }
        app_place.sync_ui();
    });
}

fn wire_sliders(app: &App) {
    let app_scale = app.clone();
    dom::add_value_listener(&app.document, SCALE_SLIDER_ID, move |value| {
        if let Some(v) = input::parse_slider(&value) {
            app_scale
                .session
                .borrow_mut()
                .set_scale(v, &mut *app_scale.scene.borrow_mut());
        }
    });

    let app_rotate = app.clone();
    dom::add_value_listener(&app.document, ROTATE_SLIDER_ID, move |value| {
        if let Some(v) = input::parse_slider(&value) {
            app_rotate
                .session
                .borrow_mut()
                .set_yaw_degrees(v, &mut *app_rotate.scene.borrow_mut());
        }
    });
}

fn wire_detail(app: &App) {
    let app_open = app.clone();
    dom::add_click_listener(&app.document, TOOLTIP_ID, move || {
        if let Some(content) = app_open.session.borrow().selection() {
            if content.has_details() {
                overlay::show_detail(&app_open.document, content);
            }
        }
    });
    let app_close = app.clone();
    dom::add_click_listener(&app.document, BTN_DETAIL_CLOSE, move || {
        overlay::hide_detail(&app_close.document);
    });
}

fn is_control_event(ev: &web::PointerEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(CONTROL_SELECTOR).ok().flatten())
        .is_some()
}

/// Camera and viewport the tap should be unprojected with: the last XR
/// viewer view while immersive, the preview camera over the canvas otherwise.
fn tap_camera(app: &App) -> Option<(Camera, Viewport)> {
    if app.xr.borrow().is_some() {
        let camera = (*app.last_camera.borrow())?;
        let window = web::window()?;
        let w = window.inner_width().ok()?.as_f64()? as f32;
        let h = window.inner_height().ok()?.as_f64()? as f32;
        return Some((camera, Viewport::new(0.0, 0.0, w, h)));
    }
    let viewport = input::viewport_from_rect(&app.canvas.get_bounding_client_rect());
    Some((Camera::preview(viewport.aspect()), viewport))
}

fn wire_tap(app: &App) {
    let app_tap = app.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if is_control_event(&ev) {
            return;
        }
        let Some((camera, viewport)) = tap_camera(&app_tap) else {
            return;
        };
        let (x, y) = input::pointer_client(&ev);
        let outcome = {
            let scene = app_tap.scene.borrow();
            app_tap
                .session
                .borrow_mut()
                .tap(x, y, &camera, &viewport, &*scene)
        };
        let session = app_tap.session.borrow();
        match (outcome, session.selection()) {
            (PickOutcome::Selected(_), Some(content)) if session.config().tooltip => {
                overlay::show_tooltip(&app_tap.document, content, x, y, &viewport);
            }
            _ => overlay::hide_tooltip(&app_tap.document),
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
