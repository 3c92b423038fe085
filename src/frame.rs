use crate::constants::OVERLAY_ROOT_ID;
use crate::overlay;
use crate::xr::XrContext;
use crate::App;
use ar_core::CandidateUpdate;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

pub async fn enter_ar(app: App) {
    let overlay_root = app.document.get_element_by_id(OVERLAY_ROOT_ID);
    let ctx = match XrContext::start(&app.canvas, overlay_root.as_ref()).await {
        Ok(c) => Rc::new(c),
        Err(e) => {
            log::error!("[xr] {}", e);
            app.session.borrow_mut().ar_request_failed(&e);
            app.sync_ui();
            return;
        }
    };

    *app.xr.borrow_mut() = Some(ctx.clone());
    app.session
        .borrow_mut()
        .begin_ar(&mut *app.scene.borrow_mut());
    overlay::set_surface_found(&app.document, false);

    let tick = start_xr_loop(app.clone(), ctx.clone());
    let app_end = app.clone();
    ctx.on_end(move || {
        end_ar(&app_end);
        // Pending session frames are cancelled on end.
        drop(tick.borrow_mut().take());
    });
    app.sync_ui();
}

fn end_ar(app: &App) {
    *app.xr.borrow_mut() = None;
    *app.last_camera.borrow_mut() = None;
    app.session
        .borrow_mut()
        .end_ar(&mut *app.scene.borrow_mut());
    app.scene.borrow().set_reticle(None);
    app.sync_ui();
}

type FrameTick = Rc<RefCell<Option<Closure<dyn FnMut(f64, JsValue)>>>>;

fn start_xr_loop(app: App, ctx: Rc<XrContext>) -> FrameTick {
    let tick: FrameTick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let ctx_tick = ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |_time: f64, frame: JsValue| {
        // Stop once the session is gone or replaced.
        let current = app.xr.borrow().as_ref().map(|c| Rc::ptr_eq(c, &ctx_tick));
        if current != Some(true) {
            drop(tick_clone.borrow_mut().take());
            return;
        }
        xr_frame(&app, &ctx_tick, &frame);
        if let Some(cb) = tick_clone.borrow().as_ref() {
            ctx_tick.request_frame(cb);
        }
    }) as Box<dyn FnMut(f64, JsValue)>));
    if let Some(cb) = tick.borrow().as_ref() {
        ctx.request_frame(cb);
    }
    tick
}

fn xr_frame(app: &App, ctx: &XrContext, frame: &JsValue) {
    if let Some(camera) = ctx.viewer_camera(frame) {
        *app.last_camera.borrow_mut() = Some(camera);
    }
    if app.session.borrow().placement().is_placed() {
        return;
    }
    let candidate = ctx.candidate_pose(frame);
    let update = app.session.borrow_mut().on_candidate_pose(candidate);
    match update {
        CandidateUpdate::Appeared | CandidateUpdate::Moved | CandidateUpdate::Lost => {
            app.scene.borrow().set_reticle(candidate.as_ref());
        }
        CandidateUpdate::Ignored | CandidateUpdate::Unchanged => {}
    }
    if let Some(found) = update.visibility_change() {
        log::debug!("[xr] surface {}", if found { "found" } else { "lost" });
        overlay::set_surface_found(&app.document, found);
    }
}
