#![cfg(target_arch = "wasm32")]
use ar_core::{Camera, PartScene, SceneGraph, ViewerConfig, ViewerSession};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod fetch;
mod frame;
mod input;
mod overlay;
mod scene;
mod xr;

use constants::*;
use scene::DomScene;

#[derive(Clone)]
pub(crate) struct App {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<ViewerSession>>,
    pub scene: Rc<RefCell<DomScene>>,
    pub xr: Rc<RefCell<Option<Rc<xr::XrContext>>>>,
    /// Last XR viewer view, used to unproject taps while immersive.
    pub last_camera: Rc<RefCell<Option<Camera>>>,
}

impl App {
    pub fn sync_ui(&self) {
        let session = self.session.borrow();
        overlay::sync_controls(
            &self.document,
            session.config(),
            session.ar_active(),
            session.placement().is_placed(),
        );
        overlay::mark_active_layer(&self.document, session.layers().selected());
        match session.message() {
            Some(msg) => {
                overlay::show_message(&self.document, msg);
                self.schedule_message_expiry();
            }
            None => overlay::hide_message(&self.document),
        }
    }

    fn schedule_message_expiry(&self) {
        let Some(window) = web::window() else {
            return;
        };
        let app = self.clone();
        let cb = Closure::once_into_js(move || {
            if app.session.borrow_mut().expire_message(Instant::now()) {
                overlay::hide_message(&app.document);
            }
        });
        let delay_ms = (ar_core::constants::MESSAGE_TTL_SEC * 1000.0) as i32 + 50;
        _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            delay_ms,
        );
    }
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("anatomy-ar starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let config = ViewerConfig::from_json_or_default(dom::text_of(&document, CONFIG_SCRIPT_ID).as_deref());
    log::info!(
        "[config] ar={} transform={} tooltip={} reset_layer={}",
        config.ar_placement,
        config.transform_controls,
        config.tooltip,
        config.reset_layer_on_place
    );

    let app = App {
        document: document.clone(),
        canvas,
        session: Rc::new(RefCell::new(ViewerSession::new(config.clone()))),
        scene: Rc::new(RefCell::new(DomScene::new(document.clone(), PartScene::empty()))),
        xr: Rc::new(RefCell::new(None)),
        last_camera: Rc::new(RefCell::new(None)),
    };
    // Model stays hidden until placed.
    app.scene.borrow_mut().set_model_visible(false);

    events::wire_all(&app);
    app.sync_ui();

    // Static resources: each is a one-shot request; failure only disables
    // what depends on it.
    match fetch::load_parts(&config.parts_url, &config.named_parts).await {
        Ok(parts) => app.scene.borrow_mut().replace_parts(parts),
        Err(e) => {
            log::warn!("[scene] {}", e);
            app.session.borrow_mut().report(&e);
        }
    }
    let catalog = fetch::load_catalog(&config.metadata_url).await;
    app.session.borrow_mut().on_metadata_result(catalog);

    if config.ar_placement {
        if let Err(e) = xr::probe_support().await {
            log::warn!("[xr] {}", e);
            app.session.borrow_mut().report(&e);
            overlay::disable_ar_entry(&document);
        }
    } else {
        let placed = app
            .session
            .borrow_mut()
            .place_preview(&mut *app.scene.borrow_mut());
        if let Err(e) = placed {
            log::error!("[place] preview placement failed: {}", e);
        }
    }

    app.sync_ui();
    Ok(())
}
