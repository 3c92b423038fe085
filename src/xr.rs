//! WebXR capability: support probe, `immersive-ar` session with a viewer
//! hit-test source, and per-frame candidate pose / viewer camera.
//!
//! The WebXR bindings in `web-sys` are behind an unstable cfg, so the session
//! objects are driven through `js_sys::Reflect` instead.

use ar_core::{Camera, Pose, ViewerError};
use glam::Mat4;
use js_sys::{Array, Float32Array, Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const SESSION_MODE: &str = "immersive-ar";

#[inline]
fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn call(target: &JsValue, method: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let f: Function = get(target, method)
        .ok_or_else(|| JsValue::from_str(&format!("missing method {method}")))?
        .dyn_into()?;
    let list = Array::new();
    for a in args {
        list.push(a);
    }
    f.apply(target, &list)
}

async fn call_async(target: &JsValue, method: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let promise: Promise = call(target, method, args)?.dyn_into()?;
    JsFuture::from(promise).await
}

#[inline]
fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn navigator_xr() -> Result<JsValue, ViewerError> {
    let window = web::window()
        .ok_or_else(|| ViewerError::EnvironmentUnsupported("no window".to_string()))?;
    get(window.navigator().as_ref(), "xr")
        .ok_or_else(|| ViewerError::EnvironmentUnsupported("navigator.xr missing".to_string()))
}

pub async fn probe_support() -> Result<(), ViewerError> {
    let xr = navigator_xr()?;
    let supported = call_async(&xr, "isSessionSupported", &[&JsValue::from_str(SESSION_MODE)])
        .await
        .map_err(|e| ViewerError::EnvironmentUnsupported(js_err(e)))?;
    if supported.as_bool().unwrap_or(false) {
        Ok(())
    } else {
        Err(ViewerError::EnvironmentUnsupported(format!(
            "{SESSION_MODE} not supported"
        )))
    }
}

fn set(target: &Object, key: &str, value: &JsValue) {
    _ = Reflect::set(target, &JsValue::from_str(key), value);
}

/// Live immersive session plus the spaces needed for hit testing.
pub struct XrContext {
    session: JsValue,
    ref_space: JsValue,
    hit_source: JsValue,
}

impl XrContext {
    /// Request the session, attach the canvas' WebGL context as base layer
    /// and create a hit-test source from the viewer space.
    pub async fn start(
        canvas: &web::HtmlCanvasElement,
        overlay_root: Option<&web::Element>,
    ) -> Result<XrContext, ViewerError> {
        let xr = navigator_xr()?;

        let init = Object::new();
        let required = Array::of1(&JsValue::from_str("hit-test"));
        set(&init, "requiredFeatures", &required);
        if let Some(root) = overlay_root {
            set(&init, "optionalFeatures", &Array::of1(&JsValue::from_str("dom-overlay")));
            let overlay = Object::new();
            set(&overlay, "root", root.as_ref());
            set(&init, "domOverlay", &overlay);
        }
        let session = call_async(&xr, "requestSession", &[&JsValue::from_str(SESSION_MODE), init.as_ref()])
            .await
            .map_err(|e| ViewerError::SessionStartFailure(js_err(e)))?;

        let fail = |e: JsValue| ViewerError::SessionStartFailure(js_err(e));

        // Base layer over the page's WebGL context; the engine renders into it.
        let gl_opts = Object::new();
        set(&gl_opts, "xrCompatible", &JsValue::TRUE);
        let gl = canvas
            .get_context_with_context_options("webgl2", &gl_opts)
            .map_err(fail)?
            .ok_or_else(|| ViewerError::SessionStartFailure("no webgl2 context".to_string()))?;
        let layer_ctor: Function = get(&js_sys::global(), "XRWebGLLayer")
            .ok_or_else(|| ViewerError::SessionStartFailure("XRWebGLLayer missing".to_string()))?
            .dyn_into()
            .map_err(fail)?;
        let layer = Reflect::construct(&layer_ctor, &Array::of2(&session, gl.as_ref())).map_err(fail)?;
        let render_state = Object::new();
        set(&render_state, "baseLayer", &layer);
        call(&session, "updateRenderState", &[render_state.as_ref()]).map_err(fail)?;

        let ref_space = call_async(&session, "requestReferenceSpace", &[&JsValue::from_str("local")])
            .await
            .map_err(fail)?;
        let viewer_space =
            call_async(&session, "requestReferenceSpace", &[&JsValue::from_str("viewer")])
                .await
                .map_err(fail)?;
        let hit_opts = Object::new();
        set(&hit_opts, "space", &viewer_space);
        let hit_source = call_async(&session, "requestHitTestSource", &[hit_opts.as_ref()])
            .await
            .map_err(fail)?;

        log::info!("[xr] {} session ready", SESSION_MODE);
        Ok(XrContext {
            session,
            ref_space,
            hit_source,
        })
    }

    /// First hit-test result of this frame as a pose, or `None` when no
    /// surface is under the viewer.
    pub fn candidate_pose(&self, frame: &JsValue) -> Option<Pose> {
        let results: Array = call(frame, "getHitTestResults", &[&self.hit_source])
            .ok()?
            .dyn_into()
            .ok()?;
        let first = results.get(0);
        if first.is_undefined() {
            return None;
        }
        let pose = call(&first, "getPose", &[&self.ref_space]).ok()?;
        pose_from_transform(&get(&pose, "transform")?)
    }

    pub fn viewer_camera(&self, frame: &JsValue) -> Option<Camera> {
        let viewer = call(frame, "getViewerPose", &[&self.ref_space]).ok()?;
        let views: Array = get(&viewer, "views")?.dyn_into().ok()?;
        let view = views.get(0);
        if view.is_undefined() {
            return None;
        }
        let pose = pose_from_transform(&get(&view, "transform")?)?;
        let proj: Float32Array = get(&view, "projectionMatrix")?.dyn_into().ok()?;
        if proj.length() != 16 {
            return None;
        }
        let mut cols = [0.0_f32; 16];
        proj.copy_to(&mut cols);
        Some(Camera::from_view(pose, Mat4::from_cols_array(&cols)))
    }

    pub fn request_frame(&self, callback: &Closure<dyn FnMut(f64, JsValue)>) {
        if let Err(e) = call(&self.session, "requestAnimationFrame", &[callback.as_ref()]) {
            log::error!("[xr] requestAnimationFrame failed: {}", js_err(e));
        }
    }

    pub fn on_end(&self, handler: impl FnOnce() + 'static) {
        let cb = Closure::once_into_js(handler);
        _ = call(
            &self.session,
            "addEventListener",
            &[&JsValue::from_str("end"), &cb],
        );
    }

    pub fn end(&self) {
        match call(&self.session, "end", &[]) {
            Ok(p) => {
                // The returned promise rejects if the session already ended.
                if let Ok(p) = p.dyn_into::<Promise>() {
                    wasm_bindgen_futures::spawn_local(async move {
                        _ = JsFuture::from(p).await;
                    });
                }
            }
            Err(e) => log::warn!("[xr] end failed: {}", js_err(e)),
        }
    }
}

fn pose_from_transform(transform: &JsValue) -> Option<Pose> {
    let p = get(transform, "position")?;
    let o = get(transform, "orientation")?;
    let num = |v: &JsValue, k: &str| get(v, k).and_then(|x| x.as_f64()).map(|x| x as f32);
    let position = [num(&p, "x")?, num(&p, "y")?, num(&p, "z")?];
    let orientation = [num(&o, "x")?, num(&o, "y")?, num(&o, "z")?, num(&o, "w")?];
    Pose::from_arrays(position, orientation).ok()
}
