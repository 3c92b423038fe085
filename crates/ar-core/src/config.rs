//! Viewer configuration: which optional features a page enables.
//!
//! Pages embed it as inline JSON; every field has a default so a page may
//! override only what it needs.

use crate::constants::{MAX_MODEL_SCALE, MIN_MODEL_SCALE};
use crate::layers::Layer;
use crate::scene::{default_named_parts, NamedPart};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Require surface detection + explicit placement. When off the model is
    /// shown immediately in a fixed preview pose.
    pub ar_placement: bool,
    pub transform_controls: bool,
    pub tooltip: bool,
    /// Show the `body` layer again on every new placement instead of keeping
    /// the previously chosen layer.
    pub reset_layer_on_place: bool,
    pub initial_layer: Layer,
    pub metadata_url: String,
    pub parts_url: String,
    pub min_scale: f32,
    pub max_scale: f32,
    pub named_parts: Vec<NamedPart>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            ar_placement: true,
            transform_controls: true,
            tooltip: true,
            reset_layer_on_place: true,
            initial_layer: Layer::Body,
            metadata_url: "organs.json".to_string(),
            parts_url: "parts.json".to_string(),
            min_scale: MIN_MODEL_SCALE,
            max_scale: MAX_MODEL_SCALE,
            named_parts: default_named_parts(),
        }
    }
}

impl ViewerConfig {
    /// Parse inline JSON, then clamp the scale range into what the model
    /// transform supports.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut cfg: ViewerConfig = serde_json::from_str(json)?;
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(text) if !text.trim().is_empty() => Self::from_json(text).unwrap_or_else(|e| {
                log::warn!("[config] invalid viewer config, using defaults: {}", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    fn sanitize(&mut self) {
        let lo = if self.min_scale.is_finite() {
            self.min_scale.clamp(MIN_MODEL_SCALE, MAX_MODEL_SCALE)
        } else {
            MIN_MODEL_SCALE
        };
        let hi = if self.max_scale.is_finite() {
            self.max_scale.clamp(MIN_MODEL_SCALE, MAX_MODEL_SCALE)
        } else {
            MAX_MODEL_SCALE
        };
        if lo <= hi {
            self.min_scale = lo;
            self.max_scale = hi;
        } else {
            self.min_scale = hi;
            self.max_scale = lo;
        }
    }
}
