//! Scene bridge: mirrors the interaction core's scene mutations onto the
//! model entities in the page and answers ray queries from the parts
//! manifest.

use crate::constants::{MODEL_ENTITY_ID, RETICLE_ENTITY_ID};
use ar_core::{
    Layer, ModelTransform, OrganId, PartId, PartScene, Pose, Ray, RayHit, SceneGraph, ScenePart,
};
use glam::EulerRot;
use web_sys as web;

pub struct DomScene {
    document: web::Document,
    parts: PartScene,
}

impl DomScene {
    pub fn new(document: web::Document, parts: PartScene) -> Self {
        Self { document, parts }
    }

    pub fn replace_parts(&mut self, parts: PartScene) {
        // Carry the current visibility/transform over to the new part set.
        let mut parts = parts;
        for layer in Layer::ALL {
            parts.set_layer_visible(layer, self.parts.layer_visible(layer));
        }
        parts.set_model_visible(self.parts.model_visible());
        if let Some(t) = self.parts.transform() {
            parts.set_model_transform(t);
        }
        log::info!("[scene] {} pickable parts", parts.leaf_parts().len());
        self.parts = parts;
    }

    pub fn set_reticle(&self, pose: Option<&Pose>) {
        let Some(el) = self.document.get_element_by_id(RETICLE_ENTITY_ID) else {
            return;
        };
        match pose {
            Some(p) => {
                _ = el.set_attribute("position", &position_attr(p));
                _ = el.set_attribute("rotation", &rotation_attr(p));
                _ = el.set_attribute("visible", "true");
            }
            None => {
                _ = el.set_attribute("visible", "false");
            }
        }
    }

    fn model_element(&self) -> Option<web::Element> {
        self.document.get_element_by_id(MODEL_ENTITY_ID)
    }
}

/// `"x y z"` in metres.
fn position_attr(pose: &Pose) -> String {
    let p = pose.position;
    format!("{:.4} {:.4} {:.4}", p.x, p.y, p.z)
}

/// `"x y z"` Euler angles in degrees, XYZ order.
fn rotation_attr(pose: &Pose) -> String {
    let (x, y, z) = pose.orientation.to_euler(EulerRot::XYZ);
    format!(
        "{:.3} {:.3} {:.3}",
        x.to_degrees(),
        y.to_degrees(),
        z.to_degrees()
    )
}

impl SceneGraph for DomScene {
    fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        self.parts.set_layer_visible(layer, visible);
        if let Some(el) = self.document.get_element_by_id(layer.node_name()) {
            _ = el.set_attribute("visible", if visible { "true" } else { "false" });
        }
    }

    fn set_model_visible(&mut self, visible: bool) {
        self.parts.set_model_visible(visible);
        if let Some(el) = self.model_element() {
            _ = el.set_attribute("visible", if visible { "true" } else { "false" });
        }
    }

    fn set_model_transform(&mut self, transform: &ModelTransform) {
        self.parts.set_model_transform(transform);
        if let Some(el) = self.model_element() {
            let pose = transform.world_pose();
            let s = transform.scale();
            _ = el.set_attribute("position", &position_attr(&pose));
            _ = el.set_attribute("rotation", &rotation_attr(&pose));
            _ = el.set_attribute("scale", &format!("{:.4} {:.4} {:.4}", s, s, s));
        }
    }

    fn leaf_parts(&self) -> &[ScenePart] {
        self.parts.leaf_parts()
    }

    fn cast_ray(&self, ray: &Ray, candidates: &[PartId]) -> Vec<RayHit> {
        self.parts.cast_ray(ray, candidates)
    }

    fn named_organ(&self, part: PartId) -> Option<OrganId> {
        self.parts.named_organ(part)
    }

    fn part(&self, id: PartId) -> Option<&ScenePart> {
        self.parts.part(id)
    }
}
