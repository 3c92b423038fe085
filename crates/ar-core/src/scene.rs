//! Scene capability consumed by placement and picking.
//!
//! The renderer itself lives outside this crate. [`SceneGraph`] is the narrow
//! surface the interaction core needs from it, and [`PartScene`] is an
//! in-memory implementation over per-part bounding boxes loaded from a small
//! parts manifest.

use crate::camera::Ray;
use crate::constants::{NAMED_ORGAN_PARTS, RAY_EPSILON};
use crate::error::ViewerError;
use crate::layers::Layer;
use crate::organ::OrganId;
use crate::placement::ModelTransform;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Slab test. Returns the ray parameter of the entry point (0 when the
    /// origin is inside), or `None` on a miss or a box behind the origin.
    pub fn ray_distance(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d.abs() < RAY_EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        if t_max < 0.0 {
            return None;
        }
        Some(t_min.max(0.0))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScenePart {
    pub id: PartId,
    pub name: String,
    /// Ownership chain: `owners[0]` is the immediate owner, the last entry is
    /// the root-most node.
    pub owners: SmallVec<[String; 4]>,
    pub bounds: Aabb,
}

impl ScenePart {
    pub fn immediate_owner(&self) -> Option<&str> {
        self.owners.first().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RayHit {
    pub part: PartId,
    pub name: String,
    pub distance: f32,
}

/// An exported node name that denotes an organ without carrying a keyword.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPart {
    pub name: String,
    pub organ: OrganId,
}

pub fn default_named_parts() -> Vec<NamedPart> {
    NAMED_ORGAN_PARTS
        .iter()
        .map(|(name, organ)| NamedPart {
            name: (*name).to_string(),
            organ: *organ,
        })
        .collect()
}

/// What the interaction core needs from the rendering engine.
pub trait SceneGraph {
    fn set_layer_visible(&mut self, layer: Layer, visible: bool);

    fn set_model_visible(&mut self, visible: bool);

    fn set_model_transform(&mut self, transform: &ModelTransform);

    fn leaf_parts(&self) -> &[ScenePart];

    /// All intersections of `ray` with the `candidates`, in any order.
    fn cast_ray(&self, ray: &Ray, candidates: &[PartId]) -> Vec<RayHit>;

    /// Organ bound to this exact part node, if it is one of the named parts.
    fn named_organ(&self, part: PartId) -> Option<OrganId>;

    fn part(&self, id: PartId) -> Option<&ScenePart> {
        self.leaf_parts().iter().find(|p| p.id == id)
    }

    /// Layer whose root node appears in the part's ownership chain.
    fn layer_of(&self, part: &ScenePart) -> Option<Layer> {
        part.owners
            .iter()
            .find_map(|o| Layer::ALL.into_iter().find(|l| l.node_name() == o.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartManifestEntry {
    pub name: String,
    #[serde(default)]
    pub owners: Vec<String>,
    pub min: [f32; 3],
    pub max: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct PartScene {
    parts: Vec<ScenePart>,
    named: Vec<(PartId, OrganId)>,
    transform: Option<ModelTransform>,
    model_visible: bool,
    layer_visible: [bool; 3],
}

impl PartScene {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(entries: Vec<PartManifestEntry>, named_parts: &[NamedPart]) -> Result<Self, ViewerError> {
        let mut parts = Vec::with_capacity(entries.len());
        for (i, e) in entries.into_iter().enumerate() {
            let bounds = Aabb::new(Vec3::from_array(e.min), Vec3::from_array(e.max));
            if !bounds.is_valid() {
                return Err(ViewerError::Manifest(format!(
                    "part '{}' has invalid bounds",
                    e.name
                )));
            }
            parts.push(ScenePart {
                id: PartId(i),
                name: e.name,
                owners: e.owners.into_iter().collect(),
                bounds,
            });
        }
        // Resolve named organ parts to node identities once.
        let named = named_parts
            .iter()
            .filter_map(|np| {
                let found = parts.iter().find(|p| p.name == np.name).map(|p| (p.id, np.organ));
                if found.is_none() {
                    log::debug!("[scene] named part '{}' not present in model", np.name);
                }
                found
            })
            .collect();
        Ok(Self {
            parts,
            named,
            transform: None,
            model_visible: false,
            layer_visible: [true, false, false],
        })
    }

    pub fn from_manifest_json(json: &str, named_parts: &[NamedPart]) -> Result<Self, ViewerError> {
        let entries: Vec<PartManifestEntry> =
            serde_json::from_str(json).map_err(|e| ViewerError::Manifest(e.to_string()))?;
        Self::new(entries, named_parts)
    }

    pub fn model_visible(&self) -> bool {
        self.model_visible
    }

    pub fn layer_visible(&self, layer: Layer) -> bool {
        self.layer_visible[layer_index(layer)]
    }

    pub fn transform(&self) -> Option<&ModelTransform> {
        self.transform.as_ref()
    }
}

fn layer_index(layer: Layer) -> usize {
    match layer {
        Layer::Body => 0,
        Layer::Skeleton => 1,
        Layer::Organs => 2,
    }
}

impl SceneGraph for PartScene {
    fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        self.layer_visible[layer_index(layer)] = visible;
    }

    fn set_model_visible(&mut self, visible: bool) {
        self.model_visible = visible;
    }

    fn set_model_transform(&mut self, transform: &ModelTransform) {
        self.transform = Some(*transform);
    }

    fn leaf_parts(&self) -> &[ScenePart] {
        &self.parts
    }

    fn part(&self, id: PartId) -> Option<&ScenePart> {
        self.parts.get(id.0).filter(|p| p.id == id)
    }

    fn cast_ray(&self, ray: &Ray, candidates: &[PartId]) -> Vec<RayHit> {
        let Some(transform) = self.transform.as_ref() else {
            return Vec::new();
        };
        if !self.model_visible {
            return Vec::new();
        }
        // The model transform is affine, so the ray parameter is preserved
        // when mapping into model space.
        let inv = transform.to_matrix().inverse();
        let origin = inv.transform_point3(ray.origin);
        let dir = inv.transform_vector3(ray.direction);
        candidates
            .iter()
            .filter_map(|id| self.part(*id))
            .filter_map(|p| {
                p.bounds.ray_distance(origin, dir).map(|t| RayHit {
                    part: p.id,
                    name: p.name.clone(),
                    distance: t,
                })
            })
            .collect()
    }

    fn named_organ(&self, part: PartId) -> Option<OrganId> {
        self.named.iter().find(|(id, _)| *id == part).map(|(_, organ)| *organ)
    }
}
