#![allow(dead_code)]

use ar_core::*;
use glam::{Quat, Vec3};

pub const VIEW_W: f32 = 100.0;
pub const VIEW_H: f32 = 100.0;

pub fn entry(name: &str, owners: &[&str], min: [f32; 3], max: [f32; 3]) -> PartManifestEntry {
    PartManifestEntry {
        name: name.to_string(),
        owners: owners.iter().map(|s| s.to_string()).collect(),
        min,
        max,
    }
}

/// Small model: a skin box around everything, a few organs along the
/// camera's forward axis, one bone and one part outside every layer.
pub fn fixture_scene() -> PartScene {
    let entries = vec![
        entry("BodySkin", &["layer_body", "model"], [-0.5, -0.5, -0.5], [0.5, 0.5, 0.5]),
        entry(
            "Heart_L",
            &["organ_meshes", "layer_organs", "model"],
            [-0.1, -0.1, -0.1],
            [0.1, 0.1, 0.1],
        ),
        entry("RightLung", &["layer_organs", "model"], [0.2, -0.1, -0.1], [0.4, 0.1, 0.1]),
        entry("Object_12", &["layer_organs", "model"], [-0.1, 0.2, -0.1], [0.1, 0.4, 0.1]),
        entry("Mesh_042", &["layer_organs", "model"], [-0.1, -0.4, -0.1], [0.1, -0.2, 0.1]),
        entry(
            "Brain_Stem",
            &["layer_organs", "model"],
            [-0.1, -0.1, -0.45],
            [0.1, 0.1, -0.3],
        ),
        entry(
            "Femur",
            &["tulang_group", "layer_skeleton", "model"],
            [-0.1, -0.1, -0.1],
            [0.1, 0.1, 0.1],
        ),
        entry("Heart_orphan", &["loose"], [-0.05, -0.05, 0.3], [0.05, 0.05, 0.45]),
    ];
    PartScene::new(entries, &default_named_parts()).expect("fixture scene")
}

pub fn anchor_pose() -> Pose {
    Pose::new(Vec3::new(0.0, 0.0, -2.0), Quat::IDENTITY)
}

pub fn camera() -> Camera {
    Camera::look_at(
        Vec3::ZERO,
        Vec3::NEG_Z,
        std::f32::consts::FRAC_PI_4,
        VIEW_W / VIEW_H,
    )
}

pub fn viewport() -> Viewport {
    Viewport::new(0.0, 0.0, VIEW_W, VIEW_H)
}

/// Client coordinates of a world point under the fixture camera.
pub fn screen_of(world: Vec3) -> (f32, f32) {
    let cam = camera();
    let ndc = (cam.projection * cam.view_matrix()).project_point3(world);
    let x = (ndc.x + 1.0) * 0.5 * VIEW_W;
    let y = (1.0 - ndc.y) * 0.5 * VIEW_H;
    (x, y)
}

/// Session placed at the fixture anchor with the given layer shown.
pub fn placed_session(layer: Layer) -> (ViewerSession, PartScene) {
    let mut scene = fixture_scene();
    let mut session = ViewerSession::new(ViewerConfig::default());
    session.begin_ar(&mut scene);
    _ = session.on_candidate_pose(Some(anchor_pose()));
    session.confirm_placement(&mut scene).expect("placement");
    session.select_layer(layer, &mut scene);
    (session, scene)
}
