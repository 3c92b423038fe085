use crate::organ::OrganId;

// Shared tuning constants for placement, transform controls and picking.

// User transform controls
pub const MIN_MODEL_SCALE: f32 = 0.1; // smallest uniform scale the slider may request
pub const MAX_MODEL_SCALE: f32 = 3.0; // largest uniform scale the slider may request
pub const DEFAULT_MODEL_SCALE: f32 = 1.0;

// Non-AR preview: model floats in front of a fixed camera
pub const PREVIEW_MODEL_POSITION: [f32; 3] = [0.0, -0.5, -2.0];
pub const PREVIEW_CAMERA_EYE: [f32; 3] = [0.0, 0.0, 0.0];
pub const PREVIEW_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 100.0;

// Picking
pub const RAY_EPSILON: f32 = 1e-6; // parallel-slab tolerance for ray/box tests

// Transient user messages (seconds on screen)
pub const MESSAGE_TTL_SEC: f32 = 2.5;

// Exported node names that carry no organ keyword but still denote an organ.
pub const NAMED_ORGAN_PARTS: [(&str, OrganId); 6] = [
    ("Object_12", OrganId::Heart),
    ("Object_14", OrganId::Lungs),
    ("Object_9", OrganId::Brain),
    ("Object_4", OrganId::Skeleton),
    ("Object_21", OrganId::Tusk),
    ("Object_23", OrganId::Trunk),
];

