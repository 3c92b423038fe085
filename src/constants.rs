// DOM contract of the viewer page: element ids, classes and layout tuning.

// Canvas and overlay roots
pub const CANVAS_ID: &str = "ar-canvas";
pub const OVERLAY_ROOT_ID: &str = "ar-overlay";
pub const CONFIG_SCRIPT_ID: &str = "viewer-config";

// Scene entities mirrored from the interaction core
pub const MODEL_ENTITY_ID: &str = "anatomy-model";
pub const RETICLE_ENTITY_ID: &str = "reticle";

// Buttons
pub const BTN_ENTER_AR: &str = "btnEnterAr";
pub const BTN_EXIT_AR: &str = "btnExitAr";
pub const BTN_PLACE: &str = "btnPlace";
pub const BTN_BODY: &str = "btnBody";
pub const BTN_SKELETON: &str = "btnSkeleton";
pub const BTN_ORGANS: &str = "btnOrgans";
pub const BTN_DETAIL_CLOSE: &str = "detail-close";

// Sliders
pub const SCALE_SLIDER_ID: &str = "scaleSlider";
pub const ROTATE_SLIDER_ID: &str = "rotateSlider";

// Panels
pub const LAYER_CONTROLS_ID: &str = "layer-controls";
pub const TRANSFORM_CONTROLS_ID: &str = "transform-controls";
pub const PLACE_HINT_ID: &str = "place-hint";
pub const MESSAGE_BANNER_ID: &str = "message-banner";
pub const TOOLTIP_ID: &str = "organ-tooltip";
pub const DETAIL_ID: &str = "organ-detail";
pub const DETAIL_BODY_ID: &str = "organ-detail-body";

// Classes
pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";
// Taps landing inside these never reach the picker.
pub const CONTROL_SELECTOR: &str = "button, input, .panel, #organ-tooltip, #organ-detail";

// Tooltip placement (CSS px)
pub const TOOLTIP_OFFSET_PX: f32 = 12.0; // gap between pointer and tooltip corner
pub const TOOLTIP_EST_WIDTH_PX: f32 = 220.0;
pub const TOOLTIP_EST_HEIGHT_PX: f32 = 96.0;
pub const TOOLTIP_MARGIN_PX: f32 = 8.0; // keep-away from viewport edges
