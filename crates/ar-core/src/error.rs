//! Error taxonomy shared by the core and the web front-end.
//!
//! Every variant is terminal only to the action that raised it; none of them
//! tear down the session.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewerError {
    #[error("AR is not supported in this environment: {0}")]
    EnvironmentUnsupported(String),
    #[error("failed to start AR session: {0}")]
    SessionStartFailure(String),
    #[error("no surface detected yet")]
    NoSurfaceDetected,
    #[error("model is already placed")]
    AlreadyPlaced,
    #[error("organ metadata unavailable: {0}")]
    MetadataUnavailable(String),
    #[error("invalid pose")]
    InvalidPose,
    #[error("invalid parts manifest: {0}")]
    Manifest(String),
}

impl ViewerError {
    pub fn user_message(&self) -> String {
        match self {
            Self::EnvironmentUnsupported(_) => {
                "AR is not supported on this device or browser.".to_string()
            }
            Self::SessionStartFailure(_) => "Could not start AR. Please try again.".to_string(),
            Self::NoSurfaceDetected => {
                "No surface detected yet. Move your phone slowly over a flat surface.".to_string()
            }
            Self::AlreadyPlaced => "The model is already placed.".to_string(),
            Self::MetadataUnavailable(_) => {
                "Organ descriptions are unavailable; showing names only.".to_string()
            }
            Self::InvalidPose => "Surface tracking returned an invalid pose.".to_string(),
            Self::Manifest(_) => "Model parts could not be loaded; tapping is disabled.".to_string(),
        }
    }

    /// Blocking errors disable the feature instead of showing a transient banner.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::EnvironmentUnsupported(_))
    }
}
