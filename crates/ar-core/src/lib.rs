//! Platform-free interaction core of the anatomy AR viewer.
//!
//! Everything here is plain Rust over `glam` math so it can be exercised on a
//! desktop toolchain; the web front-end only forwards DOM and WebXR events.

pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod layers;
pub mod organ;
pub mod picker;
pub mod placement;
pub mod pose;
pub mod scene;
pub mod session;
pub mod tooltip;

pub use camera::*;
pub use config::*;
pub use error::*;
pub use layers::*;
pub use organ::*;
pub use picker::*;
pub use placement::*;
pub use pose::*;
pub use scene::*;
pub use session::*;
pub use tooltip::*;
