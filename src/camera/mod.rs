//! Camera system: orbital rig state and perspective projection.

/// Perspective camera and GPU uniform types.
pub mod core;
/// Clamped orbital camera rig.
pub mod rig;

pub use core::{Camera, CameraUniform};
pub use rig::CameraRig;
