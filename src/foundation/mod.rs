/// Pose, keypoint and frame types shared by every layer.
pub mod core;
/// Crate error type.
pub mod error;
pub(crate) mod math;
