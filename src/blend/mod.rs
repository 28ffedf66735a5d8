/// Weight curves for blend frames.
pub mod curve;
/// Interpolated frames bridging two boundary poses.
pub mod synth;
