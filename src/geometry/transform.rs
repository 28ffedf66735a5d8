use crate::foundation::{
    core::{Keypoint, Pose, Vec2},
    math::clamp01,
};

/// Uniform scale followed by a translation, in normalized space.
///
/// This is the continuity state carried from one segment to the next: every frame of a
/// segment is drawn as `p * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentTransform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Translation applied after scaling.
    pub offset: Vec2,
}

impl SegmentTransform {
    /// No-op transform.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    /// Create a transform.
    pub fn new(scale: f64, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    /// Same scale, no translation.
    pub fn scale_only(scale: f64) -> Self {
        Self::new(scale, Vec2::ZERO)
    }

    /// Apply without clamping; used for anchor math.
    pub fn apply(&self, pose: &Pose) -> Pose {
        self.map(pose, |v| v)
    }

    /// Apply and clamp every coordinate into `[0, 1]`; used for emitted frames.
    pub fn apply_clamped(&self, pose: &Pose) -> Pose {
        self.map(pose, clamp01)
    }

    fn map(&self, pose: &Pose, fix: impl Fn(f64) -> f64) -> Pose {
        let mut out = *pose;
        for k in &mut out.keypoints {
            *k = Keypoint::new(
                fix(k.x * self.scale + self.offset.x),
                fix(k.y * self.scale + self.offset.y),
                k.confidence,
            );
        }
        out
    }
}

impl Default for SegmentTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
