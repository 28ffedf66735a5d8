use crate::{
    blend::curve::SeamCurve,
    foundation::{
        core::{Canvas, FrameOrigin, KEYPOINT_COUNT, Keypoint, Pose, PoseFrame, PoseSample},
        math::lerp,
    },
    geometry::transform::SegmentTransform,
};

/// Frame rate stamped on blend frames when neither boundary declares one.
pub const DEFAULT_BLEND_FPS: f64 = 30.0;

/// `n` frames interpolated linearly between two transformed boundary poses.
///
/// Frame `i` (1-based) sits at `t = i / (n + 1)`, so neither endpoint is repeated.
/// Empty when either boundary is missing or carries no keypoints, or when `n == 0`.
pub fn blend_frames(
    prev: Option<&dyn PoseSample>,
    prev_transform: SegmentTransform,
    next: Option<&dyn PoseSample>,
    next_transform: SegmentTransform,
    n: usize,
) -> Vec<PoseFrame> {
    blend_frames_with_curve(prev, prev_transform, next, next_transform, n, SeamCurve::Linear)
}

/// [`blend_frames`] with the blend weights taken from `curve`.
pub fn blend_frames_with_curve(
    prev: Option<&dyn PoseSample>,
    prev_transform: SegmentTransform,
    next: Option<&dyn PoseSample>,
    next_transform: SegmentTransform,
    n: usize,
    curve: SeamCurve,
) -> Vec<PoseFrame> {
    let (Some(prev), Some(next)) = (prev, next) else {
        return Vec::new();
    };
    if n == 0 || !prev.has_keypoints() || !next.has_keypoints() {
        return Vec::new();
    }

    let canvas = next
        .frame_size()
        .or_else(|| prev.frame_size())
        .unwrap_or_default();
    let fps = next
        .frame_fps()
        .or_else(|| prev.frame_fps())
        .unwrap_or(DEFAULT_BLEND_FPS);
    let a = prev_transform.apply_clamped(&prev.normalized_pose());
    let b = next_transform.apply_clamped(&next.normalized_pose());

    curve
        .weights(n)
        .map(|t| blend_frame(&a, &b, t, canvas, fps))
        .collect()
}

fn blend_frame(a: &Pose, b: &Pose, t: f64, canvas: Canvas, fps: f64) -> PoseFrame {
    let keypoints: [Keypoint; KEYPOINT_COUNT] = std::array::from_fn(|j| {
        let (ka, kb) = (a.keypoints[j], b.keypoints[j]);
        Keypoint::new(
            lerp(ka.x, kb.x, t),
            lerp(ka.y, kb.y, t),
            lerp(ka.confidence, kb.confidence, t),
        )
    });
    PoseFrame {
        width: canvas.width,
        height: canvas.height,
        pose: Pose::new(keypoints),
        fps: Some(fps),
        timestamp: None,
        origin: FrameOrigin::Blend,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/synth.rs"]
mod tests;
