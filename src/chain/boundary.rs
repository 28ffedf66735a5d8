use crate::{
    blend::{curve::SeamCurve, synth::blend_frames_with_curve},
    foundation::core::{PoseFrame, PoseSample},
    geometry::{
        scale::{anchor, body_scale_ratio},
        transform::SegmentTransform,
    },
};

/// Transform for the next segment so it continues the outgoing one.
///
/// The scale accumulates the body-size ratio at the cut; the offset moves the next
/// start pose's anchor onto the outgoing end pose's anchor (both as drawn).
pub fn boundary_transform(
    prev_end: &dyn PoseSample,
    prev: SegmentTransform,
    next_start: &dyn PoseSample,
) -> SegmentTransform {
    let (prev_pose, next_pose) = (prev_end.normalized_pose(), next_start.normalized_pose());
    let scale = prev.scale * body_scale_ratio(&prev_pose, &next_pose);
    let drawn_prev = anchor(&prev.apply(&prev_pose));
    let drawn_next = anchor(&SegmentTransform::scale_only(scale).apply(&next_pose));
    SegmentTransform::new(scale, drawn_prev - drawn_next)
}

/// A computed cut: the next segment's transform plus the frames bridging into it.
#[derive(Clone, Debug, PartialEq)]
pub struct Seam {
    /// Transform to draw the next segment with.
    pub transform: SegmentTransform,
    /// Blend frames to insert before the next segment.
    pub blend: Vec<PoseFrame>,
}

/// Transform the next segment receives at a cut, without synthesizing blend frames.
///
/// When the outgoing frame is unavailable, or the incoming one is unavailable or carries
/// no keypoints, the running scale is kept with no translation. An outgoing placeholder
/// has no keypoints, so its anchor falls back to the canvas centre and the next segment
/// is re-centred there.
pub fn seam_transform(
    prev_end: Option<&dyn PoseSample>,
    prev: SegmentTransform,
    next_start: Option<&dyn PoseSample>,
) -> SegmentTransform {
    match (prev_end, next_start.filter(|s| s.has_keypoints())) {
        (Some(a), Some(b)) => boundary_transform(a, prev, b),
        _ => SegmentTransform::scale_only(prev.scale),
    }
}

/// Stitch an outgoing boundary frame to an incoming one.
///
/// Same transform as [`seam_transform`]; blend frames are only produced when both
/// boundary frames carry keypoints.
pub fn stitch(
    prev_end: Option<&dyn PoseSample>,
    prev: SegmentTransform,
    next_start: Option<&dyn PoseSample>,
    blend_n: usize,
    curve: SeamCurve,
) -> Seam {
    let transform = seam_transform(prev_end, prev, next_start);
    let blend = blend_frames_with_curve(prev_end, prev, next_start, transform, blend_n, curve);
    Seam { transform, blend }
}

#[cfg(test)]
#[path = "../../tests/unit/chain/boundary.rs"]
mod tests;
