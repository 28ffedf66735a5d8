use super::*;
use crate::{
    fixtures::{raw, standing_kpts},
    foundation::core::{RawFrame, Vec2},
};

fn pair() -> (RawFrame, RawFrame) {
    (
        raw(standing_kpts(0.3, 0.5, 1.0, 0.0, 1.0)),
        raw(standing_kpts(0.6, 0.5, 1.0, 0.0, 0.5)),
    )
}

#[test]
fn blend_yields_exactly_n_interior_frames() {
    let (a, b) = pair();
    let out = blend_frames(
        Some(&a),
        SegmentTransform::IDENTITY,
        Some(&b),
        SegmentTransform::IDENTITY,
        3,
    );
    assert_eq!(out.len(), 3);

    // t = 1/4 and t = 3/4; neither endpoint is repeated.
    let first = out[0].pose.keypoints[0];
    let last = out[2].pose.keypoints[0];
    assert!((first.x - 0.375).abs() < 1e-12);
    assert!((last.x - 0.525).abs() < 1e-12);
    assert!((first.confidence - 0.875).abs() < 1e-12);
    assert!(out.iter().all(|f| f.origin == FrameOrigin::Blend));
}

#[test]
fn zero_count_or_missing_boundary_is_empty() {
    let (a, b) = pair();
    let id = SegmentTransform::IDENTITY;
    assert!(blend_frames(Some(&a), id, Some(&b), id, 0).is_empty());
    assert!(blend_frames(None, id, Some(&b), id, 4).is_empty());
    assert!(blend_frames(Some(&a), id, None, id, 4).is_empty());

    let empty = RawFrame::default();
    assert!(blend_frames(Some(&a), id, Some(&empty), id, 4).is_empty());
}

#[test]
fn boundary_transforms_are_applied_before_interpolating() {
    let (a, _) = pair();
    let shifted = SegmentTransform::new(1.0, Vec2::new(0.3, 0.0));
    let out = blend_frames(Some(&a), SegmentTransform::IDENTITY, Some(&a), shifted, 1);
    // halfway between nose x 0.3 and 0.6
    assert!((out[0].pose.keypoints[0].x - 0.45).abs() < 1e-12);
}

#[test]
fn size_and_fps_come_from_next_then_prev() {
    let (mut a, mut b) = pair();
    a.fps = Some(24.0);
    b.fps = None;
    b.width = 0.0;
    let out = blend_frames(Some(&a), SegmentTransform::IDENTITY, Some(&b), SegmentTransform::IDENTITY, 1);
    assert_eq!(out[0].fps, Some(24.0));
    assert_eq!((out[0].width, out[0].height), (1280, 720));

    a.fps = None;
    let out = blend_frames(Some(&a), SegmentTransform::IDENTITY, Some(&b), SegmentTransform::IDENTITY, 1);
    assert_eq!(out[0].fps, Some(DEFAULT_BLEND_FPS));
}

#[test]
fn buffered_frames_can_seed_a_blend() {
    let (a, b) = pair();
    let buffered = blend_frames(Some(&a), SegmentTransform::IDENTITY, Some(&b), SegmentTransform::IDENTITY, 1)
        .remove(0);
    let out = blend_frames(Some(&buffered), SegmentTransform::IDENTITY, Some(&b), SegmentTransform::IDENTITY, 1);
    assert!((out[0].pose.keypoints[0].x - 0.525).abs() < 1e-12);
}

#[test]
fn smoothstep_blend_keeps_order_between_endpoints() {
    let (a, b) = pair();
    let id = SegmentTransform::IDENTITY;
    let out = blend_frames_with_curve(Some(&a), id, Some(&b), id, 6, SeamCurve::Smoothstep);
    let xs: Vec<f64> = out.iter().map(|f| f.pose.keypoints[0].x).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
    assert!(xs[0] > 0.3 && xs[5] < 0.6);
}
