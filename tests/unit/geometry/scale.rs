use super::*;
use crate::{
    fixtures::standing_pose,
    foundation::core::{KEYPOINT_COUNT, Keypoint},
};

#[test]
fn identical_poses_have_unit_ratio() {
    let p = standing_pose(0.5, 0.5, 1.0);
    assert_eq!(body_scale_ratio(&p, &p), 1.0);
}

#[test]
fn ratio_tracks_relative_body_size() {
    let big = standing_pose(0.5, 0.5, 1.0);
    let small = standing_pose(0.4, 0.6, 0.8);
    let r = body_scale_ratio(&big, &small);
    assert!((r - 1.25).abs() < 1e-9, "ratio {r}");
}

#[test]
fn ratio_is_clamped() {
    let big = standing_pose(0.5, 0.5, 1.0);
    let tiny = standing_pose(0.5, 0.5, 0.1);
    assert_eq!(body_scale_ratio(&big, &tiny), MAX_BODY_SCALE);
    assert_eq!(body_scale_ratio(&tiny, &big), MIN_BODY_SCALE);
}

#[test]
fn unmeasurable_poses_fall_back_to_unit() {
    let empty = Pose::default();
    let p = standing_pose(0.5, 0.5, 1.0);
    assert_eq!(body_scale_ratio(&empty, &p), 1.0);
    assert_eq!(body_scale_ratio(&p, &empty), 1.0);
}

#[test]
fn ratio_closest_to_one_wins() {
    let a = standing_pose(0.5, 0.5, 1.0);
    let mut b = a;
    // Shoulders twice as wide; every other limb unchanged.
    b.keypoints[5].x -= 0.1;
    b.keypoints[6].x += 0.1;
    assert_eq!(body_scale_ratio(&a, &b), 1.0);
}

#[test]
fn ratio_always_within_clamp_range() {
    for s in [0.05, 0.3, 0.7, 1.0, 1.9, 3.5] {
        let a = standing_pose(0.5, 0.5, 1.0);
        let b = standing_pose(0.5, 0.5, s);
        let r = body_scale_ratio(&a, &b);
        assert!((MIN_BODY_SCALE..=MAX_BODY_SCALE).contains(&r));
    }
}

#[test]
fn anchor_averages_present_torso_points() {
    let mut p = Pose::default();
    p.keypoints[5] = Keypoint::new(0.2, 0.2, 1.0);
    p.keypoints[6] = Keypoint::new(0.4, 0.2, 1.0);
    p.keypoints[11] = Keypoint::new(0.9, 0.9, 0.0);
    let a = anchor(&p);
    assert!((a.x - 0.3).abs() < 1e-12);
    assert!((a.y - 0.2).abs() < 1e-12);
}

#[test]
fn anchor_falls_back_to_centre() {
    let p = Pose::new([Keypoint::default(); KEYPOINT_COUNT]);
    assert_eq!(anchor(&p), Point::new(0.5, 0.5));
}
