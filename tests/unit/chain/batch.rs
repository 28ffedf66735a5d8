use super::*;
use crate::{
    fixtures::{LibraryBuilder, canvas, standing_kpts},
    foundation::core::FrameOrigin,
};

fn two_clip_library() -> LibraryBuilder {
    LibraryBuilder::new(4)
        .segment(standing_kpts(0.5, 0.5, 1.0, 0.0, 1.0))
        .segment(standing_kpts(0.5, 0.5, 0.8, 0.04, 1.0))
}

#[test]
fn two_segments_with_blend_produce_ten_frames() {
    let b = two_clip_library();
    let lib = b.build();
    let w = lib.windows.as_ref().unwrap();
    let out = chain_segments(w, &lib.sources, &lib.segments, 2, canvas());
    assert_eq!(out.len(), 10);

    let origins: Vec<_> = out.iter().map(|f| f.origin).collect();
    assert!(origins[..4].iter().all(|o| *o == FrameOrigin::Source));
    assert!(origins[4..6].iter().all(|o| *o == FrameOrigin::Blend));
    assert!(origins[6..].iter().all(|o| *o == FrameOrigin::Source));

    let last_x = out[3].pose.keypoints[0].x;
    let next_x = out[6].pose.keypoints[0].x;
    assert!((last_x - 0.5).abs() < 1e-9);
    assert!((next_x - 0.54).abs() < 1e-9);
    for f in &out[4..6] {
        let x = f.pose.keypoints[0].x;
        assert!(last_x < x && x < next_x, "{x}");
    }
}

#[test]
fn second_segment_is_drawn_at_first_segment_size() {
    let lib = two_clip_library().build();
    let w = lib.windows.as_ref().unwrap();
    let out = chain_segments(w, &lib.sources, &lib.segments, 0, canvas());
    assert_eq!(out.len(), 8);
    let span = |f: &PoseFrame| f.pose.keypoints[6].x - f.pose.keypoints[5].x;
    assert!((span(&out[3]) - span(&out[4])).abs() < 1e-9);
}

#[test]
fn chaining_without_blend_is_deterministic() {
    let lib = two_clip_library()
        .segment(standing_kpts(0.4, 0.5, 1.1, -0.02, 0.9))
        .build();
    let w = lib.windows.as_ref().unwrap();
    let a = chain_segments(w, &lib.sources, &lib.segments, 0, canvas());
    let b = chain_segments(w, &lib.sources, &lib.segments, 0, canvas());
    assert_eq!(a, b);
}

#[test]
fn zero_or_one_segment_needs_no_seam() {
    let lib = two_clip_library().build();
    let w = lib.windows.as_ref().unwrap();
    assert!(chain_segments(w, &lib.sources, &[], 4, canvas()).is_empty());

    let one = chain_segments(w, &lib.sources, &lib.segments[1..], 4, canvas());
    assert_eq!(one.len(), 4);
    assert!(one.iter().all(|f| f.origin == FrameOrigin::Source));
    // first segment is drawn untransformed
    assert!((one[0].pose.keypoints[0].x - 0.532).abs() < 1e-9);
}

#[test]
fn missing_source_yields_no_frames_and_no_blend() {
    let lib = two_clip_library().without_source().build();
    let w = lib.windows.as_ref().unwrap();
    assert!(chain_segments(w, &lib.sources, &lib.segments, 3, canvas()).is_empty());
}
