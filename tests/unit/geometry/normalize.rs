use super::*;

fn frame(w: f64, h: f64, kpts: Vec<Vec<f64>>) -> RawFrame {
    RawFrame {
        width: w,
        height: h,
        kpts,
        ..RawFrame::default()
    }
}

#[test]
fn pixel_keypoints_are_divided_by_size() {
    let f = frame(200.0, 100.0, vec![vec![50.0, 25.0, 0.9], vec![100.0, 100.0]]);
    let p = normalize(&f);
    assert_eq!(p.keypoints[0], Keypoint::new(0.25, 0.25, 0.9));
    assert_eq!(p.keypoints[1], Keypoint::new(0.5, 1.0, 1.0));
    assert_eq!(p.keypoints[2], Keypoint::default());
}

#[test]
fn normalized_keypoints_pass_through() {
    let f = frame(200.0, 100.0, vec![vec![0.3, 0.6, 0.7]]);
    assert!(is_normalized(&f.kpts));
    assert_eq!(normalize(&f).keypoints[0], Keypoint::new(0.3, 0.6, 0.7));
}

#[test]
fn zero_size_pixel_frames_collapse_to_origin() {
    let f = frame(0.0, 0.0, vec![vec![40.0, 30.0, 1.0]]);
    assert_eq!(normalize(&f).keypoints[0], Keypoint::new(0.0, 0.0, 1.0));
}

#[test]
fn outputs_always_have_seventeen_slots() {
    for kpts in [vec![], vec![vec![1.0]], vec![vec![0.1, 0.1]; 30]] {
        let f = frame(100.0, 100.0, kpts);
        assert_eq!(normalize(&f).keypoints.len(), KEYPOINT_COUNT);
        assert_eq!(denormalize(&f).keypoints.len(), KEYPOINT_COUNT);
    }
}

#[test]
fn denormalize_rounds_to_pixels() {
    let f = frame(640.0, 480.0, vec![vec![0.5, 0.251, 0.8]]);
    assert_eq!(denormalize(&f).keypoints[0], Keypoint::new(320.0, 120.0, 0.8));

    let px = frame(640.0, 480.0, vec![vec![12.4, 99.6]]);
    assert_eq!(denormalize(&px).keypoints[0], Keypoint::new(12.0, 100.0, 1.0));
}

#[test]
fn raw_frame_sample_reports_size_and_keypoints() {
    let f = frame(640.0, 480.0, vec![vec![0.5, 0.5]]);
    assert!(f.has_keypoints());
    assert_eq!(f.frame_size(), Some(Canvas::new(640, 480)));
    assert!(!frame(640.0, 480.0, vec![]).has_keypoints());
    assert_eq!(frame(0.0, 480.0, vec![]).frame_size(), None);
}

#[test]
fn to_pixels_scales_onto_canvas() {
    let mut pose = Pose::default();
    pose.keypoints[0] = Keypoint::new(0.5, 0.25, 1.0);
    let px = to_pixels(&pose, Canvas::new(1280, 720));
    assert_eq!(px.keypoints[0], Keypoint::new(640.0, 180.0, 1.0));
}
