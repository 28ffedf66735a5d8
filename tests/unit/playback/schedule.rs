use super::*;
use crate::{
    fixtures::{canvas, standing_pose},
    foundation::core::FrameOrigin,
};

fn frame(fps: Option<f64>, ts: Option<f64>) -> PoseFrame {
    PoseFrame {
        fps,
        timestamp: ts,
        origin: FrameOrigin::Source,
        ..PoseFrame::live(standing_pose(0.5, 0.5, 1.0), canvas(), 30.0)
    }
}

fn close(d: Duration, secs: f64) -> bool {
    (d.as_secs_f64() - secs).abs() < 1e-9
}

#[test]
fn fps_wins_over_timestamps() {
    let prev = frame(None, Some(0.0));
    let cur = frame(Some(25.0), Some(500.0));
    assert!(close(schedule(Some(&prev), &cur, 1.0, 30.0), 0.04));
}

#[test]
fn timestamp_delta_in_milliseconds() {
    let prev = frame(None, Some(1000.0));
    let cur = frame(None, Some(1050.0));
    assert!(close(schedule(Some(&prev), &cur, 1.0, 30.0), 0.05));
    // out-of-order timestamps never schedule into the past
    assert_eq!(schedule(Some(&cur), &prev, 1.0, 30.0), Duration::ZERO);
}

#[test]
fn fallback_rate_without_hints() {
    let cur = frame(Some(0.0), Some(10.0));
    assert!(close(schedule(None, &cur, 1.0, 20.0), 0.05));
    assert!(close(schedule(None, &cur, 1.0, 0.0), 1.0));
}

#[test]
fn speed_divides_the_delay() {
    let cur = frame(Some(10.0), None);
    assert!(close(schedule(None, &cur, 2.0, 30.0), 0.05));
    assert!(close(schedule(None, &cur, 0.5, 30.0), 0.2));
}

#[test]
fn zero_speed_does_not_panic() {
    let cur = frame(Some(10.0), None);
    let d = schedule(None, &cur, 0.0, 30.0);
    assert!(d > Duration::from_secs(1000));
}

#[test]
fn live_frames_are_due_immediately() {
    let prev = frame(None, Some(0.0));
    let live = PoseFrame::live(standing_pose(0.5, 0.5, 1.0), canvas(), 30.0);
    assert_eq!(schedule(Some(&prev), &live, 1.0, 30.0), Duration::ZERO);
    assert_eq!(schedule(None, &live, 0.5, 30.0), Duration::ZERO);
}
