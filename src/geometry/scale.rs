use crate::foundation::core::{KeypointIndex, Point, Pose};

/// Lower clamp for a boundary rescale.
pub const MIN_BODY_SCALE: f64 = 0.5;
/// Upper clamp for a boundary rescale.
pub const MAX_BODY_SCALE: f64 = 2.0;

const MEASURE_EPS: f64 = 1e-6;

// Limb pairs compared across a cut. Slot 1 stands in for the neck in COCO-17.
const MEASURES: [(KeypointIndex, KeypointIndex); 4] = [
    (KeypointIndex::LeftShoulder, KeypointIndex::RightShoulder),
    (KeypointIndex::LeftHip, KeypointIndex::RightHip),
    (KeypointIndex::LeftEye, KeypointIndex::LeftHip),
    (KeypointIndex::LeftAnkle, KeypointIndex::RightAnkle),
];

const ANCHOR_SLOTS: [KeypointIndex; 4] = [
    KeypointIndex::LeftShoulder,
    KeypointIndex::RightShoulder,
    KeypointIndex::LeftHip,
    KeypointIndex::RightHip,
];

/// Torso centroid: mean of the present shoulder and hip keypoints, `(0.5, 0.5)` if none.
pub fn anchor(pose: &Pose) -> Point {
    let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
    for slot in ANCHOR_SLOTS {
        let k = pose.get(slot);
        if k.is_present() {
            sx += k.x;
            sy += k.y;
            n += 1;
        }
    }
    if n == 0 {
        return Point::new(0.5, 0.5);
    }
    Point::new(sx / n as f64, sy / n as f64)
}

/// Estimate how much `next` must be scaled so its body proportions match `prev`.
///
/// Each limb pair measurable in both poses yields a ratio `prev / next`; the ratio
/// closest to `1` in log space wins, so one badly detected limb cannot blow up the
/// scale. The result is clamped to `[MIN_BODY_SCALE, MAX_BODY_SCALE]`, and is `1.0`
/// when nothing is measurable.
pub fn body_scale_ratio(prev: &Pose, next: &Pose) -> f64 {
    let best = MEASURES
        .iter()
        .filter_map(|&(a, b)| {
            let (p, n) = (prev.span(a, b), next.span(a, b));
            (p > MEASURE_EPS && n > MEASURE_EPS).then_some(p / n)
        })
        .min_by(|x, y| log_cost(*x).total_cmp(&log_cost(*y)));

    match best {
        Some(r) => r.clamp(MIN_BODY_SCALE, MAX_BODY_SCALE),
        None => 1.0,
    }
}

fn log_cost(ratio: f64) -> f64 {
    ratio.max(MEASURE_EPS).ln().abs()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/scale.rs"]
mod tests;
