use crate::foundation::core::{Canvas, Pose};

/// `true` when a normalized pose would render fully and plausibly on `canvas`.
///
/// Every keypoint must reach `min_confidence` and lie inside the unit square, and the
/// vertical extent in pixels must stay below `max_height_ratio * canvas.height`.
pub fn pose_in_bounds(
    pose: &Pose,
    canvas: Canvas,
    max_height_ratio: f64,
    min_confidence: f64,
) -> bool {
    if pose.keypoints.iter().any(|k| k.confidence < min_confidence) {
        return false;
    }

    let inside = |v: f64| (0.0..=1.0).contains(&v);
    if !pose.keypoints.iter().all(|k| inside(k.x) && inside(k.y)) {
        return false;
    }

    let h = f64::from(canvas.height);
    let (min_y, max_y) = pose
        .keypoints
        .iter()
        .map(|k| k.y * h)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    max_y - min_y < h * max_height_ratio
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bounds.rs"]
mod tests;
