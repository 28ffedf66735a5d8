//! Conversions between raw (pixel or normalized) keypoints and normalized poses.

use crate::foundation::core::{Canvas, KEYPOINT_COUNT, Keypoint, Pose, PoseSample, RawFrame};

/// Raw keypoints count as already normalized when the first entry lies inside `[.., 1.1]`.
pub const NORMALIZED_LIMIT: f64 = 1.1;

/// Detect whether raw keypoints are already in unit space.
pub fn is_normalized(kpts: &[Vec<f64>]) -> bool {
    kpts.first()
        .is_some_and(|k| k.len() >= 2 && k[0] <= NORMALIZED_LIMIT && k[1] <= NORMALIZED_LIMIT)
}

fn raw_slot(kpts: &[Vec<f64>], i: usize) -> Option<(f64, f64, f64)> {
    let k = kpts.get(i)?;
    if k.len() < 2 {
        return None;
    }
    let confidence = k.get(2).copied().unwrap_or(1.0);
    Some((k[0], k[1], confidence))
}

/// Normalize a raw frame into unit space. Always yields 17 slots.
pub fn normalize(frame: &RawFrame) -> Pose {
    let mut pose = Pose::default();
    if frame.kpts.is_empty() {
        return pose;
    }

    let norm = is_normalized(&frame.kpts);
    let (w, h) = (frame.width, frame.height);
    for (i, slot) in pose.keypoints.iter_mut().enumerate() {
        let Some((x, y, c)) = raw_slot(&frame.kpts, i) else {
            continue;
        };
        let x = if norm {
            x
        } else if w > 0.0 {
            x / w
        } else {
            0.0
        };
        let y = if norm {
            y
        } else if h > 0.0 {
            y / h
        } else {
            0.0
        };
        *slot = Keypoint::new(x, y, c);
    }
    pose
}

/// Map a raw frame to integer pixel coordinates. Always yields 17 slots.
pub fn denormalize(frame: &RawFrame) -> Pose {
    let mut pose = Pose::default();
    if frame.kpts.is_empty() {
        return pose;
    }

    let norm = is_normalized(&frame.kpts);
    for (i, slot) in pose.keypoints.iter_mut().enumerate() {
        let Some((x, y, c)) = raw_slot(&frame.kpts, i) else {
            continue;
        };
        let (x, y) = if norm {
            ((x * frame.width).round(), (y * frame.height).round())
        } else {
            (x.round(), y.round())
        };
        *slot = Keypoint::new(x, y, c);
    }
    pose
}

/// Map a normalized pose onto a canvas, rounding to whole pixels.
pub fn to_pixels(pose: &Pose, canvas: Canvas) -> Pose {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let mut out = *pose;
    for k in &mut out.keypoints {
        k.x = (k.x * w).round();
        k.y = (k.y * h).round();
    }
    out
}

impl PoseSample for RawFrame {
    fn normalized_pose(&self) -> Pose {
        normalize(self)
    }

    fn has_keypoints(&self) -> bool {
        self.kpts.iter().take(KEYPOINT_COUNT).any(|k| k.len() >= 2)
    }

    fn frame_size(&self) -> Option<Canvas> {
        (self.width > 0.0 && self.height > 0.0)
            .then(|| Canvas::new(self.width.round() as u32, self.height.round() as u32))
    }

    fn frame_fps(&self) -> Option<f64> {
        self.fps.filter(|f| *f > 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/normalize.rs"]
mod tests;
