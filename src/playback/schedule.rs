use std::time::Duration;

use crate::foundation::core::{FrameOrigin, PoseFrame};

const MIN_SPEED: f64 = 1e-6;

/// Delay before the frame after `cur` should be shown.
///
/// Live frames are due immediately so live input is shown with no added latency.
/// Otherwise uses `1 / fps` of `cur` when it declares a positive rate, else the timestamp delta
/// (milliseconds, never negative) between `prev` and `cur`, else `1 / fallback_fps`.
/// The result is divided by `speed`.
pub fn schedule(
    prev: Option<&PoseFrame>,
    cur: &PoseFrame,
    speed: f64,
    fallback_fps: f64,
) -> Duration {
    if cur.origin == FrameOrigin::Live {
        return Duration::ZERO;
    }
    let secs = match (cur.fps, prev.and_then(|p| p.timestamp), cur.timestamp) {
        (Some(fps), _, _) if fps > 0.0 => 1.0 / fps,
        (_, Some(a), Some(b)) => ((b - a) / 1000.0).max(0.0),
        _ => 1.0 / fallback_fps.max(1.0),
    };
    let secs = secs / speed.max(MIN_SPEED);
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/schedule.rs"]
mod tests;
