//! Resolution of window ranges to concrete recorded frames.

use std::ops::Range;

use crate::{
    foundation::core::{Canvas, FrameOrigin, PoseFrame, RawFrame},
    geometry::{normalize::normalize, transform::SegmentTransform},
    index::model::{Segment, SourceMap, WindowsIndex},
};

/// First frame of a window, or its last (`window - 1`-th) frame when `from_end`.
///
/// `None` when the window index is out of range, the source is not loaded, or the
/// frame lies outside the source.
pub fn resolve_edge_frame<'a>(
    windows: &WindowsIndex,
    sources: &'a SourceMap,
    window_index: usize,
    from_end: bool,
) -> Option<&'a RawFrame> {
    let rec = windows.windows.get(window_index)?;
    let frames = sources.get(rec.source_key())?;
    let fi = if from_end {
        rec.last_frame(windows.window_len())?
    } else {
        rec.start
    };
    frames.get(usize::try_from(fi).ok()?)
}

/// Iterator over the recorded frames of a segment, in playback order.
///
/// Consecutive windows from the same source that overlap are deduplicated. A window
/// whose source is missing, or whose frame range overflows, contributes nothing and
/// breaks contiguity. Window indices past the end of the index are never visited.
#[derive(Clone, Debug)]
pub struct SegmentWalk<'a> {
    windows: &'a WindowsIndex,
    sources: &'a SourceMap,
    pending: Range<usize>,
    // (source key, last frame index the previous window covered)
    prev: Option<(&'a str, i64)>,
    current: &'a [RawFrame],
}

impl<'a> SegmentWalk<'a> {
    /// Start walking `segment`.
    pub fn new(windows: &'a WindowsIndex, sources: &'a SourceMap, segment: &Segment) -> Self {
        Self {
            windows,
            sources,
            pending: segment.start..segment.end.saturating_add(1).min(windows.windows.len()),
            prev: None,
            current: &[],
        }
    }

    fn open_next_window(&mut self) -> bool {
        let (windows, sources) = (self.windows, self.sources);
        for wi in self.pending.by_ref() {
            let Some(rec) = windows.windows.get(wi) else {
                continue;
            };
            let key = rec.source_key();
            let Some(frames) = sources.get(key) else {
                tracing::trace!(window = wi, source = key, "window source not loaded");
                self.prev = None;
                continue;
            };
            let Some(end) = rec.last_frame(windows.window_len()) else {
                tracing::trace!(window = wi, start = rec.start, "window range overflows");
                self.prev = None;
                continue;
            };

            let start = rec.start;
            let first = match self.prev {
                Some((prev_key, prev_end)) if prev_key == key => {
                    start.max(prev_end.saturating_add(1))
                }
                _ => start,
            };
            self.prev = Some((key, end));

            let index = |v: i64| usize::try_from(v.max(0)).unwrap_or(usize::MAX);
            let lo = index(first);
            let hi = index(end.saturating_add(1)).min(frames.len());
            if lo < hi {
                self.current = &frames[lo..hi];
                return true;
            }
        }
        false
    }
}

impl<'a> Iterator for SegmentWalk<'a> {
    type Item = &'a RawFrame;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((first, rest)) = self.current.split_first() {
                self.current = rest;
                return Some(first);
            }
            if !self.open_next_window() {
                return None;
            }
        }
    }
}

/// Resolve a segment to normalized frames under `transform`, clamped to the unit square.
///
/// Frames without a recorded size take `fallback`.
pub fn resolve_segment_frames(
    windows: &WindowsIndex,
    sources: &SourceMap,
    segment: &Segment,
    transform: SegmentTransform,
    fallback: Canvas,
) -> Vec<PoseFrame> {
    SegmentWalk::new(windows, sources, segment)
        .map(|raw| source_frame(raw, transform, fallback))
        .collect()
}

fn source_frame(raw: &RawFrame, transform: SegmentTransform, fallback: Canvas) -> PoseFrame {
    let dim = |v: f64, fb: u32| if v > 0.0 { v.round() as u32 } else { fb };
    PoseFrame {
        width: dim(raw.width, fallback.width),
        height: dim(raw.height, fallback.height),
        pose: transform.apply_clamped(&normalize(raw)),
        fps: raw.fps,
        timestamp: raw.ts,
        origin: FrameOrigin::Source,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/index/resolve.rs"]
mod tests;
