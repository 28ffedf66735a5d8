//! Incremental chaining into a caller-owned playback buffer.
//!
//! The controller never owns the buffer. A playback loop calls
//! [`StreamingChainController::ensure_buffer`] on every tick, which is a single length
//! check while enough frames are queued and a bounded refill otherwise.

use std::{fmt, sync::Arc};

use crate::{
    chain::{
        boundary::{seam_transform, stitch},
        pick::{Candidate, CandidatePicker},
    },
    config::StreamConfig,
    foundation::{
        core::{Canvas, PoseFrame, PoseSample},
        error::PoseChainResult,
    },
    geometry::{bounds::pose_in_bounds, normalize::normalize, transform::SegmentTransform},
    index::{
        model::{Segment, SegmentLibrary, WindowsIndex},
        order::reorder_segments,
        resolve::{SegmentWalk, resolve_edge_frame, resolve_segment_frames},
    },
};

/// Frames appended per segment when no window index is available.
pub const PLACEHOLDER_FRAMES: usize = 30;

/// Lifecycle of a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// No ordering computed yet.
    Idle,
    /// Ordering computed, nothing appended since.
    Seeded,
    /// At least one segment appended.
    Streaming,
}

/// Result of [`StreamingChainController::compact`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compaction {
    /// Frames removed from the front of the buffer.
    pub dropped: usize,
    /// Cursor rebased onto the compacted buffer.
    pub play_idx: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Choice {
    segment: usize,
    // picked by walking the ordered list rather than from embedded candidates
    ordered: bool,
}

/// Keeps a playback buffer topped up with continuous, seam-blended segments.
pub struct StreamingChainController {
    library: Arc<SegmentLibrary>,
    config: StreamConfig,
    picker: Box<dyn CandidatePicker>,
    ordered: Vec<usize>,
    next_seg_idx: usize,
    prev_seg: Option<usize>,
    prev_transform: SegmentTransform,
    state: ControllerState,
}

impl fmt::Debug for StreamingChainController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingChainController")
            .field("segments", &self.library.len())
            .field("state", &self.state)
            .field("next_seg_idx", &self.next_seg_idx)
            .field("prev_seg", &self.prev_seg)
            .field("prev_transform", &self.prev_transform)
            .finish_non_exhaustive()
    }
}

impl StreamingChainController {
    /// Controller over `library` using the picker named by `config.candidate_pick`.
    pub fn new(library: Arc<SegmentLibrary>, config: StreamConfig) -> PoseChainResult<Self> {
        config.validate()?;
        let picker = config.candidate_pick.picker(config.seed);
        Ok(Self {
            library,
            config,
            picker,
            ordered: Vec::new(),
            next_seg_idx: 0,
            prev_seg: None,
            prev_transform: SegmentTransform::IDENTITY,
            state: ControllerState::Idle,
        })
    }

    /// Replace the candidate picker.
    pub fn with_picker(mut self, picker: impl CandidatePicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Options in effect.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Shared segment library.
    pub fn library(&self) -> &Arc<SegmentLibrary> {
        &self.library
    }

    /// Playback order used when no embedded candidate applies.
    pub fn ordered_segments(&self) -> &[usize] {
        &self.ordered
    }

    /// Position in [`Self::ordered_segments`] the ordered fallback will try first.
    pub fn next_ordered_index(&self) -> usize {
        self.next_seg_idx
    }

    /// Segment appended most recently, if continuity state is held.
    pub fn last_segment(&self) -> Option<usize> {
        self.prev_seg
    }

    /// Transform the most recently appended segment was drawn with.
    pub fn last_transform(&self) -> SegmentTransform {
        self.prev_transform
    }

    /// Clear `buffer` and compute the playback order. Appends nothing.
    #[tracing::instrument(skip_all, fields(segments = self.library.len()))]
    pub fn seed(&mut self, buffer: &mut Vec<PoseFrame>) {
        buffer.clear();
        self.compute_order();
        self.state = if self.ordered.is_empty() {
            ControllerState::Idle
        } else {
            ControllerState::Seeded
        };
    }

    /// Forget the previous segment so the next append does not stitch to it.
    ///
    /// The next append aligns to the buffer's trailing frame instead, if there is one.
    pub fn reset_prev(&mut self) {
        self.prev_seg = None;
        self.prev_transform = SegmentTransform::IDENTITY;
    }

    /// Refill `buffer` when fewer than `buffer_low` frames remain after `play_idx`.
    ///
    /// Segments are appended until `buffer_target` frames remain or `2 * segments`
    /// appends have been attempted. Returns the number of frames appended.
    pub fn ensure_buffer(
        &mut self,
        buffer: &mut Vec<PoseFrame>,
        play_idx: usize,
        fallback: Canvas,
    ) -> usize {
        let remaining = buffer.len().saturating_sub(play_idx);
        if remaining >= self.config.buffer_low {
            return 0;
        }

        let before = buffer.len();
        let mut guard = self.library.len().max(1) * 2;
        while buffer.len().saturating_sub(play_idx) < self.config.buffer_target && guard > 0 {
            guard -= 1;
            if !self.append_next(buffer, fallback) {
                break;
            }
        }

        let appended = buffer.len() - before;
        tracing::debug!(
            remaining,
            appended,
            buffered = buffer.len(),
            "refilled playback buffer"
        );
        if appended == 0 && buffer.len().saturating_sub(play_idx) < self.config.buffer_low {
            tracing::warn!(play_idx, "buffer below low watermark after refill");
        }
        appended
    }

    /// Drop consumed frames once `play_idx` passes `compact_threshold`.
    ///
    /// `compact_keep_prev` frames before the cursor are kept.
    pub fn compact(&self, buffer: &mut Vec<PoseFrame>, play_idx: usize) -> Compaction {
        if play_idx <= self.config.compact_threshold {
            return Compaction {
                dropped: 0,
                play_idx,
            };
        }
        let keep_from = play_idx
            .saturating_sub(self.config.compact_keep_prev)
            .min(buffer.len());
        buffer.drain(..keep_from);
        let play_idx = (play_idx - keep_from).min(buffer.len());
        tracing::debug!(dropped = keep_from, play_idx, "compacted playback buffer");
        Compaction {
            dropped: keep_from,
            play_idx,
        }
    }

    fn compute_order(&mut self) {
        let lib = &self.library;
        self.ordered = match lib.windows.as_ref() {
            Some(windows) if self.config.reorder && lib.len() > 1 => {
                reorder_segments(windows, &lib.sources, &lib.segments)
            }
            _ => (0..lib.len()).collect(),
        };
        self.next_seg_idx = 0;
    }

    fn append_next(&mut self, buffer: &mut Vec<PoseFrame>, fallback: Canvas) -> bool {
        let Some(choice) = self.choose_next(buffer) else {
            return false;
        };
        let library = Arc::clone(&self.library);
        let segment = &library.segments[choice.segment];

        match library.windows.as_ref() {
            None => {
                buffer.extend(std::iter::repeat_n(
                    PoseFrame::placeholder(fallback),
                    PLACEHOLDER_FRAMES,
                ));
            }
            Some(windows) => {
                let seam = {
                    let (prev_end, prev, next_start) = self.boundary(windows, segment, buffer);
                    stitch(
                        prev_end,
                        prev,
                        next_start,
                        self.config.blend_n,
                        self.config.blend_curve,
                    )
                };
                buffer.extend(seam.blend);
                buffer.extend(resolve_segment_frames(
                    windows,
                    &library.sources,
                    segment,
                    seam.transform,
                    fallback,
                ));
                self.prev_transform = seam.transform;
            }
        }

        self.prev_seg = Some(choice.segment);
        if choice.ordered && !self.ordered.is_empty() {
            self.next_seg_idx = (self.next_seg_idx + 1) % self.ordered.len();
        }
        if !buffer.is_empty() {
            self.state = ControllerState::Streaming;
        }
        tracing::trace!(
            segment = choice.segment,
            ordered = choice.ordered,
            buffered = buffer.len(),
            "appended segment"
        );
        true
    }

    /// Boundary frames and running transform for appending `segment` next.
    ///
    /// Without continuity state the buffer's trailing frame is the outgoing pose, drawn
    /// as-is.
    fn boundary<'a>(
        &'a self,
        windows: &'a WindowsIndex,
        segment: &Segment,
        buffer: &'a [PoseFrame],
    ) -> (
        Option<&'a dyn PoseSample>,
        SegmentTransform,
        Option<&'a dyn PoseSample>,
    ) {
        let sources = &self.library.sources;
        let next_start = resolve_edge_frame(windows, sources, segment.start, false)
            .map(|f| f as &dyn PoseSample);
        match self.prev_seg {
            Some(p) => {
                let end = self.library.segments[p].end;
                let prev_end =
                    resolve_edge_frame(windows, sources, end, true).map(|f| f as &dyn PoseSample);
                (prev_end, self.prev_transform, next_start)
            }
            None => (
                buffer.last().map(|f| f as &dyn PoseSample),
                SegmentTransform::IDENTITY,
                next_start,
            ),
        }
    }

    fn choose_next(&mut self, buffer: &[PoseFrame]) -> Option<Choice> {
        let library = Arc::clone(&self.library);

        if self.config.prefer_embedded_next
            && let Some(prev) = self.prev_seg
        {
            let candidates = embedded_candidates(&library.segments[prev], library.len());
            if !candidates.is_empty() {
                let valid: Vec<Candidate> = candidates
                    .iter()
                    .copied()
                    .filter(|c| self.in_bounds(&library.segments[c.segment], buffer))
                    .collect();
                let pool = if valid.is_empty() {
                    tracing::debug!(
                        segment = prev,
                        "no candidate passes bounds check, ignoring bounds"
                    );
                    &candidates
                } else {
                    &valid
                };
                if let Some(c) = self.picker.pick(pool).and_then(|i| pool.get(i)) {
                    return Some(Choice {
                        segment: c.segment,
                        ordered: false,
                    });
                }
            }
        }

        if self.ordered.is_empty() {
            self.compute_order();
        }
        let len = self.ordered.len();
        if len == 0 {
            return None;
        }
        let cursor = self.next_seg_idx % len;
        let segment = (0..len)
            .map(|k| self.ordered[(cursor + k) % len])
            .find(|&s| self.in_bounds(&library.segments[s], buffer))
            .unwrap_or(self.ordered[cursor]);
        Some(Choice {
            segment,
            ordered: true,
        })
    }

    /// `true` when every sampled frame of `segment`, drawn with the transform it would
    /// receive if appended now, stays on the canvas.
    fn in_bounds(&self, segment: &Segment, buffer: &[PoseFrame]) -> bool {
        if !self.config.check_bounds {
            return true;
        }
        let Some(windows) = self.library.windows.as_ref() else {
            return true;
        };
        let transform = {
            let (prev_end, prev, next_start) = self.boundary(windows, segment, buffer);
            seam_transform(prev_end, prev, next_start)
        };
        let canvas = self.config.canvas();
        SegmentWalk::new(windows, &self.library.sources, segment)
            .step_by(self.config.check_bounds_sample_rate.max(1))
            .filter(|raw| raw.has_keypoints())
            .all(|raw| {
                pose_in_bounds(
                    &transform.apply(&normalize(raw)),
                    canvas,
                    self.config.max_height_ratio,
                    self.config.min_confidence,
                )
            })
    }
}

fn embedded_candidates(prev: &Segment, segment_count: usize) -> Vec<Candidate> {
    prev.next_candidates
        .iter()
        .filter_map(|c| {
            let segment = usize::try_from(c.segment_index)
                .ok()
                .filter(|i| *i < segment_count)?;
            let distance = if c.distance.is_finite() {
                c.distance
            } else {
                f64::INFINITY
            };
            Some(Candidate { segment, distance })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/chain/stream.rs"]
mod tests;
