//! posechain stitches recorded pose clips into continuous playback.
//!
//! Recordings are cut into fixed-length windows and grouped into segments. Playing one
//! segment after another would make the figure jump in size and position at every cut,
//! so each incoming segment is rescaled and shifted to continue the outgoing one, and a
//! few interpolated frames smooth the seam.
//!
//! - Load a [`SegmentLibrary`] (see [`load_library`])
//! - Chain a fixed list with [`chain_segments`], or
//! - Stream indefinitely with a [`StreamingChainController`], usually through a
//!   [`PlaybackSession`] that renders into a [`Renderer`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Seam blending.
pub mod blend;
/// Batch and streaming chaining.
pub mod chain;
/// Controller and playback options.
pub mod config;
/// Keypoint normalization, body scale and bounds.
pub mod geometry;
/// Segment library and frame resolution.
pub mod index;
/// Input loaders.
pub mod load;
/// Playback session and frame scheduling.
pub mod playback;

pub use crate::foundation::core::{
    Canvas, FrameOrigin, KEYPOINT_COUNT, Keypoint, KeypointIndex, Point, Pose, PoseFrame,
    PoseSample, RawFrame, Vec2,
};
pub use crate::foundation::error::{PoseChainError, PoseChainResult};

pub use crate::blend::curve::SeamCurve;
pub use crate::blend::synth::{blend_frames, blend_frames_with_curve};
pub use crate::chain::batch::chain_segments;
pub use crate::chain::boundary::{Seam, boundary_transform, seam_transform, stitch};
pub use crate::chain::pick::{BestPick, Candidate, CandidatePick, CandidatePicker, RandomPick};
pub use crate::chain::stream::{
    Compaction, ControllerState, PLACEHOLDER_FRAMES, StreamingChainController,
};
pub use crate::config::{Config, PlaybackConfig, StreamConfig};
pub use crate::geometry::bounds::pose_in_bounds;
pub use crate::geometry::normalize::{denormalize, is_normalized, normalize, to_pixels};
pub use crate::geometry::scale::{anchor, body_scale_ratio};
pub use crate::geometry::transform::SegmentTransform;
pub use crate::index::model::{
    NextCandidate, Segment, SegmentLibrary, SourceMap, WindowRecord, WindowsIndex,
};
pub use crate::index::order::reorder_segments;
pub use crate::index::resolve::{SegmentWalk, resolve_edge_frame, resolve_segment_frames};
pub use crate::load::load_library;
pub use crate::playback::schedule::schedule;
pub use crate::playback::session::{
    PlaybackMode, PlaybackSession, PlaybackStats, Renderer, Step, run,
};

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
pub(crate) mod fixtures;
