//! Tunables for the streaming controller and the playback session.

use std::{fs, path::Path};

use crate::{
    blend::curve::SeamCurve,
    chain::pick::CandidatePick,
    foundation::{
        core::Canvas,
        error::{PoseChainError, PoseChainResult},
    },
};

/// Streaming controller options. Every field has a default; JSON keys are camelCase, with
/// snake_case accepted as an alias.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamConfig {
    /// Blend frames inserted at every seam.
    #[serde(alias = "blend_n")]
    pub blend_n: usize,
    /// Refill starts when fewer frames than this remain ahead of the cursor.
    #[serde(alias = "buffer_low")]
    pub buffer_low: usize,
    /// Refill stops once this many frames remain ahead of the cursor.
    #[serde(alias = "buffer_target")]
    pub buffer_target: usize,
    /// Compaction runs once the cursor passes this index.
    #[serde(alias = "compact_threshold")]
    pub compact_threshold: usize,
    /// Frames kept behind the cursor when compacting.
    #[serde(alias = "compact_keep_prev")]
    pub compact_keep_prev: usize,
    /// Reorder segments by a nearest-centroid tour when seeding.
    pub reorder: bool,
    /// Follow `next_candidates` of the previous segment when present.
    #[serde(alias = "prefer_embedded_next")]
    pub prefer_embedded_next: bool,
    /// How to choose among embedded candidates.
    #[serde(alias = "candidate_pick")]
    pub candidate_pick: CandidatePick,
    /// Reject continuations whose transformed frames would render badly.
    #[serde(alias = "check_bounds")]
    pub check_bounds: bool,
    /// Canvas width used by the bounds check.
    #[serde(alias = "canvas_w")]
    pub canvas_w: u32,
    /// Canvas height used by the bounds check.
    #[serde(alias = "canvas_h")]
    pub canvas_h: u32,
    /// Maximum pose height as a fraction of the canvas height.
    #[serde(alias = "max_height_ratio")]
    pub max_height_ratio: f64,
    /// Minimum confidence every keypoint needs to pass the bounds check.
    #[serde(alias = "min_confidence")]
    pub min_confidence: f64,
    /// Check every Nth frame of a candidate (`1` checks all).
    #[serde(alias = "check_bounds_sample_rate")]
    pub check_bounds_sample_rate: usize,
    /// Seed for the random candidate picker.
    pub seed: u64,
    /// Weight curve for the blend frames at every seam.
    #[serde(alias = "blend_curve")]
    pub blend_curve: SeamCurve,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            blend_n: 8,
            buffer_low: 240,
            buffer_target: 720,
            compact_threshold: 1000,
            compact_keep_prev: 2,
            reorder: true,
            prefer_embedded_next: true,
            candidate_pick: CandidatePick::Random,
            check_bounds: false,
            canvas_w: 1280,
            canvas_h: 720,
            max_height_ratio: 0.8,
            min_confidence: 0.2,
            check_bounds_sample_rate: 1,
            seed: 0,
            blend_curve: SeamCurve::Linear,
        }
    }
}

impl StreamConfig {
    /// Canvas the bounds check renders against.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_w, self.canvas_h)
    }

    /// Reject option combinations the controller cannot run with.
    pub fn validate(&self) -> PoseChainResult<()> {
        if self.buffer_target < self.buffer_low {
            return Err(PoseChainError::validation(
                "bufferTarget must be >= bufferLow",
            ));
        }
        if self.check_bounds_sample_rate == 0 {
            return Err(PoseChainError::validation(
                "checkBoundsSampleRate must be >= 1",
            ));
        }
        if self.canvas_w == 0 || self.canvas_h == 0 {
            return Err(PoseChainError::validation("canvasW/canvasH must be > 0"));
        }
        if !self.max_height_ratio.is_finite() || self.max_height_ratio <= 0.0 {
            return Err(PoseChainError::validation(
                "maxHeightRatio must be finite and > 0",
            ));
        }
        if !self.min_confidence.is_finite() {
            return Err(PoseChainError::validation("minConfidence must be finite"));
        }
        Ok(())
    }
}

/// Playback session options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackConfig {
    /// Playback speed multiplier.
    pub speed: f64,
    /// Frame rate assumed when a frame has neither fps nor usable timestamps.
    #[serde(alias = "fallback_fps")]
    pub fallback_fps: f64,
    /// Blend frames inserted when cutting over to live input.
    #[serde(alias = "live_blend_n")]
    pub live_blend_n: usize,
    /// Size used for frames that do not carry one.
    #[serde(alias = "fallback_canvas")]
    pub fallback_canvas: Canvas,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            fallback_fps: 30.0,
            live_blend_n: 8,
            fallback_canvas: Canvas::default(),
        }
    }
}

impl PlaybackConfig {
    /// Reject unusable playback options.
    pub fn validate(&self) -> PoseChainResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(PoseChainError::validation("speed must be finite and > 0"));
        }
        if !self.fallback_fps.is_finite() || self.fallback_fps <= 0.0 {
            return Err(PoseChainError::validation(
                "fallbackFps must be finite and > 0",
            ));
        }
        if self.fallback_canvas.width == 0 || self.fallback_canvas.height == 0 {
            return Err(PoseChainError::validation(
                "fallbackCanvas width/height must be > 0",
            ));
        }
        Ok(())
    }
}

/// Complete configuration file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Streaming controller options.
    pub stream: StreamConfig,
    /// Playback session options.
    pub playback: PlaybackConfig,
}

impl Config {
    /// Read and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> PoseChainResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| PoseChainError::load(format!("read '{}': {e}", path.display())))?;
        let config = Self::from_json(&content)?;
        Ok(config)
    }

    /// Parse and validate configuration JSON.
    pub fn from_json(s: &str) -> PoseChainResult<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| PoseChainError::serde(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate both sections.
    pub fn validate(&self) -> PoseChainResult<()> {
        self.stream.validate()?;
        self.playback.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
