//! Explicit playback state: buffer, cursor, controller and mode in one owner.

use std::time::Duration;

use crate::{
    blend::synth::blend_frames_with_curve,
    chain::stream::StreamingChainController,
    config::PlaybackConfig,
    foundation::{
        core::{Pose, PoseFrame, PoseSample},
        error::PoseChainResult,
    },
    geometry::transform::SegmentTransform,
    playback::schedule::schedule,
};

/// Sink for frames leaving the playback buffer.
pub trait Renderer {
    /// Draw one frame.
    fn render(&mut self, frame: &PoseFrame) -> PoseChainResult<()>;
}

/// What feeds the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackMode {
    /// Chained recorded segments.
    #[default]
    Segments,
    /// The most recent live pose.
    Live,
}

/// Outcome of one [`PlaybackSession::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A frame was rendered; wait `delay` before the next step.
    Rendered {
        /// Time until the next frame is due.
        delay: Duration,
    },
    /// Nothing to render at the cursor.
    Starved,
}

/// Counters accumulated by [`run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Steps that rendered a frame.
    pub frames_rendered: u64,
    /// Steps that found nothing to render.
    pub frames_starved: u64,
    /// Sum of the scheduled delays.
    pub scheduled: Duration,
}

/// Live frames queued ahead of the cursor in live mode.
const MAX_LIVE_QUEUE: usize = 1;

/// A playback session over one controller.
#[derive(Debug)]
pub struct PlaybackSession {
    controller: StreamingChainController,
    config: PlaybackConfig,
    buffer: Vec<PoseFrame>,
    cursor: usize,
    mode: PlaybackMode,
    live_pose: Option<Pose>,
}

impl PlaybackSession {
    /// Session driving `controller`.
    pub fn new(
        controller: StreamingChainController,
        config: PlaybackConfig,
    ) -> PoseChainResult<Self> {
        config.validate()?;
        Ok(Self {
            controller,
            config,
            buffer: Vec::new(),
            cursor: 0,
            mode: PlaybackMode::Segments,
            live_pose: None,
        })
    }

    /// Clear the buffer and prepare the controller for segment playback.
    pub fn seed(&mut self) {
        self.controller.seed(&mut self.buffer);
        self.cursor = 0;
    }

    /// Buffered frames, including already played lookback frames.
    pub fn buffer(&self) -> &[PoseFrame] {
        &self.buffer
    }

    /// Index of the next frame to render.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Frames queued at or after the cursor.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    /// Current mode.
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// The controller feeding segment mode.
    pub fn controller(&self) -> &StreamingChainController {
        &self.controller
    }

    /// Mutable access to the controller.
    pub fn controller_mut(&mut self) -> &mut StreamingChainController {
        &mut self.controller
    }

    /// Remember the latest live pose (normalized).
    pub fn set_live_pose(&mut self, pose: Pose) {
        self.live_pose = Some(pose);
    }

    /// Cut over to live input.
    ///
    /// Everything queued after the cursor is replaced by blend frames from the pose on
    /// screen to the live pose, followed by the live frame itself. Without a live pose
    /// the queue is only cleared.
    pub fn switch_to_live(&mut self) {
        self.mode = PlaybackMode::Live;
        self.buffer.truncate(self.cursor);
        let Some(pose) = self.live_pose else {
            tracing::debug!("switched to live without a live pose");
            return;
        };

        let live = self.live_frame(pose);
        let on_screen = self
            .cursor
            .checked_sub(1)
            .and_then(|i| self.buffer.get(i))
            .map(|f| f as &dyn PoseSample);
        let blend = blend_frames_with_curve(
            on_screen,
            SegmentTransform::IDENTITY,
            Some(&live),
            SegmentTransform::IDENTITY,
            self.config.live_blend_n,
            self.controller.config().blend_curve,
        );
        tracing::debug!(blend = blend.len(), "switched to live");
        self.buffer.extend(blend);
        self.buffer.push(live);
    }

    /// Return to segment playback; the next segment stitches to the buffer's tail.
    pub fn switch_to_segments(&mut self) {
        self.mode = PlaybackMode::Segments;
        self.controller.reset_prev();
        tracing::debug!(remaining = self.remaining(), "switched to segments");
    }

    /// Top up, render the frame at the cursor, advance and compact.
    pub fn step(&mut self, renderer: &mut dyn Renderer) -> PoseChainResult<Step> {
        match self.mode {
            PlaybackMode::Segments => {
                self.controller.ensure_buffer(
                    &mut self.buffer,
                    self.cursor,
                    self.config.fallback_canvas,
                );
            }
            PlaybackMode::Live => self.queue_live(),
        }

        let Some(cur) = self.buffer.get(self.cursor) else {
            return Ok(Step::Starved);
        };
        renderer.render(cur)?;
        let prev = self.cursor.checked_sub(1).and_then(|i| self.buffer.get(i));
        let delay = schedule(prev, cur, self.config.speed, self.config.fallback_fps);

        self.cursor += 1;
        self.cursor = self.controller.compact(&mut self.buffer, self.cursor).play_idx;
        Ok(Step::Rendered { delay })
    }

    fn queue_live(&mut self) {
        if self.remaining() >= MAX_LIVE_QUEUE {
            return;
        }
        if let Some(pose) = self.live_pose {
            let frame = self.live_frame(pose);
            self.buffer.push(frame);
        }
    }

    fn live_frame(&self, pose: Pose) -> PoseFrame {
        PoseFrame::live(pose, self.config.fallback_canvas, self.config.fallback_fps)
    }
}

/// Step `session` up to `ticks` times without sleeping, accumulating the schedule.
pub fn run(
    session: &mut PlaybackSession,
    renderer: &mut dyn Renderer,
    ticks: u64,
) -> PoseChainResult<PlaybackStats> {
    let mut stats = PlaybackStats::default();
    for _ in 0..ticks {
        match session.step(renderer)? {
            Step::Rendered { delay } => {
                stats.frames_rendered += 1;
                stats.scheduled = stats.scheduled.saturating_add(delay);
            }
            Step::Starved => stats.frames_starved += 1,
        }
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/session.rs"]
mod tests;
