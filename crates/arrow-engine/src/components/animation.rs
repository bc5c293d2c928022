//! Sprite animation: a frame sequence advanced on a fixed tick cadence.
//!
//! Purely cosmetic. The animator writes the current frame into the target's
//! visual; nothing here touches physics.

use crate::api::error::{EngineError, Result};
use crate::api::types::{FrameHandle, Target};

/// Frame sequencer bound to one target.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub target: Target,
    /// Frames in playback order.
    pub frames: Vec<FrameHandle>,
    /// Counter value at which the frame advances.
    pub interval: u32,
    /// Counter increment per tick.
    pub steps_per_tick: u32,
    /// Ticks accumulated toward the next frame.
    pub counter: u32,
    /// Current frame index.
    pub frame_index: usize,
    /// Whether animation is playing (vs paused).
    pub playing: bool,
}

impl Animation {
    /// Advance one frame every `interval` ticks.
    pub fn new(target: Target, frames: Vec<FrameHandle>, interval: u32) -> Result<Self> {
        Self::with_steps(target, frames, interval, 1)
    }

    /// Advance by `steps_per_tick` each tick, switching frames when `interval` is reached.
    pub fn with_steps(
        target: Target,
        frames: Vec<FrameHandle>,
        interval: u32,
        steps_per_tick: u32,
    ) -> Result<Self> {
        if frames.is_empty() {
            return Err(EngineError::Configuration(
                "animation needs at least one frame".into(),
            ));
        }
        if interval == 0 || steps_per_tick == 0 {
            return Err(EngineError::Configuration(format!(
                "animation interval and step must be positive (interval {}, step {})",
                interval, steps_per_tick
            )));
        }
        Ok(Self {
            target,
            frames,
            interval,
            steps_per_tick,
            counter: 0,
            frame_index: 0,
            playing: true,
        })
    }

    pub fn current_frame(&self) -> FrameHandle {
        self.frames[self.frame_index]
    }

    /// Advance one tick. Returns the new frame when it changed.
    pub fn tick(&mut self) -> Option<FrameHandle> {
        if !self.playing {
            return None;
        }
        self.counter += self.steps_per_tick;
        if self.counter < self.interval {
            return None;
        }
        self.counter = 0;
        self.frame_index = (self.frame_index + 1) % self.frames.len();
        Some(self.current_frame())
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn resume(&mut self) {
        self.playing = true;
    }

    /// Stop and reset to frame 0.
    pub fn stop(&mut self) {
        self.playing = false;
        self.frame_index = 0;
        self.counter = 0;
    }
}
