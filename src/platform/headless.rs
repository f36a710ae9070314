//! Headless collaborators
//!
//! Deterministic input and time for tests and the native demo run.

use std::collections::VecDeque;

use super::{Clock, InputSource};
use crate::sim::InputEvent;

/// Input replayed frame by frame. Each `drain` yields the next batch; an
/// exhausted script yields nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events for the next unscripted frame
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    /// Queue `count` frames without input
    pub fn idle(&mut self, count: usize) {
        self.frames
            .extend(std::iter::repeat_with(Vec::new).take(count));
    }

    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn drain(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Clock that advances exactly one frame per `limit_rate` call
#[derive(Debug, Clone, Default)]
pub struct SimulatedClock {
    frames: u64,
    fps: u32,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames paced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Clock for SimulatedClock {
    fn now_ms(&self) -> f64 {
        if self.fps == 0 {
            return 0.0;
        }
        // Derived from the frame count so long runs do not accumulate rounding error
        self.frames as f64 * 1000.0 / self.fps as f64
    }

    fn limit_rate(&mut self, target_fps: u32) {
        self.fps = target_fps;
        self.frames += 1;
    }
}
