//! Frame loop controller
//!
//! Owns one session's state and drives a frame: drain input, tick the
//! simulation, draw, then pace. Platform collaborators are borrowed per call.

use crate::platform::{Clock, InputSource};
use crate::render::{self, Canvas};
use crate::sim::{GameState, SessionState, Termination, TickInput, TickOutcome, tick};
use crate::tuning::{Tuning, TuningError};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub score: u32,
    /// `None` if the frame cap was reached first
    pub termination: Option<Termination>,
}

/// One game session plus loop-level switches
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    /// Let the simulation fly on its own (demo mode)
    pub autopilot: bool,
}

impl Game {
    /// Open the window and start a session timed from the clock's current reading.
    /// The tuning is validated before anything is drawn.
    pub fn new<K: Canvas + ?Sized>(
        tuning: Tuning,
        seed: u64,
        clock: &dyn Clock,
        canvas: &mut K,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        canvas.create_window(tuning.screen_width, tuning.screen_height, &tuning.title);
        Ok(Self {
            state: GameState::new(tuning, seed, clock.now_ms()),
            autopilot: false,
        })
    }

    /// Discard the current session and start a fresh one with the same tuning
    pub fn restart(&mut self, seed: u64, now_ms: f64) {
        self.state = GameState::new(self.state.tuning.clone(), seed, now_ms);
    }

    pub fn phase(&self) -> SessionState {
        self.state.phase
    }

    /// Drain input and advance the simulation one frame, without drawing
    pub fn step<I: InputSource + ?Sized>(&mut self, input: &mut I, now_ms: f64) -> TickOutcome {
        let tick_input = TickInput {
            events: input.drain(),
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &tick_input, now_ms)
    }

    /// Run one full frame: input, simulation, draw, pacing.
    ///
    /// A quit ends the frame immediately. A terminated session keeps
    /// redrawing its final state.
    pub fn frame<I, C, K>(&mut self, input: &mut I, clock: &mut C, canvas: &mut K) -> SessionState
    where
        I: InputSource + ?Sized,
        C: Clock + ?Sized,
        K: Canvas + ?Sized,
    {
        if self.step(input, clock.now_ms()) == TickOutcome::Quit {
            return self.phase();
        }
        render::draw_frame(&self.state, canvas);
        clock.limit_rate(self.state.tuning.fps);
        self.phase()
    }

    /// Run frames until the session ends or `max_frames` have been run
    pub fn run<I, C, K>(
        &mut self,
        input: &mut I,
        clock: &mut C,
        canvas: &mut K,
        max_frames: Option<u64>,
    ) -> RunSummary
    where
        I: InputSource + ?Sized,
        C: Clock + ?Sized,
        K: Canvas + ?Sized,
    {
        let mut frames = 0;
        while self.state.is_running() && max_frames.is_none_or(|max| frames < max) {
            self.frame(input, clock, canvas);
            frames += 1;
        }
        RunSummary {
            frames,
            score: self.state.score,
            termination: self.state.termination,
        }
    }
}
