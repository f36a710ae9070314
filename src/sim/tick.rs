//! Per-frame simulation tick
//!
//! Advances the game state by exactly one frame: input, actor physics,
//! spawning, obstacle physics, collision/scoring, then culling.

use super::autopilot;
use super::collision;
use super::state::{GameState, Termination};

/// Keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Other,
}

/// Discrete input event delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    Quit,
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Every event drained this frame, in delivery order
    pub events: Vec<InputEvent>,
    /// Demo mode - the tick decides when to fly
    pub autopilot: bool,
}

impl TickInput {
    pub fn from_events(events: Vec<InputEvent>) -> Self {
        Self {
            events,
            autopilot: false,
        }
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Simulation advanced one frame (the session may have ended during it)
    Advanced,
    /// A quit event ended the session before anything else ran
    Quit,
    /// Session was already over; nothing changed
    Idle,
}

/// Advance the game state by one frame. `now_ms` is the clock reading for this frame.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Idle;
    }

    for event in &input.events {
        match event {
            InputEvent::KeyDown(Key::Space) => state.actor.fly(state.tuning.fly_impulse),
            InputEvent::KeyDown(Key::Other) => {}
            InputEvent::Quit => {
                log::info!("Quit requested");
                state.terminate(Termination::Quit);
                return TickOutcome::Quit;
            }
        }
    }

    if input.autopilot && autopilot::wants_fly(state) {
        state.actor.fly(state.tuning.fly_impulse);
    }

    state.frame += 1;

    state.actor.step(state.tuning.gravity);

    if state.spawner.poll(now_ms) {
        state.spawn_obstacle();
    }

    let speed = state.tuning.obstacle_speed;
    for obstacle in &mut state.obstacles {
        obstacle.step(speed);
    }

    let eval = collision::evaluate(&state.actor, &mut state.obstacles, &state.tuning);
    if eval.scored > 0 {
        state.score += eval.scored;
        log::info!("Score: {}", state.score);
    }
    if let Some(cause) = eval.death {
        state.terminate(cause);
    }

    let threshold = state.tuning.cull_threshold_x;
    state.obstacles.retain(|o| o.x > threshold);

    TickOutcome::Advanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, SessionState};
    use crate::tuning::Tuning;

    fn space() -> TickInput {
        TickInput::from_events(vec![InputEvent::KeyDown(Key::Space)])
    }

    #[test]
    fn test_tick_applies_gravity() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        tick(&mut state, &TickInput::default(), 0.0);
        assert!((state.actor.velocity - 0.4).abs() < 1e-6);
        assert!((state.actor.y - 300.4).abs() < 1e-4);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_fly_then_step() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        state.actor.velocity = 50.0;
        tick(&mut state, &space(), 0.0);
        // Impulse replaces velocity, then gravity is applied once
        assert!((state.actor.velocity - (-9.6)).abs() < 1e-5);
        assert!((state.actor.y - (300.0 - 9.6)).abs() < 1e-4);
    }

    #[test]
    fn test_repeated_fly_in_one_frame_does_not_stack() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        let input = TickInput::from_events(vec![InputEvent::KeyDown(Key::Space); 4]);
        tick(&mut state, &input, 0.0);
        assert!((state.actor.velocity - (-9.6)).abs() < 1e-5);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        let input = TickInput::from_events(vec![InputEvent::KeyDown(Key::Other)]);
        tick(&mut state, &input, 0.0);
        assert!((state.actor.velocity - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_quit_skips_rest_of_frame() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        state.obstacles.push(Obstacle::new(500.0, 200));
        let input = TickInput::from_events(vec![InputEvent::Quit]);
        assert_eq!(tick(&mut state, &input, 5000.0), TickOutcome::Quit);
        assert_eq!(state.phase, SessionState::Terminated);
        assert_eq!(state.termination, Some(Termination::Quit));
        assert_eq!(state.actor.y, 300.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 500.0);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_terminated_state_is_frozen() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        state.obstacles.push(Obstacle::new(500.0, 200));
        state.terminate(Termination::OutOfBounds);
        let before = (state.actor.clone(), state.obstacles.clone(), state.score);

        for n in 0..10 {
            assert_eq!(tick(&mut state, &space(), n as f64 * 10_000.0), TickOutcome::Idle);
        }
        assert_eq!(before, (state.actor.clone(), state.obstacles.clone(), state.score));
        assert_eq!(state.termination, Some(Termination::OutOfBounds));
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        tick(&mut state, &space(), 1500.0);
        assert!(state.obstacles.is_empty());
        tick(&mut state, &space(), 1501.0);
        assert_eq!(state.obstacles.len(), 1);
        // Spawned at the right edge, then moved in the same frame
        assert_eq!(state.obstacles[0].x, 892.0);
    }

    #[test]
    fn test_cull_threshold() {
        let tuning = Tuning {
            obstacle_speed: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(tuning, 1, 0.0);
        state.obstacles.push(Obstacle::new(-49.0, 200));
        state.obstacles.push(Obstacle::new(-51.0, 200));
        state.obstacles.push(Obstacle::new(-50.0, 200));
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, -49.0);
    }

    #[test]
    fn test_cull_preserves_order() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        state.obstacles.push(Obstacle::new(-45.0, 100));
        state.obstacles.push(Obstacle::new(300.0, 150));
        state.obstacles.push(Obstacle::new(700.0, 250));
        tick(&mut state, &TickInput::default(), 0.0);
        let gaps: Vec<i32> = state.obstacles.iter().map(|o| o.gap_top).collect();
        assert_eq!(gaps, vec![150, 250]);
    }

    #[test]
    fn test_passed_scores_once() {
        // Keep the actor still so only the obstacle moves
        let tuning = Tuning {
            gravity: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(tuning, 1, 0.0);
        // Gap wide open around the actor (top box ends at 70, bottom starts at 450)
        state.obstacles.push(Obstacle::new(200.0, 300));

        let mut scores = Vec::new();
        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), 0.0);
            scores.push(state.score);
        }
        assert!(state.is_running());
        assert_eq!(state.score, 1);
        // Score went 0 -> 1 exactly once
        assert_eq!(scores.windows(2).filter(|w| w[0] != w[1]).count(), 1);
    }

    #[test]
    fn test_collision_terminates() {
        let tuning = Tuning {
            gravity: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(tuning, 1, 0.0);
        // Bottom obstacle starts at 100 + 150 = 250, above the actor's bottom edge
        state.obstacles.push(Obstacle::new(100.0, 100));
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, SessionState::Terminated);
        assert_eq!(state.termination, Some(Termination::BottomObstacle));
    }

    #[test]
    fn test_free_fall_leaves_playfield() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        let mut frames = 0;
        while state.is_running() {
            tick(&mut state, &TickInput::default(), 0.0);
            frames += 1;
        }
        // y after n frames is 300 + 0.4 * n(n+1)/2, which first exceeds 600 at n = 39
        assert_eq!(frames, 39);
        assert_eq!(state.termination, Some(Termination::OutOfBounds));
    }

    #[test]
    fn test_autopilot_input_flies() {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        state.actor.y = 450.0;
        state.actor.velocity = 1.0;
        let input = TickInput {
            events: Vec::new(),
            autopilot: true,
        };
        tick(&mut state, &input, 0.0);
        assert!(state.actor.velocity < 0.0);
    }

    #[test]
    fn test_autopilot_threads_narrow_gap() {
        // Gap spans 70..250; a cruise flight now would drop back onto the bottom obstacle
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        state.actor.y = 265.0;
        state.actor.velocity = 1.0;
        state.obstacles.push(Obstacle::new(340.0, 100));
        let input = TickInput {
            events: Vec::new(),
            autopilot: true,
        };
        // The clock stays at zero so nothing else spawns
        for _ in 0..100 {
            tick(&mut state, &input, 0.0);
        }
        assert!(state.is_running());
        assert_eq!(state.score, 1);
    }
}
