//! Demo-mode flight policy
//!
//! The autopilot cruises high: it flies as soon as the actor is falling and
//! one more impulse would still peak clear of the top obstacle. Every decision
//! is checked against a short forward simulation of the obstacles already on
//! screen, which can veto a cruise flight or force one early. Obstacles that
//! have not spawned yet are not simulated.

use super::collision;
use super::state::{Actor, GameState, Obstacle};
use crate::tuning::Tuning;

/// Clearance kept between an arc's peak and the top obstacle
const PEAK_MARGIN: f32 = 15.0;
/// Frames simulated ahead of each decision
const LOOKAHEAD_FRAMES: usize = 100;
/// Within the search, another flight is tried only once the rise has slowed to this
const REFLY_VELOCITY: f32 = -3.0;
/// Simulated frames allowed per check
const SEARCH_BUDGET: u32 = 20_000;
/// Cap when measuring an impulse that never stops rising
const MAX_RISE_FRAMES: u32 = 10_000;

/// Whether the autopilot flies this frame
pub fn wants_fly(state: &GameState) -> bool {
    let tuning = &state.tuning;
    let actor = &state.actor;
    let mut lookahead = Lookahead::new(tuning, &state.obstacles);

    let cruise = cruise_wants_fly(actor, tuning, lookahead.rise);
    if cruise && lookahead.survives(actor.clone(), true) {
        return true;
    }
    if lookahead.survives(actor.clone(), false) {
        return false;
    }
    // Waiting is fatal: fly off the cruise line if that gets through
    !cruise && lookahead.survives(actor.clone(), true)
}

/// Height one impulse gains before the actor starts falling again.
/// Infinite when gravity never turns the impulse around.
pub fn fly_rise(tuning: &Tuning) -> f32 {
    let mut actor = Actor::new(0.0, 0.0);
    actor.fly(tuning.fly_impulse);
    let mut peak = 0.0f32;
    for _ in 0..MAX_RISE_FRAMES {
        if actor.velocity >= 0.0 {
            return -peak;
        }
        actor.step(tuning.gravity);
        peak = peak.min(actor.y);
    }
    f32::INFINITY
}

/// Fly once falling, as long as the arc still peaks below the top obstacle
fn cruise_wants_fly(actor: &Actor, tuning: &Tuning, rise: f32) -> bool {
    actor.velocity >= 0.0 && actor.y - rise >= tuning.top_obstacle_offset.max(0.0) + PEAK_MARGIN
}

/// Forward model over the obstacles currently on screen
struct Lookahead<'a> {
    tuning: &'a Tuning,
    rise: f32,
    /// Obstacles as they will stand after each future frame
    frames: Vec<Vec<Obstacle>>,
    budget: u32,
}

impl<'a> Lookahead<'a> {
    fn new(tuning: &'a Tuning, obstacles: &[Obstacle]) -> Self {
        let mut current = obstacles.to_vec();
        let frames = (0..LOOKAHEAD_FRAMES)
            .map(|_| {
                for obstacle in &mut current {
                    obstacle.step(tuning.obstacle_speed);
                }
                current.clone()
            })
            .collect();
        Self {
            tuning,
            rise: fly_rise(tuning),
            frames,
            budget: 0,
        }
    }

    /// Whether some sequence of decisions, starting with `fly` this frame,
    /// keeps the actor alive to the end of the lookahead
    fn survives(&mut self, actor: Actor, fly: bool) -> bool {
        self.budget = SEARCH_BUDGET;
        self.search(actor, 0, fly)
    }

    fn search(&mut self, mut actor: Actor, frame: usize, fly: bool) -> bool {
        // Out of budget: no verdict, so let the cruise line decide
        if self.budget == 0 {
            return true;
        }
        self.budget -= 1;

        if fly {
            actor.fly(self.tuning.fly_impulse);
        }
        actor.step(self.tuning.gravity);
        if collision::death_cause(&actor, &self.frames[frame], self.tuning).is_some() {
            return false;
        }
        if frame + 1 == self.frames.len() {
            return true;
        }

        if actor.velocity < REFLY_VELOCITY {
            return self.search(actor, frame + 1, false);
        }
        let preferred = cruise_wants_fly(&actor, self.tuning, self.rise);
        self.search(actor.clone(), frame + 1, preferred)
            || self.search(actor, frame + 1, !preferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(y: f32, velocity: f32, obstacles: Vec<Obstacle>) -> GameState {
        let mut state = GameState::new(Tuning::default(), 1, 0.0);
        state.actor.y = y;
        state.actor.velocity = velocity;
        state.obstacles = obstacles;
        state
    }

    #[test]
    fn test_fly_rise_of_default_impulse() {
        // 9.6 + 9.2 + ... + 0.4
        assert!((fly_rise(&Tuning::default()) - 120.0).abs() < 1e-3);

        let floating = Tuning {
            gravity: 0.0,
            ..Default::default()
        };
        assert_eq!(fly_rise(&floating), f32::INFINITY);
    }

    #[test]
    fn test_cruise_peaks_below_top_obstacle() {
        let tuning = Tuning::default();
        let rise = fly_rise(&tuning);
        let actor = |y, velocity| Actor {
            x: 50.0,
            y,
            velocity,
        };

        // Peak at 30 would end inside the top obstacle (bottom edge 70)
        assert!(!cruise_wants_fly(&actor(150.0, 2.0), &tuning, rise));
        // Peak at 90 clears it with margin
        assert!(cruise_wants_fly(&actor(210.0, 2.0), &tuning, rise));
        // Never while rising
        assert!(!cruise_wants_fly(&actor(400.0, -1.0), &tuning, rise));
    }

    #[test]
    fn test_open_air_follows_cruise_line() {
        assert!(!wants_fly(&state_with(150.0, 2.0, Vec::new())));
        assert!(wants_fly(&state_with(210.0, 2.0, Vec::new())));
        assert!(wants_fly(&state_with(450.0, 1.0, Vec::new())));
    }

    #[test]
    fn test_flies_early_when_waiting_is_fatal() {
        // Gap spans 70..250 and reaches the actor in five frames. Only an
        // immediate flight is inside it in time, though the peak (80) is
        // below the cruise line.
        let state = state_with(200.0, 0.0, vec![Obstacle::new(176.0, 100)]);
        assert!(!cruise_wants_fly(&state.actor, &state.tuning, fly_rise(&state.tuning)));
        assert!(wants_fly(&state));
    }

    #[test]
    fn test_holds_when_cruise_flight_is_fatal() {
        let state = state_with(265.0, 1.0, vec![Obstacle::new(340.0, 100)]);
        assert!(cruise_wants_fly(&state.actor, &state.tuning, fly_rise(&state.tuning)));
        assert!(!wants_fly(&state));
    }
}
