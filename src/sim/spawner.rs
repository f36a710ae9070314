//! Wall-clock obstacle spawning
//!
//! Spawns are timed against the clock collaborator rather than frame count,
//! so obstacle density over time does not depend on frame rate.

use rand::Rng;

use super::state::Obstacle;
use crate::tuning::Tuning;

/// Tracks time since the last spawn
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    /// Clock reading (ms) of the last spawn, or of session start
    pub last_spawn_ms: f64,
    pub interval_ms: f64,
}

impl Spawner {
    pub fn new(interval_ms: f64, now_ms: f64) -> Self {
        Self {
            last_spawn_ms: now_ms,
            interval_ms,
        }
    }

    /// Returns true once the interval has strictly elapsed, and restarts the timer
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_spawn_ms > self.interval_ms {
            self.last_spawn_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Build an obstacle at the right edge with a gap top drawn from the tuning's range
pub fn spawn_obstacle<R: Rng>(rng: &mut R, tuning: &Tuning) -> Obstacle {
    let gap_top = rng.random_range(tuning.min_gap_top..=tuning.max_gap_top);
    Obstacle::new(tuning.screen_width as f32, gap_top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_poll_requires_strictly_elapsed_interval() {
        let mut spawner = Spawner::new(1500.0, 0.0);
        assert!(!spawner.poll(1000.0));
        assert!(!spawner.poll(1500.0));
        assert!(spawner.poll(1500.5));
        assert_eq!(spawner.last_spawn_ms, 1500.5);
    }

    #[test]
    fn test_poll_resets_to_current_time() {
        let mut spawner = Spawner::new(1500.0, 0.0);
        // A late frame spawns once, then the next spawn is measured from it
        assert!(spawner.poll(2000.0));
        assert!(!spawner.poll(3400.0));
        assert!(spawner.poll(3600.0));
    }

    #[test]
    fn test_spawn_rate_independent_of_frame_rate() {
        let count_spawns = |fps: f64| {
            let mut spawner = Spawner::new(1500.0, 0.0);
            let frames = (10.0 * fps) as u32;
            (0..=frames)
                .filter(|&n| spawner.poll(n as f64 * 1000.0 / fps))
                .count()
        };
        // Ten seconds of wall-clock time yields the same count at 30 and 120 fps
        assert_eq!(count_spawns(30.0), count_spawns(120.0));
    }

    #[test]
    fn test_spawned_obstacle_placement() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let obstacle = spawn_obstacle(&mut rng, &tuning);
            assert_eq!(obstacle.x, 900.0);
            assert!(!obstacle.passed);
            assert!((100..=350).contains(&obstacle.gap_top));
            // The gap always fits inside the playfield
            assert!(obstacle.bottom_obstacle_y(tuning.obstacle_gap) <= 600.0);
        }
    }

    #[test]
    fn test_single_value_range() {
        let tuning = Tuning {
            min_gap_top: 200,
            max_gap_top: 200,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(9);
        assert_eq!(spawn_obstacle(&mut rng, &tuning).gap_top, 200);
    }
}
