//! Time-based difficulty progression
//!
//! Both curves are pure functions of whole elapsed seconds, so ticking while
//! already clamped recomputes the same value instead of stacking.

use super::state::GameSession;
use crate::config::Config;

/// `min(max, initial + t * increment)`
pub fn fall_speed(elapsed_secs: u32, config: &Config) -> f32 {
    let raw = config.initial_fall_speed + elapsed_secs as f32 * config.speed_increment;
    raw.min(config.max_fall_speed)
}

/// `max(min, initial - t * decrement)` in milliseconds
pub fn spawn_interval_ms(elapsed_secs: u32, config: &Config) -> u32 {
    config
        .initial_spawn_interval_ms
        .saturating_sub(elapsed_secs.saturating_mul(config.spawn_interval_decrement_ms))
        .max(config.min_spawn_interval_ms)
}

/// What a difficulty tick changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyUpdate {
    pub fall_speed: f32,
    pub spawn_interval_ms: u32,
    /// The item spawn timer needs its period updated
    pub interval_changed: bool,
    pub speed_changed: bool,
}

/// Advance one second and recompute the curves
pub fn tick(session: &mut GameSession, config: &Config) -> DifficultyUpdate {
    session.elapsed_secs += 1;
    let t = session.elapsed_secs;

    let speed = fall_speed(t, config);
    let interval = spawn_interval_ms(t, config);

    let update = DifficultyUpdate {
        fall_speed: speed,
        spawn_interval_ms: interval,
        interval_changed: interval != session.current_spawn_interval_ms,
        speed_changed: speed != session.current_fall_speed,
    };

    session.current_fall_speed = speed;
    session.current_spawn_interval_ms = interval;
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Arena;
    use proptest::prelude::*;

    #[test]
    fn spawn_interval_clamps_at_thirty_seconds() {
        let config = Config::default();
        assert_eq!(spawn_interval_ms(0, &config), 800);
        assert_eq!(spawn_interval_ms(10, &config), 600);
        assert_eq!(spawn_interval_ms(30, &config), 200);
        assert_eq!(spawn_interval_ms(31, &config), 200);
        assert_eq!(spawn_interval_ms(u32::MAX, &config), 200);
    }

    #[test]
    fn fall_speed_clamps_at_max() {
        let config = Config::default();
        assert_eq!(fall_speed(0, &config), 2.0);
        assert!((fall_speed(10, &config) - 3.0).abs() < 1e-5);
        assert_eq!(fall_speed(60, &config), 8.0);
        assert_eq!(fall_speed(600, &config), 8.0);
    }

    #[test]
    fn tick_reports_changes_and_stops_once_clamped() {
        let config = Config::default();
        let mut session = GameSession::new(1, Arena::new(800.0, 600.0), &config);

        let first = tick(&mut session, &config);
        assert_eq!(session.elapsed_secs, 1);
        assert!(first.interval_changed);
        assert!(first.speed_changed);
        assert_eq!(session.current_spawn_interval_ms, 780);

        for _ in 1..30 {
            tick(&mut session, &config);
        }
        assert_eq!(session.current_spawn_interval_ms, 200);

        let clamped = tick(&mut session, &config);
        assert!(!clamped.interval_changed);
        assert_eq!(session.current_spawn_interval_ms, 200);
    }

    proptest! {
        #[test]
        fn fall_speed_non_decreasing_and_bounded(t in 0u32..100_000) {
            let config = Config::default();
            let now = fall_speed(t, &config);
            let next = fall_speed(t + 1, &config);
            prop_assert!(next >= now);
            prop_assert!(now <= config.max_fall_speed);
        }

        #[test]
        fn spawn_interval_non_increasing_and_bounded(t in 0u32..100_000) {
            let config = Config::default();
            let now = spawn_interval_ms(t, &config);
            let next = spawn_interval_ms(t + 1, &config);
            prop_assert!(next <= now);
            prop_assert!(now >= config.min_spawn_interval_ms);
        }
    }
}
