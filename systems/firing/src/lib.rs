#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cooldown-gated trigger deciding when the local player may fire.

use std::time::Duration;

use square_arena_core::BulletSpawn;

/// Default minimum time between two successive shots.
pub const DEFAULT_FIRE_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration parameters required to construct the firing controller.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    fire_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided fire interval.
    #[must_use]
    pub const fn new(fire_interval: Duration) -> Self {
        Self { fire_interval }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_FIRE_INTERVAL)
    }
}

/// Pure system that bounds the local fire rate independent of tick rate.
#[derive(Debug)]
pub struct FiringController {
    fire_interval: Duration,
    cooldown_remaining: Duration,
}

impl FiringController {
    /// Creates a controller that is immediately ready to fire.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            fire_interval: config.fire_interval,
            cooldown_remaining: Duration::ZERO,
        }
    }

    /// Gates one fire attempt for a tick of length `dt`.
    ///
    /// The elapsed tick time first drains the remaining cooldown (floored at
    /// zero); the attempt succeeds iff a fire request is active and the
    /// cooldown is exhausted, in which case the cooldown re-arms to the
    /// configured interval. Under a continuous request the controller fires
    /// at t = 0 and then exactly once per interval, regardless of tick rate.
    pub fn try_fire(&mut self, fire_requested: bool, dt: Duration) -> bool {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(dt);

        if fire_requested && self.cooldown_remaining.is_zero() {
            self.cooldown_remaining = self.fire_interval;
            return true;
        }

        false
    }

    /// Forwards a pending spawn request into `out` when firing is allowed.
    ///
    /// `spawn_request` is `Some` while the trigger is held; the spawn
    /// describes the shot that would be fired this tick.
    pub fn handle(
        &mut self,
        spawn_request: Option<BulletSpawn>,
        dt: Duration,
        out: &mut Vec<BulletSpawn>,
    ) {
        let requested = spawn_request.is_some();
        if self.try_fire(requested, dt) {
            if let Some(spawn) = spawn_request {
                out.push(spawn);
            }
        }
    }

    /// Time remaining until the next shot is allowed.
    #[must_use]
    pub const fn cooldown_remaining(&self) -> Duration {
        self.cooldown_remaining
    }
}

impl Default for FiringController {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
