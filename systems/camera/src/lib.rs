#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Derives the view offset and zoom from local movement activity.
//!
//! The camera is a two-state machine: while the local player moves the scale
//! eases toward a zoomed-out target, and while stationary it eases back in.
//! Each tick the scale covers a configured fraction of the remaining
//! distance to the active target, so the visual zoom is continuous even
//! though the driving signal is binary and sampled once per tick.

use glam::Vec2;
use square_arena_core::{MovementActivity, Transform};

/// Default scale targeted while the local player is moving.
pub const DEFAULT_MOVING_SCALE: f32 = 0.8;

/// Default scale targeted while the local player is stationary.
pub const DEFAULT_STATIONARY_SCALE: f32 = 1.0;

/// Default fraction of the remaining distance covered per tick.
pub const DEFAULT_EASE: f32 = 0.1;

/// Configuration parameters required to construct the camera.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    moving_scale: f32,
    stationary_scale: f32,
    ease: f32,
}

impl Config {
    /// Creates a new configuration from the two scale targets and the
    /// per-tick easing fraction (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn new(moving_scale: f32, stationary_scale: f32, ease: f32) -> Self {
        Self {
            moving_scale,
            stationary_scale,
            ease: ease.clamp(0.0, 1.0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MOVING_SCALE, DEFAULT_STATIONARY_SCALE, DEFAULT_EASE)
    }
}

/// View offset and zoom to apply to the scene root this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Translation of the scene root in screen units.
    pub offset: Vec2,
    /// Uniform zoom of the scene root.
    pub scale: f32,
}

/// Eased camera that couples zoom and offset to local movement.
#[derive(Debug)]
pub struct CameraTransform {
    config: Config,
    scale: f32,
}

impl CameraTransform {
    /// Creates a camera resting at the stationary (zoomed-in) scale.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            scale: config.stationary_scale,
        }
    }

    /// Advances the easing by one tick and derives the pose.
    ///
    /// The scale moves a fraction of the remaining distance toward the
    /// target selected by `activity`; a direction reversal therefore takes
    /// effect within the same tick the activity changes. The offset is
    /// always recomputed as `-movement * scale + view_center`, keeping
    /// offset and zoom coupled regardless of state.
    pub fn update(
        &mut self,
        activity: MovementActivity,
        movement: Transform,
        view_center: Vec2,
    ) -> CameraPose {
        let target = match activity {
            MovementActivity::Moving => self.config.moving_scale,
            MovementActivity::Stationary => self.config.stationary_scale,
        };
        self.scale += (target - self.scale) * self.config.ease;

        CameraPose {
            offset: Vec2::new(-movement.x, -movement.y) * self.scale + view_center,
            scale: self.scale,
        }
    }

    /// Current zoom of the camera.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
