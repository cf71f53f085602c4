#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides when the local player reports upstream.
//!
//! The tracker is the sole gate for outbound traffic: one report per actual
//! transform change, nothing while the transform is unchanged. Change
//! detection is exact component-wise `f32` equality, so minor simulation
//! jitter produces reports; callers that want fewer should quantize their
//! transforms before handing them in.

use square_arena_core::{ClientMessage, MovementActivity, Transform};

/// Tracks the last transform reported upstream for the local player.
#[derive(Debug, Default)]
pub struct MovementTracker {
    last_reported: Option<Transform>,
}

impl MovementTracker {
    /// Creates a tracker that has reported nothing yet.
    ///
    /// The first observed transform always emits a report, so the server
    /// learns the local position on the first tick of the session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares the current local transform against the last reported one.
    ///
    /// Emits exactly one [`ClientMessage::MovementReport`] into `out` when
    /// they differ and records `current` as reported; emits nothing
    /// otherwise. Returns [`MovementActivity::Moving`] exactly when a report
    /// was emitted.
    pub fn handle(&mut self, current: Transform, out: &mut Vec<ClientMessage>) -> MovementActivity {
        if self.last_reported == Some(current) {
            return MovementActivity::Stationary;
        }

        self.last_reported = Some(current);
        out.push(ClientMessage::MovementReport(current));
        MovementActivity::Moving
    }

    /// Returns the transform most recently reported upstream, if any.
    #[must_use]
    pub fn last_reported(&self) -> Option<&Transform> {
        self.last_reported.as_ref()
    }
}
