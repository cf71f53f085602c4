#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Square Arena client.
//!
//! This crate defines the message surface that connects the sync channel,
//! the remote entity registry, and the pure per-tick systems. Inbound
//! [`ServerMessage`] values are dispatched into registry mutations, the
//! registry broadcasts [`Event`] values describing the mutations it actually
//! performed, and systems communicate through plain data types such as
//! [`Transform`] and [`MovementActivity`]. Nothing in this crate talks to a
//! network or a renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when a game session boots.
pub const WELCOME_BANNER: &str = "Welcome to Square Arena.";

/// Position and heading of an entity at an instant.
///
/// The same shape is shared by players and projectiles, and it is the exact
/// payload of a `player-movement` report. `rotation` is expressed in
/// radians. Equality is exact component-wise `f32` comparison; the movement
/// tracker relies on this to detect change, so no epsilon is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Horizontal position in world units.
    pub x: f32,
    /// Vertical position in world units.
    pub y: f32,
    /// Heading in radians.
    pub rotation: f32,
}

impl Transform {
    /// Creates a new transform from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self { x, y, rotation }
    }
}

/// Unique identifier assigned to a player connection by the server.
///
/// Stable for the lifetime of the connection and never reused while the
/// corresponding remote entity is alive.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a new player identifier from the server-assigned string.
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<String>,
    {
        Self(value.into())
    }

    /// Borrows the underlying identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier assigned to a locally-fired projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u64);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Spawn request emitted once at fire time.
#[derive(Clone, Debug, PartialEq)]
pub struct BulletSpawn {
    /// Player that fired the projectile.
    pub owner: PlayerId,
    /// Transform of the firing player at the moment of the shot.
    pub transform: Transform,
}

impl BulletSpawn {
    /// Creates a new spawn request.
    #[must_use]
    pub const fn new(owner: PlayerId, transform: Transform) -> Self {
        Self { owner, transform }
    }
}

/// Binary per-tick signal describing whether the local transform changed.
///
/// Produced by the movement tracker and consumed by the camera to select its
/// easing target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementActivity {
    /// The local transform changed this tick and a report was emitted.
    Moving,
    /// The local transform is unchanged since the last report.
    Stationary,
}

/// Wire payload describing one remote player's identity and transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerMovement {
    /// Connection identifier of the player the update refers to.
    pub id: PlayerId,
    /// Last-known transform of that player.
    #[serde(flatten)]
    pub transform: Transform,
}

/// Messages the client sends upstream over the sync channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum ClientMessage {
    /// Reports the local player's transform; sent only when it changed.
    #[serde(rename = "player-movement")]
    MovementReport(Transform),
}

/// Messages arriving from the server, one variant per wire kind.
///
/// The set is closed: each variant maps to exactly one registry mutation,
/// which keeps protocol handling independent of the transport and testable
/// against literal payload fixtures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// A player joined; the registry creates (or overwrites) its entry.
    NewSquare(PlayerMovement),
    /// A known player moved; unknown ids are accepted and created.
    SquareMoved(PlayerMovement),
    /// A player left; removing an absent id is a no-op.
    SquareDeleted(PlayerId),
    /// Authoritative roster of every remote player and transform.
    ///
    /// Entries absent from the mapping are removed even without an explicit
    /// delete; this is the recovery path after a connectivity gap.
    SquareList(BTreeMap<PlayerId, Transform>),
}

/// Registry mutations actually applied while dispatching a server message.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A remote entity was created on first sighting.
    RemoteAppeared {
        /// Identifier of the entity that appeared.
        id: PlayerId,
        /// Transform the entity appeared with.
        transform: Transform,
    },
    /// An existing remote entity's transform was overwritten.
    RemoteMoved {
        /// Identifier of the entity that moved.
        id: PlayerId,
        /// Transform the entity moved to.
        transform: Transform,
    },
    /// A remote entity was removed by delete or snapshot omission.
    RemoteRemoved {
        /// Identifier of the entity that was removed.
        id: PlayerId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_square_fixture_decodes() {
        let fixture = json!({
            "kind": "new-square",
            "payload": { "id": "a1", "x": 4.0, "y": -2.5, "rotation": 0.75 }
        });

        let message: ServerMessage = serde_json::from_value(fixture).expect("decode");
        assert_eq!(
            message,
            ServerMessage::NewSquare(PlayerMovement {
                id: PlayerId::new("a1"),
                transform: Transform::new(4.0, -2.5, 0.75),
            })
        );
    }

    #[test]
    fn square_moved_fixture_decodes() {
        let fixture = json!({
            "kind": "square-moved",
            "payload": { "id": "b2", "x": 0.0, "y": 0.0, "rotation": 3.1 }
        });

        let message: ServerMessage = serde_json::from_value(fixture).expect("decode");
        assert!(matches!(message, ServerMessage::SquareMoved(update) if update.id.as_str() == "b2"));
    }

    #[test]
    fn square_deleted_payload_is_a_bare_id() {
        let fixture = json!({ "kind": "square-deleted", "payload": "c3" });

        let message: ServerMessage = serde_json::from_value(fixture).expect("decode");
        assert_eq!(message, ServerMessage::SquareDeleted(PlayerId::new("c3")));
    }

    #[test]
    fn square_list_fixture_decodes_as_mapping() {
        let fixture = json!({
            "kind": "square-list",
            "payload": {
                "a1": { "x": 1.0, "y": 2.0, "rotation": 0.0 },
                "b2": { "x": -3.0, "y": 0.5, "rotation": 1.5 }
            }
        });

        let message: ServerMessage = serde_json::from_value(fixture).expect("decode");
        let ServerMessage::SquareList(entries) = message else {
            panic!("expected square-list");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.get(&PlayerId::new("a1")),
            Some(&Transform::new(1.0, 2.0, 0.0))
        );
    }

    #[test]
    fn empty_square_list_decodes_to_empty_mapping() {
        let fixture = json!({ "kind": "square-list", "payload": {} });

        let message: ServerMessage = serde_json::from_value(fixture).expect("decode");
        assert_eq!(message, ServerMessage::SquareList(BTreeMap::new()));
    }

    #[test]
    fn movement_report_encodes_with_wire_kind() {
        let report = ClientMessage::MovementReport(Transform::new(7.5, 8.0, -0.25));

        let encoded = serde_json::to_value(&report).expect("encode");
        assert_eq!(
            encoded,
            json!({
                "kind": "player-movement",
                "payload": { "x": 7.5, "y": 8.0, "rotation": -0.25 }
            })
        );
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let fixture = json!({
            "kind": "new-square",
            "payload": { "id": "a1", "x": 4.0, "rotation": 0.75 }
        });

        assert!(serde_json::from_value::<ServerMessage>(fixture).is_err());
    }

    #[test]
    fn transform_equality_is_exact() {
        let base = Transform::new(1.0, 2.0, 3.0);
        let jittered = Transform::new(1.0 + f32::EPSILON, 2.0, 3.0);

        assert_eq!(base, base);
        assert_ne!(base, jittered);
    }
}
