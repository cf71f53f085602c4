#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Keyed store of remote players' last-known transforms.
//!
//! All mutation of remote entity state flows through [`RemoteRegistry`],
//! either directly via its four operations or via [`apply`], which dispatches
//! one inbound [`ServerMessage`] to the mutation it denotes. Network delivery
//! gaps make updates for unknown ids and deletes for absent ids a normal
//! occurrence, so both are defined as no-ops rather than errors.

use std::collections::BTreeMap;

use square_arena_core::{Event, PlayerId, ServerMessage, Transform};

/// Store of every remote player currently known to the client.
#[derive(Debug, Default)]
pub struct RemoteRegistry {
    entries: BTreeMap<PlayerId, Transform>,
}

impl RemoteRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the entry if absent, otherwise overwrites its transform.
    ///
    /// Returns the previous transform when the id was already present, which
    /// distinguishes a create from an overwrite without a second lookup.
    pub fn upsert(&mut self, id: PlayerId, transform: Transform) -> Option<Transform> {
        self.entries.insert(id, transform)
    }

    /// Deletes the entry if present; removing an absent id is a no-op.
    ///
    /// Returns the removed transform, if any.
    pub fn remove(&mut self, id: &PlayerId) -> Option<Transform> {
        self.entries.remove(id)
    }

    /// Replaces membership atomically with exactly the provided entries.
    ///
    /// Ids currently known but absent from `entries` are removed first, then
    /// every entry is upserted. Afterwards the registry contains exactly the
    /// ids of `entries` with their transforms, regardless of prior contents.
    /// The removals performed by omission and the upserts are recorded in
    /// `out_events`.
    pub fn apply_snapshot(
        &mut self,
        entries: BTreeMap<PlayerId, Transform>,
        out_events: &mut Vec<Event>,
    ) {
        let removed: Vec<PlayerId> = self
            .entries
            .keys()
            .filter(|id| !entries.contains_key(*id))
            .cloned()
            .collect();
        for id in removed {
            let _ = self.entries.remove(&id);
            out_events.push(Event::RemoteRemoved { id });
        }

        for (id, transform) in entries {
            let previous = self.upsert(id.clone(), transform);
            out_events.push(match previous {
                None => Event::RemoteAppeared { id, transform },
                Some(_) => Event::RemoteMoved { id, transform },
            });
        }
    }

    /// Returns the last-known transform for the provided id.
    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&Transform> {
        self.entries.get(id)
    }

    /// Number of remote entities currently known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no remote entity is currently known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Dispatches one inbound message to the registry mutation it denotes.
///
/// Mutations complete atomically within a single call; the registry is never
/// observable in a partially-updated state. Mutations actually performed are
/// recorded in `out_events` (a delete for an id that was never present, for
/// example, records nothing).
pub fn apply(registry: &mut RemoteRegistry, message: ServerMessage, out_events: &mut Vec<Event>) {
    match message {
        ServerMessage::NewSquare(update) | ServerMessage::SquareMoved(update) => {
            let previous = registry.upsert(update.id.clone(), update.transform);
            out_events.push(match previous {
                None => Event::RemoteAppeared {
                    id: update.id,
                    transform: update.transform,
                },
                Some(_) => Event::RemoteMoved {
                    id: update.id,
                    transform: update.transform,
                },
            });
        }
        ServerMessage::SquareDeleted(id) => {
            if registry.remove(&id).is_some() {
                out_events.push(Event::RemoteRemoved { id });
            }
        }
        ServerMessage::SquareList(entries) => {
            registry.apply_snapshot(entries, out_events);
        }
    }
}

/// Query functions that provide read-only access to registry state.
pub mod query {
    use super::RemoteRegistry;
    use square_arena_core::{PlayerId, Transform};

    /// Captures a read-only view of every known remote entity.
    #[must_use]
    pub fn remote_view(registry: &RemoteRegistry) -> RemoteView {
        RemoteView {
            snapshots: registry
                .entries
                .iter()
                .map(|(id, transform)| RemoteSnapshot {
                    id: id.clone(),
                    transform: *transform,
                })
                .collect(),
        }
    }

    /// Read-only snapshot describing all remote entities, sorted by id.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct RemoteView {
        snapshots: Vec<RemoteSnapshot>,
    }

    impl RemoteView {
        /// Iterator over the captured snapshots in deterministic id order.
        pub fn iter(&self) -> impl Iterator<Item = &RemoteSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<RemoteSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single remote entity.
    #[derive(Clone, Debug, PartialEq)]
    pub struct RemoteSnapshot {
        /// Connection identifier of the remote player.
        pub id: PlayerId,
        /// Last-known transform received for that player.
        pub transform: Transform,
    }
}
