#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scene composition root for a Square Arena game session.
//!
//! [`GameSession`] composes the remote entity registry, the four per-tick
//! systems, the sync channel and the render host into one logical update,
//! and it is the only component that talks to the rendering collaborator.
//! Synchronized state and render handles stay separate: the session
//! correlates them with an explicit per-tick diff-and-apply step that
//! creates, updates and destroys nodes to match registry and projectile
//! membership.
//!
//! The session runs on a single cooperative context. Inbound messages are
//! buffered by the transport and drained at the top of each tick, so every
//! registry mutation completes atomically within one dispatch and the tick
//! pipeline never observes a partially-updated registry. Nothing here
//! blocks; a disconnected channel merely degrades the session to local-only
//! operation until the next authoritative snapshot arrives.

use std::{
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

use glam::Vec2;
use log::debug;
use square_arena_channel::SyncChannel;
use square_arena_core::{
    BulletSpawn, ClientMessage, Event, MovementActivity, PlayerId, ProjectileId, ServerMessage,
    Transform,
};
use square_arena_registry::{self as registry, query, RemoteRegistry};
use square_arena_rendering::{NodeHandle, NodeKind, RenderHost};
use square_arena_system_camera::{CameraTransform, Config as CameraConfig};
use square_arena_system_firing::{Config as FiringConfig, FiringController};
use square_arena_system_movement::MovementTracker;
use square_arena_system_projectiles::{Config as ProjectileConfig, ProjectileLifecycle};

/// Parameters fixed for the lifetime of a game session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Connection identifier assigned to the local player.
    pub local_player: PlayerId,
    /// Camera easing configuration.
    pub camera: CameraConfig,
    /// Fire-rate configuration.
    pub firing: FiringConfig,
    /// Projectile speed and lifetime configuration.
    pub projectiles: ProjectileConfig,
}

impl SessionConfig {
    /// Creates a configuration with default tuning for the given player.
    #[must_use]
    pub fn new(local_player: PlayerId) -> Self {
        Self {
            local_player,
            camera: CameraConfig::default(),
            firing: FiringConfig::default(),
            projectiles: ProjectileConfig::default(),
        }
    }
}

/// Input snapshot gathered by the hosting adapter before each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Current transform of the local player.
    pub local_transform: Transform,
    /// Whether the fire trigger is held this tick.
    pub fire_requested: bool,
    /// Center of the viewport in screen units.
    pub view_center: Vec2,
}

/// One game session: per-tick update over a channel and a render host.
///
/// Constructed once at session start; dropping it ends the session. There is
/// no teardown on channel disconnect: the registry retains its last-known
/// state until a fresh snapshot arrives, so the scene does not flicker
/// entities away and back during an outage.
#[derive(Debug)]
pub struct GameSession<C, H> {
    channel: C,
    host: H,
    local_player: PlayerId,
    registry: RemoteRegistry,
    tracker: MovementTracker,
    firing: FiringController,
    projectiles: ProjectileLifecycle,
    camera: CameraTransform,
    local_node: NodeHandle,
    remote_nodes: BTreeMap<PlayerId, NodeHandle>,
    projectile_nodes: BTreeMap<ProjectileId, NodeHandle>,
    inbox: Vec<ServerMessage>,
    outbox: Vec<ClientMessage>,
    spawns: Vec<BulletSpawn>,
    events: Vec<Event>,
}

impl<C, H> GameSession<C, H>
where
    C: SyncChannel,
    H: RenderHost,
{
    /// Creates a session and the local player's scene node.
    #[must_use]
    pub fn new(config: SessionConfig, channel: C, mut host: H) -> Self {
        let local_node = host.create_node(NodeKind::LocalPlayer);
        Self {
            channel,
            host,
            local_player: config.local_player,
            registry: RemoteRegistry::new(),
            tracker: MovementTracker::new(),
            firing: FiringController::new(config.firing),
            projectiles: ProjectileLifecycle::new(config.projectiles),
            camera: CameraTransform::new(config.camera),
            local_node,
            remote_nodes: BTreeMap::new(),
            projectile_nodes: BTreeMap::new(),
            inbox: Vec::new(),
            outbox: Vec::new(),
            spawns: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Scatters decorative star nodes at the provided world positions.
    ///
    /// Stars are fire-and-forget scenery: the session never updates or
    /// removes them, so their handles are not tracked.
    pub fn place_stars(&mut self, positions: &[Vec2]) {
        for position in positions {
            let star = self.host.create_node(NodeKind::Star);
            self.host.set_position(star, position.x, position.y);
        }
    }

    /// Advances the session by one tick.
    ///
    /// Pipeline order: drain and dispatch inbound messages, report local
    /// movement, derive the camera pose, gate firing, advance projectiles,
    /// then reconcile render handles against the new membership.
    pub fn tick(&mut self, dt: Duration, input: FrameInput) {
        self.drain_inbound();
        let activity = self.report_movement(input.local_transform);

        let pose = self
            .camera
            .update(activity, input.local_transform, input.view_center);
        self.host.set_root_transform(pose.offset, pose.scale);

        self.host
            .set_position(self.local_node, input.local_transform.x, input.local_transform.y);
        self.host
            .set_rotation(self.local_node, input.local_transform.rotation);

        let request = input
            .fire_requested
            .then(|| BulletSpawn::new(self.local_player.clone(), input.local_transform));
        self.spawns.clear();
        self.firing.handle(request, dt, &mut self.spawns);
        for spawn in self.spawns.drain(..) {
            let _ = self.projectiles.spawn(spawn);
        }

        self.projectiles.tick(dt);

        self.sync_remote_nodes();
        self.sync_projectile_nodes();
    }

    /// Registry mutations applied while dispatching the most recent tick's
    /// inbound messages.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Read access to the remote entity registry.
    #[must_use]
    pub fn registry(&self) -> &RemoteRegistry {
        &self.registry
    }

    /// Read access to the projectile lifecycle manager.
    #[must_use]
    pub fn projectiles(&self) -> &ProjectileLifecycle {
        &self.projectiles
    }

    /// Read access to the render host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Reports whether the sync channel currently has a live link.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    fn drain_inbound(&mut self) {
        self.inbox.clear();
        self.channel.poll(&mut self.inbox);

        self.events.clear();
        for message in self.inbox.drain(..) {
            registry::apply(&mut self.registry, message, &mut self.events);
        }

        for event in &self.events {
            match event {
                Event::RemoteAppeared { id, .. } => {
                    debug!("remote player {} appeared", id.as_str());
                }
                Event::RemoteRemoved { id } => {
                    debug!("remote player {} left", id.as_str());
                }
                Event::RemoteMoved { .. } => {}
            }
        }
    }

    fn report_movement(&mut self, current: Transform) -> MovementActivity {
        self.outbox.clear();
        let activity = self.tracker.handle(current, &mut self.outbox);
        for report in self.outbox.drain(..) {
            self.channel.send(&report);
        }
        activity
    }

    fn sync_remote_nodes(&mut self) {
        for snapshot in query::remote_view(&self.registry).iter() {
            let handle = match self.remote_nodes.get(&snapshot.id) {
                Some(&handle) => handle,
                None => {
                    let handle = self.host.create_node(NodeKind::RemotePlayer);
                    let _ = self.remote_nodes.insert(snapshot.id.clone(), handle);
                    handle
                }
            };
            self.host
                .set_position(handle, snapshot.transform.x, snapshot.transform.y);
            self.host.set_rotation(handle, snapshot.transform.rotation);
        }

        let stale: Vec<PlayerId> = self
            .remote_nodes
            .keys()
            .filter(|id| self.registry.get(id).is_none())
            .cloned()
            .collect();
        for id in stale {
            if let Some(handle) = self.remote_nodes.remove(&id) {
                self.host.remove_node(handle);
            }
        }
    }

    fn sync_projectile_nodes(&mut self) {
        let mut live = BTreeSet::new();
        for snapshot in self.projectiles.view().iter() {
            let _ = live.insert(snapshot.id);
            let handle = match self.projectile_nodes.get(&snapshot.id) {
                Some(&handle) => handle,
                None => {
                    let handle = self.host.create_node(NodeKind::Projectile);
                    let _ = self.projectile_nodes.insert(snapshot.id, handle);
                    handle
                }
            };
            self.host
                .set_position(handle, snapshot.transform.x, snapshot.transform.y);
            self.host.set_rotation(handle, snapshot.transform.rotation);
        }

        let stale: Vec<ProjectileId> = self
            .projectile_nodes
            .keys()
            .filter(|id| !live.contains(id))
            .copied()
            .collect();
        for id in stale {
            if let Some(handle) = self.projectile_nodes.remove(&id) {
                self.host.remove_node(handle);
            }
        }
    }
}
