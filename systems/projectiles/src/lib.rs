#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Owns the set of locally-fired projectiles and their lifecycle.
//!
//! A projectile enters the set only through [`ProjectileLifecycle::spawn`],
//! advances every tick, and is removed exactly once by the manager when its
//! age reaches its time-to-live. The age bound is the enforced termination
//! policy. No upper bound on concurrently live projectiles is enforced; a
//! sustained trigger is already rate-limited upstream by the fire cooldown.

use std::time::Duration;

use square_arena_core::{BulletSpawn, PlayerId, ProjectileId, Transform};

/// Default projectile speed in world units per second.
pub const DEFAULT_VELOCITY: f32 = 600.0;

/// Default projectile time-to-live.
pub const DEFAULT_TTL: Duration = Duration::from_millis(1500);

/// Configuration parameters shared by every spawned projectile.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    velocity: f32,
    ttl: Duration,
}

impl Config {
    /// Creates a new configuration from a speed and a time-to-live.
    #[must_use]
    pub const fn new(velocity: f32, ttl: Duration) -> Self {
        Self { velocity, ttl }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY, DEFAULT_TTL)
    }
}

#[derive(Clone, Debug)]
struct Projectile {
    id: ProjectileId,
    owner: PlayerId,
    transform: Transform,
    velocity: f32,
    age: Duration,
    ttl: Duration,
}

impl Projectile {
    fn advance(&mut self, dt: Duration) {
        let distance = self.velocity * dt.as_secs_f32();
        self.transform.x += self.transform.rotation.cos() * distance;
        self.transform.y += self.transform.rotation.sin() * distance;
        self.age = self.age.saturating_add(dt);
    }

    fn expired(&self) -> bool {
        self.age >= self.ttl
    }
}

/// Manager that owns every live locally-fired projectile.
#[derive(Debug)]
pub struct ProjectileLifecycle {
    config: Config,
    live: Vec<Projectile>,
    next_id: u64,
}

impl ProjectileLifecycle {
    /// Creates an empty manager using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            live: Vec::new(),
            next_id: 0,
        }
    }

    /// Appends a projectile with age zero at the spawn transform.
    ///
    /// Speed and time-to-live come from the manager's configuration. The
    /// returned id is unique for the lifetime of the manager and keys the
    /// projectile's render handle in the composition root.
    pub fn spawn(&mut self, spawn: BulletSpawn) -> ProjectileId {
        let id = ProjectileId::new(self.next_id);
        self.next_id += 1;
        self.live.push(Projectile {
            id,
            owner: spawn.owner,
            transform: spawn.transform,
            velocity: self.config.velocity,
            age: Duration::ZERO,
            ttl: self.config.ttl,
        });
        id
    }

    /// Advances every live projectile by `dt`, then removes expired ones.
    ///
    /// Each projectile moves `velocity * dt` along its rotation heading and
    /// accrues age; projectiles whose age has reached their time-to-live are
    /// dropped at the end of the same tick.
    pub fn tick(&mut self, dt: Duration) {
        for projectile in &mut self.live {
            projectile.advance(dt);
        }
        self.live.retain(|projectile| !projectile.expired());
    }

    /// Number of projectiles currently live.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Reports whether no projectile is currently live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Captures a read-only view of the live set, sorted by id.
    #[must_use]
    pub fn view(&self) -> ProjectileView {
        let mut snapshots: Vec<ProjectileSnapshot> = self
            .live
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                owner: projectile.owner.clone(),
                transform: projectile.transform,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        ProjectileView { snapshots }
    }
}

impl Default for ProjectileLifecycle {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Read-only snapshot describing all live projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single live projectile.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated by the manager at spawn time.
    pub id: ProjectileId,
    /// Player that fired the projectile.
    pub owner: PlayerId,
    /// Current transform of the projectile.
    pub transform: Transform,
}
