#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Contract between the sync core and the rendering collaborator.
//!
//! The drawing engine itself lives outside this repository; the core only
//! ever drives it through [`RenderHost`]. Handles are owned by the host and
//! merely referenced by the core, which correlates them with synchronized
//! state in the composition root. Creating a node attaches it to the scene;
//! removing it detaches and destroys it. The core never re-parents nodes,
//! so no separate child-management surface exists.

use std::collections::BTreeMap;

use glam::Vec2;
use square_arena_core::Transform;

/// Kinds of scene nodes the core asks the host to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The local player's ship.
    LocalPlayer,
    /// A remote player's ship.
    RemotePlayer,
    /// A locally-fired projectile.
    Projectile,
    /// Decorative background star.
    Star,
}

/// Opaque token identifying a host-owned scene node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

impl NodeHandle {
    /// Creates a handle from the host's numeric token.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Rendering collaborator consumed by the scene composition root.
pub trait RenderHost {
    /// Creates a scene node of the given kind and attaches it to the scene.
    fn create_node(&mut self, kind: NodeKind) -> NodeHandle;

    /// Moves the node to the provided world position.
    fn set_position(&mut self, node: NodeHandle, x: f32, y: f32);

    /// Rotates the node to the provided heading in radians.
    fn set_rotation(&mut self, node: NodeHandle, rotation: f32);

    /// Detaches the node from the scene and destroys it.
    fn remove_node(&mut self, node: NodeHandle);

    /// Writes the scene root's view offset and zoom for this tick.
    fn set_root_transform(&mut self, offset: Vec2, scale: f32);
}

/// Host implementation that records the scene instead of drawing it.
///
/// Backs tests and the headless demo binary: it tracks every live node, its
/// kind and transform, and the last root transform written, so assertions
/// can compare the scene against registry and projectile membership.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    nodes: BTreeMap<NodeHandle, HeadlessNode>,
    next_handle: u64,
    root_offset: Vec2,
    root_scale: f32,
}

/// State recorded for a single live node of the headless host.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessNode {
    /// Kind the node was created with.
    pub kind: NodeKind,
    /// Last transform written through the host interface.
    pub transform: Transform,
}

impl HeadlessHost {
    /// Creates an empty headless host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded state of a live node.
    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&HeadlessNode> {
        self.nodes.get(&handle)
    }

    /// Number of live nodes of the provided kind.
    #[must_use]
    pub fn count_of(&self, kind: NodeKind) -> usize {
        self.nodes.values().filter(|node| node.kind == kind).count()
    }

    /// Iterator over every live node in handle order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &HeadlessNode)> {
        self.nodes.iter().map(|(handle, node)| (*handle, node))
    }

    /// Total number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Last root offset written by the camera.
    #[must_use]
    pub const fn root_offset(&self) -> Vec2 {
        self.root_offset
    }

    /// Last root scale written by the camera.
    #[must_use]
    pub const fn root_scale(&self) -> f32 {
        self.root_scale
    }
}

impl RenderHost for HeadlessHost {
    fn create_node(&mut self, kind: NodeKind) -> NodeHandle {
        let handle = NodeHandle::new(self.next_handle);
        self.next_handle += 1;
        let _ = self.nodes.insert(
            handle,
            HeadlessNode {
                kind,
                transform: Transform::default(),
            },
        );
        handle
    }

    fn set_position(&mut self, node: NodeHandle, x: f32, y: f32) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.transform.x = x;
            entry.transform.y = y;
        }
    }

    fn set_rotation(&mut self, node: NodeHandle, rotation: f32) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.transform.rotation = rotation;
        }
    }

    fn remove_node(&mut self, node: NodeHandle) {
        let _ = self.nodes.remove(&node);
    }

    fn set_root_transform(&mut self, offset: Vec2, scale: f32) {
        self.root_offset = offset;
        self.root_scale = scale;
    }
}
