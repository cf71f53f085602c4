use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;
use square_arena_channel::{LoopbackPair, LoopbackServer};
use square_arena_core::{ClientMessage, PlayerId, PlayerMovement, ServerMessage, Transform};
use square_arena_rendering::{HeadlessHost, NodeKind};
use square_arena_session::{FrameInput, GameSession, SessionConfig};
use square_arena_system_firing::Config as FiringConfig;
use square_arena_system_projectiles::Config as ProjectileConfig;

const TICK: Duration = Duration::from_millis(100);
const CENTER: Vec2 = Vec2::new(400.0, 300.0);

type TestSession = GameSession<square_arena_channel::LoopbackChannel, HeadlessHost>;

fn session() -> (TestSession, LoopbackServer) {
    session_with(SessionConfig::new(PlayerId::new("local")))
}

fn session_with(config: SessionConfig) -> (TestSession, LoopbackServer) {
    let LoopbackPair { client, server } = LoopbackPair::new();
    (GameSession::new(config, client, HeadlessHost::new()), server)
}

fn idle_at(transform: Transform) -> FrameInput {
    FrameInput {
        local_transform: transform,
        fire_requested: false,
        view_center: CENTER,
    }
}

fn new_square(id: &str, x: f32, y: f32) -> ServerMessage {
    ServerMessage::NewSquare(PlayerMovement {
        id: PlayerId::new(id),
        transform: Transform::new(x, y, 0.0),
    })
}

#[test]
fn remote_nodes_mirror_registry_membership() {
    let (mut session, mut server) = session();
    let input = idle_at(Transform::default());

    server.push(&new_square("A", 0.0, 0.0)).unwrap();
    session.tick(TICK, input);
    assert_eq!(session.registry().len(), 1);
    assert_eq!(session.host().count_of(NodeKind::RemotePlayer), 1);

    server.push(&new_square("B", 5.0, 5.0)).unwrap();
    session.tick(TICK, input);
    assert_eq!(session.host().count_of(NodeKind::RemotePlayer), 2);

    server
        .push(&ServerMessage::SquareDeleted(PlayerId::new("A")))
        .unwrap();
    session.tick(TICK, input);
    assert_eq!(session.registry().len(), 1);
    assert!(session.registry().get(&PlayerId::new("B")).is_some());
    assert_eq!(session.host().count_of(NodeKind::RemotePlayer), 1);

    // B is removed purely by omission from the empty roster.
    server
        .push(&ServerMessage::SquareList(BTreeMap::new()))
        .unwrap();
    session.tick(TICK, input);
    assert!(session.registry().is_empty());
    assert_eq!(session.host().count_of(NodeKind::RemotePlayer), 0);
    assert_eq!(session.host().count_of(NodeKind::LocalPlayer), 1);
}

#[test]
fn remote_node_transforms_follow_updates() {
    let (mut session, mut server) = session();
    let input = idle_at(Transform::default());

    server.push(&new_square("A", 1.0, 2.0)).unwrap();
    session.tick(TICK, input);

    server
        .push(&ServerMessage::SquareMoved(PlayerMovement {
            id: PlayerId::new("A"),
            transform: Transform::new(8.0, -3.0, 1.25),
        }))
        .unwrap();
    session.tick(TICK, input);

    let (_, node) = session
        .host()
        .nodes()
        .find(|(_, node)| node.kind == NodeKind::RemotePlayer)
        .expect("remote node exists");
    assert_eq!(node.transform, Transform::new(8.0, -3.0, 1.25));
}

#[test]
fn movement_reports_once_per_change() {
    let (mut session, mut server) = session();
    let moving = Transform::new(10.0, 0.0, 0.0);

    // First observation always reports.
    session.tick(TICK, idle_at(moving));
    // Unchanged transform stays quiet.
    session.tick(TICK, idle_at(moving));
    session.tick(TICK, idle_at(moving));
    // A change reports exactly once more.
    let shifted = Transform::new(11.0, 0.0, 0.0);
    session.tick(TICK, idle_at(shifted));

    assert_eq!(
        server.drain_reports(),
        vec![
            ClientMessage::MovementReport(moving),
            ClientMessage::MovementReport(shifted),
        ]
    );
}

#[test]
fn disconnect_degrades_to_local_only_and_snapshot_recovers() {
    let (mut session, mut server) = session();

    server.push(&new_square("A", 0.0, 0.0)).unwrap();
    session.tick(TICK, idle_at(Transform::default()));
    assert!(session.is_connected());

    server.disconnect().unwrap();
    assert!(!session.is_connected());

    // Local simulation continues; last-known remote state is retained.
    session.tick(TICK, idle_at(Transform::new(50.0, 0.0, 0.0)));
    session.tick(TICK, idle_at(Transform::new(60.0, 0.0, 0.0)));
    assert_eq!(session.registry().len(), 1);
    assert_eq!(session.host().count_of(NodeKind::RemotePlayer), 1);

    // Reports attempted during the outage were dropped, not queued.
    server.reconnect().unwrap();
    assert_eq!(server.drain_reports().len(), 1); // only the pre-outage report

    // The recovery snapshot is authoritative.
    let mut roster = BTreeMap::new();
    let _ = roster.insert(PlayerId::new("C"), Transform::new(2.0, 2.0, 0.0));
    server.push(&ServerMessage::SquareList(roster)).unwrap();
    session.tick(TICK, idle_at(Transform::new(60.0, 0.0, 0.0)));

    assert_eq!(session.registry().len(), 1);
    assert!(session.registry().get(&PlayerId::new("C")).is_some());
    assert!(session.registry().get(&PlayerId::new("A")).is_none());
    assert_eq!(session.host().count_of(NodeKind::RemotePlayer), 1);
}

#[test]
fn firing_is_cooldown_gated_and_projectiles_expire() {
    let mut config = SessionConfig::new(PlayerId::new("local"));
    config.firing = FiringConfig::new(Duration::from_millis(500));
    config.projectiles = ProjectileConfig::new(100.0, Duration::from_millis(300));
    let (mut session, _server) = session_with(config);

    let firing = FrameInput {
        local_transform: Transform::new(0.0, 0.0, 0.0),
        fire_requested: true,
        view_center: CENTER,
    };

    // Trigger held: the first tick fires, the cooldown swallows the rest.
    session.tick(TICK, firing);
    assert_eq!(session.projectiles().len(), 1);
    assert_eq!(session.host().count_of(NodeKind::Projectile), 1);

    session.tick(TICK, firing);
    assert_eq!(session.projectiles().len(), 1);

    // The first projectile ages out at 300 ms while the cooldown still has
    // 200 ms to go, so the arena briefly empties.
    session.tick(TICK, firing);
    assert!(session.projectiles().is_empty());
    assert_eq!(session.host().count_of(NodeKind::Projectile), 0);

    session.tick(TICK, firing);
    session.tick(TICK, firing);
    assert!(session.projectiles().is_empty());

    // 500 ms after the first shot the cooldown re-arms and a second fires.
    session.tick(TICK, firing);
    assert_eq!(session.projectiles().len(), 1);
    assert_eq!(session.host().count_of(NodeKind::Projectile), 1);

    // Release the trigger and let the second projectile age out.
    let quiet = FrameInput {
        fire_requested: false,
        ..firing
    };
    session.tick(TICK, quiet);
    session.tick(TICK, quiet);
    assert!(session.projectiles().is_empty());
    assert_eq!(session.host().count_of(NodeKind::Projectile), 0);
}

#[test]
fn camera_pose_reaches_the_render_host_every_tick() {
    let (mut session, _server) = session();
    let moving = Transform::new(100.0, 50.0, 0.0);

    session.tick(TICK, idle_at(moving));

    let host = session.host();
    let scale = host.root_scale();
    assert!(scale < 1.0, "moving tick eases toward the zoomed-out target");
    let expected = Vec2::new(-moving.x, -moving.y) * scale + CENTER;
    assert_eq!(host.root_offset(), expected);
}

#[test]
fn local_node_tracks_the_input_transform() {
    let (mut session, _server) = session();
    let transform = Transform::new(7.0, -2.0, 0.4);

    session.tick(TICK, idle_at(transform));

    let host = session.host();
    let local = host
        .node(square_arena_rendering::NodeHandle::new(0))
        .expect("local node created at session start");
    assert_eq!(local.kind, NodeKind::LocalPlayer);
    assert_eq!(local.transform, transform);
}

#[test]
fn stars_are_scenery_and_never_reconciled() {
    let (mut session, mut server) = session();

    session.place_stars(&[Vec2::new(10.0, 10.0), Vec2::new(20.0, 30.0)]);
    assert_eq!(session.host().count_of(NodeKind::Star), 2);

    server
        .push(&ServerMessage::SquareList(BTreeMap::new()))
        .unwrap();
    session.tick(TICK, idle_at(Transform::default()));

    assert_eq!(session.host().count_of(NodeKind::Star), 2);
}

#[test]
fn join_and_leave_events_surface_for_observability() {
    let (mut session, mut server) = session();

    server.push(&new_square("A", 0.0, 0.0)).unwrap();
    session.tick(TICK, idle_at(Transform::default()));
    assert!(matches!(
        session.events(),
        [square_arena_core::Event::RemoteAppeared { id, .. }] if id.as_str() == "A"
    ));

    server
        .push(&ServerMessage::SquareDeleted(PlayerId::new("A")))
        .unwrap();
    session.tick(TICK, idle_at(Transform::default()));
    assert!(matches!(
        session.events(),
        [square_arena_core::Event::RemoteRemoved { id }] if id.as_str() == "A"
    ));
}
