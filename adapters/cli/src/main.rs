#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Square Arena session.
//!
//! Composes a [`GameSession`] over the in-memory loopback transport with the
//! recording render host, then drives it with a scripted server feed and a
//! canned flight path. Every inbound message kind, the outbound movement
//! gate, the firing cooldown and the disconnect/recovery cycle are exercised
//! in one run, with periodic summary lines on stdout.

mod starfield;

use std::{collections::BTreeMap, f32::consts::FRAC_PI_2, time::Duration};

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use square_arena_channel::{LoopbackPair, LoopbackServer};
use square_arena_core::{
    Event, PlayerId, PlayerMovement, ServerMessage, Transform, WELCOME_BANNER,
};
use square_arena_rendering::{HeadlessHost, NodeKind};
use square_arena_session::{FrameInput, GameSession, SessionConfig};

const VIEW_CENTER: Vec2 = Vec2::new(480.0, 360.0);

/// Radius of the local player's canned flight circle.
const FLIGHT_RADIUS: f32 = 120.0;

/// Ticks during which the local player hovers to show the camera easing in.
const HOVER_TICKS: std::ops::Range<u32> = 60..90;

/// Command-line arguments for the demo run.
#[derive(Debug, Parser)]
#[command(name = "square-arena", about = "Headless Square Arena session demo")]
struct Args {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 240)]
    ticks: u32,
    /// Simulated tick length in milliseconds.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,
    /// Seed for decorative star placement.
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

/// Entry point for the Square Arena demo binary.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let dt = Duration::from_millis(args.tick_ms);

    let LoopbackPair { client, mut server } = LoopbackPair::new();
    let config = SessionConfig::new(PlayerId::new("local-pilot"));
    let mut session = GameSession::new(config, client, HeadlessHost::new());

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    session.place_stars(&starfield::scatter_stars(&mut rng));

    println!("{WELCOME_BANNER}");

    let mut feed = DemoFeed::new();
    for tick in 0..args.ticks {
        feed.pump(tick, &mut server)?;

        let input = FrameInput {
            local_transform: pilot(tick),
            fire_requested: true,
            view_center: VIEW_CENTER,
        };
        session.tick(dt, input);

        for event in session.events() {
            match event {
                Event::RemoteAppeared { id, .. } => {
                    println!("[t{tick:03}] {} entered the arena", id.as_str());
                }
                Event::RemoteRemoved { id } => {
                    println!("[t{tick:03}] {} left the arena", id.as_str());
                }
                Event::RemoteMoved { .. } => {}
            }
        }

        if tick % 30 == 0 {
            print_summary(tick, &session);
        }
    }

    print_summary(args.ticks, &session);
    Ok(())
}

fn print_summary(
    tick: u32,
    session: &GameSession<square_arena_channel::LoopbackChannel, HeadlessHost>,
) {
    let host = session.host();
    println!(
        "[t{tick:03}] remotes={} projectiles={} zoom={:.3} link={}",
        session.registry().len(),
        session.projectiles().len(),
        host.root_scale(),
        if session.is_connected() { "up" } else { "down" },
    );
    debug_assert_eq!(
        host.count_of(NodeKind::RemotePlayer),
        session.registry().len()
    );
}

/// Canned flight path: a circle with a hover window in the middle.
///
/// The hover freezes the transform exactly, so the movement tracker goes
/// quiet and the camera eases back toward the zoomed-in target.
fn pilot(tick: u32) -> Transform {
    let frozen = if HOVER_TICKS.contains(&tick) {
        HOVER_TICKS.start
    } else {
        tick
    };
    let angle = frozen as f32 * 0.04;
    Transform::new(
        FLIGHT_RADIUS * angle.cos(),
        FLIGHT_RADIUS * angle.sin(),
        angle + FRAC_PI_2,
    )
}

/// Scripted server peer driving the loopback link.
struct DemoFeed {
    orbit: f32,
}

impl DemoFeed {
    fn new() -> Self {
        Self { orbit: 0.0 }
    }

    /// Pushes this tick's scripted traffic, if any.
    fn pump(&mut self, tick: u32, server: &mut LoopbackServer) -> Result<()> {
        match tick {
            0 => {
                let mut roster = BTreeMap::new();
                let _ = roster.insert(PlayerId::new("alpha"), Transform::new(200.0, 0.0, 0.0));
                let _ = roster.insert(PlayerId::new("beta"), Transform::new(-150.0, 120.0, 0.0));
                server.push(&ServerMessage::SquareList(roster))?;
            }
            120 => {
                server.push(&ServerMessage::NewSquare(PlayerMovement {
                    id: PlayerId::new("gamma"),
                    transform: Transform::new(0.0, -180.0, 0.0),
                }))?;
            }
            160 => {
                server.push(&ServerMessage::SquareDeleted(PlayerId::new("beta")))?;
            }
            190 => {
                info!("demo feed: dropping the link");
                server.disconnect()?;
            }
            215 => {
                info!("demo feed: link restored, pushing recovery snapshot");
                server.reconnect()?;
                let mut roster = BTreeMap::new();
                let _ = roster.insert(
                    PlayerId::new("alpha"),
                    Transform::new(200.0 * self.orbit.cos(), 200.0 * self.orbit.sin(), self.orbit),
                );
                let _ = roster.insert(PlayerId::new("gamma"), Transform::new(0.0, -180.0, 0.0));
                server.push(&ServerMessage::SquareList(roster))?;
            }
            _ => {}
        }

        // Alpha orbits slowly while the link is up.
        if tick > 0 && tick % 15 == 0 && server.is_connected() {
            self.orbit += 0.2;
            server.push(&ServerMessage::SquareMoved(PlayerMovement {
                id: PlayerId::new("alpha"),
                transform: Transform::new(
                    200.0 * self.orbit.cos(),
                    200.0 * self.orbit.sin(),
                    self.orbit,
                ),
            }))?;
        }

        Ok(())
    }
}
