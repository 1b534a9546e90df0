//! Lanyard Sim - Headless Lanyard Simulation
//!
//! Run with: `cargo run --bin lanyard_sim -- --frames 240`
//!
//! Steps the lanyard scene at 60 Hz with a scripted drag gesture and prints
//! one JSON object per frame (ribbon points and badge transform) to stdout.
//!
//! Options:
//! - `--frames N`: Number of frames to simulate
//! - `--config PATH`: JSON scene config (defaults for missing fields)
//! - `--drag-from-frame N` / `--drag-to-frame N`: Hold the badge between frames
//! - `--pretty`: Pretty-print each frame
//!
//! Logging follows `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use serde::Serialize;

use lanyard_engine::camera::Camera;
use lanyard_engine::config::LanyardConfig;
use lanyard_engine::input::{PointerEvent, PointerId};
use lanyard_engine::lanyard::{FrameOutput, LanyardScene};
use lanyard_engine::physics::{PhysicsWorld, RapierWorld};

const FRAME_DELTA_S: f32 = 1.0 / 60.0;
const SIM_POINTER: PointerId = PointerId(1);

#[derive(Parser, Debug)]
#[command(name = "lanyard_sim", about = "Headless badge-on-a-lanyard simulation")]
struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// Scene config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame at which the badge is grabbed
    #[arg(long)]
    drag_from_frame: Option<u32>,

    /// Frame at which the badge is released
    #[arg(long)]
    drag_to_frame: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

/// One frame as written to stdout.
#[derive(Serialize)]
struct FrameRecord {
    frame: u32,
    physics_steps: usize,
    dragging: bool,
    ribbon: Vec<[f32; 3]>,
    badge_translation: Option<[f32; 3]>,
    badge_rotation: Option<[f32; 4]>,
}

impl FrameRecord {
    fn new(frame: u32, physics_steps: usize, dragging: bool, output: &FrameOutput<'_>) -> Self {
        Self {
            frame,
            physics_steps,
            dragging,
            ribbon: output.ribbon.iter().map(|p| p.to_array()).collect(),
            badge_translation: output.badge_translation.map(|t| t.to_array()),
            badge_rotation: output.badge_rotation.map(|r| r.to_array()),
        }
    }
}

/// Pointer path while dragging: a slow circle around the screen center.
fn scripted_pointer(frame: u32) -> Vec2 {
    let t = frame as f32 * FRAME_DELTA_S;
    Vec2::new(t.cos() * 0.3, t.sin() * 0.2)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LanyardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LanyardConfig::default(),
    };

    let mut world = RapierWorld::new(config.physics);
    let mut scene = LanyardScene::new(&mut world, &config).context("building lanyard scene")?;
    let camera = Camera::default();

    log::info!(
        "[LanyardSim] Simulating {} frames ({} bodies, {} joints)",
        args.frames,
        world.body_count(),
        world.joint_count()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for frame in 0..args.frames {
        if args.drag_from_frame == Some(frame) {
            // Grab the badge at its origin so the offset is zero
            match world.translation(scene.bodies().badge) {
                Some(picked) => {
                    scene.handle_pointer(
                        &mut world,
                        PointerEvent::Down {
                            pointer: SIM_POINTER,
                            picked,
                        },
                    );
                }
                None => log::warn!("[LanyardSim] Badge not ready at frame {frame}, grab skipped"),
            }
        }
        if args.drag_to_frame == Some(frame) {
            scene.handle_pointer(&mut world, PointerEvent::Up { pointer: SIM_POINTER });
        }
        scene.pointer_mut().move_to_ndc(scripted_pointer(frame));

        let dragging = scene.drag().is_dragging();
        let (output, steps) = scene.advance(&mut world, &camera, FRAME_DELTA_S);
        let record = FrameRecord::new(frame, steps, dragging, &output);

        if args.pretty {
            serde_json::to_writer_pretty(&mut out, &record)?;
        } else {
            serde_json::to_writer(&mut out, &record)?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    scene.teardown(&mut world);
    Ok(())
}
