//! Lanyard scene
//!
//! Per-frame composition of the lanyard kernel.
//!
//! Owns the chain handles and every kernel component. The physics world is
//! passed in by reference on each call; the scene never owns it.
//!
//! # Order of operations
//! 1. Physics steps (fixed timestep, via [`advance`](LanyardScene::advance))
//! 2. Drag override of the badge (only while dragging)
//! 3. Smoothing of j1 and j2
//! 4. Ribbon curve sampling
//! 5. Badge yaw stabilization

use glam::{Quat, Vec3};

use crate::camera::Camera;
use crate::config::LanyardConfig;
use crate::error::LanyardError;
use crate::input::{CursorManager, PointerEvent, PointerTracker};
use crate::lanyard::chain::{ChainBodies, ConstraintChain};
use crate::lanyard::curve::CurveSampler;
use crate::lanyard::drag::{DragController, PointerCapture};
use crate::lanyard::orientation::OrientationStabilizer;
use crate::lanyard::smoothing::SmoothingFilter;
use crate::physics::PhysicsWorld;

const MAX_FRAME_DELTA_S: f32 = 0.1;
const MAX_FIXED_STEPS_PER_FRAME: usize = 8;
const TIMESTEP_TOLERANCE_S: f32 = 1e-6;

/// What the renderer needs from one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameOutput<'a> {
    /// Ribbon points, badge end first. Empty when the chain is not ready.
    pub ribbon: &'a [Vec3],
    /// Badge transform, `None` when the badge is not ready
    pub badge_translation: Option<Vec3>,
    pub badge_rotation: Option<Quat>,
    /// Kinematic target written this frame while dragging
    pub drag_target: Option<Vec3>,
}

/// Complete lanyard scene: chain, drag state, smoothing, ribbon, stabilizer.
#[derive(Debug)]
pub struct LanyardScene {
    config: LanyardConfig,
    chain: ConstraintChain,
    drag: DragController,
    smoothing: SmoothingFilter,
    sampler: CurveSampler,
    stabilizer: OrientationStabilizer,
    pointer: PointerTracker,
    cursor: CursorManager,
    step_accumulator_s: f32,
    ribbon: Vec<Vec3>,
}

impl LanyardScene {
    /// Build the chain in `world` and wire up every component.
    pub fn new<W: PhysicsWorld + ?Sized>(
        world: &mut W,
        config: &LanyardConfig,
    ) -> Result<Self, LanyardError> {
        config.validate()?;
        let world_step = world.timestep();
        if (world_step - config.physics.timestep).abs() > TIMESTEP_TOLERANCE_S {
            return Err(LanyardError::TimestepMismatch {
                world: world_step,
                config: config.physics.timestep,
            });
        }
        let chain = ConstraintChain::initialize(world, &config.chain)?;

        Ok(Self {
            config: config.clone(),
            chain,
            drag: DragController::new(),
            smoothing: SmoothingFilter::new(config.smoothing),
            sampler: CurveSampler::new(config.ribbon),
            stabilizer: OrientationStabilizer::new(config.stabilizer),
            pointer: PointerTracker::default(),
            cursor: CursorManager::new(),
            step_accumulator_s: 0.0,
            ribbon: Vec::with_capacity(config.ribbon.points),
        })
    }

    pub fn config(&self) -> &LanyardConfig {
        &self.config
    }

    pub fn chain(&self) -> &ConstraintChain {
        &self.chain
    }

    pub fn bodies(&self) -> &ChainBodies {
        self.chain.bodies()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn smoothing(&self) -> &SmoothingFilter {
        &self.smoothing
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    pub fn cursor(&self) -> &CursorManager {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorManager {
        &mut self.cursor
    }

    /// Last sampled ribbon.
    pub fn ribbon(&self) -> &[Vec3] {
        &self.ribbon
    }

    /// Route one pointer event. Returns the capture request for the platform,
    /// if the event changed the drag state.
    pub fn handle_pointer<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        event: PointerEvent,
    ) -> Option<PointerCapture> {
        let bodies = *self.chain.bodies();
        match event {
            PointerEvent::Down { pointer, picked } => {
                let capture = self.drag.on_pointer_down(world, &bodies, picked, pointer);
                if capture.is_some() {
                    self.cursor.set_dragging(true);
                }
                capture
            }
            PointerEvent::Up { pointer } => {
                let release = self.drag.on_pointer_up(world, &bodies, pointer);
                if release.is_some() {
                    self.cursor.set_dragging(false);
                }
                release
            }
            PointerEvent::Move { pixel } => {
                self.pointer.move_to_pixel(pixel);
                None
            }
            PointerEvent::Hover { over_badge } => {
                self.cursor.set_hovered(over_badge);
                None
            }
        }
    }

    /// Step the world on a fixed timestep, then run the kernel once.
    ///
    /// Only the stepping sees a clamped delta. The kernel gets the caller's
    /// delta, so smoothing after a stall can still overshoot.
    ///
    /// Returns the frame output and the number of physics steps taken.
    pub fn advance<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        camera: &Camera,
        delta: f32,
    ) -> (FrameOutput<'_>, usize) {
        let step_delta = delta.clamp(0.0, MAX_FRAME_DELTA_S);
        let step = world.timestep();
        self.step_accumulator_s =
            (self.step_accumulator_s + step_delta).min(step * MAX_FIXED_STEPS_PER_FRAME as f32);

        let mut steps = 0usize;
        while self.step_accumulator_s >= step && steps < MAX_FIXED_STEPS_PER_FRAME {
            world.step();
            self.step_accumulator_s -= step;
            steps += 1;
        }

        (self.update(world, camera, delta.max(0.0)), steps)
    }

    /// Run the kernel once for a frame whose physics step already happened.
    pub fn update<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        camera: &Camera,
        delta: f32,
    ) -> FrameOutput<'_> {
        let bodies = *self.chain.bodies();

        let drag_target = self
            .drag
            .on_pointer_move(world, &bodies, camera, self.pointer.ndc());

        self.ribbon.clear();
        if self.update_ribbon(world, &bodies, delta).is_none() {
            log::trace!("[LanyardScene] Chain not ready, ribbon skipped");
        }
        if self.stabilizer.apply(world, &bodies).is_none() {
            log::trace!("[LanyardScene] Badge not ready, stabilizer skipped");
        }

        FrameOutput {
            ribbon: &self.ribbon,
            badge_translation: world.translation(bodies.badge),
            badge_rotation: world.rotation(bodies.badge),
            drag_target,
        }
    }

    fn update_ribbon<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &W,
        bodies: &ChainBodies,
        delta: f32,
    ) -> Option<()> {
        // No anchor, no ribbon
        let anchor = world.translation(bodies.anchor)?;
        let j3 = world.translation(bodies.j3)?;
        let (j1_lerped, j2_lerped) = self.smoothing.update(world, bodies, delta)?;

        let control = CurveSampler::control_points(j3, j2_lerped, j1_lerped, anchor);
        self.sampler.sample_into(&control, &mut self.ribbon);
        Some(())
    }

    /// Remove the chain bodies from the world. The scene stays usable but
    /// every later frame is a no-op.
    pub fn teardown<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        self.chain.teardown(world);
        self.ribbon.clear();
    }
}
