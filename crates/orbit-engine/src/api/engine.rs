//! The engine-state aggregate.
//!
//! `OrbitEngine` owns every subsystem plus the host's camera and free-look
//! controller. The host calls `tick(now_ms)` once per display refresh and
//! pushes input between ticks; queued input is applied at the start of the
//! next tick, before the clock advances.

use glam::DVec2;

use super::collaborators::{CameraHandle, FreeLookController, RayPicker};
use super::config::EngineConfig;
use super::error::EngineError;
use super::types::{Body, BodyPositions};
use crate::bridge::protocol::{CameraState, FrameSnapshot};
use crate::camera::machine::{CameraDirective, CameraMode, CameraRequest, CameraTransitionMachine};
use crate::camera::pose::CameraPose;
use crate::core::kinematics::{KinematicsFrame, OrbitalKinematics};
use crate::core::time::SimulationClock;
use crate::input::dispatch::{Command, InteractionDispatcher};
use crate::input::queue::{InputEvent, InputQueue, Key, Modifiers};
use crate::systems::picking::{PickTarget, SpherePicker};
use crate::systems::rotation::RotationBlender;

pub struct OrbitEngine<C, F, P = SpherePicker>
where
    C: CameraHandle,
    F: FreeLookController,
    P: RayPicker,
{
    config: EngineConfig,
    clock: SimulationClock,
    kinematics: OrbitalKinematics,
    blender: RotationBlender,
    camera_machine: CameraTransitionMachine,
    dispatcher: InteractionDispatcher,
    input: InputQueue,
    camera: C,
    controller: F,
    picker: P,
    frame: KinematicsFrame,
    snapshot: FrameSnapshot,
    frame_counter: u64,
}

impl<C: CameraHandle, F: FreeLookController> OrbitEngine<C, F, SpherePicker> {
    /// Validate `config` and build an engine around the host's camera and
    /// controller, picking with bounding spheres.
    pub fn new(config: EngineConfig, camera: C, controller: F) -> Result<Self, EngineError> {
        Self::with_picker(config, camera, controller, SpherePicker)
    }
}

impl<C, F, P> OrbitEngine<C, F, P>
where
    C: CameraHandle,
    F: FreeLookController,
    P: RayPicker,
{
    pub fn with_picker(
        config: EngineConfig,
        camera: C,
        controller: F,
        picker: P,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let kinematics = OrbitalKinematics::new(config.orbit, config.spin);
        let frame = kinematics.compute(0.0, (0.0, 0.0));
        let engine = Self {
            clock: SimulationClock::new(&config.speed),
            blender: RotationBlender::new(&config.rotation),
            camera_machine: CameraTransitionMachine::new(config.camera),
            dispatcher: InteractionDispatcher::new(&config.rotation, &config.speed),
            input: InputQueue::new(),
            kinematics,
            camera,
            controller,
            picker,
            frame,
            snapshot: FrameSnapshot::default(),
            frame_counter: 0,
            config,
        };

        log::info!(
            "orbit engine ready: radius {}, period {} s, transitions {} ms",
            engine.config.orbit.radius,
            engine.config.orbit.period,
            engine.config.camera.transition_ms,
        );
        Ok(engine)
    }

    // -- Input entrypoints. All of these are queued until the next tick. --

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn on_key(&mut self, key: Key, modifiers: Modifiers) {
        self.push_input(InputEvent::KeyDown { key, modifiers });
    }

    /// Pointer click at normalized device coordinates.
    pub fn on_click(&mut self, ndc: DVec2) {
        self.push_input(InputEvent::Click { ndc });
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.push_input(InputEvent::SelectMode(mode));
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.push_input(InputEvent::SetSpeed(multiplier));
    }

    /// Fly back to the default free pose.
    pub fn reset_view(&mut self) {
        self.on_key(Key::Home, Modifiers::NONE);
    }

    /// Advance one frame at host time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        for event in self.input.drain() {
            if let Some(command) = self.dispatcher.map(&event) {
                self.apply(command, now_ms);
            }
        }

        self.clock.advance(now_ms);
        let manual = self.blender.tick();
        self.frame = self.kinematics.compute(self.clock.simulated_time(), manual);

        let bodies = self.body_positions();
        match self.camera_machine.tick(now_ms, &bodies) {
            CameraDirective::Animate(pose) | CameraDirective::Track(pose) => {
                self.camera.set_position(pose.position);
                self.camera.look_at(pose.look_at);
                self.controller.set_target(pose.look_at);
            }
            CameraDirective::Yield => self.controller.update(),
        }

        self.frame_counter += 1;
        self.snapshot = FrameSnapshot::capture(
            &self.frame,
            &CameraState {
                pose: self.camera_pose(),
                mode: self.camera_machine.mode(),
                animating: self.camera_machine.is_animating(),
                speed_multiplier: self.clock.speed_multiplier(),
            },
            self.frame_counter,
        );
    }

    fn apply(&mut self, command: Command, now_ms: f64) {
        match command {
            Command::Rotate { axis, magnitude } => self.blender.apply_delta(axis, magnitude),
            Command::ResetRotation => {
                self.blender.reset();
                log::debug!("manual rotation reset");
            }
            Command::ScaleSpeed(factor) => {
                self.clock.scale_speed(factor);
                log::debug!("speed multiplier {}", self.clock.speed_multiplier());
            }
            Command::SetSpeed(multiplier) => {
                self.clock.set_speed_multiplier(multiplier);
                log::debug!("speed multiplier {}", self.clock.speed_multiplier());
            }
            Command::ResetSpeed => {
                self.clock.reset_speed();
                log::debug!("speed multiplier reset");
            }
            Command::Camera(request) => self.request_camera(request, now_ms),
            Command::Pick(ndc) => {
                let targets = self.pick_targets();
                match self.picker.pick(ndc, &self.camera, &targets) {
                    Some(body) => self.request_camera(CameraRequest::FocusClick(body), now_ms),
                    None => log::trace!("click at {ndc} hit nothing"),
                }
            }
        }
    }

    fn request_camera(&mut self, request: CameraRequest, now_ms: f64) {
        let bodies = self.body_positions();
        let current = self.camera_pose();
        self.camera_machine.request(request, now_ms, &bodies, current);
    }

    fn pick_targets(&self) -> [PickTarget; 2] {
        let bodies = self.body_positions();
        Body::ALL.map(|body| PickTarget {
            body,
            center: bodies.of(body),
            radius: match body {
                Body::Primary => self.config.bodies.primary_radius,
                Body::Satellite => self.config.bodies.satellite_radius,
            },
        })
    }

    pub fn body_positions(&self) -> BodyPositions {
        BodyPositions {
            primary: self.frame.primary.position,
            satellite: self.frame.satellite.position,
        }
    }

    /// The host camera's position with the controller's target as look-at.
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose::new(self.camera.position(), self.controller.target())
    }

    // -- Accessors --

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn frame(&self) -> &KinematicsFrame {
        &self.frame
    }

    pub fn snapshot(&self) -> &FrameSnapshot {
        &self.snapshot
    }

    pub fn mode(&self) -> CameraMode {
        self.camera_machine.mode()
    }

    pub fn is_animating(&self) -> bool {
        self.camera_machine.is_animating()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn blender(&self) -> &RotationBlender {
        &self.blender
    }

    pub fn camera_machine(&self) -> &CameraTransitionMachine {
        &self.camera_machine
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable camera access, for hosts that sync free-look drags back in.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn controller(&self) -> &F {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut F {
        &mut self.controller
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SpeedParams;
    use crate::api::error::ConfigError;
    use crate::camera::perspective::PerspectiveCamera;
    use crate::systems::picking::Ray;
    use glam::DVec3;

    /// Camera fake that counts writes.
    struct RecordingCamera {
        inner: PerspectiveCamera,
        writes: usize,
    }

    impl RecordingCamera {
        fn at(position: DVec3, target: DVec3) -> Self {
            Self { inner: PerspectiveCamera::new(position, target, 45.0, 1.0), writes: 0 }
        }
    }

    impl CameraHandle for RecordingCamera {
        fn position(&self) -> DVec3 {
            self.inner.position
        }

        fn set_position(&mut self, position: DVec3) {
            self.writes += 1;
            self.inner.set_position(position);
        }

        fn look_at(&mut self, target: DVec3) {
            self.inner.look_at(target);
        }

        fn pointer_ray(&self, ndc: DVec2) -> Ray {
            self.inner.pointer_ray(ndc)
        }
    }

    #[derive(Default)]
    struct RecordingController {
        target: DVec3,
        updates: usize,
    }

    impl FreeLookController for RecordingController {
        fn target(&self) -> DVec3 {
            self.target
        }

        fn set_target(&mut self, target: DVec3) {
            self.target = target;
        }

        fn update(&mut self) {
            self.updates += 1;
        }
    }

    type TestEngine = OrbitEngine<RecordingCamera, RecordingController>;

    fn engine_with(config: EngineConfig, camera_position: DVec3) -> TestEngine {
        OrbitEngine::new(
            config,
            RecordingCamera::at(camera_position, DVec3::ZERO),
            RecordingController::default(),
        )
        .unwrap()
    }

    fn engine() -> TestEngine {
        engine_with(EngineConfig::default(), DVec3::new(3.0, 0.0, 0.0))
    }

    fn pausable() -> EngineConfig {
        EngineConfig {
            speed: SpeedParams { min: 0.0, ..SpeedParams::default() },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn invalid_config_is_fatal() {
        let mut config = EngineConfig::default();
        config.orbit.period = 0.0;
        let result = OrbitEngine::new(
            config,
            RecordingCamera::at(DVec3::X, DVec3::ZERO),
            RecordingController::default(),
        );
        assert!(matches!(result, Err(EngineError::Config(ConfigError::OutOfRange { .. }))));
    }

    #[test]
    fn input_is_deferred_to_next_tick() {
        let mut e = engine();
        e.set_camera_mode(CameraMode::FocusPrimary);
        assert_eq!(e.pending_input(), 1);
        assert_eq!(e.mode(), CameraMode::Free);
        e.tick(0.0);
        assert_eq!(e.pending_input(), 0);
        assert_eq!(e.mode(), CameraMode::FocusPrimary);
        assert!(e.is_animating());
    }

    #[test]
    fn idle_free_mode_yields_to_controller() {
        let mut e = engine();
        e.tick(0.0);
        e.tick(16.0);
        assert_eq!(e.controller().updates, 2);
        assert_eq!(e.camera().writes, 0);
    }

    #[test]
    fn animation_progress_runs_zero_to_one() {
        let mut e = engine();
        e.set_camera_mode(CameraMode::FocusPrimary);
        e.tick(1_000.0);
        assert_eq!(e.camera_machine().animation().unwrap().progress(), 0.0);
        assert!(e.camera_pose().distance(&CameraPose::default()) < 1e-12);

        e.tick(3_000.0);
        assert!(!e.is_animating());
        let target = e.camera_machine().mode_pose(CameraMode::FocusPrimary, &e.body_positions());
        // Tracking starts on the following frame; the final animated pose is
        // the target at request time.
        assert!(e.camera_pose().distance(&target) < 1e-3);
        assert_eq!(e.controller().updates, 0);
    }

    #[test]
    fn pause_freezes_kinematics_but_not_camera() {
        let mut e = engine_with(pausable(), DVec3::new(3.0, 0.0, 0.0));
        e.set_speed_multiplier(0.0);
        e.set_camera_mode(CameraMode::FocusSatellite);
        e.tick(0.0);
        let frozen = *e.frame();

        for now in [500.0, 1_000.0, 1_500.0, 2_000.0] {
            e.tick(now);
            assert_eq!(e.frame().satellite.position, frozen.satellite.position);
            assert_eq!(e.frame().primary.rotation_y, frozen.primary.rotation_y);
            assert_eq!(e.frame().light_position, frozen.light_position);
        }
        assert!(!e.is_animating());
        let expected = DVec3::new(15.0, 1.0, 0.0);
        assert!((e.camera().position() - expected).length() < 1e-6);
    }

    #[test]
    fn overwrite_keeps_camera_continuous() {
        let mut e = engine();
        e.set_camera_mode(CameraMode::FocusPrimary);
        e.tick(0.0);
        e.tick(700.0);
        let before = e.camera_pose();

        e.set_camera_mode(CameraMode::FocusSatellite);
        e.tick(716.0);
        assert_eq!(e.mode(), CameraMode::FocusSatellite);
        assert!(e.camera_machine().animation().unwrap().start.distance(&before) < 1e-6);
        assert!(e.camera_pose().distance(&before) < 1e-6);
    }

    #[test]
    fn click_on_satellite_flies_to_standoff() {
        // Looking down -X from beyond the satellite at (12, 0, 0).
        let mut e = engine_with(EngineConfig::default(), DVec3::new(20.0, 0.0, 0.0));
        e.set_camera_mode(CameraMode::FocusPrimary);
        e.tick(0.0);
        e.on_click(DVec2::ZERO);
        e.tick(0.0);
        assert_eq!(e.mode(), CameraMode::Free);
        assert!(e.is_animating());

        e.tick(2_000.0);
        assert!(!e.is_animating());
        assert!((e.camera().position() - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-6);
        assert!((e.controller().target() - DVec3::new(12.0, 0.0, 0.0)).length() < 1e-6);

        e.tick(2_016.0);
        assert_eq!(e.controller().updates, 1);
    }

    #[test]
    fn click_on_empty_space_is_noop() {
        let mut e = engine();
        e.tick(0.0);
        e.on_click(DVec2::new(0.99, 0.99));
        e.tick(16.0);
        assert!(!e.is_animating());
        assert_eq!(e.mode(), CameraMode::Free);
    }

    #[test]
    fn speed_keys_scale_and_reset() {
        let mut e = engine();
        e.on_key(Key::Char('+'), Modifiers::NONE);
        e.on_key(Key::Char('='), Modifiers::NONE);
        e.tick(0.0);
        assert!((e.clock().speed_multiplier() - 2.25).abs() < 1e-12);

        e.on_key(Key::Char('-'), Modifiers::NONE);
        e.tick(16.0);
        assert!((e.clock().speed_multiplier() - 1.5).abs() < 1e-12);

        e.on_key(Key::Char('R'), Modifiers::NONE);
        e.tick(32.0);
        assert_eq!(e.clock().speed_multiplier(), 1.0);

        e.set_speed_multiplier(1e6);
        e.tick(48.0);
        assert_eq!(e.clock().speed_multiplier(), 100.0);
    }

    #[test]
    fn arrows_ease_into_rotation() {
        let mut e = engine();
        e.tick(0.0);
        let base = e.frame().primary.rotation_y;

        e.on_key(Key::ArrowRight, Modifiers { shift: true, ..Modifiers::NONE });
        e.tick(0.0);
        assert_eq!(e.blender().target(), (0.0, 0.05));
        assert!((e.frame().primary.rotation_y - base - 0.005).abs() < 1e-12);

        e.on_key(Key::ArrowUp, Modifiers { alt: true, ..Modifiers::NONE });
        e.tick(0.0);
        assert_eq!(e.blender().target(), (0.0, 0.0));
    }

    #[test]
    fn held_arrow_keeps_angles_wrapped() {
        use std::f64::consts::{PI, TAU};

        let mut e = engine();
        let fast = Modifiers { shift: true, ..Modifiers::NONE };
        for _ in 0..400 {
            e.on_key(Key::ArrowRight, fast);
        }
        for i in 0..200 {
            e.tick(i as f64 * 16.0);
            let frame = e.frame();
            assert!((0.0..TAU).contains(&frame.primary.rotation_y), "{}", frame.primary.rotation_y);
            assert!((0.0..TAU).contains(&frame.shell.rotation_y), "{}", frame.shell.rotation_y);
            assert!(e.blender().target().1.abs() <= PI);
        }
    }

    #[test]
    fn home_resets_view_from_free() {
        let mut e = engine_with(EngineConfig::default(), DVec3::new(0.0, 5.0, 5.0));
        e.reset_view();
        e.tick(0.0);
        assert!(e.is_animating());
        e.tick(2_000.0);
        assert!(e.camera_pose().distance(&CameraPose::default()) < 1e-12);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut e = engine();
        e.set_camera_mode(CameraMode::FocusSatellite);
        e.tick(0.0);
        let s = e.snapshot();
        assert_eq!(s.camera_mode, 2.0);
        assert_eq!(s.animating, 1.0);
        assert_eq!(s.speed_multiplier, 1.0);
        assert_eq!(s.frame_counter, 1.0);
        assert_eq!(s.satellite_position, [12.0, 0.0, 0.0]);
    }
}
