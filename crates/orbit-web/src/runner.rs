use glam::{DVec2, DVec3};
use orbit_engine::{
    CameraHandle, CameraMode, EngineConfig, EngineError, FrameSnapshot, FreeLookController, Key,
    Modifiers, OrbitEngine, PerspectiveCamera,
};

/// Rust-side mirror of the browser's drag-orbit controls.
///
/// The real controls live in JavaScript. When the engine yields the camera
/// (free mode, no transition) it calls `update`, which raises `free_look`;
/// JavaScript then runs its own controls and writes the result back through
/// `SceneRunner::sync_free_look`.
#[derive(Debug, Clone)]
pub struct HostOrbitController {
    target: DVec3,
    free_look: bool,
}

impl HostOrbitController {
    pub fn new(target: DVec3) -> Self {
        Self { target, free_look: true }
    }

    pub fn free_look(&self) -> bool {
        self.free_look
    }
}

impl FreeLookController for HostOrbitController {
    fn target(&self) -> DVec3 {
        self.target
    }

    fn set_target(&mut self, target: DVec3) {
        self.target = target;
        self.free_look = false;
    }

    fn update(&mut self) {
        self.free_look = true;
    }
}

/// Owns the engine for the WASM exports.
///
/// `lib.rs` keeps one of these in a `thread_local!` because wasm-bindgen
/// cannot export generic structs directly.
pub struct SceneRunner {
    engine: OrbitEngine<PerspectiveCamera, HostOrbitController>,
}

impl SceneRunner {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let pose = config.camera.free_pose;
        let camera =
            PerspectiveCamera::from_pose(pose, config.camera.fov_y_degrees, config.camera.aspect);
        let controller = HostOrbitController::new(pose.look_at);
        Ok(Self { engine: OrbitEngine::new(config, camera, controller)? })
    }

    /// Build from a JSON config. An empty document means all defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config = if json.trim().is_empty() {
            EngineConfig::default()
        } else {
            EngineConfig::from_json(json)?
        };
        Self::new(config)
    }

    pub fn tick(&mut self, now_ms: f64) {
        self.engine.tick(now_ms);
    }

    /// Queue a key press by DOM key name. Unknown names are ignored.
    pub fn key_down(&mut self, name: &str, modifiers: Modifiers) {
        match Key::from_name(name) {
            Some(key) => self.engine.on_key(key, modifiers),
            None => log::trace!("ignoring key {name:?}"),
        }
    }

    pub fn click(&mut self, ndc_x: f64, ndc_y: f64) {
        self.engine.on_click(DVec2::new(ndc_x, ndc_y));
    }

    pub fn set_camera_mode(&mut self, index: u32) {
        match CameraMode::from_index(index) {
            Some(mode) => self.engine.set_camera_mode(mode),
            None => log::warn!("unknown camera mode {index}"),
        }
    }

    pub fn set_speed(&mut self, multiplier: f64) {
        self.engine.set_speed_multiplier(multiplier);
    }

    pub fn reset_view(&mut self) {
        self.engine.reset_view();
    }

    /// Write back the pose produced by the browser's orbit controls.
    /// Ignored while the engine owns the camera.
    pub fn sync_free_look(&mut self, position: DVec3, target: DVec3) {
        if !self.engine.controller().free_look() {
            return;
        }
        let camera = self.engine.camera_mut();
        camera.set_position(position);
        camera.look_at(target);
        self.engine.controller_mut().target = target;
    }

    /// Keep picking rays in step with the canvas size.
    pub fn set_aspect(&mut self, aspect: f64) {
        if aspect.is_finite() && aspect > 0.0 {
            self.engine.camera_mut().aspect = aspect;
        }
    }

    pub fn free_look(&self) -> bool {
        self.engine.controller().free_look()
    }

    pub fn snapshot(&self) -> &FrameSnapshot {
        self.engine.snapshot()
    }

    pub fn snapshot_ptr(&self) -> *const f32 {
        self.snapshot().as_floats().as_ptr()
    }

    pub fn engine(&self) -> &OrbitEngine<PerspectiveCamera, HostOrbitController> {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let runner = SceneRunner::from_json("  ").unwrap();
        assert_eq!(runner.engine().config(), &EngineConfig::default());
        assert!(runner.free_look());
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(SceneRunner::from_json("{ not json").is_err());
        assert!(SceneRunner::from_json(r#"{"orbit": {"period": -1}}"#).is_err());
    }

    #[test]
    fn mode_switch_takes_camera_from_free_look() {
        let mut runner = SceneRunner::from_json("").unwrap();
        runner.set_camera_mode(2);
        runner.tick(0.0);
        assert!(!runner.free_look());
        assert_eq!(runner.snapshot().camera_mode, 2.0);

        // Drags from the browser are ignored while the engine drives.
        runner.sync_free_look(DVec3::splat(50.0), DVec3::ZERO);
        assert_ne!(runner.engine().camera().position, DVec3::splat(50.0));
    }

    #[test]
    fn free_look_sync_moves_camera() {
        let mut runner = SceneRunner::from_json("").unwrap();
        runner.tick(0.0);
        runner.sync_free_look(DVec3::new(0.0, 0.0, 6.0), DVec3::ZERO);
        runner.tick(16.0);
        assert_eq!(runner.snapshot().camera_position, [0.0, 0.0, 6.0]);
    }

    #[test]
    fn key_names_reach_the_engine() {
        let mut runner = SceneRunner::from_json("").unwrap();
        runner.key_down("+", Modifiers::NONE);
        runner.key_down("Escape", Modifiers::NONE);
        runner.tick(0.0);
        assert_eq!(runner.snapshot().speed_multiplier, 1.5);
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut runner = SceneRunner::from_json("").unwrap();
        runner.set_aspect(0.0);
        runner.set_aspect(2.0);
        assert_eq!(runner.engine().camera().aspect, 2.0);
    }
}
