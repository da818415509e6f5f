pub mod api;
pub mod core;
pub mod systems;
pub mod camera;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::engine::OrbitEngine;
pub use api::config::{
    EngineConfig, OrbitParams, SpinParams, RotationParams, SpeedParams,
    CameraParams, ModeRule, Standoff, BodyParams,
};
pub use api::error::{ConfigError, EngineError};
pub use api::types::{Body, BodyPositions};
pub use api::collaborators::{CameraHandle, FreeLookController, RayPicker};
pub use core::time::SimulationClock;
pub use core::kinematics::{OrbitalKinematics, KinematicsFrame, BodyState};
pub use systems::rotation::{RotationBlender, Axis};
pub use systems::picking::{Ray, PickTarget, SpherePicker};
pub use camera::pose::{CameraPose, interpolate};
pub use camera::transition::CameraAnimation;
pub use camera::machine::{CameraMode, CameraRequest, CameraDirective, CameraTransitionMachine};
pub use camera::perspective::PerspectiveCamera;
pub use input::queue::{InputEvent, InputQueue, Key, Modifiers};
pub use input::dispatch::{Command, InteractionDispatcher};
pub use bridge::protocol::{FrameSnapshot, SNAPSHOT_FLOATS, PROTOCOL_VERSION};

// Extensions: pure easing helpers
pub use extensions::{Easing, ease, lerp};
