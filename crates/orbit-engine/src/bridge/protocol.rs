//! Frame snapshot layout shared with the JavaScript host.
//! Must stay in sync with the TypeScript reader.
//!
//! Layout (all values f32 / 4 bytes):
//! ```text
//! [0..3)   camera position
//! [3..6)   camera look-at
//! [6..8)   primary pitch, yaw
//! [8]      shell yaw
//! [9..12)  satellite position
//! [12..15) light position
//! [15]     speed multiplier
//! [16]     camera mode index
//! [17]     animating flag (0 or 1)
//! [18]     simulated time (seconds)
//! [19]     frame counter
//! ```
//!
//! Values are computed in f64 and narrowed once here.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;

use crate::camera::machine::CameraMode;
use crate::camera::pose::CameraPose;
use crate::core::kinematics::KinematicsFrame;

/// Protocol version, bumped whenever the layout changes.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per snapshot (wire format).
pub const SNAPSHOT_FLOATS: usize = 20;

pub const OFFSET_CAMERA_POSITION: usize = 0;
pub const OFFSET_CAMERA_LOOK_AT: usize = 3;
pub const OFFSET_PRIMARY_ROTATION: usize = 6;
pub const OFFSET_SHELL_YAW: usize = 8;
pub const OFFSET_SATELLITE_POSITION: usize = 9;
pub const OFFSET_LIGHT_POSITION: usize = 12;
pub const OFFSET_SPEED: usize = 15;
pub const OFFSET_CAMERA_MODE: usize = 16;
pub const OFFSET_ANIMATING: usize = 17;
pub const OFFSET_SIMULATED_TIME: usize = 18;
pub const OFFSET_FRAME_COUNTER: usize = 19;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameSnapshot {
    pub camera_position: [f32; 3],
    pub camera_look_at: [f32; 3],
    /// Pitch, yaw.
    pub primary_rotation: [f32; 2],
    pub shell_yaw: f32,
    pub satellite_position: [f32; 3],
    pub light_position: [f32; 3],
    pub speed_multiplier: f32,
    pub camera_mode: f32,
    pub animating: f32,
    pub simulated_time: f32,
    pub frame_counter: f32,
}

const _: () = assert!(std::mem::size_of::<FrameSnapshot>() == SNAPSHOT_FLOATS * 4);

/// Engine state that is not part of the kinematics frame.
#[derive(Debug, Clone, Copy)]
pub struct CameraState {
    pub pose: CameraPose,
    pub mode: CameraMode,
    pub animating: bool,
    pub speed_multiplier: f64,
}

fn narrow(v: DVec3) -> [f32; 3] {
    v.as_vec3().to_array()
}

impl FrameSnapshot {
    pub fn capture(frame: &KinematicsFrame, camera: &CameraState, frame_counter: u64) -> Self {
        Self {
            camera_position: narrow(camera.pose.position),
            camera_look_at: narrow(camera.pose.look_at),
            primary_rotation: [frame.primary.rotation_x as f32, frame.primary.rotation_y as f32],
            shell_yaw: frame.shell.rotation_y as f32,
            satellite_position: narrow(frame.satellite.position),
            light_position: narrow(frame.light_position),
            speed_multiplier: camera.speed_multiplier as f32,
            camera_mode: camera.mode.index() as f32,
            animating: if camera.animating { 1.0 } else { 0.0 },
            simulated_time: frame.simulated_time as f32,
            frame_counter: frame_counter as f32,
        }
    }

    /// The snapshot as a flat float slice, in wire order.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}
