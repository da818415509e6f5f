pub mod time;
pub mod kinematics;
