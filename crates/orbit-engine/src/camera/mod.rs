// camera/mod.rs
//
// Camera poses, timed transitions between them, and the mode machine that
// decides which pose the host camera should hold each frame.

pub mod pose;
pub mod transition;
pub mod machine;
pub mod perspective;
