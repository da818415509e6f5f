pub mod rotation;
pub mod picking;
