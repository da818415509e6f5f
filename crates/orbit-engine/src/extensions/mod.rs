// extensions/mod.rs
//
// Pure helpers with no engine state. Usable on their own, e.g. by a host
// that wants to run its own tweens with the same curves.

pub mod easing;

pub use easing::{Easing, ease, ease_in_out_quad, lerp, lerp_dvec3};
