use glam::DVec3;

/// A focusable body in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Primary,
    Satellite,
}

impl Body {
    pub const ALL: [Body; 2] = [Body::Primary, Body::Satellite];
}

/// World positions of both bodies for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPositions {
    pub primary: DVec3,
    pub satellite: DVec3,
}

impl BodyPositions {
    pub fn of(&self, body: Body) -> DVec3 {
        match body {
            Body::Primary => self.primary,
            Body::Satellite => self.satellite,
        }
    }
}
