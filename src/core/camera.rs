use glam::{Mat4, Vec3};

/// Orthographic camera description, one world unit per CSS pixel.
#[derive(Clone, Debug)]
pub struct OrthoCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub half_width: f32,
    pub half_height: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl OrthoCamera {
    pub fn for_viewport(width: f32, height: f32, eye_z: f32, znear: f32, zfar: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, eye_z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            half_width: width / 2.0,
            half_height: height / 2.0,
            znear,
            zfar,
        }
    }

    /// Clip-space projection with depth in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            -self.half_width,
            self.half_width,
            -self.half_height,
            self.half_height,
            self.znear,
            self.zfar,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
