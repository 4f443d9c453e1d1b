use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use volition_common::math::{normalized, wrap_degrees};

/// How the camera derives its viewing direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraAttr {
    /// From the `rotation` Euler angles (pitch, yaw, roll in degrees).
    #[default]
    Euler,
    /// Looking from `position` at `target`.
    Uvn,
}

/// Perspective camera owned by the world.
///
/// Angles are in degrees. Velocities are per unit of `dt` and let game states
/// drive the camera without touching its position every frame.
#[derive(Debug, Clone)]
pub struct Camera {
    pub attr: CameraAttr,
    pub position: Vec3,
    pub target: Vec3,
    pub rotation: Vec3,
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub aspect: f32,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    direction: Vec3,
    view: Mat4,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            attr: CameraAttr::Euler,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            rotation: Vec3::ZERO,
            fov_degrees: 90.0,
            near_plane: 1.0,
            far_plane: 1000.0,
            aspect: 4.0 / 3.0,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        attr: CameraAttr,
        position: Vec3,
        target: Vec3,
        rotation: Vec3,
        fov_degrees: f32,
        near_plane: f32,
        far_plane: f32,
    ) {
        self.attr = attr;
        self.position = position;
        self.target = target;
        self.rotation = rotation;
        self.fov_degrees = fov_degrees;
        self.near_plane = near_plane;
        self.far_plane = far_plane;
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.rebuild();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.rebuild();
    }

    /// Integrate velocities and rebuild the view and projection matrices.
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        let r = self.rotation + self.angular_velocity * dt;
        self.rotation = Vec3::new(wrap_degrees(r.x), wrap_degrees(r.y), wrap_degrees(r.z));
        self.rebuild();
    }

    /// Unit viewing direction as of the last rebuild.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    fn rebuild(&mut self) {
        let dir = match self.attr {
            CameraAttr::Euler => {
                let pitch = self.rotation.x.to_radians();
                let yaw = self.rotation.y.to_radians();
                Vec3::new(
                    -yaw.sin() * pitch.cos(),
                    pitch.sin(),
                    -yaw.cos() * pitch.cos(),
                )
            }
            CameraAttr::Uvn => normalized(self.target - self.position),
        };
        // Degenerate look-at keeps the previous direction.
        if dir != Vec3::ZERO {
            self.direction = dir;
        }

        let up = if self.direction.dot(Vec3::Y).abs() > 0.999 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        let roll = glam::Quat::from_axis_angle(self.direction, self.rotation.z.to_radians());
        self.view = Mat4::look_to_rh(self.position, self.direction, roll * up);
        self.projection = Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near_plane,
            self.far_plane,
        );
    }
}
