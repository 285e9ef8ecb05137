use nalgebra::{vector, Point3, Vector2, Vector3};

use crate::common::Ray;

use super::Camera;

// up vector = 0,1,0
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    position: Point3<f32>,
    direction: Vector3<f32>,
    aspect: f32,
    fov_y: f32,                   // Vertical field of view, in degrees
    img_plane_size: Vector2<f32>, // Calculated from fov_y
    // ray
    dir_00: Vector3<f32>, // Vector from camera point to pixel [0,0]
    du: Vector3<f32>, // Vector between two horizontally neighbouring pixels (example: [0,0] -> [1,0])
    dv: Vector3<f32>, // Vector between two vertically neighbouring pixels (example: [0,0] -> [0,1])
}

impl PerspectiveCamera {
    pub fn new(position: Point3<f32>, direction: Vector3<f32>) -> PerspectiveCamera {
        let mut cam = PerspectiveCamera {
            position,
            direction: direction.normalize(),
            aspect: 1.0,
            fov_y: 60.0,
            img_plane_size: Vector2::zeros(),
            dir_00: Vector3::zeros(),
            du: Vector3::zeros(),
            dv: Vector3::zeros(),
        };
        cam.recalc_plane();
        cam
    }

    /// Camera at `position` looking at `target`
    pub fn look_at(position: Point3<f32>, target: Point3<f32>) -> PerspectiveCamera {
        PerspectiveCamera::new(position, target - position)
    }

    pub fn get_pos(&self) -> Point3<f32> {
        self.position
    }

    pub fn get_dir(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn set_pos(&mut self, pos: Point3<f32>) {
        self.position = pos;
    }

    pub fn set_direction(&mut self, direction: Vector3<f32>) {
        self.direction = direction.normalize();
        self.recalc_plane();
    }

    /// Width to height ratio of the image
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.recalc_plane();
    }

    fn recalc_plane(&mut self) {
        let mut up = vector![0.0, 1.0, 0.0];
        // Looking straight up or down
        if self.direction.cross(&up).norm() < 1e-6 {
            up = vector![0.0, 0.0, 1.0];
        }

        self.img_plane_size.y = 2.0 * f32::tan(f32::to_radians(0.5 * self.fov_y));
        self.img_plane_size.x = self.img_plane_size.y * self.aspect;

        let right = self.direction.cross(&up).normalize();
        let down = right.cross(&self.direction).normalize() * -1.0;
        self.du = right * self.img_plane_size.x;
        self.dv = down * self.img_plane_size.y;
        self.dir_00 = self.direction - 0.5 * self.du - 0.5 * self.dv;
    }
}

impl Camera for PerspectiveCamera {
    fn get_ray(&self, pixel_coord: (f32, f32)) -> Ray {
        let dir = self.dir_00 + self.du * pixel_coord.0 + self.dv * pixel_coord.1;
        Ray::normalized(self.position, dir)
    }

    fn get_position(&self) -> Point3<f32> {
        self.position
    }
}
