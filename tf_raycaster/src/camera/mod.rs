use nalgebra::Point3;

use crate::common::Ray;

mod perspective_camera;

pub use perspective_camera::PerspectiveCamera;

pub trait Camera {
    // pixel_coord in <0;1>, [0,0] is top left corner of the image
    fn get_ray(&self, pixel_coord: (f32, f32)) -> Ray;

    fn get_position(&self) -> Point3<f32>;
}
