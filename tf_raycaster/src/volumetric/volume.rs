use crate::common::{BoundBox, Ray};

use nalgebra::{Point3, Vector3};

// Volume is read only, samples are in <0;1>
// Volume occupies the unit cube, positions are normalized
pub trait Volume {
    // get data dimensions
    fn get_size(&self) -> Vector3<usize>;

    // trilinear interpolation sample, clamped to the edge samples
    // pos in normalized coordinates <0;1>^3
    fn sample_at(&self, pos: Point3<f32>) -> f32;

    // For building and tests, mostly
    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32>;

    fn get_bound_box(&self) -> BoundBox {
        BoundBox::unit()
    }

    fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        self.get_bound_box().intersect(ray)
    }

    fn get_name(&self) -> &str;
}
