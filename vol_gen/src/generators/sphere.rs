use nalgebra::{vector, Vector3};

use super::SampleGenerator;

/// Ball centered in the volume.
/// Radius is 0.4 of the shortest side.
pub struct SphereGenerator {
    center: Vector3<f32>,
    radius: f32,
    sample: u8,
}

impl SphereGenerator {
    pub fn new(dims: Vector3<u32>, sample: u8) -> SphereGenerator {
        let dims_f = dims.cast::<f32>();
        SphereGenerator {
            center: dims_f / 2.0,
            radius: dims_f.min() * 0.4,
            sample,
        }
    }
}

impl SampleGenerator for SphereGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u8 {
        // sample centers
        let pos = coords.cast::<f32>() + vector![0.5, 0.5, 0.5];
        if (pos - self.center).magnitude() <= self.radius {
            self.sample
        } else {
            0
        }
    }
}
