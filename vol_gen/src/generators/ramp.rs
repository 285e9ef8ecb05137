use nalgebra::Vector3;

use super::SampleGenerator;

/// Values grow linearly along `x`, 0 on the first slice and 255 on the last
pub struct RampGenerator {
    last_x: f32,
}

impl RampGenerator {
    pub fn new(dims: Vector3<u32>) -> RampGenerator {
        RampGenerator {
            last_x: dims.x.saturating_sub(1).max(1) as f32,
        }
    }
}

impl SampleGenerator for RampGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u8 {
        (coords.x as f32 / self.last_x * 255.0).round().min(255.0) as u8
    }
}
