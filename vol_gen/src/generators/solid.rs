use nalgebra::Vector3;

use super::SampleGenerator;

/// Generate solid volume
/// All sample values are the same
pub struct SolidGenerator {
    sample: u8,
}

impl SolidGenerator {
    pub fn new(sample: u8) -> SolidGenerator {
        SolidGenerator { sample }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, _coords: Vector3<u32>) -> u8 {
        self.sample
    }
}
