use nalgebra::{vector, Vector3};

use super::SampleGenerator;

/// Value noise: random values on a coarse lattice, trilinearly interpolated
pub struct NoiseGenerator {
    lattice: Vec<u8>,
    lattice_dims: Vector3<usize>,
    cell: f32,
}

impl NoiseGenerator {
    pub fn new(dims: Vector3<u32>, cell: u32, seed: Option<u64>) -> NoiseGenerator {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        let cell = cell.max(1);
        // One extra lattice point closes the last cell
        let lattice_dims = dims.map(|d| (d / cell) as usize + 2);
        let lattice = (0..lattice_dims.product()).map(|_| rng.u8(..)).collect();

        NoiseGenerator {
            lattice,
            lattice_dims,
            cell: cell as f32,
        }
    }

    fn lattice_at(&self, p: Vector3<usize>) -> f32 {
        let d = self.lattice_dims;
        self.lattice[p.x + p.y * d.x + p.z * d.x * d.y] as f32
    }
}

impl SampleGenerator for NoiseGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u8 {
        let pos = coords.cast::<f32>() / self.cell;
        let base = pos.map(f32::floor);
        let t = pos - base;
        let b = base.map(|v| v as usize);

        let mut value = 0.0;
        for corner in 0..8usize {
            let offset = vector![corner & 1, (corner >> 1) & 1, (corner >> 2) & 1];
            let weight = (0..3)
                .map(|axis| {
                    if offset[axis] == 1 {
                        t[axis]
                    } else {
                        1.0 - t[axis]
                    }
                })
                .product::<f32>();
            value += weight * self.lattice_at(b + offset);
        }
        value.round().clamp(0.0, 255.0) as u8
    }
}
