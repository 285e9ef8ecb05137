use nalgebra::Vector3;

use crate::{
    color::{self, RGBA},
    common::Ray,
    transfer_function::Lookup,
    volumetric::Volume,
};

use super::{render_options::OpacitySource, RenderOptions};

/// Result of marching one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayResult {
    /// Accumulated color, rgb premultiplied by alpha
    pub color: RGBA,
    /// Number of samples taken
    pub steps: usize,
    /// Marching was cut by the step limit
    pub truncated: bool,
}

impl RayResult {
    pub fn miss() -> RayResult {
        RayResult {
            color: color::zero(),
            steps: 0,
            truncated: false,
        }
    }
}

/// Length of one marching step: the smallest parametric distance to cross one voxel along
/// any axis, `min over a of 1 / (dims[a] * |dir[a]|)`.
/// Axes the ray does not move along do not constrain the step.
pub fn step_size(dims: Vector3<usize>, direction: &Vector3<f32>) -> f32 {
    let mut dt = f32::INFINITY;
    for axis in 0..3 {
        let per_axis = 1.0 / (dims[axis] as f32 * direction[axis].abs());
        dt = dt.min(per_axis);
    }
    dt
}

/// Front-to-back alpha compositing along rays through a volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compositor {
    pub early_ray_termination: bool,
    pub max_steps: usize,
    pub opacity_source: OpacitySource,
}

impl Default for Compositor {
    fn default() -> Self {
        Compositor::from_options(&RenderOptions::default())
    }
}

impl Compositor {
    pub fn from_options(options: &RenderOptions) -> Compositor {
        Compositor {
            early_ray_termination: options.early_ray_termination,
            max_steps: options.max_steps,
            opacity_source: options.opacity_source,
        }
    }

    /// Color of the ray after passing through `volume`.
    /// Rays missing the volume (or unable to march) get `(0,0,0,0)`.
    pub fn march<V>(&self, volume: &V, lookup: &Lookup, ray: &Ray) -> RayResult
    where
        V: Volume + ?Sized,
    {
        let (t0, t1) = match volume.intersect(ray) {
            Some(interval) => interval,
            None => return RayResult::miss(),
        };

        let dt = step_size(volume.get_size(), &ray.direction);
        if !dt.is_finite() || dt <= 0.0 {
            return RayResult::miss();
        }

        let step = ray.direction * dt;
        // First sample is one step past the entry point
        let mut pos = ray.point_from_t(t0 + dt);
        let mut t = t0;

        let mut accum = color::zero();
        let mut steps = 0;
        let mut truncated = false;

        while t < t1 {
            if steps == self.max_steps {
                truncated = true;
                break;
            }

            let sample = volume.sample_at(pos);
            let tf_color = lookup.sample(sample);

            let alpha = match self.opacity_source {
                OpacitySource::TransferFunction => tf_color.w,
                OpacitySource::Scalar => sample,
            };

            let weight = (1.0 - accum.w) * alpha;
            accum.x += weight * tf_color.x;
            accum.y += weight * tf_color.y;
            accum.z += weight * tf_color.z;
            accum.w += weight;

            pos += step;
            t += dt;
            steps += 1;

            // Nothing more can be added once fully opaque
            if self.early_ray_termination && accum.w >= 1.0 {
                break;
            }
        }

        RayResult {
            color: accum,
            steps,
            truncated,
        }
    }

    /// Only the color of [`Compositor::march`]
    pub fn composite<V>(&self, volume: &V, lookup: &Lookup, ray: &Ray) -> RGBA
    where
        V: Volume + ?Sized,
    {
        self.march(volume, lookup, ray).color
    }
}
