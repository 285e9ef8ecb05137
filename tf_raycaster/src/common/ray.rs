use nalgebra::{Point3, Vector3};

/// Ray cast by camera.
/// Main usecase is getting intersections with volumes ([`super::BoundBox::intersect`]),
/// then iterating over the intersected line segment in steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Construct new ray using `origin` and `direction`.
    /// `direction` should be unit vector, see [`Ray::normalized`].
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Ray {
        Ray { origin, direction }
    }

    /// Construct new ray, normalizing `direction`.
    /// Zero `direction` stays zero, producing a degenerate ray.
    pub fn normalized(origin: Point3<f32>, direction: Vector3<f32>) -> Ray {
        let direction = direction.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
        Ray { origin, direction }
    }

    /// Returns point `t` units far from ray origin in ray direction
    pub fn point_from_t(&self, t: f32) -> Point3<f32> {
        self.origin + t * self.direction
    }

    /// Ray cannot be marched: zero length or non-finite direction
    pub fn is_degenerate(&self) -> bool {
        self.direction.iter().any(|v| !v.is_finite()) || self.direction.iter().all(|&v| v == 0.0)
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;

    #[test]
    fn point_along_ray() {
        let ray = Ray::new(point![1.0, 0.0, 0.0], vector![0.0, 1.0, 0.0]);
        assert_eq!(ray.point_from_t(2.5), point![1.0, 2.5, 0.0]);
        assert_eq!(ray.point_from_t(0.0), ray.origin);
    }

    #[test]
    fn degenerate_rays() {
        let origin = point![0.0, 0.0, 0.0];
        assert!(Ray::new(origin, vector![0.0, 0.0, 0.0]).is_degenerate());
        assert!(Ray::new(origin, vector![f32::NAN, 1.0, 0.0]).is_degenerate());
        assert!(Ray::new(origin, vector![f32::INFINITY, 0.0, 0.0]).is_degenerate());
        assert!(Ray::normalized(origin, vector![0.0, 0.0, 0.0]).is_degenerate());
        assert!(!Ray::normalized(origin, vector![0.0, 0.0, 3.0]).is_degenerate());
    }

    #[test]
    fn normalized_direction() {
        let ray = Ray::normalized(point![0.0, 0.0, 0.0], vector![3.0, 0.0, 4.0]);
        assert!((ray.direction.norm() - 1.0).abs() < 1e-6);
        assert!((ray.direction.x - 0.6).abs() < 1e-6);
    }
}
