use nalgebra::{point, Point3, Vector3};

use super::Ray;

/// Axis aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    /// Unit cube `<0;1>^3`, the space volumes are addressed in
    pub fn unit() -> BoundBox {
        BoundBox {
            lower: point![0.0, 0.0, 0.0],
            upper: point![1.0, 1.0, 1.0],
        }
    }

    pub fn from_position_dims(position: Point3<f32>, dimensions: Vector3<f32>) -> BoundBox {
        BoundBox {
            lower: position,
            upper: position + dimensions,
        }
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn is_in(&self, pos: &Point3<f32>) -> bool {
        self.upper.x > pos.x
            && self.upper.y > pos.y
            && self.upper.z > pos.z
            && pos.x > self.lower.x
            && pos.y > self.lower.y
            && pos.z > self.lower.z
    }

    /// Slab method, returns parametric interval `(t0, t1)` of the ray inside the box.
    /// The ray misses the box when `t0 >= t1`.
    ///
    /// Entry is clamped to `t = 0`, the part of the box behind ray origin is cut off.
    /// Zero direction components are handled explicitly: such an axis either contains the
    /// origin for the whole ray (no constraint) or never does (miss).
    ///
    /// Source: https://tavianator.com/2011/ray_box.html
    pub fn slab(&self, ray: &Ray) -> (f32, f32) {
        let mut t0: f32 = 0.0;
        let mut t1 = f32::INFINITY;

        if ray.is_degenerate() {
            return (f32::INFINITY, f32::NEG_INFINITY);
        }

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lower, upper) = (self.lower[axis], self.upper[axis]);

            if dir == 0.0 {
                if origin < lower || origin > upper {
                    return (f32::INFINITY, f32::NEG_INFINITY);
                }
                continue;
            }

            let inv_dir = 1.0 / dir;
            let t_lower = (lower - origin) * inv_dir;
            let t_upper = (upper - origin) * inv_dir;

            t0 = t0.max(t_lower.min(t_upper));
            t1 = t1.min(t_lower.max(t_upper));
        }

        (t0, t1)
    }

    /// Intersection of ray with the box.
    /// Returns `None` on miss, see [`BoundBox::slab`].
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        let (t0, t1) = self.slab(ray);
        if t0 < t1 {
            Some((t0, t1))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn ray_pointing_away_misses() {
        let ray = Ray::normalized(point![2.0, 2.0, 2.0], vector![1.0, 1.0, 1.0]);
        let (t0, t1) = BoundBox::unit().slab(&ray);
        assert!(t0 >= t1);
        assert!(BoundBox::unit().intersect(&ray).is_none());
    }

    #[test]
    fn ray_pointing_towards_hits() {
        let ray = Ray::normalized(point![2.0, 2.0, 2.0], vector![-1.0, -1.0, -1.0]);
        let (t0, t1) = BoundBox::unit().intersect(&ray).unwrap();

        let sqrt3 = 3.0_f32.sqrt();
        assert!((t0 - sqrt3).abs() < 1e-5);
        assert!((t1 - 2.0 * sqrt3).abs() < 1e-5);
    }

    #[test]
    fn axis_aligned_ray() {
        // y and z direction components are zero
        let ray = Ray::new(point![-1.0, 0.5, 0.5], vector![1.0, 0.0, 0.0]);
        assert_eq!(BoundBox::unit().intersect(&ray), Some((1.0, 2.0)));

        // parallel to the box, outside of it
        let ray = Ray::new(point![-1.0, 1.5, 0.5], vector![1.0, 0.0, 0.0]);
        assert_eq!(BoundBox::unit().intersect(&ray), None);
    }

    #[test]
    fn ray_on_face_plane() {
        // origin lies in plane y = 0, direction parallel to it
        let ray = Ray::new(point![-1.0, 0.0, 0.5], vector![1.0, 0.0, 0.0]);
        assert_eq!(BoundBox::unit().intersect(&ray), Some((1.0, 2.0)));
    }

    #[test]
    fn origin_inside() {
        let ray = Ray::new(point![0.5, 0.5, 0.5], vector![0.0, 0.0, 1.0]);
        assert_eq!(BoundBox::unit().intersect(&ray), Some((0.0, 0.5)));
    }

    #[test]
    fn degenerate_ray_misses() {
        let ray = Ray::new(point![0.5, 0.5, 0.5], vector![0.0, 0.0, 0.0]);
        assert!(BoundBox::unit().intersect(&ray).is_none());

        let ray = Ray::new(point![-1.0, 0.5, 0.5], vector![f32::NAN, 0.0, 0.0]);
        assert!(BoundBox::unit().intersect(&ray).is_none());
    }

    #[test]
    fn non_unit_box() {
        let bbox = BoundBox::new(point![1.0, 1.0, 1.0], point![5.0, 5.0, 5.0]);
        let ray = Ray::new(point![0.0, 3.0, 3.0], vector![1.0, 0.0, 0.0]);
        assert_eq!(bbox.intersect(&ray), Some((1.0, 5.0)));
        assert_eq!(bbox.dims(), vector![4.0, 4.0, 4.0]);
        assert!(bbox.is_in(&point![2.0, 2.0, 2.0]));
        assert!(!bbox.is_in(&point![0.0, 2.0, 2.0]));
    }

    proptest! {
        #[test]
        fn interval_points_lie_in_box(
            ox in -3.0f32..3.0, oy in -3.0f32..3.0, oz in -3.0f32..3.0,
            dx in -1.0f32..1.0, dy in -1.0f32..1.0, dz in -1.0f32..1.0,
        ) {
            let ray = Ray::normalized(point![ox, oy, oz], vector![dx, dy, dz]);
            if let Some((t0, t1)) = BoundBox::unit().intersect(&ray) {
                prop_assert!(t0 >= 0.0);
                let mid = ray.point_from_t(0.5 * (t0 + t1));
                for axis in 0..3 {
                    prop_assert!(mid[axis] >= -1e-4 && mid[axis] <= 1.0 + 1e-4);
                }
            }
        }
    }
}
