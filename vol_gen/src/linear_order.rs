use nalgebra::{vector, Vector3};

/// Coordinates of all samples in file order, `x` growing fastest
#[derive(Debug, Clone)]
pub struct LinearCoordIterator {
    dims: Vector3<u32>,
    index: u64,
    total: u64,
}

impl LinearCoordIterator {
    pub fn from_dims(dims: Vector3<u32>) -> LinearCoordIterator {
        LinearCoordIterator {
            dims,
            index: 0,
            total: dims.iter().map(|&d| d as u64).product(),
        }
    }

    fn coords_of(&self, index: u64) -> Vector3<u32> {
        let (x_len, y_len) = (self.dims.x as u64, self.dims.y as u64);
        let x = index % x_len;
        let y = (index / x_len) % y_len;
        let z = index / (x_len * y_len);
        vector![x as u32, y as u32, z as u32]
    }
}

impl Iterator for LinearCoordIterator {
    type Item = Vector3<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }
        let coords = self.coords_of(self.index);
        self.index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.index) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for LinearCoordIterator {}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn lin_order() {
        let order = LinearCoordIterator::from_dims(vector![3, 2, 2]);
        assert_eq!(order.len(), 12);

        #[rustfmt::skip]
        let expected = vec![
            vector![0,0,0],vector![1,0,0],vector![2,0,0],
            vector![0,1,0],vector![1,1,0],vector![2,1,0],
            // next slice
            vector![0,0,1],vector![1,0,1],vector![2,0,1],
            vector![0,1,1],vector![1,1,1],vector![2,1,1],
        ];

        assert_eq!(order.collect::<Vec<_>>(), expected);
    }

    #[test]
    fn empty_dims() {
        let mut order = LinearCoordIterator::from_dims(vector![3, 0, 2]);
        assert_eq!(order.len(), 0);
        assert_eq!(order.next(), None);
    }
}
