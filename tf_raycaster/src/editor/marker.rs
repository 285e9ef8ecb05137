use nalgebra::{point, Point2};
use serde::{Deserialize, Serialize};

/// Side of the diamond drawn for each stop
pub const MARKER_SIZE: f32 = 15.0;

/// Distance of the gradient bar from the top left corner of the editor
pub const LAYOUT_OFFSET: f32 = 10.0;

/// Geometry of the gradient bar, in pointer coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorLayout {
    pub width: f32,
    pub height: f32,
    pub offset: f32,
    pub marker_size: f32,
}

impl Default for EditorLayout {
    fn default() -> Self {
        EditorLayout {
            width: 256.0,
            height: 40.0,
            offset: LAYOUT_OFFSET,
            marker_size: MARKER_SIZE,
        }
    }
}

impl EditorLayout {
    pub fn new(width: f32, height: f32) -> EditorLayout {
        EditorLayout {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn marker_center(&self, stop_offset: f32) -> Point2<f32> {
        point![
            self.offset + stop_offset * self.width,
            self.offset + self.height / 2.0
        ]
    }

    /// Stop offset under pointer x, clamped to `<0;1>`
    pub fn offset_from_x(&self, x: f32) -> f32 {
        if self.width <= 0.0 || x.is_nan() {
            return 0.0;
        }
        ((x - self.offset) / self.width).clamp(0.0, 1.0)
    }

    pub fn marker(&self, stop_offset: f32) -> Marker {
        Marker::diamond(self.marker_center(stop_offset), self.marker_size)
    }
}

/// Polygon drawn for a stop. The same vertices are used for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub vertices: [Point2<f32>; 4],
}

impl Marker {
    /// Vertices in order bottom, left, top, right
    pub fn diamond(center: Point2<f32>, size: f32) -> Marker {
        let half = size / 2.0;
        Marker {
            vertices: [
                point![center.x, center.y + half],
                point![center.x - half, center.y],
                point![center.x, center.y - half],
                point![center.x + half, center.y],
            ],
        }
    }

    pub fn contains(&self, p: Point2<f32>) -> bool {
        polygon_contains(&self.vertices, p)
    }
}

/// Even-odd rule: count crossings of a horizontal ray from `p` to the right
pub fn polygon_contains(vertices: &[Point2<f32>], p: Point2<f32>) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
