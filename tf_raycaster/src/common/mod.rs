mod bound_box;
mod ray;

pub use bound_box::BoundBox;
pub use ray::Ray;
