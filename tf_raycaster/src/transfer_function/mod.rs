//! Transfer function: color stops, evaluation and rasterization into a lookup

mod lookup;
mod transfer_function;

pub use lookup::{Lookup, LookupRasterizer, DEFAULT_LOOKUP_SIZE};
pub use transfer_function::{ColorStop, TransferFunction};
