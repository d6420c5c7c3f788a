//! Raycasting field-of-view computation on integer grids.

mod ray;
pub use ray::Ray;

mod fov;
pub use crate::fov::{disc, field_of_view, Occluder};
