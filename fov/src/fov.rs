use glam::{ivec2, IVec2};

use crate::Ray;

/// Terrain interface for field-of-view computation.
pub trait Occluder {
    /// Whether the cell is part of the map. Rays end silently when they
    /// leave the map.
    fn contains(&self, p: IVec2) -> bool;

    /// Whether the cell stops rays. Opaque cells are still visible
    /// themselves.
    fn blocks_sight(&self, p: IVec2) -> bool;
}

/// Cells within euclidean distance `radius` from `origin`.
pub fn disc(origin: IVec2, radius: i32) -> impl Iterator<Item = IVec2> {
    let r = radius.max(0);
    (-r..=r)
        .flat_map(move |y| (-r..=r).map(move |x| ivec2(x, y)))
        .filter(move |v| v.x * v.x + v.y * v.y <= r * r)
        .map(move |v| origin + v)
}

/// Visible cells from `origin` out to `radius`.
///
/// Casts a ray to every cell on the disc around the origin. Cells may be
/// yielded more than once.
pub fn field_of_view<'a>(
    map: &'a impl Occluder,
    origin: IVec2,
    radius: i32,
) -> impl Iterator<Item = IVec2> + 'a {
    disc(origin, radius).flat_map(move |target| {
        let mut is_open = true;
        Ray::new(origin, target).take_while(move |&p| {
            if !is_open || !map.contains(p) {
                return false;
            }
            is_open = !map.blocks_sight(p);
            true
        })
    })
}
