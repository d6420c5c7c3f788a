use glam::IVec2;

/// 4 directions, clock face order.
pub const DIR_4: [IVec2; 4] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 0]),
];

pub trait VecExt: Sized + Default {
    /// Absolute size of vector in taxicab metric.
    fn taxi_len(&self) -> i32;

    /// Taxicab distance to another point.
    fn taxi_dist(&self, other: &Self) -> i32;

    /// Vec points to an adjacent cell, left, right, up or down.
    fn is_adjacent(&self) -> bool {
        self.taxi_len() == 1
    }

    /// Squared euclidean length, exact for integer vectors.
    fn square_len(&self) -> i32;

    /// Iterate the four orthogonally adjacent points.
    fn ns_4(&self) -> impl Iterator<Item = Self>;
}

impl VecExt for IVec2 {
    fn taxi_len(&self) -> i32 {
        self[0].abs() + self[1].abs()
    }

    fn taxi_dist(&self, other: &Self) -> i32 {
        (*other - *self).taxi_len()
    }

    fn square_len(&self) -> i32 {
        self[0] * self[0] + self[1] * self[1]
    }

    fn ns_4(&self) -> impl Iterator<Item = Self> {
        let p = *self;
        DIR_4.into_iter().map(move |d| p + d)
    }
}

#[cfg(test)]
mod test {
    use glam::ivec2;

    use super::*;

    #[test]
    fn taxicab() {
        assert_eq!(ivec2(3, -4).taxi_len(), 7);
        assert_eq!(ivec2(1, 1).taxi_dist(&ivec2(3, 3)), 4);
        assert!(ivec2(0, -1).is_adjacent());
        assert!(!ivec2(1, 1).is_adjacent());
        assert_eq!(ivec2(3, 4).square_len(), 25);
    }

    #[test]
    fn neighbors() {
        let ns: Vec<IVec2> = ivec2(5, 5).ns_4().collect();
        assert_eq!(
            ns,
            vec![ivec2(5, 4), ivec2(6, 5), ivec2(5, 6), ivec2(4, 5)]
        );
    }
}
