use std::iter::FusedIterator;

use glam::{ivec2, IVec2};

/// Bresenham line from a start cell to an end cell.
///
/// Cells are yielded walking outwards from `start`, both endpoints included,
/// so a caller can stop consuming the ray at the first obstacle. Each
/// consecutive pair of cells differs by at most one along either axis.
///
/// ```notrust
/// @··
///    ···
///       ··*
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Primary and secondary axes are swapped for lines steeper than 45°.
    steep: bool,
    /// Position along the primary axis.
    x: i32,
    end_x: i32,
    x_step: i32,
    /// Position along the secondary axis.
    y: i32,
    y_step: i32,
    /// Primary axis span.
    dx: i32,
    /// Secondary axis span.
    dy: i32,
    err: i32,
    done: bool,
}

impl Ray {
    pub fn new(start: IVec2, end: IVec2) -> Self {
        let steep = (end.y - start.y).abs() > (end.x - start.x).abs();
        let (start, end) = if steep {
            (ivec2(start.y, start.x), ivec2(end.y, end.x))
        } else {
            (start, end)
        };

        Ray {
            steep,
            x: start.x,
            end_x: end.x,
            // Count down when the end is on the left so that the line always
            // extends away from the start point.
            x_step: if start.x > end.x { -1 } else { 1 },
            y: start.y,
            y_step: if start.y > end.y { -1 } else { 1 },
            dx: (end.x - start.x).abs(),
            dy: (end.y - start.y).abs(),
            err: 0,
            done: false,
        }
    }
}

impl Iterator for Ray {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let ret = if self.steep {
            ivec2(self.y, self.x)
        } else {
            ivec2(self.x, self.y)
        };

        if self.x == self.end_x {
            self.done = true;
        } else {
            self.x += self.x_step;
            self.err += self.dy;
            if 2 * self.err >= self.dx {
                self.y += self.y_step;
                self.err -= self.dx;
            }
        }

        Some(ret)
    }
}

impl FusedIterator for Ray {}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn line(a: [i32; 2], b: [i32; 2]) -> Vec<[i32; 2]> {
        Ray::new(a.into(), b.into()).map(|p| p.into()).collect()
    }

    #[test]
    fn degenerate() {
        assert_eq!(line([3, 3], [3, 3]), vec![[3, 3]]);
    }

    #[test]
    fn axis_aligned() {
        assert_eq!(line([0, 0], [3, 0]), vec![[0, 0], [1, 0], [2, 0], [3, 0]]);
        assert_eq!(line([0, 0], [-2, 0]), vec![[0, 0], [-1, 0], [-2, 0]]);
        assert_eq!(line([0, 0], [0, 2]), vec![[0, 0], [0, 1], [0, 2]]);
        assert_eq!(line([0, 0], [0, -2]), vec![[0, 0], [0, -1], [0, -2]]);
    }

    #[test]
    fn shallow_and_steep() {
        assert_eq!(line([0, 0], [4, 2]), vec![
            [0, 0],
            [1, 1],
            [2, 1],
            [3, 2],
            [4, 2]
        ]);
        assert_eq!(line([0, 0], [-2, -4]), vec![
            [0, 0],
            [-1, -1],
            [-1, -2],
            [-2, -3],
            [-2, -4]
        ]);
    }

    #[test]
    fn walks_outwards() {
        // The first cell is always the start, whichever way the line points.
        for end in [[5, 1], [-5, 1], [1, 5], [1, -5], [-5, -5]] {
            assert_eq!(line([0, 0], end)[0], [0, 0]);
        }
    }

    #[quickcheck]
    fn contiguous_and_exact(a: (i8, i8), b: (i8, i8)) -> bool {
        let (a, b) = (
            ivec2(a.0 as i32, a.1 as i32),
            ivec2(b.0 as i32, b.1 as i32),
        );
        let cells: Vec<IVec2> = Ray::new(a, b).collect();

        let span = (b - a).abs();
        cells.first() == Some(&a)
            && cells.last() == Some(&b)
            && cells.len() as i32 == span.x.max(span.y) + 1
            && cells.windows(2).all(|w| {
                let d = (w[1] - w[0]).abs();
                d.x <= 1 && d.y <= 1 && d != IVec2::ZERO
            })
    }
}
