use util::astar_path;

use crate::prelude::*;

impl Level {
    /// Shortest 4-directional walking path from `start` to `goal`.
    ///
    /// The path includes both ends. The goal cell is always enterable so
    /// creatures can path to the cell of the creature they're after. Returns
    /// an empty path if the goal can't be reached.
    pub fn astar(&self, start: Pos, goal: Pos) -> Vec<Pos> {
        astar_path(
            &start,
            &goal,
            |p: &Pos| {
                p.ns_4()
                    .filter(|&q| q == goal || self.can_walk(q))
                    .collect::<Vec<_>>()
            },
            |a, b| a.taxi_dist(b),
        )
        .unwrap_or_default()
    }

    /// Portal closest to `pos` by walking distance estimate.
    pub fn nearest_portal(&self, pos: Pos) -> Option<Pos> {
        self.portals
            .keys()
            .copied()
            .min_by_key(|p| (p.taxi_dist(&pos), p.y, p.x))
    }

    /// Plot the route from `pos` to the nearest portal into the debug
    /// overlay. Return whether a route was found.
    pub fn plot_route_to_portal(&mut self, pos: Pos) -> bool {
        self.debug.clear();
        let Some(dest) = self.nearest_portal(pos) else {
            return false;
        };
        let path = self.astar(pos, dest);
        let found = !path.is_empty();
        self.debug.extend(path);
        found
    }
}

#[cfg(test)]
mod test {
    use pathfinding::prelude::bfs;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::ItemIds;

    fn parse(text: &str) -> Level {
        Level::parse("test", text, &Config::default(), &mut ItemIds::default())
            .unwrap()
    }

    fn is_valid_path(
        level: &Level,
        path: &[Pos],
        start: Pos,
        goal: Pos,
    ) -> bool {
        path.first() == Some(&start)
            && path.last() == Some(&goal)
            && path.windows(2).all(|w| (w[1] - w[0]).is_adjacent())
            // Everything between the ends must be walkable.
            && path.iter().skip(1).rev().skip(1).all(|&p| level.can_walk(p))
    }

    #[test]
    fn corridor() {
        let level = parse(
            "\
#######
#.....#
#####.#
#.....#
#######",
        );
        let (start, goal) = (ivec2(1, 1), ivec2(1, 3));
        let path = level.astar(start, goal);
        assert_eq!(path.len(), 11);
        assert!(is_valid_path(&level, &path, start, goal));
    }

    #[test]
    fn trivial() {
        let level = parse("...");
        assert_eq!(level.astar(ivec2(1, 0), ivec2(1, 0)), vec![ivec2(1, 0)]);
    }

    #[test]
    fn enclosed_start() {
        let level = parse(
            "\
#####
#.#.#
#####",
        );
        assert!(level.astar(ivec2(1, 1), ivec2(3, 1)).is_empty());
    }

    #[test]
    fn goal_on_monster() {
        let level = parse("#....R#");
        let path = level.astar(ivec2(1, 0), ivec2(5, 0));
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&ivec2(5, 0)));
    }

    #[test]
    fn monsters_block() {
        let level = parse("#.R..#");
        assert!(level.astar(ivec2(1, 0), ivec2(4, 0)).is_empty());
    }

    #[test]
    fn route_to_portal() {
        let mut level = parse("#.....#");
        assert!(!level.plot_route_to_portal(ivec2(1, 0)));

        let dest = LevelPos::new("elsewhere", ivec2(1, 1));
        level.add_portal(ivec2(5, 0), dest.clone());
        level.add_portal(ivec2(3, 0), dest);
        assert_eq!(level.nearest_portal(ivec2(1, 0)), Some(ivec2(3, 0)));
        assert!(level.plot_route_to_portal(ivec2(1, 0)));
        assert_eq!(level.debug().len(), 3);
        assert!(level.debug().contains(&ivec2(2, 0)));
    }

    /// Compare path lengths to an independent breadth-first search on random
    /// 8x8 maps.
    #[quickcheck]
    fn matches_bfs(walls: u64, start: (u8, u8), goal: (u8, u8)) -> bool {
        let mut text = String::new();
        for y in 0..8 {
            for x in 0..8 {
                text.push(if walls & (1 << (y * 8 + x)) != 0 {
                    '#'
                } else {
                    '.'
                });
            }
            text.push('\n');
        }
        let level = parse(&text);

        let start = ivec2(start.0 as i32 % 8, start.1 as i32 % 8);
        let goal = ivec2(goal.0 as i32 % 8, goal.1 as i32 % 8);
        if !level.can_walk(start) {
            return true;
        }

        let oracle = bfs(
            &start,
            |p| {
                p.ns_4()
                    .filter(|&q| q == goal || level.can_walk(q))
                    .collect::<Vec<_>>()
            },
            |&p| p == goal,
        );
        let path = level.astar(start, goal);

        match oracle {
            None => path.is_empty(),
            Some(oracle) => {
                path.len() == oracle.len()
                    && is_valid_path(&level, &path, start, goal)
            }
        }
    }
}
