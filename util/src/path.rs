use std::{collections::VecDeque, hash::Hash};

use crate::{HashMap, HashSet, PriorityQueue};

/// Breadth-first flood from a set of start nodes.
///
/// Yields every reachable node once with its step count from the nearest
/// start, in order of increasing distance.
pub fn dijkstra_map<'a, T, I>(
    mut neighbors: impl FnMut(&T) -> I + 'a,
    starts: impl IntoIterator<Item = T>,
) -> impl Iterator<Item = (T, usize)> + 'a
where
    T: Clone + Eq + Hash + 'a,
    I: IntoIterator<Item = T>,
{
    let mut edge: VecDeque<(T, usize)> =
        starts.into_iter().map(|s| (s, 0)).collect();
    let mut seen = HashSet::default();

    std::iter::from_fn(move || {
        while let Some((node, len)) = edge.pop_front() {
            if !seen.contains(&node) {
                seen.insert(node.clone());
                for n in neighbors(&node) {
                    edge.push_back((n, len + 1));
                }
                return Some((node, len));
            }
        }
        None
    })
}

/// A* search with unit step costs.
///
/// Returns the path from `start` to `goal`, both ends included, or `None` if
/// the goal can't be reached. The heuristic must not overestimate the
/// remaining distance for the path to be the shortest one.
pub fn astar_path<T, I>(
    start: &T,
    goal: &T,
    mut neighbors: impl FnMut(&T) -> I,
    mut heuristic: impl FnMut(&T, &T) -> i32,
) -> Option<Vec<T>>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut frontier = PriorityQueue::with_capacity(8);
    frontier.push(start.clone(), 0);

    let mut came_from: HashMap<T, T> = HashMap::default();
    let mut cost_so_far: HashMap<T, i32> = HashMap::default();
    cost_so_far.insert(start.clone(), 0);

    while let Some(current) = frontier.pop() {
        if &current == goal {
            let mut path = vec![current];
            while let Some(prev) = path.last().and_then(|p| came_from.get(p))
            {
                path.push(prev.clone());
            }
            path.reverse();
            return Some(path);
        }

        let new_cost = cost_so_far[&current] + 1;
        for next in neighbors(&current) {
            if cost_so_far.get(&next).map_or(true, |&c| new_cost < c) {
                let priority = new_cost + heuristic(&next, goal);
                cost_so_far.insert(next.clone(), new_cost);
                came_from.insert(next.clone(), current.clone());
                frontier.push(next, priority);
            }
        }
    }

    None
}
