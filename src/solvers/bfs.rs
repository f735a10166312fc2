use std::{
    collections::{HashSet, VecDeque},
    rc::Rc,
};

use crate::maze::{Coord, Grid, get_neighbors};

/// A path carried by a queue entry, stored back to front so that entries
/// branching from the same prefix share it.
struct TrackedPath {
    /// Last coordinate of the path
    coord: Coord,
    /// The rest of the path, `None` at the entrance
    prev: Option<Rc<TrackedPath>>,
    /// Number of coordinates on the path
    len: usize,
}

impl TrackedPath {
    fn to_vec(&self) -> Vec<Coord> {
        let mut path = Vec::with_capacity(self.len);
        let mut node = Some(self);
        while let Some(current) = node {
            path.push(current.coord);
            node = current.prev.as_deref();
        }
        path.reverse();
        path
    }
}

impl Drop for TrackedPath {
    // Unlinked iteratively, paths can be millions of nodes long
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(node) = prev {
            prev = match Rc::try_unwrap(node) {
                Ok(mut node) => node.prev.take(),
                Err(_) => None,
            };
        }
    }
}

/// Breadth-first search from the grid's entrance to its exit over open slots.
///
/// Neighbors are explored down, right, up, left, which fixes the winner among
/// equally short paths. Returns the path from entrance to exit inclusive, or an
/// empty vector if the exit cannot be reached.
pub fn solve_bfs(grid: &Grid) -> Vec<Coord> {
    let (start, goal) = (grid.entrance(), grid.exit());
    if !grid.is_open(start) {
        return Vec::new();
    }

    let mut queue = VecDeque::from([Rc::new(TrackedPath {
        coord: start,
        prev: None,
        len: 1,
    })]);
    let mut visited = HashSet::from([start]);

    while let Some(current) = queue.pop_front() {
        if current.coord == goal {
            return current.to_vec();
        }

        get_neighbors(current.coord, 1)
            .filter(|&c| grid.contains(c) && grid.is_open(c))
            .for_each(|c| {
                if visited.insert(c) {
                    queue.push_back(Rc::new(TrackedPath {
                        coord: c,
                        prev: Some(current.clone()),
                        len: current.len + 1,
                    }));
                }
            });
    }

    Vec::new() // No path found
}
