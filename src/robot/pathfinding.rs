use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::movement::{self, neighbors};
use crate::error::PathError;
use crate::map::cell::Cell;
use crate::map::grid::GridWorld;

#[derive(Clone, Copy, Eq, PartialEq)]
struct Node {
    cell: Cell,
    g_cost: usize,
    f_cost: usize,
    // Insertion counter: equal costs pop first-in first-out.
    order: usize,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap.
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first grid search with a Manhattan heuristic.
///
/// Obstacles are hard blockers. Active resources block every cell except
/// `goal` itself, so a resource can be targeted without routing through
/// others. Returns the cells to walk, `from` excluded and `goal` included;
/// an empty path when already there.
pub fn find_path(world: &GridWorld, from: Cell, goal: Cell) -> Result<Vec<Cell>, PathError> {
    if !world.in_bounds(goal) || world.is_obstacle(goal) {
        return Err(PathError::InvalidTarget(goal));
    }
    if from == goal {
        return Ok(Vec::new());
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut g_score: HashMap<Cell, usize> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut order = 0;

    g_score.insert(from, 0);
    open.push(Node {
        cell: from,
        g_cost: 0,
        f_cost: from.manhattan(goal),
        order,
    });

    while let Some(current) = open.pop() {
        if current.cell == goal {
            return Ok(reconstruct(&came_from, from, goal));
        }
        if !closed.insert(current.cell) {
            continue;
        }

        for next in neighbors(current.cell, world) {
            if closed.contains(&next) || !(next == goal || movement::is_valid_move(next, world)) {
                continue;
            }
            let tentative = current.g_cost + 1;
            if g_score.get(&next).is_some_and(|&known| known <= tentative) {
                continue;
            }
            g_score.insert(next, tentative);
            came_from.insert(next, current.cell);
            order += 1;
            open.push(Node {
                cell: next,
                g_cost: tentative,
                f_cost: tentative + next.manhattan(goal),
                order,
            });
        }
    }

    Err(PathError::Unreachable { from, to: goal })
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, from: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        if previous == from {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
