use rand::Rng;

use crate::map::cell::Cell;
use crate::map::grid::GridWorld;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// Fixed neighbour order: +x, -x, +y, -y.
    pub fn all() -> [Self; 4] {
        [
            Direction::Right,
            Direction::Left,
            Direction::Down,
            Direction::Up,
        ]
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..4) {
            0 => Direction::Right,
            1 => Direction::Left,
            2 => Direction::Down,
            _ => Direction::Up,
        }
    }
}

/// The neighbour of `cell` in `dir`, or `None` when it would leave the grid.
pub fn next_position(cell: Cell, dir: Direction, world: &GridWorld) -> Option<Cell> {
    let next = match dir {
        Direction::Right if cell.x + 1 < world.width() => Cell::new(cell.x + 1, cell.y),
        Direction::Left if cell.x > 0 => Cell::new(cell.x - 1, cell.y),
        Direction::Down if cell.y + 1 < world.height() => Cell::new(cell.x, cell.y + 1),
        Direction::Up if cell.y > 0 => Cell::new(cell.x, cell.y - 1),
        _ => return None,
    };
    Some(next)
}

pub fn neighbors(cell: Cell, world: &GridWorld) -> impl Iterator<Item = Cell> + '_ {
    Direction::all()
        .into_iter()
        .filter_map(move |dir| next_position(cell, dir, world))
}

/// A robot may stand on `cell`: inside the grid, no obstacle, no active
/// resource.
pub fn is_valid_move(cell: Cell, world: &GridWorld) -> bool {
    world.in_bounds(cell) && !world.is_obstacle(cell) && world.is_occupied_by_resource(cell).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::start_area::StartArea;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn world() -> GridWorld {
        GridWorld::new(3, 3, StartArea::new(Cell::new(0, 0), 1, 1)).unwrap()
    }

    #[test]
    fn test_next_position_stays_in_bounds() {
        let world = world();
        let corner = Cell::new(0, 0);
        assert_eq!(next_position(corner, Direction::Left, &world), None);
        assert_eq!(next_position(corner, Direction::Up, &world), None);
        assert_eq!(
            next_position(corner, Direction::Right, &world),
            Some(Cell::new(1, 0))
        );
        assert_eq!(next_position(Cell::new(2, 2), Direction::Down, &world), None);
    }

    #[test]
    fn test_neighbors_order() {
        let world = world();
        let around: Vec<Cell> = neighbors(Cell::new(1, 1), &world).collect();
        assert_eq!(
            around,
            vec![
                Cell::new(2, 1),
                Cell::new(0, 1),
                Cell::new(1, 2),
                Cell::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_is_valid_move_blocks_obstacles_and_resources() {
        let mut world = world();
        world.add_obstacle(Cell::new(1, 0)).unwrap();
        world.add_resource(Cell::new(2, 0), 1).unwrap();
        assert!(!is_valid_move(Cell::new(1, 0), &world));
        assert!(!is_valid_move(Cell::new(2, 0), &world));
        assert!(!is_valid_move(Cell::new(3, 0), &world));
        assert!(is_valid_move(Cell::new(1, 1), &world));
    }

    #[test]
    fn test_random_direction_covers_all() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let dir = Direction::random(&mut rng);
            if !seen.contains(&dir) {
                seen.push(dir);
            }
        }
        assert_eq!(seen.len(), 4);
    }
}
