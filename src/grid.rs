//! Grid directions and cell helpers shared by both games

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the four axis-aligned unit steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen space (y grows downward)
    pub const fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True when the two directions lie on different axes
    pub fn is_perpendicular(self, other: Direction) -> bool {
        self != other && self != other.opposite()
    }
}

/// Whether `cell` lies inside a `size` x `size` square anchored at the origin
#[inline]
pub fn in_bounds(cell: IVec2, size: i32) -> bool {
    cell.x >= 0 && cell.x < size && cell.y >= 0 && cell.y < size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_perpendicular() {
        assert!(Direction::Up.is_perpendicular(Direction::Left));
        assert!(!Direction::Up.is_perpendicular(Direction::Down));
        assert!(!Direction::Up.is_perpendicular(Direction::Up));
    }

    #[test]
    fn test_in_bounds() {
        assert!(in_bounds(IVec2::new(0, 0), 20));
        assert!(in_bounds(IVec2::new(19, 19), 20));
        assert!(!in_bounds(IVec2::new(-1, 5), 20));
        assert!(!in_bounds(IVec2::new(20, 5), 20));
        assert!(!in_bounds(IVec2::new(5, 20), 20));
    }
}
