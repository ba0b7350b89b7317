use macroquad::prelude::*;

pub const WINDOW_WIDTH: i32 = 1100;
pub const WINDOW_HEIGHT: i32 = 950;
pub const CELL_SIZE: i32 = 30;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Toroidal wrap into [0, cell_count) on both axes.
    pub fn wrapped(self, cell_count: i32) -> Self {
        Self {
            x: self.x.rem_euclid(cell_count),
            y: self.y.rem_euclid(cell_count),
        }
    }

    pub fn in_bounds(self, cell_count: i32) -> bool {
        self.x >= 0 && self.x < cell_count && self.y >= 0 && self.y < cell_count
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// The play area is centered in the fixed-size window, nudged down a little
// to leave room for the title bar text.
pub fn game_offset_x(cell_count: i32) -> i32 {
    (WINDOW_WIDTH - CELL_SIZE * cell_count) / 2
}

pub fn game_offset_y(cell_count: i32) -> i32 {
    (WINDOW_HEIGHT - CELL_SIZE * cell_count) / 2 + 20
}

pub fn cell_rect(cell: Cell, cell_count: i32) -> Rect {
    Rect::new(
        (game_offset_x(cell_count) + cell.x * CELL_SIZE) as f32,
        (game_offset_y(cell_count) + cell.y * CELL_SIZE) as f32,
        CELL_SIZE as f32,
        CELL_SIZE as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_one_unit() {
        let c = Cell::new(5, 10);
        assert_eq!(c.step(Direction::Right), Cell::new(6, 10));
        assert_eq!(c.step(Direction::Up), Cell::new(5, 9));
        assert_eq!(c.step(Direction::Down), Cell::new(5, 11));
        assert_eq!(c.step(Direction::Left), Cell::new(4, 10));
    }

    #[test]
    fn opposites_pair_up() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn wrap_handles_both_edges() {
        assert_eq!(Cell::new(20, 10).wrapped(20), Cell::new(0, 10));
        assert_eq!(Cell::new(-1, 10).wrapped(20), Cell::new(19, 10));
        assert_eq!(Cell::new(3, -1).wrapped(20), Cell::new(3, 19));
        assert_eq!(Cell::new(3, 20).wrapped(20), Cell::new(3, 0));
        assert_eq!(Cell::new(7, 7).wrapped(20), Cell::new(7, 7));
    }

    #[test]
    fn bounds_check_matches_grid() {
        assert!(Cell::new(0, 0).in_bounds(20));
        assert!(Cell::new(19, 19).in_bounds(20));
        assert!(!Cell::new(20, 0).in_bounds(20));
        assert!(!Cell::new(0, -1).in_bounds(20));
    }

    #[test]
    fn play_area_is_centered() {
        // 20 cells * 30 px = 600 px inside an 1100 px wide window.
        assert_eq!(game_offset_x(20), 250);
        let r = cell_rect(Cell::new(0, 0), 20);
        assert_eq!(r.x as i32, game_offset_x(20));
        assert_eq!(r.w as i32, CELL_SIZE);
    }
}
