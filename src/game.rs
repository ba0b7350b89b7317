use std::collections::VecDeque;

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::grid::{self, Cell, Direction, CELL_SIZE};
use crate::settings::{Settings, UI_RED};
use crate::snake::Snake;

/// What a simulation tick amounted to, for collaborators that render
/// sound and screen transitions.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    /// Session not running or paused; nothing moved.
    Idle,
    Moved,
    Ate,
    Died,
}

/// Rejection-samples a free cell. Unbounded on purpose: the grid area always
/// dwarfs practical snake lengths, and bounding retries would change the
/// sampling distribution.
pub fn spawn_food(occupied: &VecDeque<Cell>, cell_count: i32) -> Cell {
    loop {
        let cell = Cell::new(gen_range(0, cell_count), gen_range(0, cell_count));
        if !occupied.contains(&cell) {
            return cell;
        }
    }
}

/// Polled elapsed-time gate; fires when `interval` seconds have passed
/// since the last firing.
pub struct TickGate {
    last_update: f64,
}

impl TickGate {
    pub fn new() -> Self {
        Self { last_update: 0.0 }
    }

    pub fn ready(&mut self, now: f64, interval: f64) -> bool {
        if now - self.last_update >= interval {
            self.last_update = now;
            true
        } else {
            false
        }
    }
}

pub struct Session {
    pub snake: Snake,
    pub food: Cell,
    pub next_direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub running: bool,
    pub paused: bool,
    pub cell_count: i32,
    pub walls_enabled: bool,
}

impl Session {
    pub fn new(settings: &Settings, high_score: u32) -> Self {
        let cell_count = settings.cell_count();
        let snake = Snake::new(cell_count);
        let food = spawn_food(&snake.body, cell_count);
        let next_direction = snake.direction;
        Self {
            snake,
            food,
            next_direction,
            score: 0,
            high_score,
            running: true,
            paused: false,
            cell_count,
            walls_enabled: settings.walls_enabled,
        }
    }

    /// One simulation tick: apply the buffered direction, move, then resolve
    /// food, boundary and self collisions in that order. Food comes first
    /// because growth changes the body the self check runs against; wrap
    /// comes before the self check so a wrapped head is tested at its real
    /// position.
    pub fn update(&mut self) -> TickOutcome {
        if !self.running || self.paused {
            return TickOutcome::Idle;
        }

        self.snake.direction = self.next_direction;
        self.snake.advance();
        let mut outcome = TickOutcome::Moved;

        if self.snake.head() == self.food {
            self.snake.pending_growth = true;
            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            self.food = spawn_food(&self.snake.body, self.cell_count);
            outcome = TickOutcome::Ate;
        }

        let head = self.snake.head();
        if self.walls_enabled {
            if !head.in_bounds(self.cell_count) {
                self.running = false;
                return TickOutcome::Died;
            }
        } else {
            let wrapped = head.wrapped(self.cell_count);
            if wrapped != head {
                self.snake.body[0] = wrapped;
            }
        }

        if self.snake.hits_self() {
            self.running = false;
            return TickOutcome::Died;
        }

        outcome
    }

    /// Direction intents are dropped silently when the session is not
    /// accepting input or the request reverses the current heading.
    pub fn set_direction(&mut self, dir: Direction) {
        if !self.running || self.paused {
            return;
        }
        if dir != self.snake.direction.opposite() {
            self.next_direction = dir;
        }
    }

    /// Fresh snake, food and score; the high score survives.
    pub fn reset(&mut self) {
        self.snake.reset(self.cell_count);
        self.next_direction = self.snake.direction;
        self.food = spawn_food(&self.snake.body, self.cell_count);
        self.score = 0;
        self.running = true;
        self.paused = false;
    }

    /// Re-derives the grid geometry and boundary policy, repositioning snake
    /// and food since old coordinates are meaningless on the new grid.
    /// Score and run state are left alone.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.cell_count = settings.cell_count();
        self.walls_enabled = settings.walls_enabled;
        self.snake.reset(self.cell_count);
        self.next_direction = self.snake.direction;
        self.food = spawn_food(&self.snake.body, self.cell_count);
    }

    pub fn draw(&self, settings: &Settings) {
        let rect = grid::cell_rect(self.food, self.cell_count);
        draw_circle(
            rect.x + rect.w / 2.0,
            rect.y + rect.h / 2.0,
            CELL_SIZE as f32 / 2.0 - 2.0,
            UI_RED,
        );
        self.snake.draw(settings.snake_color(), self.cell_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GridSize;

    fn session() -> Session {
        Session::new(&Settings::default(), 0)
    }

    fn place(session: &mut Session, body: &[(i32, i32)], dir: Direction) {
        session.snake.body = body.iter().map(|&(x, y)| Cell::new(x, y)).collect();
        session.snake.direction = dir;
        session.next_direction = dir;
    }

    #[test]
    fn plain_move_keeps_length_and_advances_head() {
        let mut s = session();
        place(&mut s, &[(5, 10), (4, 10), (3, 10)], Direction::Right);
        s.food = Cell::new(1, 1);
        assert_eq!(s.update(), TickOutcome::Moved);
        assert_eq!(s.snake.head(), Cell::new(6, 10));
        assert_eq!(s.snake.body.len(), 3);
        assert!(s.running);
    }

    #[test]
    fn eating_scores_and_grows_on_the_following_move() {
        let mut s = session();
        place(&mut s, &[(5, 10), (4, 10), (3, 10)], Direction::Right);
        s.food = Cell::new(6, 10);

        assert_eq!(s.update(), TickOutcome::Ate);
        assert_eq!(s.score, 1);
        assert_eq!(s.high_score, 1);
        // Length unchanged this tick; the growth is pending.
        assert_eq!(s.snake.body.len(), 3);
        assert!(s.snake.pending_growth);
        // The relocated food avoids the new body.
        assert!(!s.snake.body.contains(&s.food));
        assert!(s.food.in_bounds(s.cell_count));

        s.food = Cell::new(1, 1);
        assert_eq!(s.update(), TickOutcome::Moved);
        assert_eq!(s.snake.body.len(), 4);
    }

    #[test]
    fn lethal_wall_ends_the_session() {
        let mut s = session();
        s.walls_enabled = true;
        place(&mut s, &[(19, 10), (18, 10), (17, 10)], Direction::Right);
        s.food = Cell::new(1, 1);
        assert_eq!(s.update(), TickOutcome::Died);
        assert!(!s.running);
    }

    #[test]
    fn disabled_walls_wrap_the_head() {
        let mut s = session();
        s.walls_enabled = false;
        place(&mut s, &[(19, 10), (18, 10), (17, 10)], Direction::Right);
        s.food = Cell::new(1, 1);
        assert_eq!(s.update(), TickOutcome::Moved);
        assert_eq!(s.snake.head(), Cell::new(0, 10));
        assert!(s.running);
    }

    #[test]
    fn self_collision_ends_the_session() {
        let mut s = session();
        // Head at (5,5) about to turn left into its own body at (4,5).
        place(
            &mut s,
            &[(5, 5), (5, 6), (4, 6), (4, 5), (3, 5)],
            Direction::Left,
        );
        s.food = Cell::new(1, 1);
        assert_eq!(s.update(), TickOutcome::Died);
        assert!(!s.running);
    }

    #[test]
    fn reversal_requests_are_dropped() {
        let mut s = session();
        place(&mut s, &[(5, 10), (4, 10), (3, 10)], Direction::Right);
        s.set_direction(Direction::Left);
        assert_eq!(s.next_direction, Direction::Right);
        s.set_direction(Direction::Up);
        assert_eq!(s.next_direction, Direction::Up);
    }

    #[test]
    fn input_ignored_while_paused_or_stopped() {
        let mut s = session();
        s.paused = true;
        s.set_direction(Direction::Up);
        assert_eq!(s.next_direction, Direction::Right);

        s.paused = false;
        s.running = false;
        s.set_direction(Direction::Up);
        assert_eq!(s.next_direction, Direction::Right);
    }

    #[test]
    fn update_is_a_no_op_unless_running_and_unpaused() {
        let mut s = session();
        let head = s.snake.head();
        s.paused = true;
        assert_eq!(s.update(), TickOutcome::Idle);
        assert_eq!(s.snake.head(), head);

        s.paused = false;
        s.running = false;
        assert_eq!(s.update(), TickOutcome::Idle);
        assert_eq!(s.snake.head(), head);
    }

    #[test]
    fn reset_preserves_the_high_score() {
        let mut s = session();
        place(&mut s, &[(5, 10), (4, 10), (3, 10)], Direction::Right);
        s.food = Cell::new(6, 10);
        s.update();
        assert_eq!(s.high_score, 1);

        s.paused = true;
        s.reset();
        assert_eq!(s.score, 0);
        assert_eq!(s.high_score, 1);
        assert!(s.running);
        assert!(!s.paused);
        assert_eq!(s.snake.body.len(), 3);
    }

    #[test]
    fn high_score_never_decreases() {
        let mut s = session();
        s.high_score = 10;
        place(&mut s, &[(5, 10), (4, 10), (3, 10)], Direction::Right);
        s.food = Cell::new(6, 10);
        s.update();
        assert_eq!(s.score, 1);
        assert_eq!(s.high_score, 10);
    }

    #[test]
    fn apply_settings_rebuilds_geometry_but_not_score() {
        let mut s = session();
        s.score = 7;
        let mut settings = Settings::default();
        settings.grid_size = GridSize::Large;
        settings.walls_enabled = false;
        s.apply_settings(&settings);
        assert_eq!(s.cell_count, 25);
        assert!(!s.walls_enabled);
        assert_eq!(s.score, 7);
        assert_eq!(s.snake.head(), Cell::new(8, 12));
        assert!(s.food.in_bounds(25));
        assert!(!s.snake.body.contains(&s.food));
    }

    #[test]
    fn food_never_lands_on_the_snake() {
        macroquad::rand::srand(42);
        let mut occupied: VecDeque<Cell> = VecDeque::new();
        // Occupy most of a tiny region to force retries.
        for x in 0..15 {
            for y in 0..14 {
                occupied.push_back(Cell::new(x, y));
            }
        }
        for _ in 0..100 {
            let food = spawn_food(&occupied, 15);
            assert!(!occupied.contains(&food));
            assert!(food.in_bounds(15));
        }
    }

    #[test]
    fn tick_gate_fires_at_the_configured_interval() {
        let mut gate = TickGate::new();
        assert!(gate.ready(1.0, 0.25));
        assert!(!gate.ready(1.1, 0.25));
        assert!(!gate.ready(1.24, 0.25));
        assert!(gate.ready(1.3, 0.25));
        assert!(!gate.ready(1.4, 0.25));
    }
}
