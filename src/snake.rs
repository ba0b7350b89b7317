use std::collections::VecDeque;

use macroquad::prelude::*;

use crate::grid::{self, Cell, Direction, CELL_SIZE};

/// Snake body as an ordered chain of cells, head first.
pub struct Snake {
    pub body: VecDeque<Cell>,
    pub direction: Direction,
    pub pending_growth: bool,
}

impl Snake {
    pub fn new(cell_count: i32) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            direction: Direction::Right,
            pending_growth: false,
        };
        snake.reset(cell_count);
        snake
    }

    /// Three horizontal segments placed relative to the grid size so the
    /// snake starts centered and visible on any grid.
    pub fn reset(&mut self, cell_count: i32) {
        let start_x = cell_count / 4;
        let start_y = cell_count / 2;
        self.body = VecDeque::from([
            Cell::new(start_x + 2, start_y),
            Cell::new(start_x + 1, start_y),
            Cell::new(start_x, start_y),
        ]);
        self.direction = Direction::Right;
        self.pending_growth = false;
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// One movement step: prepend the new head, then either consume the
    /// pending-growth flag (tail kept, net length +1) or drop the tail.
    /// No bounds checking here; boundary policy is the session's job.
    pub fn advance(&mut self) {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);
        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Head overlapping any other segment.
    pub fn hits_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }

    pub fn draw(&self, color: Color, cell_count: i32) {
        for (i, &cell) in self.body.iter().enumerate() {
            let rect = grid::cell_rect(cell, cell_count);
            draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
            if i == 0 {
                self.draw_eyes(rect);
            }
        }
    }

    // Two eyes on the leading edge of the head.
    fn draw_eyes(&self, head: Rect) {
        let eye_size = CELL_SIZE as f32 * 0.15;
        let off = CELL_SIZE as f32 * 0.25;
        let (a, b) = match self.direction {
            Direction::Right => (
                (head.x + head.w - off, head.y + off),
                (head.x + head.w - off, head.y + head.h - off),
            ),
            Direction::Left => (
                (head.x + off, head.y + off),
                (head.x + off, head.y + head.h - off),
            ),
            Direction::Up => (
                (head.x + off, head.y + off),
                (head.x + head.w - off, head.y + off),
            ),
            Direction::Down => (
                (head.x + off, head.y + head.h - off),
                (head.x + head.w - off, head.y + head.h - off),
            ),
        };
        draw_circle(a.0, a.1, eye_size, WHITE);
        draw_circle(b.0, b.1, eye_size, WHITE);
    }
}
