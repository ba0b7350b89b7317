use macroquad::prelude::*;

use crate::grid::WINDOW_WIDTH;
use crate::settings::{BEIGE, DARK_GREEN, PaletteEntry, UI_GRAY};

/// Immediate-mode widgets: built each frame from current state, updated from
/// the mouse, then drawn. Callers read back clicks and value changes.
pub trait Widget {
    fn update(&mut self);
    fn draw(&self);
}

fn brighten(color: Color, amount: f32) -> Color {
    Color::new(
        color.r + (1.0 - color.r) * amount,
        color.g + (1.0 - color.g) * amount,
        color.b + (1.0 - color.b) * amount,
        color.a,
    )
}

fn mouse_over(bounds: Rect) -> bool {
    let (mx, my) = mouse_position();
    bounds.contains(vec2(mx, my))
}

fn centered_text(text: &str, bounds: Rect, font_size: u16, color: Color) {
    let dims = measure_text(text, None, font_size, 1.0);
    draw_text(
        text,
        bounds.x + (bounds.w - dims.width) / 2.0,
        bounds.y + (bounds.h + dims.height) / 2.0,
        font_size as f32,
        color,
    );
}

/// Horizontally centered line of text, used for titles and hints.
pub fn draw_title(text: &str, y: f32, font_size: u16, color: Color) {
    let dims = measure_text(text, None, font_size, 1.0);
    draw_text(
        text,
        (WINDOW_WIDTH as f32 - dims.width) / 2.0,
        y,
        font_size as f32,
        color,
    );
}

pub struct Button {
    pub bounds: Rect,
    pub text: &'static str,
    pub font_size: u16,
    hovered: bool,
    clicked: bool,
}

impl Button {
    pub fn new(bounds: Rect, text: &'static str) -> Self {
        Self { bounds, text, font_size: 24, hovered: false, clicked: false }
    }

    pub fn clicked(&self) -> bool {
        self.clicked
    }
}

impl Widget for Button {
    fn update(&mut self) {
        self.hovered = mouse_over(self.bounds);
        self.clicked = self.hovered && is_mouse_button_pressed(MouseButton::Left);
    }

    fn draw(&self) {
        let fill = if self.hovered { brighten(BEIGE, 0.6) } else { BEIGE };
        draw_rectangle(self.bounds.x, self.bounds.y, self.bounds.w, self.bounds.h, fill);
        draw_rectangle_lines(self.bounds.x, self.bounds.y, self.bounds.w, self.bounds.h, 3.0, DARK_GREEN);
        centered_text(self.text, self.bounds, self.font_size, DARK_GREEN);
    }
}

pub struct ToggleButton {
    pub bounds: Rect,
    pub value: bool,
    hovered: bool,
    changed: bool,
}

impl ToggleButton {
    pub fn new(bounds: Rect, value: bool) -> Self {
        Self { bounds, value, hovered: false, changed: false }
    }

    pub fn changed(&self) -> bool {
        self.changed
    }
}

impl Widget for ToggleButton {
    fn update(&mut self) {
        self.hovered = mouse_over(self.bounds);
        self.changed = self.hovered && is_mouse_button_pressed(MouseButton::Left);
        if self.changed {
            self.value = !self.value;
        }
    }

    fn draw(&self) {
        let active = Color::new(0.18, 0.59, 0.18, 1.0);
        let mut fill = if self.value { active } else { UI_GRAY };
        if self.hovered {
            fill = brighten(fill, 0.3);
        }
        draw_rectangle(self.bounds.x, self.bounds.y, self.bounds.w, self.bounds.h, fill);
        draw_rectangle_lines(self.bounds.x, self.bounds.y, self.bounds.w, self.bounds.h, 3.0, DARK_GREEN);
        centered_text(if self.value { "ON" } else { "OFF" }, self.bounds, 16, WHITE);
    }
}

/// Cycles an index through a fixed option list via left/right arrows.
pub struct SelectorButton {
    pub bounds: Rect,
    pub index: usize,
    options: &'static [&'static str],
    left_hovered: bool,
    right_hovered: bool,
    changed: bool,
}

impl SelectorButton {
    pub fn new(bounds: Rect, index: usize, options: &'static [&'static str]) -> Self {
        Self {
            bounds,
            index: index.min(options.len() - 1),
            options,
            left_hovered: false,
            right_hovered: false,
            changed: false,
        }
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    fn arrows(&self) -> (Rect, Rect) {
        let left = Rect::new(self.bounds.x + 5.0, self.bounds.y + self.bounds.h / 2.0 - 10.0, 20.0, 20.0);
        let right = Rect::new(
            self.bounds.x + self.bounds.w - 25.0,
            self.bounds.y + self.bounds.h / 2.0 - 10.0,
            20.0,
            20.0,
        );
        (left, right)
    }

    fn draw_frame(&self, label: &str, label_color: Color) {
        draw_rectangle(self.bounds.x, self.bounds.y, self.bounds.w, self.bounds.h, BEIGE);
        draw_rectangle_lines(self.bounds.x, self.bounds.y, self.bounds.w, self.bounds.h, 3.0, DARK_GREEN);
        let left_color = if self.left_hovered { DARK_GREEN } else { UI_GRAY };
        let right_color = if self.right_hovered { DARK_GREEN } else { UI_GRAY };
        draw_text("<", self.bounds.x + 10.0, self.bounds.y + self.bounds.h / 2.0 + 6.0, 18.0, left_color);
        draw_text(
            ">",
            self.bounds.x + self.bounds.w - 22.0,
            self.bounds.y + self.bounds.h / 2.0 + 6.0,
            18.0,
            right_color,
        );
        centered_text(label, self.bounds, 16, label_color);
    }
}

impl Widget for SelectorButton {
    fn update(&mut self) {
        let (left, right) = self.arrows();
        self.left_hovered = mouse_over(left);
        self.right_hovered = mouse_over(right);
        self.changed = false;
        if is_mouse_button_pressed(MouseButton::Left) {
            if self.left_hovered {
                self.index = (self.index + self.options.len() - 1) % self.options.len();
                self.changed = true;
            } else if self.right_hovered {
                self.index = (self.index + 1) % self.options.len();
                self.changed = true;
            }
        }
    }

    fn draw(&self) {
        self.draw_frame(self.options[self.index], DARK_GREEN);
    }
}

/// Selector over a color palette, with a swatch next to the color name.
pub struct ColorSelector {
    inner: SelectorButton,
    palette: &'static [PaletteEntry],
}

impl ColorSelector {
    pub fn new(bounds: Rect, index: usize, palette: &'static [PaletteEntry]) -> Self {
        Self {
            inner: SelectorButton {
                bounds,
                index: index.min(palette.len() - 1),
                options: &[],
                left_hovered: false,
                right_hovered: false,
                changed: false,
            },
            palette,
        }
    }

    pub fn index(&self) -> usize {
        self.inner.index
    }

    pub fn changed(&self) -> bool {
        self.inner.changed
    }
}

impl Widget for ColorSelector {
    fn update(&mut self) {
        let (left, right) = self.inner.arrows();
        self.inner.left_hovered = mouse_over(left);
        self.inner.right_hovered = mouse_over(right);
        self.inner.changed = false;
        if is_mouse_button_pressed(MouseButton::Left) {
            if self.inner.left_hovered {
                self.inner.index = (self.inner.index + self.palette.len() - 1) % self.palette.len();
                self.inner.changed = true;
            } else if self.inner.right_hovered {
                self.inner.index = (self.inner.index + 1) % self.palette.len();
                self.inner.changed = true;
            }
        }
    }

    fn draw(&self) {
        let entry = self.palette[self.inner.index];
        self.inner.draw_frame(entry.name, DARK_GREEN);
        let b = self.inner.bounds;
        let swatch = Rect::new(b.x + b.w - 60.0, b.y + 5.0, b.h - 10.0, b.h - 10.0);
        draw_rectangle(swatch.x, swatch.y, swatch.w, swatch.h, entry.color);
        draw_rectangle_lines(swatch.x, swatch.y, swatch.w, swatch.h, 2.0, DARK_GREEN);
    }
}
