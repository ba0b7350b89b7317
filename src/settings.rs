use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};

// Shared UI colors.
pub const DARK_GREEN: Color = Color::new(0.18, 0.31, 0.17, 1.0);
pub const BEIGE: Color = Color::new(1.0, 0.95, 0.79, 1.0);
pub const UI_RED: Color = Color::new(1.0, 0.25, 0.20, 1.0);
pub const UI_GRAY: Color = Color::new(0.50, 0.50, 0.50, 1.0);

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const LABELS: [&'static str; 3] = ["Easy", "Normal", "Hard"];

    /// Seconds between simulation ticks.
    pub fn tick_interval(self) -> f64 {
        match self {
            Difficulty::Easy => 0.4,
            Difficulty::Normal => 0.25,
            Difficulty::Hard => 0.15,
        }
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Difficulty::Easy,
            2 => Difficulty::Hard,
            _ => Difficulty::Normal,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GridSize {
    Small,
    Medium,
    Large,
}

impl GridSize {
    pub const LABELS: [&'static str; 3] = ["Small", "Medium", "Large"];

    pub fn cell_count(self) -> i32 {
        match self {
            GridSize::Small => 15,
            GridSize::Medium => 20,
            GridSize::Large => 25,
        }
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            0 => GridSize::Small,
            2 => GridSize::Large,
            _ => GridSize::Medium,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ControlScheme {
    ArrowKeys,
    Wasd,
}

impl ControlScheme {
    pub const LABELS: [&'static str; 2] = ["Arrow Keys", "WASD"];

    pub fn from_index(index: usize) -> Self {
        if index == 1 { ControlScheme::Wasd } else { ControlScheme::ArrowKeys }
    }
}

/// A palette entry keeps the color and its display name together.
#[derive(Copy, Clone)]
pub struct PaletteEntry {
    pub color: Color,
    pub name: &'static str,
}

pub const SNAKE_COLORS: [PaletteEntry; 6] = [
    PaletteEntry { color: DARK_GREEN, name: "Green" },
    PaletteEntry { color: Color::new(0.27, 0.51, 0.71, 1.0), name: "Blue" },
    PaletteEntry { color: Color::new(0.50, 0.0, 0.50, 1.0), name: "Purple" },
    PaletteEntry { color: UI_RED, name: "Red" },
    PaletteEntry { color: Color::new(1.0, 0.65, 0.0, 1.0), name: "Orange" },
    PaletteEntry { color: Color::new(0.0, 1.0, 1.0, 1.0), name: "Cyan" },
];

pub const BACKGROUND_COLORS: [PaletteEntry; 5] = [
    PaletteEntry { color: Color::new(1.0, 0.72, 0.14, 1.0), name: "Yellow" },
    PaletteEntry { color: Color::new(0.68, 0.85, 0.90, 1.0), name: "Light Blue" },
    PaletteEntry { color: Color::new(1.0, 0.71, 0.76, 1.0), name: "Pink" },
    PaletteEntry { color: Color::new(0.65, 0.76, 0.66, 1.0), name: "Light Green" },
    PaletteEntry { color: Color::new(1.0, 1.0, 1.0, 1.0), name: "White" },
];

pub const MAX_VOLUME_INDEX: usize = 4;
pub const VOLUME_LABELS: [&str; 5] = ["Off", "25%", "50%", "75%", "100%"];

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub grid_size: GridSize,
    pub walls_enabled: bool,
    pub controls: ControlScheme,
    pub sound_volume_index: usize,
    pub snake_color_index: usize,
    pub background_color_index: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            grid_size: GridSize::Medium,
            walls_enabled: true,
            controls: ControlScheme::ArrowKeys,
            sound_volume_index: MAX_VOLUME_INDEX,
            snake_color_index: 0,
            background_color_index: 0,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> f64 {
        self.difficulty.tick_interval()
    }

    pub fn cell_count(&self) -> i32 {
        self.grid_size.cell_count()
    }

    pub fn snake_color(&self) -> Color {
        SNAKE_COLORS[self.snake_color_index % SNAKE_COLORS.len()].color
    }

    pub fn background_color(&self) -> Color {
        BACKGROUND_COLORS[self.background_color_index % BACKGROUND_COLORS.len()].color
    }

    /// Volume index 0..=4 mapped to 0.0..=1.0.
    pub fn volume(&self) -> f32 {
        self.sound_volume_index.min(MAX_VOLUME_INDEX) as f32 * 0.25
    }
}
