use std::fs;

use macroquad::logging::warn;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

const SAVE_PATH: &str = "snake_save.json";

/// Everything that survives a restart: the best score and the last-used
/// settings. An absent or unreadable file means defaults (high score 0).
#[derive(Serialize, Deserialize, Default)]
pub struct SaveData {
    pub high_score: u32,
    pub settings: Settings,
}

pub fn load() -> SaveData {
    match fs::read_to_string(SAVE_PATH) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
            warn!("ignoring unreadable save file {}: {}", SAVE_PATH, err);
            SaveData::default()
        }),
        Err(_) => SaveData::default(),
    }
}

pub fn store(data: &SaveData) {
    let json = serde_json::to_string_pretty(data).unwrap_or_default();
    if let Err(err) = fs::write(SAVE_PATH, json) {
        warn!("failed to write {}: {}", SAVE_PATH, err);
    }
}

pub fn delete_high_score(data: &mut SaveData) {
    data.high_score = 0;
    store(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_data_round_trips_through_json() {
        let mut data = SaveData::default();
        data.high_score = 42;
        data.settings.walls_enabled = false;
        let json = serde_json::to_string(&data).unwrap();
        let back: SaveData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.high_score, 42);
        assert!(!back.settings.walls_enabled);
    }

    #[test]
    fn garbage_json_falls_back_to_defaults() {
        let data: SaveData = serde_json::from_str("not json").unwrap_or_default();
        assert_eq!(data.high_score, 0);
        assert_eq!(data.settings, Settings::default());
    }
}
