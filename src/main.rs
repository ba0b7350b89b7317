use macroquad::prelude::*;

mod audio;
mod game;
mod grid;
mod save;
mod screens;
mod settings;
mod snake;
mod ui;

use audio::AudioManager;
use game::{TickGate, TickOutcome};
use grid::Direction;
use screens::{Action, App, Screen};
use settings::ControlScheme;

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake, The Snake Game".to_owned(),
        window_width: grid::WINDOW_WIDTH,
        window_height: grid::WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

/// At most one directional intent per frame, under the active key binding.
fn direction_input(controls: ControlScheme) -> Option<Direction> {
    let (up, down, left, right) = match controls {
        ControlScheme::ArrowKeys => (KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right),
        ControlScheme::Wasd => (KeyCode::W, KeyCode::S, KeyCode::A, KeyCode::D),
    };
    if is_key_pressed(up) {
        Some(Direction::Up)
    } else if is_key_pressed(down) {
        Some(Direction::Down)
    } else if is_key_pressed(left) {
        Some(Direction::Left)
    } else if is_key_pressed(right) {
        Some(Direction::Right)
    } else {
        None
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut save_data = save::load();
    info!("starting with high score {}", save_data.high_score);

    let mut audio = AudioManager::load(save_data.settings.sound_volume_index).await;
    let mut app = App::new(save_data.settings.clone(), save_data.high_score);
    let mut gate = TickGate::new();

    loop {
        if app.should_quit {
            break;
        }

        audio.update_music();

        // Simulation: poll input, then advance one tick when the gate fires.
        if matches!(app.screen, Screen::Playing) {
            if let Some(dir) = direction_input(app.settings.controls) {
                app.session.set_direction(dir);
            }
            if gate.ready(get_time(), app.settings.tick_interval()) {
                match app.tick() {
                    TickOutcome::Ate => {
                        audio.play_eat();
                        if app.session.high_score > save_data.high_score {
                            save_data.high_score = app.session.high_score;
                            save::store(&save_data);
                        }
                    }
                    TickOutcome::Died => audio.play_game_over(),
                    TickOutcome::Moved | TickOutcome::Idle => {}
                }
            }
        }

        let action = match &mut app.screen {
            Screen::Menu => screens::menu_frame(&app.settings, app.session.high_score, &audio),
            Screen::Playing => screens::playing_frame(&app.session, &app.settings, &audio),
            Screen::Paused => screens::paused_frame(&app.session, &app.settings, &audio),
            Screen::Settings(state) => screens::settings_frame(state, &app.settings, &audio),
            Screen::GameOver => screens::game_over_frame(&app.session, &app.settings, &audio),
        };

        if let Some(action) = action {
            app.handle(action);
            match action {
                Action::Back => {
                    // Settings were just committed; propagate them to the
                    // collaborators that hold copies.
                    audio.set_volume_index(app.settings.sound_volume_index);
                    save_data.settings = app.settings.clone();
                    save::store(&save_data);
                }
                Action::ResetHighScore => save::delete_high_score(&mut save_data),
                _ => {}
            }
        }

        next_frame().await;
    }
}
