use macroquad::prelude::*;

use crate::audio::AudioManager;
use crate::game::{Session, TickOutcome};
use crate::grid::{self, CELL_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::settings::{
    BACKGROUND_COLORS, BEIGE, ControlScheme, DARK_GREEN, Difficulty, GridSize, SNAKE_COLORS,
    Settings, UI_GRAY, UI_RED, VOLUME_LABELS,
};
use crate::ui::{Button, ColorSelector, SelectorButton, ToggleButton, Widget, draw_title};

/// Where the settings screen returns to on Back.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ReturnTo {
    Menu,
    Paused,
}

/// Settings edits are buffered in a draft and committed only on Back, so a
/// half-changed configuration is never observable mid-tick.
pub struct SettingsScreen {
    pub draft: Settings,
    pub return_to: ReturnTo,
}

pub enum Screen {
    Menu,
    Playing,
    Paused,
    Settings(SettingsScreen),
    GameOver,
}

/// Discrete UI intents, produced by buttons and key presses.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
    Start,
    OpenSettings,
    Exit,
    Pause,
    Resume,
    Restart,
    Menu,
    Back,
    ResetHighScore,
}

pub struct App {
    pub settings: Settings,
    pub session: Session,
    pub screen: Screen,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings, high_score: u32) -> Self {
        let session = Session::new(&settings, high_score);
        Self {
            settings,
            session,
            screen: Screen::Menu,
            should_quit: false,
        }
    }

    /// Applies one transition of the screen state machine. Actions that are
    /// not legal in the current screen are ignored.
    pub fn handle(&mut self, action: Action) {
        let mut next: Option<Screen> = None;
        match (&self.screen, action) {
            (Screen::Menu, Action::Start) => {
                self.session.apply_settings(&self.settings);
                self.session.reset();
                next = Some(Screen::Playing);
            }
            (Screen::Menu, Action::OpenSettings) => {
                next = Some(Screen::Settings(SettingsScreen {
                    draft: self.settings.clone(),
                    return_to: ReturnTo::Menu,
                }));
            }
            (Screen::Menu, Action::Exit) => self.should_quit = true,

            (Screen::Playing, Action::Pause) => {
                self.session.paused = true;
                next = Some(Screen::Paused);
            }
            (Screen::Playing, Action::Restart) => self.session.reset(),

            (Screen::Paused, Action::Resume) => {
                self.session.paused = false;
                next = Some(Screen::Playing);
            }
            (Screen::Paused, Action::Restart) => {
                self.session.reset();
                next = Some(Screen::Playing);
            }
            (Screen::Paused, Action::OpenSettings) => {
                next = Some(Screen::Settings(SettingsScreen {
                    draft: self.settings.clone(),
                    return_to: ReturnTo::Paused,
                }));
            }
            (Screen::Paused, Action::Menu) => {
                self.session.reset();
                next = Some(Screen::Menu);
            }

            (Screen::Settings(state), Action::Back) => {
                let grid_changed = state.draft.grid_size != self.settings.grid_size;
                let return_to = state.return_to;
                self.settings = state.draft.clone();
                self.session.walls_enabled = self.settings.walls_enabled;
                if grid_changed {
                    self.session.apply_settings(&self.settings);
                }
                next = Some(match return_to {
                    ReturnTo::Menu => Screen::Menu,
                    ReturnTo::Paused => {
                        self.session.paused = true;
                        Screen::Paused
                    }
                });
            }
            (Screen::Settings(_), Action::ResetHighScore) => self.session.high_score = 0,

            (Screen::GameOver, Action::Restart) => {
                self.session.reset();
                next = Some(Screen::Playing);
            }
            (Screen::GameOver, Action::Menu) => {
                self.session.reset();
                next = Some(Screen::Menu);
            }

            _ => {}
        }
        if let Some(screen) = next {
            self.screen = screen;
        }
    }

    /// One gated simulation step while on the playing screen; a death moves
    /// the state machine to GameOver.
    pub fn tick(&mut self) -> TickOutcome {
        if !matches!(self.screen, Screen::Playing) {
            return TickOutcome::Idle;
        }
        let outcome = self.session.update();
        if outcome == TickOutcome::Died {
            self.screen = Screen::GameOver;
        }
        outcome
    }
}

const W: f32 = WINDOW_WIDTH as f32;
const H: f32 = WINDOW_HEIGHT as f32;

fn run_button(button: &mut Button, audio: &AudioManager) -> bool {
    button.update();
    button.draw();
    if button.clicked() {
        audio.play_click();
        true
    } else {
        false
    }
}

fn key_action(audio: &AudioManager, action: Action) -> Option<Action> {
    audio.play_click();
    Some(action)
}

pub fn menu_frame(settings: &Settings, high_score: u32, audio: &AudioManager) -> Option<Action> {
    clear_background(settings.background_color());
    draw_title("Snake, The Snake Game", 130.0, 60, DARK_GREEN);
    let subtitle = match settings.controls {
        ControlScheme::ArrowKeys => "Use arrow keys to move, SPACE to pause",
        ControlScheme::Wasd => "Use WASD to move, SPACE to pause",
    };
    draw_title(subtitle, 195.0, 20, DARK_GREEN);
    draw_title(&format!("High Score: {high_score}"), 240.0, 24, DARK_GREEN);

    let mut start = Button::new(Rect::new(W / 2.0 - 120.0, 320.0, 240.0, 60.0), "Start Game");
    let mut open_settings = Button::new(Rect::new(W / 2.0 - 120.0, 400.0, 240.0, 60.0), "Settings");
    let mut exit = Button::new(Rect::new(W / 2.0 - 120.0, 480.0, 240.0, 60.0), "Exit");

    draw_title("Press ENTER to Start, ESC to Exit", H - 60.0, 16, UI_GRAY);

    if run_button(&mut start, audio) {
        return Some(Action::Start);
    }
    if run_button(&mut open_settings, audio) {
        return Some(Action::OpenSettings);
    }
    if run_button(&mut exit, audio) {
        return Some(Action::Exit);
    }
    if is_key_pressed(KeyCode::Enter) {
        return key_action(audio, Action::Start);
    }
    if is_key_pressed(KeyCode::Escape) {
        return key_action(audio, Action::Exit);
    }
    None
}

pub fn settings_frame(
    state: &mut SettingsScreen,
    committed: &Settings,
    audio: &AudioManager,
) -> Option<Action> {
    clear_background(committed.background_color());
    draw_title("Settings", 80.0, 50, DARK_GREEN);

    let panel = Rect::new(W / 2.0 - 300.0, 100.0, 600.0, 680.0);
    draw_rectangle(panel.x, panel.y, panel.w, panel.h, Color::new(1.0, 1.0, 1.0, 0.3));
    draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 3.0, DARK_GREEN);

    let left = W / 2.0 - 260.0;
    let right = W / 2.0 + 20.0;
    let draft = &mut state.draft;

    draw_text("GAMEPLAY", left, 150.0, 24.0, DARK_GREEN);
    draw_line(left, 158.0, left + 240.0, 158.0, 2.0, DARK_GREEN);

    draw_text("Difficulty", left, 186.0, 16.0, DARK_GREEN);
    let mut difficulty = SelectorButton::new(
        Rect::new(left, 196.0, 240.0, 45.0),
        draft.difficulty as usize,
        &Difficulty::LABELS,
    );
    difficulty.update();
    difficulty.draw();
    if difficulty.changed() {
        draft.difficulty = Difficulty::from_index(difficulty.index);
        audio.play_click();
    }

    draw_text("Grid Size", left, 261.0, 16.0, DARK_GREEN);
    let mut grid_size = SelectorButton::new(
        Rect::new(left, 271.0, 240.0, 45.0),
        draft.grid_size as usize,
        &GridSize::LABELS,
    );
    grid_size.update();
    grid_size.draw();
    if grid_size.changed() {
        draft.grid_size = GridSize::from_index(grid_size.index);
        audio.play_click();
    }

    draw_text("Walls (Die on collision)", left, 336.0, 16.0, DARK_GREEN);
    let mut walls = ToggleButton::new(Rect::new(left, 346.0, 100.0, 40.0), draft.walls_enabled);
    walls.update();
    walls.draw();
    if walls.changed() {
        draft.walls_enabled = walls.value;
        audio.play_click();
    }

    draw_text("AUDIO & CONTROLS", right, 150.0, 24.0, DARK_GREEN);
    draw_line(right, 158.0, right + 240.0, 158.0, 2.0, DARK_GREEN);

    draw_text("Sound Volume", right, 186.0, 16.0, DARK_GREEN);
    let mut volume = SelectorButton::new(
        Rect::new(right, 196.0, 240.0, 45.0),
        draft.sound_volume_index,
        &VOLUME_LABELS,
    );
    volume.update();
    volume.draw();
    if volume.changed() {
        draft.sound_volume_index = volume.index;
        audio.play_click();
    }

    draw_text("Controls", right, 261.0, 16.0, DARK_GREEN);
    let mut controls = SelectorButton::new(
        Rect::new(right, 271.0, 240.0, 45.0),
        draft.controls as usize,
        &ControlScheme::LABELS,
    );
    controls.update();
    controls.draw();
    if controls.changed() {
        draft.controls = ControlScheme::from_index(controls.index);
        audio.play_click();
    }

    let mut reset_high = Button::new(Rect::new(right, 346.0, 240.0, 40.0), "Reset High Score");
    reset_high.font_size = 16;
    let reset_clicked = run_button(&mut reset_high, audio);

    draw_text("CUSTOMIZATION", W / 2.0 - 80.0, 500.0, 24.0, DARK_GREEN);
    draw_line(W / 2.0 - 120.0, 508.0, W / 2.0 + 120.0, 508.0, 2.0, DARK_GREEN);

    draw_text("Snake Color", W / 2.0 - 140.0, 536.0, 16.0, DARK_GREEN);
    let mut snake_color = ColorSelector::new(
        Rect::new(W / 2.0 - 140.0, 546.0, 280.0, 45.0),
        draft.snake_color_index,
        &SNAKE_COLORS,
    );
    snake_color.update();
    snake_color.draw();
    if snake_color.changed() {
        draft.snake_color_index = snake_color.index();
        audio.play_click();
    }

    draw_text("Background Color", W / 2.0 - 140.0, 611.0, 16.0, DARK_GREEN);
    let mut bg_color = ColorSelector::new(
        Rect::new(W / 2.0 - 140.0, 621.0, 280.0, 45.0),
        draft.background_color_index,
        &BACKGROUND_COLORS,
    );
    bg_color.update();
    bg_color.draw();
    if bg_color.changed() {
        draft.background_color_index = bg_color.index();
        audio.play_click();
    }

    // Live preview of the drafted colors.
    let preview = Rect::new(W / 2.0 - 60.0, 690.0, 120.0, 60.0);
    draw_rectangle(preview.x, preview.y, preview.w, preview.h, draft.background_color());
    draw_rectangle_lines(preview.x, preview.y, preview.w, preview.h, 2.0, DARK_GREEN);
    for i in 0..3 {
        draw_rectangle(
            W / 2.0 - 40.0 + i as f32 * 25.0,
            705.0,
            20.0,
            20.0,
            draft.snake_color(),
        );
    }

    let mut back = Button::new(Rect::new(W / 2.0 - 60.0, 800.0, 120.0, 50.0), "Back");
    let back_clicked = run_button(&mut back, audio);

    draw_title("Press ESC or BACKSPACE to go back", H - 40.0, 16, UI_GRAY);

    if reset_clicked {
        return Some(Action::ResetHighScore);
    }
    if back_clicked {
        return Some(Action::Back);
    }
    if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Backspace) {
        return key_action(audio, Action::Back);
    }
    None
}

fn draw_board(session: &Session, settings: &Settings) {
    clear_background(settings.background_color());

    let offset_x = grid::game_offset_x(session.cell_count) as f32;
    let offset_y = grid::game_offset_y(session.cell_count) as f32;
    let side = (CELL_SIZE * session.cell_count) as f32;
    draw_rectangle_lines(offset_x - 5.0, offset_y - 5.0, side + 10.0, side + 10.0, 5.0, DARK_GREEN);

    session.draw(settings);

    draw_title("Snake, The Snake Game", 45.0, 35, DARK_GREEN);
    draw_text(
        &format!("Score: {}", session.score),
        offset_x,
        offset_y + side + 40.0,
        30.0,
        DARK_GREEN,
    );
    let high = format!("High Score: {}", session.high_score);
    let high_width = measure_text(&high, None, 24, 1.0).width;
    draw_text(&high, offset_x + side - high_width, offset_y + side + 40.0, 24.0, UI_GRAY);

    draw_text(
        &format!("Difficulty: {}", settings.difficulty.label()),
        20.0,
        70.0,
        16.0,
        DARK_GREEN,
    );
    let walls = if session.walls_enabled { "Walls: ON" } else { "Walls: OFF" };
    let walls_width = measure_text(walls, None, 16, 1.0).width;
    draw_text(walls, W - walls_width - 20.0, 70.0, 16.0, DARK_GREEN);

    let hint = match settings.controls {
        ControlScheme::ArrowKeys => "Arrow Keys to move | SPACE: Pause | R: Restart",
        ControlScheme::Wasd => "WASD to move | SPACE: Pause | R: Restart",
    };
    draw_title(hint, H - 30.0, 14, UI_GRAY);
}

pub fn playing_frame(session: &Session, settings: &Settings, audio: &AudioManager) -> Option<Action> {
    draw_board(session, settings);

    if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Escape) {
        return key_action(audio, Action::Pause);
    }
    if is_key_pressed(KeyCode::R) {
        return key_action(audio, Action::Restart);
    }
    None
}

pub fn paused_frame(session: &Session, settings: &Settings, audio: &AudioManager) -> Option<Action> {
    draw_board(session, settings);
    draw_rectangle(0.0, 0.0, W, H, Color::new(0.0, 0.0, 0.0, 0.7));

    let panel = Rect::new(W / 2.0 - 150.0, 200.0, 300.0, 400.0);
    draw_rectangle(panel.x, panel.y, panel.w, panel.h, Color::new(BEIGE.r, BEIGE.g, BEIGE.b, 0.95));
    draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 3.0, DARK_GREEN);
    draw_title("PAUSED", 270.0, 40, DARK_GREEN);

    let mut resume = Button::new(Rect::new(W / 2.0 - 110.0, 300.0, 220.0, 55.0), "Resume");
    let mut restart = Button::new(Rect::new(W / 2.0 - 110.0, 370.0, 220.0, 55.0), "Restart");
    let mut open_settings = Button::new(Rect::new(W / 2.0 - 110.0, 440.0, 220.0, 55.0), "Settings");
    let mut menu = Button::new(Rect::new(W / 2.0 - 110.0, 510.0, 220.0, 55.0), "Main Menu");

    draw_title("Press SPACE to Resume", 590.0, 16, UI_GRAY);

    if run_button(&mut resume, audio) {
        return Some(Action::Resume);
    }
    if run_button(&mut restart, audio) {
        return Some(Action::Restart);
    }
    if run_button(&mut open_settings, audio) {
        return Some(Action::OpenSettings);
    }
    if run_button(&mut menu, audio) {
        return Some(Action::Menu);
    }
    if is_key_pressed(KeyCode::Space) {
        return key_action(audio, Action::Resume);
    }
    if is_key_pressed(KeyCode::R) {
        return key_action(audio, Action::Restart);
    }
    if is_key_pressed(KeyCode::Escape) {
        return key_action(audio, Action::Menu);
    }
    None
}

pub fn game_over_frame(
    session: &Session,
    settings: &Settings,
    audio: &AudioManager,
) -> Option<Action> {
    draw_board(session, settings);
    draw_rectangle(0.0, 0.0, W, H, Color::new(0.0, 0.0, 0.0, 0.7));

    let panel = Rect::new(W / 2.0 - 180.0, 200.0, 360.0, 350.0);
    draw_rectangle(panel.x, panel.y, panel.w, panel.h, Color::new(BEIGE.r, BEIGE.g, BEIGE.b, 0.95));
    draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 3.0, DARK_GREEN);

    draw_title("GAME OVER", 275.0, 45, UI_RED);
    draw_title(&format!("Score: {}", session.score), 330.0, 30, DARK_GREEN);
    draw_title(&format!("High Score: {}", session.high_score), 370.0, 24, UI_GRAY);

    let mut restart = Button::new(Rect::new(W / 2.0 - 110.0, 410.0, 220.0, 55.0), "Restart");
    let mut menu = Button::new(Rect::new(W / 2.0 - 110.0, 480.0, 220.0, 55.0), "Main Menu");

    draw_title("Press R to Restart, ESC for Menu", 590.0, 16, UI_GRAY);

    if run_button(&mut restart, audio) {
        return Some(Action::Restart);
    }
    if run_button(&mut menu, audio) {
        return Some(Action::Menu);
    }
    if is_key_pressed(KeyCode::R) {
        return key_action(audio, Action::Restart);
    }
    if is_key_pressed(KeyCode::Escape) {
        return key_action(audio, Action::Menu);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Direction};

    fn app() -> App {
        App::new(Settings::default(), 0)
    }

    #[test]
    fn starts_on_the_menu() {
        let app = app();
        assert!(matches!(app.screen, Screen::Menu));
        assert!(!app.should_quit);
    }

    #[test]
    fn start_resets_the_session_and_enters_playing() {
        let mut a = app();
        a.session.score = 5;
        a.handle(Action::Start);
        assert!(matches!(a.screen, Screen::Playing));
        assert_eq!(a.session.score, 0);
        assert!(a.session.running);
        assert!(!a.session.paused);
    }

    #[test]
    fn exit_only_works_from_the_menu() {
        let mut a = app();
        a.handle(Action::Start);
        a.handle(Action::Exit);
        assert!(!a.should_quit);
        a.handle(Action::Pause);
        a.handle(Action::Menu);
        a.handle(Action::Exit);
        assert!(a.should_quit);
    }

    #[test]
    fn pause_and_resume_round_trip() {
        let mut a = app();
        a.handle(Action::Start);
        a.handle(Action::Pause);
        assert!(matches!(a.screen, Screen::Paused));
        assert!(a.session.paused);
        a.handle(Action::Resume);
        assert!(matches!(a.screen, Screen::Playing));
        assert!(!a.session.paused);
    }

    #[test]
    fn death_during_a_tick_transitions_to_game_over() {
        let mut a = app();
        a.handle(Action::Start);
        a.session.walls_enabled = true;
        a.session.snake.body =
            [(19, 10), (18, 10), (17, 10)].iter().map(|&(x, y)| Cell::new(x, y)).collect();
        a.session.snake.direction = Direction::Right;
        a.session.next_direction = Direction::Right;
        assert_eq!(a.tick(), TickOutcome::Died);
        assert!(matches!(a.screen, Screen::GameOver));
        assert!(!a.session.running);
    }

    #[test]
    fn ticks_only_advance_on_the_playing_screen() {
        let mut a = app();
        let head = a.session.snake.head();
        assert_eq!(a.tick(), TickOutcome::Idle);
        assert_eq!(a.session.snake.head(), head);
    }

    #[test]
    fn game_over_restart_and_menu_both_reset() {
        let mut a = app();
        a.handle(Action::Start);
        a.session.running = false;
        a.screen = Screen::GameOver;
        a.session.high_score = 3;
        a.handle(Action::Restart);
        assert!(matches!(a.screen, Screen::Playing));
        assert!(a.session.running);
        assert_eq!(a.session.high_score, 3);

        a.screen = Screen::GameOver;
        a.handle(Action::Menu);
        assert!(matches!(a.screen, Screen::Menu));
        assert!(a.session.running);
    }

    #[test]
    fn settings_from_menu_commits_draft_on_back() {
        let mut a = app();
        a.handle(Action::OpenSettings);
        match &mut a.screen {
            Screen::Settings(state) => {
                assert_eq!(state.return_to, ReturnTo::Menu);
                state.draft.grid_size = GridSize::Large;
                state.draft.walls_enabled = false;
            }
            _ => panic!("expected settings screen"),
        }
        a.handle(Action::Back);
        assert!(matches!(a.screen, Screen::Menu));
        assert_eq!(a.settings.grid_size, GridSize::Large);
        assert_eq!(a.session.cell_count, 25);
        assert!(!a.session.walls_enabled);
    }

    #[test]
    fn grid_change_from_pause_repositions_and_returns_paused() {
        let mut a = app();
        a.handle(Action::Start);
        a.handle(Action::Pause);
        a.handle(Action::OpenSettings);
        match &mut a.screen {
            Screen::Settings(state) => {
                assert_eq!(state.return_to, ReturnTo::Paused);
                state.draft.grid_size = GridSize::Large;
            }
            _ => panic!("expected settings screen"),
        }
        a.handle(Action::Back);
        assert!(matches!(a.screen, Screen::Paused));
        assert!(a.session.paused);
        assert_eq!(a.session.cell_count, 25);
        assert!(a.session.snake.head().in_bounds(25));
        assert!(a.session.food.in_bounds(25));
        assert!(!a.session.snake.body.contains(&a.session.food));

        a.handle(Action::Resume);
        assert!(matches!(a.screen, Screen::Playing));
    }

    #[test]
    fn unchanged_grid_size_keeps_snake_in_place() {
        let mut a = app();
        a.handle(Action::Start);
        // Advance a bit so a reposition would be visible.
        a.tick();
        a.tick();
        let head = a.session.snake.head();
        a.handle(Action::Pause);
        a.handle(Action::OpenSettings);
        if let Screen::Settings(state) = &mut a.screen {
            state.draft.snake_color_index = 2;
        }
        a.handle(Action::Back);
        assert_eq!(a.session.snake.head(), head);
        assert_eq!(a.settings.snake_color_index, 2);
    }

    #[test]
    fn reset_high_score_clears_the_session_copy() {
        let mut a = app();
        a.session.high_score = 12;
        a.handle(Action::OpenSettings);
        a.handle(Action::ResetHighScore);
        assert_eq!(a.session.high_score, 0);
        // Still on the settings screen.
        assert!(matches!(a.screen, Screen::Settings(_)));
    }

    #[test]
    fn illegal_actions_are_ignored() {
        let mut a = app();
        a.handle(Action::Pause);
        assert!(matches!(a.screen, Screen::Menu));
        a.handle(Action::Start);
        a.handle(Action::Start);
        assert!(matches!(a.screen, Screen::Playing));
        a.handle(Action::Back);
        assert!(matches!(a.screen, Screen::Playing));
    }
}
