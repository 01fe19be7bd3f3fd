use color_eyre::Result;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Position, Rect},
};
use std::time::Instant;
use tracing::{debug, info};

use crate::audio::AudioManager;
use crate::game::Game;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::scores::ScoreStore;
use crate::settings::Settings;

/// The main application which drives the game loop around a [`Game`].
pub struct App {
    running: bool,
    game: Game,
    score_store: ScoreStore,
    /// Frames info
    frame_count: u64,
    last_frame_time: Instant,
    fps: u32,
    /// Terminal size at the last draw, for mouse hit testing
    last_area: Rect,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`], loading the saved high score.
    pub fn new(settings: Settings, reports_releases: bool) -> Self {
        let audio_manager = AudioManager::new(&settings);
        Self::with_audio(settings, reports_releases, audio_manager)
    }

    /// Like [`App::new`] but with a caller-provided audio manager.
    pub fn with_audio(
        settings: Settings,
        reports_releases: bool,
        audio_manager: AudioManager,
    ) -> Self {
        let score_store = ScoreStore::new(settings.scores_file.clone());
        let hi_score = score_store.load_or_init();
        info!(
            hi_score,
            scores = %score_store.path().display(),
            name = settings.name,
            "starting"
        );

        Self {
            running: true,
            game: Game::new(settings, hi_score),
            score_store,
            frame_count: 0,
            last_frame_time: Instant::now(),
            fps: 0,
            last_area: Rect::default(),
            input_manager: InputManager::new(reports_releases),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        let frame_budget = self.game.settings().frame_duration();

        while self.running {
            // Calculate FPS
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // Render the frame
            terminal.draw(|frame| {
                self.last_area = frame.area();
                let view = RenderView::from_game(&self.game, frame.area(), self.frame_count, self.fps);
                self.renderer.render(frame, &view);
            })?;

            // Poll input events and get actions
            self.input_manager.poll_events(self.game.state())?;
            let actions = self.input_manager.get_actions();

            self.update(&actions);
            if !self.running {
                break;
            }
            self.frame_count += 1;

            // Hold the frame rate cap
            let elapsed = now.elapsed();
            if elapsed < frame_budget {
                std::thread::sleep(frame_budget - elapsed);
            }
        }
        Ok(())
    }

    /// Applies one frame's actions, then advances the game one tick
    fn update(&mut self, actions: &[InputAction]) {
        self.process_actions(actions);
        if !self.running {
            return;
        }

        let events = self.game.tick();
        if events.impact() {
            self.audio_manager.play_impact_sound();
        }
        if events.game_over {
            self.save_hi_score();
        }
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.quit();
                    return;
                }
                InputAction::Pause => self.game.pause(),
                InputAction::Resume => self.game.resume(),
                InputAction::Restart => self.game.restart(),
                InputAction::Click { column, row } => self.handle_click(*column, *row),
                InputAction::MoveUp => self.game.start_moving_up(),
                InputAction::StopUp => self.game.stop_moving_up(),
                InputAction::MoveDown => self.game.start_moving_down(),
                InputAction::StopDown => self.game.stop_moving_down(),
                InputAction::Fire => {
                    if self.game.fire() {
                        self.audio_manager.play_laser_sound();
                    }
                }
            }
        }
    }

    /// The Play button only answers while no game is running
    fn handle_click(&mut self, column: u16, row: u16) {
        if self.game.is_active() {
            return;
        }
        let button = GameRenderer::play_button_area(self.last_area);
        if button.contains(Position::new(column, row)) {
            debug!(column, row, "play button clicked");
            self.game.restart();
        }
    }

    /// Set running to false to quit the application, saving the high score.
    fn quit(&mut self) {
        self.running = false;
        self.save_hi_score();
    }

    fn save_hi_score(&self) {
        self.score_store.save_or_log(self.game.stats().hi_score);
    }
}
