use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::entities::GameState;

/// Frames a movement key stays held when the terminal never reports
/// releases. Long enough to bridge the keyboard's initial repeat delay.
const HOLD_FRAMES: u8 = 32;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveUp,
    StopUp,
    MoveDown,
    StopDown,
    Fire,
    Pause,
    Resume,
    Restart,
    Quit,
    /// Left click at a terminal cell
    Click { column: u16, row: u16 },
}

/// Manages input polling and translates raw terminal events into game actions
pub struct InputManager {
    actions: Vec<InputAction>,
    reports_releases: bool,
    up_hold: u8,
    down_hold: u8,
}

impl InputManager {
    /// `reports_releases` says whether the terminal sends key-release events.
    /// Without them, held movement keys time out instead.
    pub fn new(reports_releases: bool) -> Self {
        Self {
            actions: Vec::new(),
            reports_releases,
            up_hold: 0,
            down_hold: 0,
        }
    }

    /// Polls for all input events and stores the resulting actions.
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.actions.clear();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event, game_state),
                Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
                _ => {}
            }
        }

        if !self.reports_releases {
            self.expire_holds();
        }
        Ok(())
    }

    /// Returns the actions gathered by the last `poll_events` call
    pub fn get_actions(&self) -> Vec<InputAction> {
        self.actions.clone()
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            KeyEventKind::Repeat => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.actions.push(InputAction::Quit);
            return;
        }

        match game_state {
            GameState::Active | GameState::LifeLost { .. } => match key_event.code {
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.actions.push(InputAction::Pause);
                }
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    self.up_hold = HOLD_FRAMES;
                    self.actions.push(InputAction::MoveUp);
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    self.down_hold = HOLD_FRAMES;
                    self.actions.push(InputAction::MoveDown);
                }
                KeyCode::Char(' ') => {
                    self.actions.push(InputAction::Fire);
                }
                _ => {}
            },
            GameState::Paused => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.actions.push(InputAction::Resume);
                }
            }
            GameState::Inactive | GameState::GameOver => {
                if matches!(
                    key_event.code,
                    KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')
                ) {
                    self.actions.push(InputAction::Restart);
                }
            }
        }
    }

    /// Releases stop movement whatever state the game is in
    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.up_hold = 0;
                self.actions.push(InputAction::StopUp);
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.down_hold = 0;
                self.actions.push(InputAction::StopDown);
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if mouse_event.kind == MouseEventKind::Down(MouseButton::Left) {
            self.actions.push(InputAction::Click {
                column: mouse_event.column,
                row: mouse_event.row,
            });
        }
    }

    fn expire_holds(&mut self) {
        if self.up_hold > 0 {
            self.up_hold -= 1;
            if self.up_hold == 0 {
                self.actions.push(InputAction::StopUp);
            }
        }
        if self.down_hold > 0 {
            self.down_hold -= 1;
            if self.down_hold == 0 {
                self.actions.push(InputAction::StopDown);
            }
        }
    }
}
