/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No game running; the Play button is showing
    Inactive,
    Active,
    Paused,
    /// A ship was just lost; simulation is frozen for a few ticks
    LifeLost { ticks_remaining: u32 },
    GameOver,
}

impl GameState {
    /// True while a game is in progress, including its frozen moments.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            GameState::Active | GameState::Paused | GameState::LifeLost { .. }
        )
    }

    pub fn is_game_over(&self) -> bool {
        *self == GameState::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(GameState::Active.is_active());
        assert!(GameState::Paused.is_active());
        assert!(GameState::LifeLost { ticks_remaining: 3 }.is_active());
        assert!(!GameState::Inactive.is_active());
        assert!(!GameState::GameOver.is_active());
    }

    #[test]
    fn test_game_over_flag() {
        assert!(GameState::GameOver.is_game_over());
        assert!(!GameState::Active.is_game_over());
    }
}
