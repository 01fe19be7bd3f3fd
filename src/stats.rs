use crate::settings::Settings;

/// Score, lives and level for the running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    /// Best score reached since the program started
    pub max_score: u32,
    /// Best score ever, loaded from and saved to disk
    pub hi_score: u32,
    pub ships_left: u32,
    pub level: u32,
}

impl GameStats {
    pub fn new(settings: &Settings, hi_score: u32) -> Self {
        let mut stats = Self {
            score: 0,
            max_score: 0,
            hi_score,
            ships_left: 0,
            level: 1,
        };
        stats.reset_stats(settings);
        stats
    }

    /// Starts a new game. Max and hi scores carry over.
    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.starting_ship_count;
        self.score = 0;
        self.level = 1;
    }

    /// Credits `destroyed` aliens at `points` each and refreshes the
    /// running bests.
    pub fn update(&mut self, destroyed: usize, points: u32) {
        let earned = (destroyed as u32).saturating_mul(points);
        self.score = self.score.saturating_add(earned);
        self.max_score = self.max_score.max(self.score);
        self.hi_score = self.hi_score.max(self.score);
    }

    pub fn update_level(&mut self) {
        self.level += 1;
    }

    /// Uses up one ship and returns how many are left.
    pub fn lose_ship(&mut self) -> u32 {
        self.ships_left = self.ships_left.saturating_sub(1);
        self.ships_left
    }
}
