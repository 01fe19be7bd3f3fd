use tracing::info;

use crate::entities::{Alien, AlienFleet, Arsenal, GameState, Projectile, Rect, Ship};
use crate::settings::{Difficulty, Settings};
use crate::stats::GameStats;

/// What happened during one tick, for the sound and HUD layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub aliens_destroyed: usize,
    pub life_lost: bool,
    pub level_cleared: bool,
    pub game_over: bool,
}

impl TickEvents {
    /// At least one alien went down this tick.
    pub fn impact(&self) -> bool {
        self.aliens_destroyed > 0
    }
}

/// One play session: the board, the scores and the difficulty curve.
#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    difficulty: Difficulty,
    stats: GameStats,
    area: Rect,
    ship: Ship,
    arsenal: Arsenal,
    fleet: AlienFleet,
    state: GameState,
}

impl Game {
    /// Sets up the board behind the Play button. Nothing moves until
    /// [`Game::restart`] is called.
    pub fn new(settings: Settings, hi_score: u32) -> Self {
        let area = Rect::new(0, 0, settings.screen_w, settings.screen_h);
        let mut fleet = AlienFleet::new(settings.alien_w, settings.alien_h, area);
        fleet.create_fleet();

        Self {
            difficulty: Difficulty::base(&settings),
            stats: GameStats::new(&settings, hi_score),
            ship: Ship::new(settings.ship_w, settings.ship_h, &area),
            arsenal: Arsenal::new(settings.bullet_amount, settings.bullet_w, settings.bullet_h),
            fleet,
            area,
            settings,
            state: GameState::Inactive,
        }
    }

    /// Starts a fresh game: base difficulty, full lives, new fleet.
    pub fn restart(&mut self) {
        self.difficulty = Difficulty::base(&self.settings);
        self.stats.reset_stats(&self.settings);
        self.fleet.reset_direction();
        self.reset_level();
        self.ship.stop();
        self.ship.center_ship(&self.area);
        self.state = GameState::Active;
        info!(ships = self.stats.ships_left, "new game started");
    }

    pub fn start_moving_up(&mut self) {
        if self.state.is_active() {
            self.ship.moving_up = true;
        }
    }

    pub fn stop_moving_up(&mut self) {
        self.ship.moving_up = false;
    }

    pub fn start_moving_down(&mut self) {
        if self.state.is_active() {
            self.ship.moving_down = true;
        }
    }

    pub fn stop_moving_down(&mut self) {
        self.ship.moving_down = false;
    }

    /// Fires one shot. Returns false when nothing was fired, either because
    /// the arsenal is full or because play is not running.
    pub fn fire(&mut self) -> bool {
        if self.state != GameState::Active {
            return false;
        }
        self.arsenal.fire(self.ship.muzzle())
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Active {
            self.state = GameState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Active;
        }
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self) -> TickEvents {
        let mut events = TickEvents::default();

        match self.state {
            GameState::Active => {}
            GameState::LifeLost { ticks_remaining } => {
                self.state = if ticks_remaining > 1 {
                    GameState::LifeLost {
                        ticks_remaining: ticks_remaining - 1,
                    }
                } else {
                    GameState::Active
                };
                return events;
            }
            GameState::Inactive | GameState::Paused | GameState::GameOver => return events,
        }

        self.ship.update(self.difficulty.ship_speed, &self.area);
        self.arsenal.update(self.difficulty.bullet_speed, &self.area);
        self.fleet
            .update_fleet(self.difficulty.fleet_speed, self.difficulty.fleet_drop_speed);

        self.check_collisions(&mut events);
        events
    }

    fn check_collisions(&mut self, events: &mut TickEvents) {
        // Touching the ship and reaching the far edge cost the same single life
        if self.fleet.collides_with(&self.ship) || self.fleet.check_fleet_right() {
            self.ship_hit(events);
            if self.state != GameState::Active {
                return;
            }
        }

        let destroyed = self.fleet.check_collisions(&mut self.arsenal);
        if destroyed > 0 {
            self.stats
                .update(destroyed, self.difficulty.points_per_kill());
            events.aliens_destroyed = destroyed;
        }

        if self.fleet.is_destroyed() {
            self.level_cleared(events);
        }
    }

    fn ship_hit(&mut self, events: &mut TickEvents) {
        events.life_lost = true;
        let ships_left = self.stats.lose_ship();

        if ships_left > 0 {
            info!(ships_left, "ship lost");
            self.reset_level();
            let pause = self.settings.pause_ticks();
            self.state = if pause > 0 {
                GameState::LifeLost {
                    ticks_remaining: pause,
                }
            } else {
                GameState::Active
            };
        } else {
            info!(
                score = self.stats.score,
                level = self.stats.level,
                "game over"
            );
            self.ship.stop();
            self.state = GameState::GameOver;
            events.game_over = true;
        }
    }

    fn level_cleared(&mut self, events: &mut TickEvents) {
        self.reset_level();
        self.difficulty.increase(self.settings.difficulty_scale);
        self.stats.update_level();
        events.level_cleared = true;
        info!(level = self.stats.level, "fleet destroyed, level up");
    }

    /// Clears the shots in flight and brings in a fresh fleet.
    fn reset_level(&mut self) {
        self.arsenal.clear();
        self.fleet.create_fleet();
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn aliens(&self) -> &[Alien] {
        self.fleet.aliens()
    }

    pub fn fleet(&self) -> &AlienFleet {
        &self.fleet
    }

    pub fn fleet_mut(&mut self) -> &mut AlienFleet {
        &mut self.fleet
    }

    pub fn projectiles(&self) -> &[Projectile] {
        self.arsenal.projectiles()
    }
}
