// Library exports for testing
pub use entities::{
    Alien, AlienFleet, Arsenal, Bounded, FleetLayout, GameState, Projectile, Rect, Ship,
};
pub use game::{Game, TickEvents};
pub use scores::{ScoreError, ScoreStore};
pub use settings::{Difficulty, Settings};
pub use stats::GameStats;

pub mod app;
pub mod audio;
pub mod entities;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scores;
pub mod settings;
pub mod stats;
