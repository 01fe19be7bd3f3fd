mod alien;
mod arsenal;
mod fleet;
mod game_state;
mod projectile;
mod rect;
mod ship;

// Re-export all public types
pub use alien::Alien;
pub use arsenal::Arsenal;
pub use fleet::{AlienFleet, FleetLayout, calculate_fleet_size, calculate_offsets};
pub use game_state::GameState;
pub use projectile::Projectile;
pub use rect::{Bounded, Rect};
pub use ship::Ship;
