use std::path::PathBuf;
use std::time::Duration;

/// Static configuration for a game session.
///
/// World dimensions are in play-area units; the renderer scales them to
/// whatever terminal it lands on.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub name: &'static str,
    pub screen_w: i32,
    pub screen_h: i32,
    pub fps: u32,
    /// Multiplier applied to the dynamic settings on every cleared fleet
    pub difficulty_scale: f32,
    pub scores_file: PathBuf,
    pub log_file: PathBuf,
    pub laser_sound: PathBuf,
    pub impact_sound: PathBuf,

    pub ship_w: i32,
    pub ship_h: i32,
    pub starting_ship_count: u32,

    pub bullet_w: i32,
    pub bullet_h: i32,
    /// Maximum number of shots in flight
    pub bullet_amount: usize,

    pub alien_w: i32,
    pub alien_h: i32,

    /// Freeze after losing a ship
    pub life_lost_pause: Duration,

    pub base_ship_speed: f32,
    pub base_bullet_speed: f32,
    pub base_fleet_speed: f32,
    pub base_fleet_drop_speed: f32,
    pub base_alien_points: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let assets = PathBuf::from("assets");
        Self {
            name: "Alien Invasion",
            screen_w: 1200,
            screen_h: 800,
            fps: 60,
            difficulty_scale: 1.1,
            scores_file: assets.join("file").join("scores.json"),
            log_file: PathBuf::from("alien_invasion.log"),
            laser_sound: assets.join("sound").join("laser.wav"),
            impact_sound: assets.join("sound").join("impact.wav"),
            ship_w: 120,
            ship_h: 40,
            starting_ship_count: 3,
            bullet_w: 80,
            bullet_h: 25,
            bullet_amount: 5,
            alien_w: 40,
            alien_h: 40,
            life_lost_pause: Duration::from_millis(500),
            base_ship_speed: 5.0,
            base_bullet_speed: 7.0,
            base_fleet_speed: 4.0,
            base_fleet_drop_speed: 15.0,
            base_alien_points: 50.0,
        }
    }
}

impl Settings {
    /// Number of simulation ticks suppressed after a ship is lost.
    pub fn pause_ticks(&self) -> u32 {
        (self.life_lost_pause.as_secs_f32() * self.fps as f32).round() as u32
    }

    /// Wall-clock budget of a single frame at the configured cap.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

/// The part of the configuration that scales with the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub fleet_speed: f32,
    pub fleet_drop_speed: f32,
    pub alien_points: f32,
}

impl Difficulty {
    pub fn base(settings: &Settings) -> Self {
        Self {
            ship_speed: settings.base_ship_speed,
            bullet_speed: settings.base_bullet_speed,
            fleet_speed: settings.base_fleet_speed,
            fleet_drop_speed: settings.base_fleet_drop_speed,
            alien_points: settings.base_alien_points,
        }
    }

    pub fn increase(&mut self, scale: f32) {
        self.ship_speed *= scale;
        self.bullet_speed *= scale;
        self.fleet_speed *= scale;
        self.fleet_drop_speed *= scale;
        self.alien_points *= scale;
    }

    /// Points awarded for one destroyed alien at the current level.
    pub fn points_per_kill(&self) -> u32 {
        self.alien_points.round() as u32
    }
}
