use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::settings::Settings;

type Sound = Buffered<Decoder<BufReader<File>>>;

const LASER_VOLUME: f32 = 0.3;
const LASER_LENGTH: Duration = Duration::from_millis(300);
const IMPACT_VOLUME: f32 = 0.5;
const IMPACT_LENGTH: Duration = Duration::from_millis(500);

/// Audio manager for playing sound effects.
///
/// Every part is optional: without an output device or sound files the game
/// simply plays silent.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    laser_sound: Option<Sound>,
    impact_sound: Option<Sound>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads the sound effects
    pub fn new(settings: &Settings) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                warn!("no audio output ({err}), continuing without sound");
                None
            }
        };

        Self {
            output,
            laser_sound: load_sound(&settings.laser_sound),
            impact_sound: load_sound(&settings.impact_sound),
        }
    }

    /// A manager that never makes a sound
    pub fn silent() -> Self {
        Self {
            output: None,
            laser_sound: None,
            impact_sound: None,
        }
    }

    pub fn play_laser_sound(&self) {
        self.play(self.laser_sound.as_ref(), LASER_VOLUME, LASER_LENGTH);
    }

    pub fn play_impact_sound(&self) {
        self.play(self.impact_sound.as_ref(), IMPACT_VOLUME, IMPACT_LENGTH);
    }

    fn play(&self, sound: Option<&Sound>, volume: f32, length: Duration) {
        let (Some(sound), Some((_, handle))) = (sound, &self.output) else {
            return;
        };
        // Playback errors are dropped; a missed effect is not worth stopping for
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            // Cloning a buffered source only clones references
            sink.append(sound.clone().take_duration(length));
            sink.detach();
        }
    }
}

fn load_sound(path: &Path) -> Option<Sound> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), "could not open sound: {err}");
            return None;
        }
    };
    match Decoder::new(BufReader::new(file)) {
        Ok(source) => {
            debug!(path = %path.display(), "sound loaded");
            Some(source.buffered())
        }
        Err(err) => {
            warn!(path = %path.display(), "could not decode sound: {err}");
            None
        }
    }
}
