//! Sound cues behind a small trait so the game never waits on audio.
//!
//! With the `audio` feature the cues play through rodio; without it, or when
//! no output device can be opened, a silent board is used instead. Failures
//! are logged and never reach the game loop.
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Background track, looped for the whole session.
    Music,
    /// Looped while the player keeps moving.
    Footsteps,
    Jumpscare,
    Scream,
    Door,
}

impl Cue {
    pub const ALL: [Cue; 5] = [Cue::Music, Cue::Footsteps, Cue::Jumpscare, Cue::Scream, Cue::Door];

    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Music => "Sound-of-Game.mp3",
            Cue::Footsteps => "FootstepSound.mp3",
            Cue::Jumpscare => "Echo-Jumpscare.mp3",
            Cue::Scream => "Young-Male-Scream.mp3",
            Cue::Door => "Door-open-close.mp3",
        }
    }

    pub fn volume(self) -> f32 {
        match self {
            Cue::Music => 0.8,
            Cue::Footsteps => 0.5,
            Cue::Jumpscare => 1.0,
            Cue::Scream => 0.8,
            Cue::Door => 0.8,
        }
    }
}

pub trait SoundBoard {
    /// Start a looping cue; a loop that is already running keeps playing.
    fn start_loop(&mut self, cue: Cue);
    fn stop_loop(&mut self, cue: Cue);
    fn play_once(&mut self, cue: Cue);
    /// Stop everything and drop any playback handles.
    fn release_all(&mut self);
}

/// Silent board used when audio is unavailable.
#[derive(Default)]
pub struct NullAudio;

impl SoundBoard for NullAudio {
    fn start_loop(&mut self, _cue: Cue) {}
    fn stop_loop(&mut self, _cue: Cue) {}
    fn play_once(&mut self, _cue: Cue) {}
    fn release_all(&mut self) {}
}

/// Best available sound board for `assets_dir`.
pub fn open_sound_board(assets_dir: &Path) -> Box<dyn SoundBoard> {
    #[cfg(feature = "audio")]
    {
        match rodio_board::AudioManager::new(assets_dir) {
            Some(manager) => return Box::new(manager),
            None => log::warn!("no audio output device; running silent"),
        }
    }
    #[cfg(not(feature = "audio"))]
    log::info!("built without audio; ignoring cues in {}", assets_dir.display());
    Box::new(NullAudio)
}

#[cfg(feature = "audio")]
mod rodio_board {
    use std::collections::HashMap;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::{Cue, SoundBoard};

    pub struct AudioManager {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        clips: HashMap<Cue, Arc<Vec<u8>>>,
        loops: HashMap<Cue, Sink>,
    }

    impl AudioManager {
        /// `None` when there is no output device; missing clips only silence their cue.
        pub fn new(assets_dir: &Path) -> Option<Self> {
            let (_stream, handle) = OutputStream::try_default().ok()?;
            let clips = load_clips(assets_dir);
            Some(Self { _stream, handle, clips, loops: HashMap::new() })
        }

        fn sink_for(&self, cue: Cue, looped: bool) -> Option<Sink> {
            let bytes = self.clips.get(&cue)?.as_ref().clone();
            let sink = match Sink::try_new(&self.handle) {
                Ok(sink) => sink,
                Err(e) => {
                    log::warn!("cannot open a sink for {cue:?}: {e}");
                    return None;
                }
            };
            let appended = if looped {
                Decoder::new_looped(Cursor::new(bytes)).map(|d| sink.append(d))
            } else {
                Decoder::new(Cursor::new(bytes)).map(|d| sink.append(d))
            };
            if let Err(e) = appended {
                log::warn!("cannot decode {}: {e}", cue.file_name());
                return None;
            }
            sink.set_volume(cue.volume());
            Some(sink)
        }
    }

    pub(super) fn load_clips(assets_dir: &Path) -> HashMap<Cue, Arc<Vec<u8>>> {
        let mut clips = HashMap::new();
        for cue in Cue::ALL {
            let path = assets_dir.join(cue.file_name());
            match fs::read(&path) {
                Ok(bytes) => {
                    clips.insert(cue, Arc::new(bytes));
                }
                Err(e) => log::warn!("sound {} unavailable: {e}", path.display()),
            }
        }
        clips
    }

    impl SoundBoard for AudioManager {
        fn start_loop(&mut self, cue: Cue) {
            if self.loops.contains_key(&cue) {
                return;
            }
            if let Some(sink) = self.sink_for(cue, true) {
                self.loops.insert(cue, sink);
            }
        }

        fn stop_loop(&mut self, cue: Cue) {
            if let Some(sink) = self.loops.remove(&cue) {
                sink.stop();
            }
        }

        fn play_once(&mut self, cue: Cue) {
            if let Some(sink) = self.sink_for(cue, false) {
                sink.detach();
            }
        }

        fn release_all(&mut self) {
            for (_, sink) in self.loops.drain() {
                sink.stop();
            }
        }
    }
}
