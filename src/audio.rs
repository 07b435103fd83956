//! Fire-and-forget audio
//!
//! The game thread never waits on audio. Requests are queued as commands and
//! a dedicated worker thread hands them to whichever backend is installed.

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::collections::HashMap;
use std::thread::{self, JoinHandle};

use crate::error::{StartupError, StartupResult};
use crate::settings::Settings;
use crate::sim::SoundCue;

/// Audio clip identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    /// Run starts
    GameStart,
    /// Swimmer caught by a shark
    GameOver,
    /// Coin collected
    ScoreUp,
    /// Strong wave released
    Wave,
    /// Background music loop
    Bgm,
}

impl From<SoundCue> for Clip {
    fn from(cue: SoundCue) -> Self {
        match cue {
            SoundCue::GameStart => Clip::GameStart,
            SoundCue::GameOver => Clip::GameOver,
            SoundCue::ScoreUp => Clip::ScoreUp,
            SoundCue::WaveRelease => Clip::Wave,
        }
    }
}

/// Sound output as seen from the game shell
pub trait AudioPlayer {
    fn play_once(&self, clip: Clip);
    fn start_loop(&self, clip: Clip);
    fn pause_loop(&self, clip: Clip);
    fn rewind_loop(&self, clip: Clip);
}

/// Whatever actually makes noise; runs on the audio worker
pub trait AudioBackend: Send {
    fn play_once(&mut self, clip: Clip, volume: f32);
    fn start_loop(&mut self, clip: Clip, volume: f32);
    fn pause_loop(&mut self, clip: Clip);
    fn rewind_loop(&mut self, clip: Clip);
}

/// Command sent to the audio worker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    PlayOnce(Clip, f32),
    StartLoop(Clip, f32),
    PauseLoop(Clip),
    RewindLoop(Clip),
    Shutdown,
}

/// Volume levels applied before a command is queued
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mix {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Mix {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Effective volume for a clip
    pub fn volume(&self, clip: Clip) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if clip == Clip::Bgm {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }
}

/// Handle to the audio worker; cheap to call from the game thread
pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    mix: Mix,
    worker: Option<JoinHandle<()>>,
}

impl AudioHandle {
    /// Start the worker thread around `backend`
    pub fn spawn<B: AudioBackend + 'static>(backend: B, settings: &Settings) -> StartupResult<Self> {
        let (tx, rx) = unbounded::<AudioCommand>();
        let worker = thread::Builder::new()
            .name("audio".into())
            .spawn(move || run_worker(backend, rx))
            .map_err(|source| StartupError::WorkerSpawn {
                worker: "audio",
                source,
            })?;

        log::info!("Audio worker started");
        Ok(Self {
            tx,
            mix: Mix::from_settings(settings),
            worker: Some(worker),
        })
    }

    fn send(&self, command: AudioCommand) {
        // A dead worker only means silence
        if self.tx.send(command).is_err() {
            log::warn!("Audio worker gone, dropped {:?}", command);
        }
    }
}

impl AudioPlayer for AudioHandle {
    fn play_once(&self, clip: Clip) {
        let volume = self.mix.volume(clip);
        if volume > 0.0 {
            self.send(AudioCommand::PlayOnce(clip, volume));
        }
    }

    fn start_loop(&self, clip: Clip) {
        self.send(AudioCommand::StartLoop(clip, self.mix.volume(clip)));
    }

    fn pause_loop(&self, clip: Clip) {
        self.send(AudioCommand::PauseLoop(clip));
    }

    fn rewind_loop(&self, clip: Clip) {
        self.send(AudioCommand::RewindLoop(clip));
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Audio worker panicked");
            }
        }
    }
}

fn run_worker<B: AudioBackend>(mut backend: B, rx: Receiver<AudioCommand>) {
    for command in rx.iter() {
        match command {
            AudioCommand::PlayOnce(clip, volume) => backend.play_once(clip, volume),
            AudioCommand::StartLoop(clip, volume) => backend.start_loop(clip, volume),
            AudioCommand::PauseLoop(clip) => backend.pause_loop(clip),
            AudioCommand::RewindLoop(clip) => backend.rewind_loop(clip),
            AudioCommand::Shutdown => break,
        }
    }
    log::debug!("Audio worker stopped");
}

/// Loop bookkeeping for a backend with no output device
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct LoopState {
    playing: bool,
    /// Times the loop was started since the last rewind
    starts_since_rewind: u32,
}

/// Backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogAudioBackend {
    loops: HashMap<Clip, LoopState>,
}

impl LogAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn loop_state(&self, clip: Clip) -> LoopState {
        self.loops.get(&clip).copied().unwrap_or_default()
    }
}

impl AudioBackend for LogAudioBackend {
    fn play_once(&mut self, clip: Clip, volume: f32) {
        log::debug!("play {:?} at {:.2}", clip, volume);
    }

    fn start_loop(&mut self, clip: Clip, volume: f32) {
        let state = self.loops.entry(clip).or_default();
        if state.playing {
            log::debug!("loop {:?} already playing", clip);
            return;
        }
        state.playing = true;
        state.starts_since_rewind += 1;
        let resumed = state.starts_since_rewind > 1;
        log::debug!(
            "loop {:?} {} at {:.2}",
            clip,
            if resumed { "resumed" } else { "playing from start" },
            volume
        );
    }

    fn pause_loop(&mut self, clip: Clip) {
        self.loops.entry(clip).or_default().playing = false;
        log::debug!("loop {:?} paused", clip);
    }

    fn rewind_loop(&mut self, clip: Clip) {
        self.loops.entry(clip).or_default().starts_since_rewind = 0;
        log::debug!("loop {:?} rewound", clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Forwards every backend call to a channel the test can read
    struct ChannelBackend(Sender<AudioCommand>);

    impl AudioBackend for ChannelBackend {
        fn play_once(&mut self, clip: Clip, volume: f32) {
            let _ = self.0.send(AudioCommand::PlayOnce(clip, volume));
        }
        fn start_loop(&mut self, clip: Clip, volume: f32) {
            let _ = self.0.send(AudioCommand::StartLoop(clip, volume));
        }
        fn pause_loop(&mut self, clip: Clip) {
            let _ = self.0.send(AudioCommand::PauseLoop(clip));
        }
        fn rewind_loop(&mut self, clip: Clip) {
            let _ = self.0.send(AudioCommand::RewindLoop(clip));
        }
    }

    #[test]
    fn test_mix_channels() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
        };
        let mix = Mix::from_settings(&settings);
        assert_eq!(mix.volume(Clip::ScoreUp), 0.5);
        assert_eq!(mix.volume(Clip::Bgm), 0.25);

        let muted = Mix::from_settings(&Settings {
            muted: true,
            ..settings
        });
        assert_eq!(muted.volume(Clip::ScoreUp), 0.0);
    }

    #[test]
    fn test_worker_runs_commands_in_order() {
        let (tx, rx) = unbounded();
        let settings = Settings {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
        };
        let handle = AudioHandle::spawn(ChannelBackend(tx), &settings).unwrap();
        handle.rewind_loop(Clip::Bgm);
        handle.start_loop(Clip::Bgm);
        handle.play_once(Clip::Wave);
        handle.pause_loop(Clip::Bgm);
        drop(handle);

        let seen: Vec<_> = rx.iter().collect();
        assert_eq!(
            seen,
            vec![
                AudioCommand::RewindLoop(Clip::Bgm),
                AudioCommand::StartLoop(Clip::Bgm, 1.0),
                AudioCommand::PlayOnce(Clip::Wave, 1.0),
                AudioCommand::PauseLoop(Clip::Bgm),
            ]
        );
    }

    #[test]
    fn test_muted_one_shots_are_not_queued() {
        let (tx, rx) = unbounded();
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let handle = AudioHandle::spawn(ChannelBackend(tx), &settings).unwrap();
        handle.play_once(Clip::ScoreUp);
        drop(handle);
        assert!(rx.iter().next().is_none());
    }

    #[test]
    fn test_log_backend_tracks_loops() {
        let mut backend = LogAudioBackend::new();
        backend.rewind_loop(Clip::Bgm);
        backend.start_loop(Clip::Bgm, 0.7);
        assert_eq!(
            backend.loop_state(Clip::Bgm),
            LoopState {
                playing: true,
                starts_since_rewind: 1
            }
        );
        // A second start while playing changes nothing
        backend.start_loop(Clip::Bgm, 0.7);
        assert_eq!(backend.loop_state(Clip::Bgm).starts_since_rewind, 1);

        backend.pause_loop(Clip::Bgm);
        assert!(!backend.loop_state(Clip::Bgm).playing);
        backend.start_loop(Clip::Bgm, 0.7);
        assert_eq!(backend.loop_state(Clip::Bgm).starts_since_rewind, 2);
    }

    #[test]
    fn test_cue_mapping() {
        assert_eq!(Clip::from(SoundCue::WaveRelease), Clip::Wave);
        assert_eq!(Clip::from(SoundCue::ScoreUp), Clip::ScoreUp);
    }
}
