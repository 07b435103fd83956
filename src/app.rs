//! Application shell
//!
//! Owns the session and its collaborators. Runs fixed-timestep substeps for
//! each frame, routes queued `GameEvent`s to audio and telemetry, then draws.

use crate::audio::{AudioPlayer, Clip};
use crate::platform::{FixedTimestep, InputSource};
use crate::renderer::Renderer;
use crate::sim::{GameEvent, Session, SimRng, TickInput, tick};
use crate::telemetry::{TelemetryEvent, TelemetryLogger};

/// Game instance holding all state
pub struct Game {
    session: Session,
    rng: SimRng,
    clock: FixedTimestep,
    play_id: String,
    total_ticks: u64,
    /// Edges seen by frames that ran no tick yet
    pending: TickInput,
    audio: Box<dyn AudioPlayer>,
    telemetry: Box<dyn TelemetryLogger>,
    renderer: Box<dyn Renderer>,
}

impl Game {
    /// Bring up a fresh session; its startup events are dispatched at once
    pub fn new(
        rng: SimRng,
        play_id: String,
        audio: Box<dyn AudioPlayer>,
        telemetry: Box<dyn TelemetryLogger>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        log::info!("New game: seed={}, play_id={}", rng.seed(), play_id);
        let mut game = Self {
            session: Session::new(),
            rng,
            clock: FixedTimestep::default(),
            play_id,
            total_ticks: 0,
            pending: TickInput::default(),
            audio,
            telemetry,
            renderer,
        };
        game.dispatch_events();
        game
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn play_id(&self) -> &str {
        &self.play_id
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Ticks simulated since startup
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Advance one wall-clock frame and draw it. Returns substeps run.
    ///
    /// Press and release edges are kept until a tick consumes them, so a
    /// frame shorter than one step cannot swallow a tap.
    pub fn frame(&mut self, frame_dt: f64, input: &dyn InputSource) -> u32 {
        let sampled = TickInput::poll(input);
        self.pending.activate |= sampled.activate;
        self.pending.release |= sampled.release;
        self.pending.held = sampled.held;

        let substeps = self.clock.advance(frame_dt);
        for i in 0..substeps {
            // Edges only count on the first substep
            let input = if i == 0 {
                self.pending
            } else {
                TickInput {
                    held: sampled.held,
                    ..TickInput::default()
                }
            };
            self.step(&input);
        }
        if substeps > 0 {
            self.pending = TickInput::default();
        }

        self.render();
        substeps
    }

    /// Run exactly one tick and dispatch what it queued
    pub fn step(&mut self, input: &TickInput) {
        tick(&mut self.session, input, &mut self.rng);
        self.total_ticks += 1;
        self.dispatch_events();
    }

    pub fn render(&mut self) {
        self.renderer.render(&self.session);
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Sound(cue) => self.audio.play_once(cue.into()),
                GameEvent::MusicRestart => {
                    self.audio.rewind_loop(Clip::Bgm);
                    self.audio.start_loop(Clip::Bgm);
                }
                GameEvent::MusicPause => self.audio.pause_loop(Clip::Bgm),
                GameEvent::Telemetry {
                    action,
                    ticks,
                    score,
                } => {
                    log::debug!("Telemetry {}", action.as_str());
                    self.telemetry.log_async(
                        TelemetryEvent::new(&self.play_id, action).with_progress(ticks, score),
                    );
                }
            }
        }
    }
}
