//! Wave Interference entry point
//!
//! Runs the game headless with the autopilot at the controls for a fixed
//! number of ticks, then prints a summary.

use std::process::ExitCode;

use wave_interference::audio::{AudioHandle, LogAudioBackend};
use wave_interference::platform::Autopilot;
use wave_interference::renderer::MeshRenderer;
use wave_interference::consts::SIM_DT;
use wave_interference::sim::{GameMode, SimRng};
use wave_interference::telemetry::{
    self, DisabledTelemetry, LogSink, TelemetryClient, TelemetryLogger, WriterSink,
};
use wave_interference::{Config, Game, Settings, StartupError};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Wave Interference (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("wave-interference: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StartupError> {
    let config = Config::from_env();
    let settings = Settings::load(&config)?;

    let rng = match config.rand_seed {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_time(),
    };

    let audio = AudioHandle::spawn(LogAudioBackend::new(), &settings)?;
    let logger: Box<dyn TelemetryLogger> = match (config.telemetry_enabled, &config.telemetry_path)
    {
        (false, _) => {
            log::info!("Telemetry disabled");
            Box::new(DisabledTelemetry)
        }
        (true, Some(path)) => Box::new(TelemetryClient::spawn(WriterSink::append_to(path)?)?),
        (true, None) => Box::new(TelemetryClient::spawn(LogSink)?),
    };

    let mut game = Game::new(
        rng,
        telemetry::play_id(),
        Box::new(audio),
        logger,
        Box::new(MeshRenderer::new()),
    );

    let mut pilot = Autopilot::new();
    let mut runs = 0u32;
    let mut best_score = 0u64;

    // One frame per tick at the nominal rate
    while game.total_ticks() < config.run_ticks {
        pilot.observe(game.session());
        let before = game.session().mode;
        game.frame(SIM_DT, &pilot);

        let session = game.session();
        if before == GameMode::Playing && session.mode == GameMode::GameOver {
            runs += 1;
            best_score = best_score.max(session.score);
        }
    }

    let session = game.session();
    if session.mode == GameMode::Playing {
        best_score = best_score.max(session.score);
    }

    log::info!(
        "Finished {} ticks (seed {}): {} runs ended, best score {}",
        game.total_ticks(),
        game.seed(),
        runs,
        best_score
    );
    println!(
        "ticks={} seed={} play_id={} runs_ended={} best_score={}",
        game.total_ticks(),
        game.seed(),
        game.play_id(),
        runs,
        best_score
    );
    Ok(())
}
