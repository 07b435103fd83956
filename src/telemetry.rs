//! Gameplay telemetry
//!
//! Records are handed to a background worker and written by a sink. Logging
//! never blocks the game thread and sink failures never reach it.

use crossbeam_channel::{Receiver, Sender, unbounded};
use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::thread::{self, JoinHandle};

use crate::error::{StartupError, StartupResult};
use crate::sim::TelemetryAction;

/// Play id used when the OS cannot supply randomness
pub const UNKNOWN_PLAY_ID: &str = "?";

/// One telemetry record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub game: String,
    pub play_id: String,
    pub action: TelemetryAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
}

impl TelemetryEvent {
    pub fn new(play_id: &str, action: TelemetryAction) -> Self {
        Self {
            game: crate::consts::GAME_NAME.to_string(),
            play_id: play_id.to_string(),
            action,
            ticks: None,
            score: None,
        }
    }

    pub fn with_progress(mut self, ticks: Option<u64>, score: Option<u64>) -> Self {
        self.ticks = ticks;
        self.score = score;
        self
    }
}

/// Identifier for this process's plays, a random UUID
pub fn play_id() -> String {
    let mut bytes = [0u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(e) => {
            log::warn!("No OS randomness for play id ({}), using placeholder", e);
            UNKNOWN_PLAY_ID.to_string()
        }
    }
}

/// Telemetry as seen from the game shell
pub trait TelemetryLogger {
    fn log_async(&self, event: TelemetryEvent);
}

/// Telemetry switched off
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTelemetry;

impl TelemetryLogger for DisabledTelemetry {
    fn log_async(&self, _event: TelemetryEvent) {}
}

/// Destination for records; runs on the telemetry worker
pub trait TelemetrySink: Send {
    fn write(&mut self, event: &TelemetryEvent) -> std::io::Result<()>;
}

/// Writes JSON records through `log` with target `telemetry`
#[derive(Debug, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn write(&mut self, event: &TelemetryEvent) -> std::io::Result<()> {
        let json = serde_json::to_string(event).map_err(std::io::Error::other)?;
        log::info!(target: "telemetry", "{}", json);
        Ok(())
    }
}

/// Writes one JSON record per line to any writer
pub struct WriterSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<File> {
    /// Append records to `path`, creating the file if needed
    pub fn append_to(path: &Path) -> StartupResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| StartupError::TelemetryOpen {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Telemetry records go to {}", path.display());
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> TelemetrySink for WriterSink<W> {
    fn write(&mut self, event: &TelemetryEvent) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, event).map_err(std::io::Error::other)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

enum TelemetryCommand {
    Record(TelemetryEvent),
    Shutdown,
}

/// Handle to the telemetry worker
pub struct TelemetryClient {
    tx: Sender<TelemetryCommand>,
    worker: Option<JoinHandle<()>>,
}

impl TelemetryClient {
    pub fn spawn<S: TelemetrySink + 'static>(sink: S) -> StartupResult<Self> {
        let (tx, rx) = unbounded();
        let worker = thread::Builder::new()
            .name("telemetry".into())
            .spawn(move || run_worker(sink, rx))
            .map_err(|source| StartupError::WorkerSpawn {
                worker: "telemetry",
                source,
            })?;

        log::info!("Telemetry worker started");
        Ok(Self {
            tx,
            worker: Some(worker),
        })
    }
}

impl TelemetryLogger for TelemetryClient {
    fn log_async(&self, event: TelemetryEvent) {
        if self.tx.send(TelemetryCommand::Record(event)).is_err() {
            log::warn!("Telemetry worker gone, record dropped");
        }
    }
}

impl Drop for TelemetryClient {
    fn drop(&mut self) {
        let _ = self.tx.send(TelemetryCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Telemetry worker panicked");
            }
        }
    }
}

fn run_worker<S: TelemetrySink>(mut sink: S, rx: Receiver<TelemetryCommand>) {
    let mut failures = 0u64;
    for command in rx.iter() {
        match command {
            TelemetryCommand::Record(event) => {
                if let Err(e) = sink.write(&event) {
                    failures += 1;
                    log::warn!("Telemetry write failed for {}: {}", event.action.as_str(), e);
                }
            }
            TelemetryCommand::Shutdown => break,
        }
    }
    log::debug!("Telemetry worker stopped ({} failed writes)", failures);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ChannelSink(Sender<TelemetryEvent>);

    impl TelemetrySink for ChannelSink {
        fn write(&mut self, event: &TelemetryEvent) -> std::io::Result<()> {
            let _ = self.0.send(event.clone());
            Ok(())
        }
    }

    /// Fails every other write
    struct FlakySink {
        calls: u32,
        out: Sender<TelemetryEvent>,
    }

    impl TelemetrySink for FlakySink {
        fn write(&mut self, event: &TelemetryEvent) -> std::io::Result<()> {
            self.calls += 1;
            if self.calls % 2 == 1 {
                return Err(std::io::Error::other("disk full"));
            }
            let _ = self.out.send(event.clone());
            Ok(())
        }
    }

    #[test]
    fn test_json_omits_missing_progress() {
        let event = TelemetryEvent::new("abc", TelemetryAction::StartGame);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"game":"wave-interference","play_id":"abc","action":"start_game"}"#
        );

        let heartbeat = TelemetryEvent::new("abc", TelemetryAction::Playing)
            .with_progress(Some(600), Some(12));
        let json = serde_json::to_string(&heartbeat).unwrap();
        assert!(json.ends_with(r#""action":"playing","ticks":600,"score":12}"#));
    }

    #[test]
    fn test_client_delivers_in_order() {
        let (tx, rx) = unbounded();
        let client = TelemetryClient::spawn(ChannelSink(tx)).unwrap();
        client.log_async(TelemetryEvent::new("p", TelemetryAction::Initialize));
        client.log_async(TelemetryEvent::new("p", TelemetryAction::StartGame));
        drop(client);

        let actions: Vec<_> = rx.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![TelemetryAction::Initialize, TelemetryAction::StartGame]
        );
    }

    #[test]
    fn test_sink_failures_do_not_stop_worker() {
        let (tx, rx) = unbounded();
        let client = TelemetryClient::spawn(FlakySink { calls: 0, out: tx }).unwrap();
        for _ in 0..4 {
            client.log_async(TelemetryEvent::new("p", TelemetryAction::Playing));
        }
        drop(client);
        assert_eq!(rx.iter().count(), 2);
    }

    #[test]
    fn test_writer_sink_writes_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write(&TelemetryEvent::new("p", TelemetryAction::Initialize))
            .unwrap();
        sink.write(
            &TelemetryEvent::new("p", TelemetryAction::GameOver).with_progress(Some(40), Some(3)),
        )
        .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let last: TelemetryEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last.score, Some(3));
        assert_eq!(last.ticks, Some(40));
    }

    #[test]
    fn test_file_sink_appends_across_clients() {
        let dir = std::env::temp_dir().join(format!("wave-telemetry-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("telemetry.jsonl");
        let _ = std::fs::remove_file(&path);

        for action in [TelemetryAction::Initialize, TelemetryAction::StartGame] {
            let client = TelemetryClient::spawn(WriterSink::append_to(&path).unwrap()).unwrap();
            client.log_async(TelemetryEvent::new("p", action));
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let actions: Vec<TelemetryAction> = text
            .lines()
            .map(|l| serde_json::from_str::<TelemetryEvent>(l).unwrap().action)
            .collect();
        assert_eq!(
            actions,
            vec![TelemetryAction::Initialize, TelemetryAction::StartGame]
        );

        assert!(matches!(
            WriterSink::append_to(&dir.join("missing").join("t.jsonl")),
            Err(StartupError::TelemetryOpen { .. })
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_play_id_is_uuid_shaped() {
        let id = play_id();
        if id != UNKNOWN_PLAY_ID {
            assert_eq!(id.len(), 36);
            assert_eq!(id.matches('-').count(), 4);
        }
        assert_ne!(play_id(), "");
    }
}
