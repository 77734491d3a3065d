//! The live voice session: microphone frames out, synthesized audio back,
//! one duplex socket, independent capture and playback clocks.
//!
//! The session is an explicit state machine (Idle, Connecting, Active,
//! Closing) with every owned resource (capture stream, socket, playback
//! sink) released on every exit path via one cancellation token. Exactly one
//! session may exist per app instance, enforced by the registry rather than
//! by UI state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use futures_util::{SinkExt, StreamExt};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::live::clock::PlaybackClock;
use crate::live::pcm;
use crate::live::types::{RealtimeInput, ServerMessage, SetupMessage};

pub const LIVE_MODEL: &str = "gemini-2.5-flash-native-audio-preview-09-2025";
pub const LIVE_VOICE: &str = "Zephyr";
/// Capture rate declared to the endpoint.
pub const INPUT_SAMPLE_RATE: u32 = 16_000;
/// Rate of synthesized audio coming back.
pub const OUTPUT_SAMPLE_RATE: u32 = 24_000;

const WS_BASE: &str =
    "wss://generativelanguage.googleapis.com/ws/google.ai.generativelanguage.v1beta.GenerativeService.BidiGenerateContent";

/// Capture frames queued toward the socket. Frames beyond this are dropped
/// rather than blocking the audio callback.
const CAPTURE_QUEUE: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveState {
    Idle,
    Connecting,
    Active,
    Closing,
}

/// Events surfaced to the UI.
#[derive(Debug)]
pub enum LiveEvent {
    State(LiveState),
    Error(String),
}

/// Guards the one-session-per-instance rule.
#[derive(Clone, Default)]
pub struct LiveRegistry {
    active: Arc<AtomicBool>,
}

impl LiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Start a session. Fails immediately if one is already running.
    pub fn start(
        &self,
        api_key: String,
        events: mpsc::Sender<LiveEvent>,
    ) -> Result<LiveSessionHandle, SessionError> {
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyActive);
        }

        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let active = self.active.clone();
        tokio::spawn(async move {
            run_session(api_key, events, task_cancel.clone()).await;
            // Whatever path ended the session, tear everything down.
            task_cancel.cancel();
            active.store(false, Ordering::SeqCst);
        });

        Ok(LiveSessionHandle { cancel })
    }
}

/// Owner's handle to a running session. Stopping is immediate: buffered but
/// unplayed audio is discarded, not flushed.
pub struct LiveSessionHandle {
    cancel: CancellationToken,
}

impl LiveSessionHandle {
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for LiveSessionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_session(
    api_key: String,
    events: mpsc::Sender<LiveEvent>,
    cancel: CancellationToken,
) {
    let _ = events.send(LiveEvent::State(LiveState::Connecting)).await;

    if let Err(e) = drive_session(&api_key, &events, &cancel).await {
        warn!("live session ended with error: {e}");
        let _ = events.send(LiveEvent::Error(e.to_string())).await;
    }

    let _ = events.send(LiveEvent::State(LiveState::Closing)).await;
    let _ = events.send(LiveEvent::State(LiveState::Idle)).await;
}

async fn drive_session(
    api_key: &str,
    events: &mpsc::Sender<LiveEvent>,
    cancel: &CancellationToken,
) -> Result<(), SessionError> {
    // Microphone first: a permission/device failure must surface before we
    // open the socket.
    let (frame_tx, mut frame_rx) = mpsc::channel::<Vec<f32>>(CAPTURE_QUEUE);
    let (capture_ready_tx, capture_ready_rx) = oneshot::channel();
    spawn_capture_thread(frame_tx, cancel.clone(), capture_ready_tx);
    capture_ready_rx
        .await
        .map_err(|_| SessionError::Audio("capture thread died".into()))??;

    let (playback_tx, playback_ready_rx) = spawn_playback_thread(cancel.clone());
    playback_ready_rx
        .await
        .map_err(|_| SessionError::Audio("playback thread died".into()))??;

    let url = format!("{WS_BASE}?key={api_key}");
    let (ws, _) = connect_async(url.as_str())
        .await
        .map_err(|e| SessionError::Connect(e.to_string()))?;
    let (mut write, mut read) = ws.split();

    let setup = SetupMessage::new(LIVE_MODEL, LIVE_VOICE);
    let setup_json = serde_json::to_string(&setup)
        .map_err(|e| SessionError::Connect(format!("setup encode: {e}")))?;
    write
        .send(Message::Text(setup_json))
        .await
        .map_err(|e| SessionError::Connect(format!("setup send: {e}")))?;

    info!("live session connecting: in {INPUT_SAMPLE_RATE}Hz, out {OUTPUT_SAMPLE_RATE}Hz");

    let mut ready = false;
    let mut clock = PlaybackClock::new();
    let started = Instant::now();
    let mime = pcm::pcm_mime(INPUT_SAMPLE_RATE);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                // User stop: best-effort close, no flush of queued audio.
                let _ = write.send(Message::Close(None)).await;
                return Ok(());
            }

            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_server_text(text.as_bytes(), &mut ready, &mut clock,
                            started, &playback_tx, events).await;
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        handle_server_text(&bytes, &mut ready, &mut clock,
                            started, &playback_tx, events).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        // Remote close is a normal end of session.
                        info!("live session closed by remote");
                        return Ok(());
                    }
                    Some(Err(e)) => {
                        return Err(SessionError::Transport(e.to_string()));
                    }
                    Some(Ok(_)) => {} // Ping/Pong handled by tungstenite.
                }
            }

            Some(frame) = frame_rx.recv() => {
                // Fire-and-forget: no acknowledgment is awaited between
                // frames. Frames captured before setup completes are
                // dropped.
                if ready {
                    let input = RealtimeInput::single(pcm::encode_frame(&frame), mime.clone());
                    let json = match serde_json::to_string(&input) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!("frame encode failed: {e}");
                            continue;
                        }
                    };
                    if let Err(e) = write.send(Message::Text(json)).await {
                        return Err(SessionError::Transport(e.to_string()));
                    }
                }
            }
        }
    }
}

async fn handle_server_text(
    raw: &[u8],
    ready: &mut bool,
    clock: &mut PlaybackClock,
    started: Instant,
    playback_tx: &std::sync::mpsc::Sender<Vec<f32>>,
    events: &mpsc::Sender<LiveEvent>,
) {
    let msg: ServerMessage = match serde_json::from_slice(raw) {
        Ok(msg) => msg,
        Err(e) => {
            debug!("unparseable server message: {e}");
            return;
        }
    };

    if msg.is_setup_complete() && !*ready {
        *ready = true;
        let _ = events.send(LiveEvent::State(LiveState::Active)).await;
        return;
    }

    if let Some(payload) = msg.audio_payload() {
        if let Some(samples) = pcm::decode_frame(payload) {
            let now = started.elapsed().as_secs_f64();
            let duration = pcm::duration_secs(samples.len(), OUTPUT_SAMPLE_RATE);
            let start = clock.schedule(now, duration);
            debug!(
                "audio buffer: {:.3}s at t={:.3} (backlog {:.3}s)",
                duration,
                start,
                clock.backlog(now)
            );
            // The sink queues buffers back-to-back, realizing the schedule.
            let _ = playback_tx.send(samples);
        }
    }
}

/// Capture runs on its own OS thread: the cpal stream is not `Send`, and the
/// device callback must never block. Frames are mixed to mono, resampled to
/// the session input rate, and pushed with `try_send`; a full queue drops
/// the frame.
fn spawn_capture_thread(
    frames: mpsc::Sender<Vec<f32>>,
    cancel: CancellationToken,
    ready: oneshot::Sender<Result<(), SessionError>>,
) {
    std::thread::spawn(move || {
        let host = cpal::default_host();
        let Some(device) = host.default_input_device() else {
            let _ = ready.send(Err(SessionError::Audio("no input device".into())));
            return;
        };

        let config = match device.default_input_config() {
            Ok(c) => c,
            Err(e) => {
                let _ = ready.send(Err(SessionError::Audio(format!(
                    "no default input config: {e}"
                ))));
                return;
            }
        };
        let native_rate = config.sample_rate().0;
        let channels = config.channels();

        let stream = device.build_input_stream(
            &config.into(),
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let mono = pcm::to_mono(data, channels);
                let samples = pcm::resample(&mono, native_rate, INPUT_SAMPLE_RATE);
                if frames.try_send(samples).is_err() {
                    debug!("capture queue full, dropping frame");
                }
            },
            move |err| {
                warn!("capture stream error: {err}");
            },
            None,
        );

        let stream = match stream {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(SessionError::Audio(format!(
                    "failed to build input stream: {e}"
                ))));
                return;
            }
        };

        if let Err(e) = stream.play() {
            let _ = ready.send(Err(SessionError::Audio(format!(
                "failed to start capture: {e}"
            ))));
            return;
        }

        info!("capture started: native {native_rate}Hz -> {INPUT_SAMPLE_RATE}Hz mono");
        let _ = ready.send(Ok(()));

        // Hold the stream alive until the session ends.
        while !cancel.is_cancelled() {
            std::thread::sleep(Duration::from_millis(50));
        }
        drop(stream);
        info!("capture stopped");
    });
}

/// Playback also owns its thread: the output stream is not `Send`. Decoded
/// buffers are appended to one sink, which plays them gaplessly in order,
/// realizing the playback-clock schedule.
fn spawn_playback_thread(
    cancel: CancellationToken,
) -> (
    std::sync::mpsc::Sender<Vec<f32>>,
    oneshot::Receiver<Result<(), SessionError>>,
) {
    let (tx, rx) = std::sync::mpsc::channel::<Vec<f32>>();
    let (ready_tx, ready_rx) = oneshot::channel();

    std::thread::spawn(move || {
        let (_stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                let _ = ready_tx.send(Err(SessionError::Audio(format!(
                    "no output device: {e}"
                ))));
                return;
            }
        };
        let sink = match Sink::try_new(&handle) {
            Ok(s) => s,
            Err(e) => {
                let _ = ready_tx.send(Err(SessionError::Audio(format!(
                    "failed to create sink: {e}"
                ))));
                return;
            }
        };
        let _ = ready_tx.send(Ok(()));

        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(samples) => {
                    sink.append(SamplesBuffer::new(1, OUTPUT_SAMPLE_RATE, samples));
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                    if cancel.is_cancelled() {
                        break;
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        // Immediate stop: queued audio is dropped, not drained.
        sink.stop();
        info!("playback stopped");
    });

    (tx, ready_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_claims_exclusively() {
        let registry = LiveRegistry::new();
        assert!(!registry.is_active());
        assert!(!registry.active.swap(true, Ordering::SeqCst));
        // Second claim sees the flag already set.
        assert!(registry.active.swap(true, Ordering::SeqCst));
        registry.active.store(false, Ordering::SeqCst);
        assert!(!registry.is_active());
    }

    #[tokio::test]
    async fn second_start_is_rejected_while_active() {
        let registry = LiveRegistry::new();
        let (tx, mut _rx) = mpsc::channel(16);
        let handle = registry.start("test-key".into(), tx.clone()).unwrap();
        assert!(registry.is_active());

        let second = registry.start("test-key".into(), tx);
        assert!(matches!(second, Err(SessionError::AlreadyActive)));

        handle.stop();
    }

    #[tokio::test]
    async fn failed_session_returns_registry_to_idle() {
        let registry = LiveRegistry::new();
        let (tx, mut rx) = mpsc::channel(16);
        // No audio device / no network in the test environment: the session
        // task fails and must release the registry.
        let _handle = registry.start("test-key".into(), tx).unwrap();

        // Drain events until Idle arrives.
        let mut saw_idle = false;
        for _ in 0..32 {
            match tokio::time::timeout(Duration::from_secs(5), rx.recv()).await {
                Ok(Some(LiveEvent::State(LiveState::Idle))) => {
                    saw_idle = true;
                    break;
                }
                Ok(Some(_)) => continue,
                _ => break,
            }
        }
        assert!(saw_idle, "session should end in Idle");
        assert!(!registry.is_active());
    }
}
