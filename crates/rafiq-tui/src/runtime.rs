//! The main event loop: terminal events, background-task results, and the
//! tick driving animations and the focus timer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

use rafiq_core::weather::WeatherClient;

use crate::input::handle_key;
use crate::render::render;
use crate::ui::state::FocusCompletion;
use crate::ui::{App, Tui, UiEvent};

pub async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    mut events_rx: mpsc::Receiver<UiEvent>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    // One-shot weather fetch; a failure just leaves the widget empty.
    if !app.is_offline() {
        let tx = app.events_tx.clone();
        tokio::spawn(async move {
            if let Ok(weather) = WeatherClient::new().current().await {
                let _ = tx.send(UiEvent::WeatherReady(weather)).await;
            }
        });
    }

    // Kick off the insight strip for returning users.
    if !app.store.needs_onboarding() {
        app.request_suggestions();
    }

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    if key.kind == KeyEventKind::Press {
                        handle_key(app, key);
                    }
                }
            }

            Some(event) = events_rx.recv() => {
                app.handle_event(event);
            }

            _ = tick_interval.tick() => {
                app.tick();
                if let Some(done) = app.focus.on_tick(Instant::now()) {
                    play_chime();
                    match done {
                        FocusCompletion::SessionComplete => {
                            app.notify("Focus session complete — take a short break")
                        }
                        FocusCompletion::BackToFocus => {
                            app.notify("Break over — back to focus")
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Short completion chime. Playback failures are silent; a missing audio
/// device should never disturb the timer.
fn play_chime() {
    std::thread::spawn(|| {
        use rodio::source::{SineWave, Source};
        use rodio::{OutputStream, Sink};

        let Ok((_stream, handle)) = OutputStream::try_default() else {
            return;
        };
        let Ok(sink) = Sink::try_new(&handle) else {
            return;
        };
        sink.append(
            SineWave::new(880.0)
                .take_duration(Duration::from_millis(180))
                .amplify(0.25),
        );
        sink.append(
            SineWave::new(1320.0)
                .take_duration(Duration::from_millis(320))
                .amplify(0.25),
        );
        sink.sleep_until_end();
    });
}
