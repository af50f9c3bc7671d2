//! Canvas polling
//!
//! Re-decodes the canvas on a fixed interval to pick up edits made in an
//! external image editor, and reports changes as [`Message`]s. A tick that
//! finds the write slot taken is skipped.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use benday_core::GlyphGrid;

use crate::action::UpdateAction;
use crate::config::Settings;
use crate::message::Message;
use crate::session::CanvasSession;

/// Default poll interval in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Configuration for the canvas watcher
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Time between decodes
    pub poll_interval: Duration,
    /// Send `GridUpdated` on every tick, not only when the grid changed
    pub emit_unchanged: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            emit_unchanged: false,
        }
    }
}

impl WatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set poll interval in milliseconds
    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval = Duration::from_millis(ms.max(1));
        self
    }

    pub fn with_emit_unchanged(mut self, enabled: bool) -> Self {
        self.emit_unchanged = enabled;
        self
    }

    /// Poll settings taken from the config file
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new().with_poll_interval_ms(settings.watcher.poll_interval_ms)
    }
}

/// Polls one canvas session
pub struct CanvasWatcher {
    session: CanvasSession,
    config: WatcherConfig,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl CanvasWatcher {
    pub fn new(session: CanvasSession, config: WatcherConfig) -> Self {
        Self {
            session,
            config,
            stop_tx: None,
        }
    }

    /// Start polling
    ///
    /// Sends `Message::GridUpdated`, `Message::ViewError` and, before
    /// stopping on its own, `Message::DecodeFailed` to the channel.
    pub fn start(&mut self, message_tx: mpsc::Sender<Message>) -> Result<(), String> {
        if self.is_running() {
            return Err("Watcher is already running".to_string());
        }

        let session = self.session.clone();
        let config = self.config.clone();
        let (stop_tx, stop_rx) = oneshot::channel();

        self.stop_tx = Some(stop_tx);

        tokio::spawn(Self::run_poll(session, config, message_tx, stop_rx));

        Ok(())
    }

    /// Stop polling
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Check if the poll task was started and has not exited
    pub fn is_running(&self) -> bool {
        self.stop_tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    async fn run_poll(
        session: CanvasSession,
        config: WatcherConfig,
        message_tx: mpsc::Sender<Message>,
        mut stop_rx: oneshot::Receiver<()>,
    ) {
        info!(
            "Polling {} every {:?}",
            session.path().display(),
            config.poll_interval
        );

        let mut interval = tokio::time::interval(config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut poll = PollState::default();

        loop {
            tokio::select! {
                _ = &mut stop_rx => {
                    info!("Canvas watcher stopping");
                    break;
                }
                _ = interval.tick() => {
                    let result = session.decode().await;
                    let Some(message) = poll.observe(result, config.emit_unchanged) else {
                        continue;
                    };

                    let terminal = message.is_terminal();
                    if message_tx.send(message).await.is_err() {
                        debug!("Message receiver dropped, canvas watcher stopping");
                        break;
                    }
                    if terminal {
                        warn!("Canvas {} can no longer be decoded", session.path().display());
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for CanvasWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// What the poll loop has already reported
#[derive(Debug, Default)]
struct PollState {
    last_grid: Option<GlyphGrid>,
    last_error: Option<String>,
}

impl PollState {
    /// Turn one decode result into the message to send, if any
    fn observe(
        &mut self,
        result: benday_core::Result<GlyphGrid>,
        emit_unchanged: bool,
    ) -> Option<Message> {
        match result {
            Ok(grid) => {
                let recovered = self.last_error.take().is_some();
                if !emit_unchanged && !recovered && self.last_grid.as_ref() == Some(&grid) {
                    return None;
                }
                self.last_grid = Some(grid.clone());
                Some(Message::GridUpdated { grid })
            }
            Err(e) => match UpdateAction::from_error(&e) {
                UpdateAction::Ignore => {
                    trace!("Poll tick skipped: {}", e);
                    None
                }
                UpdateAction::Close { message } => Some(Message::DecodeFailed { message }),
                UpdateAction::Show { kind, message } => {
                    if self.last_error.as_deref() == Some(message.as_str()) {
                        return None;
                    }
                    debug!("Canvas view error: {}", message);
                    self.last_error = Some(message.clone());
                    Some(Message::ViewError { kind, message })
                }
                UpdateAction::Redraw => None,
            },
        }
    }
}
