//! FlushWorker - background worker that drains the tracking queue
//!
//! Coalesces bursts of pushes into one flush after a quiet period and
//! performs a final immediate flush when the page unloads.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::core::session::{FlushReport, TrackingSession};

/// Idle wait when no flush is scheduled
const IDLE_WAIT_SECS: u64 = 3600;

pub(crate) enum Command {
    /// An event was queued: (re)start the quiet period
    Schedule,
    /// Flush immediately and report back
    FlushNow(oneshot::Sender<FlushReport>),
}

pub(crate) struct FlushWorker {
    session: Arc<TrackingSession>,
    debounce: Duration,
    shutdown: CancellationToken,
}

impl FlushWorker {
    pub(crate) fn new(
        session: Arc<TrackingSession>,
        debounce: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            session,
            debounce,
            shutdown,
        }
    }

    /// Run until the unload signal fires or every command sender is gone
    pub(crate) async fn run(self, mut rx: mpsc::UnboundedReceiver<Command>) {
        tracing::debug!(
            session_id = %self.session.id(),
            debounce_ms = self.debounce.as_millis() as u64,
            "FlushWorker started"
        );

        let mut debounce_deadline: Option<Instant> = None;

        loop {
            let sleep_until = debounce_deadline
                .unwrap_or_else(|| Instant::now() + Duration::from_secs(IDLE_WAIT_SECS));

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    let report = self.session.flush().await;
                    tracing::info!(
                        dispatched = report.dispatched,
                        failed = report.failed,
                        "Page unload flush"
                    );
                    break;
                }

                _ = tokio::time::sleep_until(sleep_until), if debounce_deadline.is_some() => {
                    debounce_deadline = None;
                    self.session.flush().await;
                }

                command = rx.recv() => {
                    match command {
                        Some(Command::Schedule) => {
                            // last call wins
                            debounce_deadline = Some(Instant::now() + self.debounce);
                        }
                        Some(Command::FlushNow(ack)) => {
                            debounce_deadline = None;
                            let report = self.session.flush().await;
                            let _ = ack.send(report);
                        }
                        None => {
                            tracing::debug!("Tracker dropped, flushing remaining events");
                            self.session.flush().await;
                            break;
                        }
                    }
                }
            }
        }

        tracing::debug!(session_id = %self.session.id(), "FlushWorker stopped");
    }
}
