use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use storefront_core::downloads::TickReport;

use crate::state::SharedStorefront;

/// Commands sent from the host to the download tick loop.
#[derive(Debug)]
pub enum TickerCommand {
    Stop,
}

/// Shortest period the ticker accepts. Shorter periods, including zero, are
/// raised to this.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Handle to the running download tick loop.
///
/// `stop()` shuts the loop down and waits for it. Dropping the handle
/// without stopping aborts the task, so the timer never outlives its owner.
pub struct DownloadTicker {
    cmd_tx: mpsc::UnboundedSender<TickerCommand>,
    handle: Option<JoinHandle<u64>>,
}

impl DownloadTicker {
    /// Spawn the tick loop. Reports for ticks that advanced at least one
    /// download arrive on the returned receiver. A period below
    /// [`MIN_TICK_PERIOD`] is clamped up to it.
    pub fn start(
        store: SharedStorefront,
        period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<TickReport>) {
        let period = if period < MIN_TICK_PERIOD {
            tracing::warn!(
                requested_ns = u64::try_from(period.as_nanos()).unwrap_or(u64::MAX),
                "Tick period too short, clamping"
            );
            MIN_TICK_PERIOD
        } else {
            period
        };
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (report_tx, report_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(run_download_tick_loop(store, period, cmd_rx, report_tx));
        tracing::info!(
            period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
            "Download ticker started"
        );

        (
            Self {
                cmd_tx,
                handle: Some(handle),
            },
            report_rx,
        )
    }

    /// Stop the loop and wait for it to exit. Returns the number of ticks run.
    pub async fn stop(mut self) -> u64 {
        let _ = self.cmd_tx.send(TickerCommand::Stop);
        match self.handle.take() {
            Some(handle) => handle.await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Download ticker task failed");
                0
            }),
            None => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DownloadTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Download ticker aborted on drop");
        }
    }
}

/// Fixed-interval loop. Each tick holds the write lock for one whole pass
/// over the downloads, and the next tick cannot start until it returns.
async fn run_download_tick_loop(
    store: SharedStorefront,
    period: Duration,
    mut cmd_rx: mpsc::UnboundedReceiver<TickerCommand>,
    report_tx: mpsc::UnboundedSender<TickReport>,
) -> u64 {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first tick resolves immediately; the first advance lands one period in.
    interval.tick().await;

    let mut ticks: u64 = 0;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let report = store.write().await.tick_downloads();
                ticks += 1;
                if !report.is_empty() {
                    tracing::trace!(
                        tick = ticks,
                        advanced = report.advanced.len(),
                        completed = report.completed.len(),
                        "Download tick"
                    );
                    let _ = report_tx.send(report);
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(TickerCommand::Stop) | None => break,
                }
            }
        }
    }

    tracing::info!(ticks, "Download ticker stopped");
    ticks
}
