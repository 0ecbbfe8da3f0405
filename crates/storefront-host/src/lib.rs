pub mod config;
pub mod download_loop;
pub mod session;
pub mod state;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use storefront_core::downloads::TickReport;

/// Background task that logs finished downloads as tick reports arrive.
/// Ends when the ticker drops its sender.
pub fn spawn_report_logger(
    mut reports: mpsc::UnboundedReceiver<TickReport>,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut completed = 0;
        while let Some(report) = reports.recv().await {
            for id in &report.completed {
                tracing::info!(game_id = id, "Download finished");
            }
            completed += report.completed.len();
        }
        completed
    })
}
