use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use storefront_core::intents::parse_intent;

use crate::state::SharedStorefront;

#[derive(Debug)]
pub enum SessionError {
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Encode(e) => write!(f, "failed to encode view: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

/// Counts of intent lines handled over a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub applied: usize,
    pub rejected: usize,
}

/// Outcome of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The intent was applied; carries the view JSON.
    Applied(String),
    /// Blank line; carries the current view JSON.
    Refreshed(String),
    /// Undecodable or rejected intent; carries the error JSON.
    Rejected(String),
}

impl LineOutcome {
    pub fn json(&self) -> &str {
        match self {
            Self::Applied(s) | Self::Refreshed(s) | Self::Rejected(s) => s,
        }
    }
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// Decode and apply one line, producing the JSON to send back.
///
/// A blank line re-emits the current view, which lets the reader poll
/// download progress without changing anything.
pub async fn handle_line(
    store: &SharedStorefront,
    line: &str,
) -> Result<LineOutcome, SessionError> {
    let line = line.trim();
    if line.is_empty() {
        let view = store.read().await.view();
        return Ok(LineOutcome::Refreshed(serde_json::to_string(&view)?));
    }

    let intent = match parse_intent(line) {
        Ok(intent) => intent,
        Err(e) => {
            tracing::warn!(error = %e, "Undecodable intent");
            return Ok(LineOutcome::Rejected(error_json(&e.to_string())));
        },
    };

    let kind = intent.kind();
    let mut store = store.write().await;
    match store.apply(intent) {
        Ok(()) => Ok(LineOutcome::Applied(serde_json::to_string(&store.view())?)),
        Err(e) => {
            tracing::warn!(intent = kind, error = %e, "Intent rejected");
            Ok(LineOutcome::Rejected(error_json(&e.to_string())))
        },
    }
}

/// Read intents as JSON lines until EOF, answering each with one JSON line.
pub async fn run_session<R, W>(
    store: SharedStorefront,
    reader: R,
    mut writer: W,
) -> Result<SessionStats, SessionError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = SessionStats::default();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = handle_line(&store, &line).await?;
        match outcome {
            LineOutcome::Applied(_) => stats.applied += 1,
            LineOutcome::Rejected(_) => stats.rejected += 1,
            LineOutcome::Refreshed(_) => {},
        }
        writer.write_all(outcome.json().as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    tracing::info!(
        applied = stats.applied,
        rejected = stats.rejected,
        "Intent stream closed"
    );
    Ok(stats)
}
