//! Replay of recorded gateway traffic.
//!
//! Input is JSON Lines, one `{"t": NAME, "d": PAYLOAD}` frame per line. Blank
//! lines are ignored; frames that fail to decode are logged and counted.

use derive_getters::Getters;
use mosaic_actions::Client;
use mosaic_error::{MosaicResult, ReplayError, ReplayErrorKind};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct Frame {
    t: String,
    #[serde(default)]
    d: serde_json::Value,
}

/// Counts from one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct ReplaySummary {
    /// Non-blank lines read
    frames: usize,
    /// Frames naming an event the engine handles
    routed: usize,
    /// Routed frames that changed the cache
    handled: usize,
    /// Lines that failed to decode
    malformed: usize,
}

/// Feed every frame of `input` through `client`, in order.
///
/// # Errors
///
/// Returns an error only when reading `input` fails; bad frames are skipped.
#[instrument(skip_all)]
pub async fn replay<R>(client: &Client, input: R) -> MosaicResult<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = ReplaySummary::default();
    let mut lines = input.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ReplayError::new(ReplayErrorKind::Read(e.to_string())))?
    {
        if line.trim().is_empty() {
            continue;
        }
        summary.frames += 1;

        let frame: Frame = match serde_json::from_str(&line) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(line = summary.frames, error = %e, "Skipping malformed frame");
                summary.malformed += 1;
                continue;
            }
        };

        match client.dispatch_raw(&frame.t, frame.d).await {
            Ok(Some(outcome)) => {
                summary.routed += 1;
                if *outcome.handled() {
                    summary.handled += 1;
                }
            }
            Ok(None) => debug!(name = %frame.t, "Frame not routed"),
            Err(e) => {
                warn!(line = summary.frames, name = %frame.t, error = %e, "Skipping undecodable payload");
                summary.malformed += 1;
            }
        }
    }

    Ok(summary)
}
