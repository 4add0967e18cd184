//! Request signals
//!
//! A signal is a single file whose presence and recency, not its
//! content, tells a polling panel that work is requested on that
//! channel. Emission is fire-and-forget: there is no acknowledgment,
//! and a new write supersedes any unconsumed prior signal. Write
//! failures are logged and swallowed so editing is never blocked.

use super::workspace::Workspace;
use chrono::Utc;
use tracing::{debug, warn};

/// Named request channels between the session and panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalChannel {
    /// Ask the suggestions panel for candidate texts
    Suggestions,
    /// Ask the outline panel to re-read the source file
    Outline,
    /// Ask the review panel for a document critique
    Review,
    /// Advance the previewed candidate
    PreviewNext,
    /// Step the previewed candidate back
    PreviewPrev,
}

impl SignalChannel {
    /// Artifact name for this channel
    pub fn file_name(&self) -> &'static str {
        match self {
            SignalChannel::Suggestions => "request_suggestions",
            SignalChannel::Outline => "request_outline",
            SignalChannel::Review => "request_review",
            SignalChannel::PreviewNext => "preview_next",
            SignalChannel::PreviewPrev => "preview_prev",
        }
    }
}

impl Workspace {
    /// Overwrite the channel's signal artifact with the current
    /// timestamp. Fire-and-forget; only the latest write matters.
    pub fn emit(&self, channel: SignalChannel) {
        let token = Utc::now().timestamp_millis().to_string();
        match self.write_atomic(channel.file_name(), &token) {
            Ok(()) => debug!("Emitted {} signal", channel.file_name()),
            Err(e) => warn!("Failed to emit {} signal: {}", channel.file_name(), e),
        }
    }
}
