//! File-based coordination protocol
//!
//! The session and its panel processes share nothing but a directory
//! of flat files: a context snapshot, per-channel request signals,
//! numbered suggestion results, preview state, and two small override
//! records. Ordering between processes is established purely by file
//! recency; there is no sequence numbering, so a slow panel can land a
//! stale result after a newer request. That race is accepted and
//! documented, not fixed.

mod artifacts;
mod context;
mod signals;
mod workspace;

pub use artifacts::{
    FillRequest, ModelOverride, PreviewState, ReviewReport, SuggestionMode, FILL_REQUEST_FILE,
    MODEL_OVERRIDE_FILE, PREVIEW_STATE_FILE, REVIEW_RESULT_FILE, SUGGESTION_MODE_FILE,
};
pub use context::{DocumentContext, CONTEXT_FILE};
pub use signals::SignalChannel;
pub use workspace::Workspace;
