//! Quill - terminal writing studio with panel-assisted drafting
//!
//! Quill is a prose editor that coordinates with external assistant
//! panels through nothing but flat files in a shared runtime
//! directory. The editor publishes context snapshots and signal
//! files; panels (separate processes, possibly on a slower cadence)
//! write suggestion artifacts, preview state, and review reports back
//! into the same directory. Neither side ever blocks on the other.
//!
//! Module layout:
//! - [`editor`]: rope-backed buffer, cursor, paragraph operations,
//!   and the ratatui editor widget with inline preview rendering
//! - [`outline`]: heading extraction and section queries over the
//!   document's line list
//! - [`protocol`]: the shared-directory coordination surface
//!   (workspace, context snapshots, signals, artifacts)
//! - [`session`]: per-session state, the command surface, the local
//!   preview lifecycle, and event-driven scheduling
//! - [`app`]: the terminal application wiring it all together

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod outline;
pub mod protocol;
pub mod session;

pub use config::QuillConfig;
pub use error::{QuillError, Result};
pub use protocol::{
    DocumentContext, FillRequest, ModelOverride, PreviewState, ReviewReport, SignalChannel,
    SuggestionMode, Workspace,
};
pub use session::{CycleDirection, PreviewSession, SessionEvent, SessionState};
