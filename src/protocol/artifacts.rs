//! Typed result and override artifacts
//!
//! Each record panels write (or the session persists) gets an explicit
//! tagged type with strict parse-or-treat-as-absent semantics: a
//! malformed artifact is indistinguishable from a missing one. Panels
//! own `preview_state.json`, `suggestion_<n>.txt`, `suggestion_mode`
//! and `review_result.json`; the session owns `model_override.json`
//! and `request_fill_section`.

use super::workspace::Workspace;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Artifact name for the preview state written by the suggestions panel
pub const PREVIEW_STATE_FILE: &str = "preview_state.json";

/// Artifact name for the suggestion mode token
pub const SUGGESTION_MODE_FILE: &str = "suggestion_mode";

/// Artifact name for the model override record
pub const MODEL_OVERRIDE_FILE: &str = "model_override.json";

/// Artifact name for the structured fill request
pub const FILL_REQUEST_FILE: &str = "request_fill_section";

/// Artifact name for the review report written by the review panel
pub const REVIEW_RESULT_FILE: &str = "review_result.json";

/// Whether an accepted suggestion replaces the paragraph under the
/// cursor or is inserted as a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionMode {
    /// Replace the paragraph under the cursor
    Alternatives,
    /// Insert a new paragraph after the cursor
    #[default]
    NextParagraph,
}

impl SuggestionMode {
    /// Parse the bare token used in the mode artifact; anything
    /// unrecognized falls back to the default
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "alternatives" => SuggestionMode::Alternatives,
            _ => SuggestionMode::NextParagraph,
        }
    }

    /// Token form written to the mode artifact
    pub fn token(&self) -> &'static str {
        match self {
            SuggestionMode::Alternatives => "alternatives",
            SuggestionMode::NextParagraph => "next_paragraph",
        }
    }
}

/// Preview state as published by the suggestions panel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewState {
    /// Candidate text, possibly multi-line; empty means nothing to show
    #[serde(default)]
    pub text: String,

    /// Index of the previewed candidate
    #[serde(default)]
    pub index: usize,

    /// Number of candidates the panel currently holds
    #[serde(default)]
    pub count: usize,
}

impl PreviewState {
    /// Whether there is candidate text worth showing
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Structured request for section generation. Unlike the timestamp
/// signals this carries fields, so it is its own artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillRequest {
    /// Heading text with markers stripped
    pub heading: String,

    /// Heading source line, 1-indexed
    pub heading_line: usize,

    /// Heading depth (marker count)
    pub depth: usize,

    /// Full ordered outline at request time
    pub outline: Vec<String>,

    /// Request time, unix milliseconds
    pub timestamp: i64,
}

/// Persisted model override; absence means "use configured default"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOverride {
    pub model: String,
}

/// Review report written by the review panel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewReport {
    #[serde(default)]
    pub critique: String,
    #[serde(default)]
    pub weaknesses: String,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub timestamp: f64,
}

impl Workspace {
    /// Current suggestion mode; absent or unreadable means the default
    pub fn suggestion_mode(&self) -> SuggestionMode {
        self.read_string(SUGGESTION_MODE_FILE)
            .map(|t| SuggestionMode::parse(&t))
            .unwrap_or_default()
    }

    /// Latest preview state, if the panel has published one
    pub fn preview_state(&self) -> Option<PreviewState> {
        self.read_json(PREVIEW_STATE_FILE)
    }

    /// The n-th numbered suggestion (1-based); missing or blank means None
    pub fn suggestion(&self, n: usize) -> Option<String> {
        self.read_string(&format!("suggestion_{}.txt", n))
            .filter(|text| !text.trim().is_empty())
    }

    /// Persisted model override, if any
    pub fn model_override(&self) -> Option<ModelOverride> {
        self.read_json(MODEL_OVERRIDE_FILE)
    }

    /// Wholesale overwrite of the model override. No validation of the
    /// name happens here; a mismatch surfaces when a panel uses it.
    pub fn set_model_override(&self, model: &str) -> Result<()> {
        self.write_json(
            MODEL_OVERRIDE_FILE,
            &ModelOverride {
                model: model.to_string(),
            },
        )
    }

    /// Write the structured fill request
    pub fn write_fill_request(&self, request: &FillRequest) -> Result<()> {
        self.write_json(FILL_REQUEST_FILE, request)
    }

    /// Latest review report, if the panel has published one
    pub fn review_report(&self) -> Option<ReviewReport> {
        self.read_json(REVIEW_RESULT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> (Workspace, TempDir) {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::new(temp.path()).unwrap();
        (ws, temp)
    }

    #[test]
    fn test_mode_default_when_absent() {
        let (ws, _temp) = workspace();
        assert_eq!(ws.suggestion_mode(), SuggestionMode::NextParagraph);
    }

    #[test]
    fn test_mode_parse() {
        let (ws, _temp) = workspace();
        ws.write_atomic(SUGGESTION_MODE_FILE, "alternatives\n").unwrap();
        assert_eq!(ws.suggestion_mode(), SuggestionMode::Alternatives);

        ws.write_atomic(SUGGESTION_MODE_FILE, "garbage").unwrap();
        assert_eq!(ws.suggestion_mode(), SuggestionMode::NextParagraph);
    }

    #[test]
    fn test_preview_state_partial_record() {
        let (ws, _temp) = workspace();
        // Panel only wrote the text field
        ws.write_atomic(PREVIEW_STATE_FILE, r#"{"text": "hello"}"#)
            .unwrap();

        let state = ws.preview_state().unwrap();
        assert_eq!(state.text, "hello");
        assert_eq!(state.count, 0);
        assert!(state.has_text());
    }

    #[test]
    fn test_preview_state_malformed_is_absent() {
        let (ws, _temp) = workspace();
        ws.write_atomic(PREVIEW_STATE_FILE, "{ half a rec").unwrap();
        assert!(ws.preview_state().is_none());
    }

    #[test]
    fn test_suggestion_blank_is_none() {
        let (ws, _temp) = workspace();
        assert!(ws.suggestion(1).is_none());

        ws.write_atomic("suggestion_1.txt", "   \n").unwrap();
        assert!(ws.suggestion(1).is_none());

        ws.write_atomic("suggestion_2.txt", "A real candidate.").unwrap();
        assert_eq!(ws.suggestion(2).unwrap(), "A real candidate.");
    }

    #[test]
    fn test_model_override_round_trip() {
        let (ws, _temp) = workspace();
        assert!(ws.model_override().is_none());

        ws.set_model_override("sonnet-large").unwrap();
        assert_eq!(ws.model_override().unwrap().model, "sonnet-large");

        // Wholesale overwrite
        ws.set_model_override("haiku-small").unwrap();
        assert_eq!(ws.model_override().unwrap().model, "haiku-small");
    }

    #[test]
    fn test_fill_request_round_trip() {
        let (ws, _temp) = workspace();
        let request = FillRequest {
            heading: "Background".to_string(),
            heading_line: 3,
            depth: 2,
            outline: vec!["Intro".to_string(), "Background".to_string()],
            timestamp: 42,
        };
        ws.write_fill_request(&request).unwrap();

        let read: FillRequest = ws.read_json(FILL_REQUEST_FILE).unwrap();
        assert_eq!(read.heading, "Background");
        assert_eq!(read.depth, 2);
        assert_eq!(read.outline.len(), 2);
    }

    #[test]
    fn test_review_report_read() {
        let (ws, _temp) = workspace();
        ws.write_atomic(
            REVIEW_RESULT_FILE,
            r#"{"critique": "Tighten the intro.", "weaknesses": "", "strengths": "Clear voice."}"#,
        )
        .unwrap();

        let report = ws.review_report().unwrap();
        assert_eq!(report.critique, "Tighten the intro.");
        assert_eq!(report.strengths, "Clear voice.");
    }
}
