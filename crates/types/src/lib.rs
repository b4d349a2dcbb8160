//! Shared types for Quill.
//!
//! The form model, prompt template and completion wire types live in their own
//! modules; the UI message plumbing (`Msg`, `Effect`, `ExecOutcome`) lives
//! here so every crate speaks the same vocabulary.

pub mod completion;
pub mod form;
pub mod prompt;

pub use completion::{Article, CompletionChoice, CompletionRequest, CompletionResponse};
pub use form::{Answer, ArticleFormat, FieldId, FieldKind, FieldOption, FormState, KeywordHelp, Tone};
pub use prompt::{PROMPT_DETAIL_LINES, PROMPT_HEADER, compose_prompt, fold_line_breaks};

/// Monotonic identifier assigned to each submitted generation request.
pub type RequestId = u64;

/// Messages that can be sent to update the application state.
///
/// This enum defines the user actions and system events that can trigger
/// state changes in the application.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Generate an article from the current form ("Generate Article" and
    /// "Generate New")
    Submit,
    /// Copy the rendered article to the clipboard
    CopyArticle,
    /// Periodic UI tick (throbber, notice expiry)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// Background execution completed with outcome
    ExecCompleted(Box<ExecOutcome>),
}

/// Side effects that can be triggered by state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post the request to the completion endpoint
    GenerateArticle {
        request_id: RequestId,
        request: CompletionRequest,
    },
    /// Write the rendered article text to the clipboard
    CopyToClipboardRequested(String),
}

/// Result of an effect once its side effect has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The completion endpoint returned an article
    ArticleReady { request_id: RequestId, article: Article },
    /// The request failed at the transport, status or decoding stage
    ArticleFailed { request_id: RequestId, error: String },
    /// The clipboard accepted the text
    Copied,
    /// The clipboard refused the text
    CopyFailed(String),
}

impl ExecOutcome {
    /// Identifier of the generation request this outcome resolves, if any.
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            ExecOutcome::ArticleReady { request_id, .. } | ExecOutcome::ArticleFailed { request_id, .. } => {
                Some(*request_id)
            }
            ExecOutcome::Copied | ExecOutcome::CopyFailed(_) => None,
        }
    }
}
