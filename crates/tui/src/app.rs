//! Application state and logic for the Quill TUI.
//!
//! `App` owns the form, the last generated article, the loading flag and the
//! diagnostics list. State changes happen only in [`App::update`], which
//! returns the [`Effect`]s the command layer should perform; the outcomes of
//! those effects come back as [`Msg::ExecCompleted`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Local, SecondsFormat};
use quill_api::CompletionBackend;
use quill_types::{Article, CompletionRequest, Effect, ExecOutcome, FieldId, FormState, Msg, RequestId};
use quill_util::ClipboardSink;

/// Notice shown after a successful copy.
pub const COPIED_NOTICE: &str = "Article Copied to Clipboard!";

/// Word guideline across all fields; informational only.
pub const WORD_GUIDELINE: usize = 750;

const MAX_LOG_ENTRIES: usize = 500;
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Cross-cutting shared context owned by the App.
///
/// Holds the completion backend and clipboard so the command layer can reach
/// them without threading extra references through components.
#[derive(Clone)]
pub struct SharedCtx {
    pub backend: Arc<dyn CompletionBackend>,
    pub clipboard: Arc<dyn ClipboardSink>,
    /// Endpoint shown in the header
    pub endpoint: String,
}

impl std::fmt::Debug for SharedCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCtx").field("endpoint", &self.endpoint).finish_non_exhaustive()
    }
}

/// Focusable targets in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldId),
    GenerateButton,
    CopyButton,
    GenerateNewButton,
}

impl FocusTarget {
    pub fn all() -> Vec<FocusTarget> {
        let mut targets: Vec<FocusTarget> = FieldId::ALL.iter().copied().map(FocusTarget::Field).collect();
        targets.extend([FocusTarget::GenerateButton, FocusTarget::CopyButton, FocusTarget::GenerateNewButton]);
        targets
    }

    pub fn is_article_action(self) -> bool {
        matches!(self, FocusTarget::CopyButton | FocusTarget::GenerateNewButton)
    }
}

/// Transient message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

/// Diagnostics shown in the logs panel.
#[derive(Debug)]
pub struct LogsState {
    pub entries: Vec<String>,
    pub is_visible: bool,
}

impl Default for LogsState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            is_visible: true,
        }
    }
}

impl LogsState {
    pub fn toggle_visible(&mut self) {
        self.is_visible = !self.is_visible;
    }

    pub fn push(&mut self, line: impl AsRef<str>) {
        let stamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        self.entries.push(format!("{stamp} {}", line.as_ref()));
        if self.entries.len() > MAX_LOG_ENTRIES {
            let _ = self.entries.drain(0..self.entries.len() - MAX_LOG_ENTRIES);
        }
    }
}

#[derive(Debug)]
pub struct App {
    /// Shared, cross-cutting context (backend, clipboard)
    pub ctx: SharedCtx,
    /// Every form input
    pub form: FormState,
    /// Currently focused widget
    pub focus: FocusTarget,
    /// Byte cursor inside the focused text field
    pub cursor: usize,
    /// Last generated article; replaced wholesale on each success
    pub article: Option<Article>,
    /// Vertical scroll offset of the article panel
    pub article_scroll: u16,
    /// Whether a generation request is in flight
    pub loading: bool,
    /// Animation frame for the loading throbber
    pub throbber_idx: usize,
    pub notice: Option<Notice>,
    pub logs: LogsState,
    in_flight: HashSet<RequestId>,
    next_request_id: RequestId,
}

impl App {
    pub fn new(ctx: SharedCtx) -> Self {
        let mut logs = LogsState::default();
        logs.push(format!("Completion endpoint: {}", ctx.endpoint));
        Self {
            ctx,
            form: FormState::default(),
            focus: FocusTarget::Field(FieldId::Topic),
            cursor: 0,
            article: None,
            article_scroll: 0,
            loading: false,
            throbber_idx: 0,
            notice: None,
            logs,
            in_flight: HashSet::new(),
            next_request_id: 1,
        }
    }

    /// Text currently rendered in the article panel.
    pub fn article_text(&self) -> &str {
        self.article.as_ref().map(Article::text).unwrap_or_default()
    }

    /// Number of generation requests that have not resolved yet.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Move focus forward or backward in tab order, wrapping at the ends.
    pub fn cycle_focus(&mut self, forward: bool) {
        let targets = FocusTarget::all();
        let len = targets.len();
        let current = targets.iter().position(|target| *target == self.focus).unwrap_or(0);
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.set_focus(targets[next]);
    }

    /// Focus a target, parking the text cursor at the end of a text field.
    pub fn set_focus(&mut self, target: FocusTarget) {
        self.focus = target;
        self.cursor = match target {
            FocusTarget::Field(field) => self.form.text(field).map(str::len).unwrap_or(0),
            _ => 0,
        };
    }

    /// Updates the application state based on a message.
    ///
    /// # Returns
    ///
    /// Vector of side effects that should be performed.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        let mut effects = Vec::new();
        match msg {
            Msg::Submit => effects.push(self.submit()),
            Msg::CopyArticle => {
                let text = self.article_text();
                if text.is_empty() {
                    tracing::debug!("copy requested with no article; ignoring");
                } else {
                    effects.push(Effect::CopyToClipboardRequested(text.to_string()));
                }
            }
            Msg::Tick => {
                if self.loading {
                    self.throbber_idx = (self.throbber_idx + 1) % 10;
                }
                if self.notice.as_ref().is_some_and(|notice| notice.expires_at <= Instant::now()) {
                    self.notice = None;
                }
            }
            Msg::Resize(_, _) => {
                // Layout is recomputed on every draw.
            }
            Msg::ExecCompleted(outcome) => self.apply_outcome(outcome),
        }
        effects
    }

    fn submit(&mut self) -> Effect {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let request = CompletionRequest::from(&self.form);
        self.in_flight.insert(request_id);
        if !self.loading {
            self.throbber_idx = 0;
        }
        self.loading = true;

        tracing::info!(request_id, prompt_len = request.message.len(), "generating article");
        self.logs.push(format!("Generating article (request #{request_id})"));
        Effect::GenerateArticle { request_id, request }
    }

    fn apply_outcome(&mut self, outcome: &ExecOutcome) {
        if let Some(request_id) = outcome.request_id() {
            self.in_flight.remove(&request_id);
            self.loading = !self.in_flight.is_empty();
        }

        match outcome {
            ExecOutcome::ArticleReady { request_id, article } => {
                tracing::info!(request_id, chars = article.text().len(), "article received");
                self.logs.push(format!("Article received (request #{request_id})"));
                self.article = Some(article.clone());
                self.article_scroll = 0;
            }
            ExecOutcome::ArticleFailed { request_id, error } => {
                tracing::error!(request_id, %error, "failed to generate article");
                self.logs.push(format!("Failed to generate article (request #{request_id}): {error}"));
            }
            ExecOutcome::Copied => {
                self.logs.push(COPIED_NOTICE);
                self.notice = Some(Notice {
                    text: COPIED_NOTICE.to_string(),
                    expires_at: Instant::now() + NOTICE_TTL,
                });
            }
            ExecOutcome::CopyFailed(error) => {
                tracing::error!(%error, "failed to copy text to clipboard");
                self.logs.push(format!("Failed to copy text to clipboard: {error}"));
            }
        }
    }
}
