//! # Command Execution Layer
//!
//! This module translates application effects (`Effect`) into imperative
//! commands (`Cmd`) and executes them. It is the boundary where the pure
//! state in [`App::update`](crate::app::App::update) meets side effects:
//! - Writing to the system clipboard
//! - Posting the composed prompt to the completion endpoint
//!
//! ## Design
//! - [`Cmd`] is the effectful command type (clipboard / completion).
//! - [`from_effects`] translates [`Effect`]s into [`Cmd`]s.
//! - [`run_cmds`] executes them. Clipboard writes finish immediately; each
//!   completion request is spawned on the Tokio runtime and returned as a
//!   pending future so the event loop stays responsive.
//!
//! Every command produces exactly one [`ExecOutcome`], which the runtime
//! feeds back into the app as `Msg::ExecCompleted`.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use quill_types::{CompletionRequest, Effect, ExecOutcome, RequestId};
use tokio::task::spawn;

use crate::app::SharedCtx;

/// Side-effectful commands executed outside of pure state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Write text into the system clipboard.
    ClipboardSet(String),
    /// POST a prompt to the completion endpoint.
    GenerateArticle {
        request_id: RequestId,
        request: CompletionRequest,
    },
}

/// Outcomes that resolved synchronously plus futures still in flight.
#[derive(Default)]
pub struct CommandBatch {
    pub immediate: Vec<ExecOutcome>,
    pub pending: Vec<BoxFuture<'static, ExecOutcome>>,
}

/// Convert application [`Effect`]s into [`Cmd`] instances.
pub fn from_effects(effects: Vec<Effect>) -> Vec<Cmd> {
    effects
        .into_iter()
        .map(|effect| match effect {
            Effect::GenerateArticle { request_id, request } => Cmd::GenerateArticle { request_id, request },
            Effect::CopyToClipboardRequested(text) => Cmd::ClipboardSet(text),
        })
        .collect()
}

/// Translate effects and execute the resulting commands.
pub fn run_from_effects(ctx: &SharedCtx, effects: Vec<Effect>) -> CommandBatch {
    run_cmds(ctx, from_effects(effects))
}

/// Execute a list of commands.
pub fn run_cmds(ctx: &SharedCtx, commands: Vec<Cmd>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for command in commands {
        match command {
            Cmd::ClipboardSet(text) => batch.immediate.push(execute_clipboard_set(ctx, &text)),
            Cmd::GenerateArticle { request_id, request } => {
                batch.pending.push(spawn_generate_article(ctx, request_id, request));
            }
        }
    }
    batch
}

fn execute_clipboard_set(ctx: &SharedCtx, text: &str) -> ExecOutcome {
    match ctx.clipboard.set_text(text) {
        Ok(()) => ExecOutcome::Copied,
        Err(error) => ExecOutcome::CopyFailed(error.to_string()),
    }
}

/// Spawn the completion request on the runtime.
///
/// A task that panics or is cancelled still resolves to `ArticleFailed` so the
/// request is never left counted as in flight.
fn spawn_generate_article(ctx: &SharedCtx, request_id: RequestId, request: CompletionRequest) -> BoxFuture<'static, ExecOutcome> {
    let backend = ctx.backend.clone();
    let handle = spawn(async move {
        match backend.complete(&request).await {
            Ok(article) => ExecOutcome::ArticleReady { request_id, article },
            Err(error) => ExecOutcome::ArticleFailed {
                request_id,
                error: error.to_string(),
            },
        }
    });

    handle
        .map(move |joined| {
            joined.unwrap_or_else(|error| ExecOutcome::ArticleFailed {
                request_id,
                error: format!("generation task failed: {error}"),
            })
        })
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::RecordingClipboard;
    use async_trait::async_trait;
    use quill_api::{CompletionBackend, CompletionError};
    use quill_types::{Article, FormState};
    use std::sync::Arc;

    /// Backend that echoes the first prompt line back, or fails on request.
    struct EchoBackend {
        fail: bool,
    }

    #[async_trait]
    impl CompletionBackend for EchoBackend {
        async fn complete(&self, request: &CompletionRequest) -> Result<Article, CompletionError> {
            if self.fail {
                return Err(CompletionError::NoChoices);
            }
            let first_line = request.message.lines().nth(1).unwrap_or_default().to_string();
            Ok(Article::from_content(first_line))
        }
    }

    fn ctx(fail: bool, clipboard: Arc<RecordingClipboard>) -> SharedCtx {
        SharedCtx {
            backend: Arc::new(EchoBackend { fail }),
            clipboard,
            endpoint: "http://localhost:3001/completions".into(),
        }
    }

    fn cats_request() -> CompletionRequest {
        CompletionRequest::from(&FormState {
            topic: "Cats".into(),
            ..FormState::default()
        })
    }

    #[test]
    fn effects_map_to_commands() {
        let request = cats_request();
        let commands = from_effects(vec![
            Effect::CopyToClipboardRequested("Hello world".into()),
            Effect::GenerateArticle {
                request_id: 7,
                request: request.clone(),
            },
        ]);
        assert_eq!(
            commands,
            vec![
                Cmd::ClipboardSet("Hello world".into()),
                Cmd::GenerateArticle { request_id: 7, request }
            ]
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn clipboard_write_resolves_immediately() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let batch = run_cmds(&ctx(false, clipboard.clone()), vec![Cmd::ClipboardSet("Hello world".into())]);

        assert!(batch.pending.is_empty());
        assert_eq!(batch.immediate, vec![ExecOutcome::Copied]);
        assert_eq!(*clipboard.writes.lock().expect("clipboard lock"), vec!["Hello world".to_string()]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn denied_clipboard_reports_failure() {
        let clipboard = Arc::new(RecordingClipboard {
            deny: true,
            ..RecordingClipboard::default()
        });
        let batch = run_cmds(&ctx(false, clipboard), vec![Cmd::ClipboardSet("Hello world".into())]);
        assert!(matches!(batch.immediate.as_slice(), [ExecOutcome::CopyFailed(error)] if error.contains("access denied")));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn generation_runs_in_background() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let mut batch = run_cmds(
            &ctx(false, clipboard),
            vec![Cmd::GenerateArticle {
                request_id: 3,
                request: cats_request(),
            }],
        );
        assert!(batch.immediate.is_empty());
        let pending = batch.pending.pop().expect("pending generation");
        assert_eq!(
            pending.await,
            ExecOutcome::ArticleReady {
                request_id: 3,
                article: Article::from_content("1. Topic: Cats"),
            }
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn backend_failure_keeps_request_id() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let mut batch = run_cmds(
            &ctx(true, clipboard),
            vec![Cmd::GenerateArticle {
                request_id: 4,
                request: cats_request(),
            }],
        );
        let outcome = batch.pending.pop().expect("pending generation").await;
        assert!(matches!(outcome, ExecOutcome::ArticleFailed { request_id: 4, .. }));
    }
}
