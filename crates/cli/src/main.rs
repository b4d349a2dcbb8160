use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quill_api::{CompletionBackend, CompletionClient};
use quill_tui::SharedCtx;
use quill_types::{Answer, ArticleFormat, CompletionRequest, FormState, Tone};
use quill_util::{ClipboardSink, QuillConfig, SystemClipboard, log_file_path};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Article creation assistant.
///
/// Without a subcommand, opens the interactive form.
#[derive(Debug, Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    /// Base URL of the completion service (overrides QUILL_API_BASE and the config file)
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate an article without the interactive form
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// What is the main topic of your article?
    #[arg(long, default_value = "")]
    topic: String,
    /// Who are you writing this article for?
    #[arg(long, default_value = "")]
    audience: String,
    /// What is the main goal of your article?
    #[arg(long, default_value = "")]
    goal: String,
    /// What key takeaway(s) do you want readers to get?
    #[arg(long, default_value = "")]
    takeaways: String,
    /// What is your unique angle or approach?
    #[arg(long, default_value = "")]
    angle: String,
    /// Keywords to target; omit to ask for keyword research
    #[arg(long, default_value = "")]
    keywords: String,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    #[arg(long, value_enum)]
    tone: Option<ToneArg>,
    /// Whether you will provide sources to reference
    #[arg(long, value_enum)]
    sources: Option<AnswerArg>,
    /// Whether you will provide information crucial for credibility
    #[arg(long, value_enum)]
    credibility: Option<AnswerArg>,
    /// Print the request that would be sent instead of sending it
    #[arg(long)]
    dry_run: bool,
    /// Copy the generated article to the clipboard
    #[arg(long)]
    copy: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Listicle,
    StepByStepGuide,
    InDepthAnalysis,
    Other,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ToneArg {
    Formal,
    Casual,
    Humorous,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AnswerArg {
    No,
    Yes,
}

impl From<FormatArg> for ArticleFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Listicle => ArticleFormat::Listicle,
            FormatArg::StepByStepGuide => ArticleFormat::StepByStepGuide,
            FormatArg::InDepthAnalysis => ArticleFormat::InDepthAnalysis,
            FormatArg::Other => ArticleFormat::Other,
        }
    }
}

impl From<ToneArg> for Tone {
    fn from(value: ToneArg) -> Self {
        match value {
            ToneArg::Formal => Tone::Formal,
            ToneArg::Casual => Tone::Casual,
            ToneArg::Humorous => Tone::Humorous,
        }
    }
}

impl From<AnswerArg> for Answer {
    fn from(value: AnswerArg) -> Self {
        match value {
            AnswerArg::No => Answer::No,
            AnswerArg::Yes => Answer::Yes,
        }
    }
}

impl GenerateArgs {
    fn to_form(&self) -> FormState {
        FormState {
            topic: self.topic.clone(),
            audience: self.audience.clone(),
            goal: self.goal.clone(),
            takeaways: self.takeaways.clone(),
            angle: self.angle.clone(),
            keywords: self.keywords.clone(),
            format: self.format.map(Into::into),
            tone: self.tone.map(Into::into),
            sources: self.sources.map(Into::into),
            credibility: self.credibility.map(Into::into),
            ..FormState::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.is_some());

    let config = QuillConfig::resolve(cli.api_base.as_deref());
    tracing::info!(api_base = %config.api_base, source = %config.source, "resolved completion service");
    let client = CompletionClient::new(&config.api_base)?;

    match cli.command {
        None => {
            let ctx = SharedCtx {
                endpoint: client.endpoint().to_string(),
                backend: Arc::new(client),
                clipboard: Arc::new(SystemClipboard),
            };
            quill_tui::run(ctx).await
        }
        Some(Command::Generate(args)) => run_generate(&client, &args).await,
    }
}

/// Route tracing output away from the terminal UI.
///
/// The interactive form owns the screen, so its logs go to a file; headless
/// runs log to stderr and keep stdout for the article.
fn init_tracing(headless: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if headless {
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
        return;
    }

    let path = log_file_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        Err(_) => {
            // No writable log file; stay silent rather than draw over the UI.
            let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::sink).try_init();
        }
    }
}

async fn run_generate(client: &CompletionClient, args: &GenerateArgs) -> Result<()> {
    let request = CompletionRequest::from(&args.to_form());

    if args.dry_run {
        let preview = json!({
            "method": "POST",
            "url": client.endpoint().as_str(),
            "headers": { "content-type": "application/json" },
            "body": request,
        });
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    let article = client.complete(&request).await.context("failed to generate article")?;
    println!("{}", article.text());

    if args.copy {
        if article.text().is_empty() {
            tracing::warn!("article has no content; nothing copied");
        } else {
            SystemClipboard.set_text(article.text()).context("failed to copy text to clipboard")?;
            eprintln!("Article Copied to Clipboard!");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_opens_the_form() {
        let cli = Cli::try_parse_from(["quill"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.api_base.is_none());
    }

    #[test]
    fn generate_flags_fill_the_form() {
        let cli = Cli::try_parse_from([
            "quill",
            "--api-base",
            "http://articles.local:3001",
            "generate",
            "--topic",
            "Cats",
            "--format",
            "step-by-step-guide",
            "--tone",
            "casual",
            "--sources",
            "yes",
            "--dry-run",
        ])
        .expect("parse");
        assert_eq!(cli.api_base.as_deref(), Some("http://articles.local:3001"));

        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate subcommand");
        };
        assert!(args.dry_run);
        assert!(!args.copy);

        let form = args.to_form();
        assert_eq!(form.topic, "Cats");
        assert_eq!(form.format, Some(ArticleFormat::StepByStepGuide));
        assert_eq!(form.tone, Some(Tone::Casual));
        assert_eq!(form.sources, Some(Answer::Yes));
        assert_eq!(form.credibility, None);
        assert!(CompletionRequest::from(&form).message.contains("9. Sources: Yes, will provide links later"));
    }

    #[test]
    fn unknown_choice_values_are_rejected() {
        assert!(Cli::try_parse_from(["quill", "generate", "--tone", "angry"]).is_err());
    }
}
