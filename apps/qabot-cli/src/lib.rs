//! Shared plumbing for the `qabot` binaries.

use std::io;

use tracing_subscriber::EnvFilter;

use qabot_chat::{train, ChatLog, ChatSession, Reply, Responder};
use qabot_core::config::{Config, Settings};
use qabot_core::error::Result;

/// `RUST_LOG` wins; otherwise only warnings so the conversation stays readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    Ok(config.settings()?)
}

pub fn run_train(settings: &Settings) -> Result<()> {
    println!("📚 Training on {}", settings.paths.dataset.display());
    let report = train(settings)?;
    println!("✅ Training completed and model saved.");
    println!(
        "📊 {} questions, {} terms → {}",
        report.records,
        report.vocabulary,
        report.artifact.display()
    );
    if report.unchanged {
        println!("ℹ️  Dataset unchanged since the previous training run");
    }
    Ok(())
}

pub fn run_chat(settings: &Settings) -> Result<()> {
    let responder = Responder::open(settings)?;
    let log = ChatLog::new(&settings.paths.log);
    let stdin = io::stdin();
    let stdout = io::stdout();
    ChatSession::new(&responder, &log).run(stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Splits raw process arguments into the program name and the question words
/// joined by spaces. A missing `argv[0]` falls back to `default_prog`.
pub fn split_args<I>(args: I, default_prog: &str) -> (String, String)
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let prog = args.next().unwrap_or_else(|| default_prog.to_string());
    let query = args.collect::<Vec<_>>().join(" ");
    (prog, query)
}

/// One-shot rendering of a reply with its score.
pub fn describe_reply(reply: &Reply, threshold: f32) -> String {
    match reply {
        Reply::Answer { text, index, score } => {
            format!("Bot: {}\n  score={:.4}  question #{}", text, score, index)
        }
        Reply::Fallback { text, score } => {
            format!("Bot: {}\n  score={:.4}  (below threshold {})", text, score, threshold)
        }
        Reply::Goodbye { text } => format!("Bot: {}", text),
    }
}

/// Reports the expected user mistakes as a console line; anything else propagates.
pub fn finish(outcome: Result<()>) -> anyhow::Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.is_user_facing() => {
            println!("❌ {}", e);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "operation failed");
            Err(e.into())
        }
    }
}
