mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use medscreen_chat::{
    CompletionBackend, GeminiBackend, MockBackend, Session, TurnPipeline,
};
use medscreen_classifiers::{GuardrailScreen, Lexicon};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            model,
            api_key,
            max_history,
            timeout,
            mock,
            lexicon,
            verbose,
        } => {
            init_logging(verbose);

            let lexicon = load_lexicon(lexicon.as_deref())?;
            let backend: Arc<dyn CompletionBackend> = if mock {
                Arc::new(MockBackend::new())
            } else {
                let api_key = api_key.context(
                    "no model credential: pass --api-key, set GEMINI_API_KEY, or use --mock",
                )?;
                Arc::new(GeminiBackend::new(
                    model.clone(),
                    api_key,
                    Duration::from_secs(timeout),
                )?)
            };

            print_banner(backend.name(), &model);
            run_repl(backend, &lexicon, max_history).await?;
        }

        Commands::Screen {
            text,
            lexicon,
            verbose,
        } => {
            init_logging(verbose);

            let lexicon = load_lexicon(lexicon.as_deref())?;
            let screen = GuardrailScreen::from_lexicon(&lexicon)?;

            match screen.screen(&text).await? {
                Some(hit) => {
                    println!("BLOCK  category={}", hit.category.label());
                    if let Some(term) = &hit.term {
                        println!("       term=\"{}\"", term);
                    }
                    println!("       classifier={}", hit.classifier);
                }
                None => println!("PASS   would be forwarded to the model"),
            }
        }
    }

    Ok(())
}

async fn run_repl(
    backend: Arc<dyn CompletionBackend>,
    lexicon: &Lexicon,
    max_history: usize,
) -> anyhow::Result<()> {
    let pipeline = TurnPipeline::with_lexicon(backend, lexicon, max_history)?;
    let mut session = Session::new();
    tracing::info!(session = %session.id(), max_history, "chat session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        // Blank lines never enter the pipeline.
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.clear();
                println!("History and counters cleared.\n");
                continue;
            }
            "/stats" => {
                println!("Messages:        {}", session.message_count());
                println!("Blocked queries: {}\n", session.blocked_count());
                continue;
            }
            _ => {}
        }

        let outcome = pipeline.process_turn(&mut session, input).await?;
        println!("\nassistant> {}\n", outcome.reply());
    }

    Ok(())
}

fn load_lexicon(path: Option<&Path>) -> anyhow::Result<Lexicon> {
    match path {
        Some(path) => Lexicon::from_file(path)
            .map_err(|e| anyhow::anyhow!("failed to load lexicon {}: {}", path.display(), e)),
        None => Ok(Lexicon::default()),
    }
}

fn print_banner(backend: &str, model: &str) {
    println!();
    println!("  ┌─────────────────────────────────────────────────────────┐");
    println!("  │  medscreen — medical education assistant                │");
    println!("  │                                                         │");
    println!("  │  MEDICAL DISCLAIMER                                     │");
    println!("  │  - Educational purposes only                            │");
    println!("  │  - Does NOT replace professional medical advice         │");
    println!("  │  - CANNOT diagnose diseases or prescribe medications    │");
    println!("  │  - Always consult a licensed healthcare provider        │");
    println!("  │                                                         │");
    println!("  │  In an emergency call your local emergency number.      │");
    println!("  └─────────────────────────────────────────────────────────┘");
    println!();
    println!("  Backend: {}  Model: {}", backend, model);
    println!("  Commands: /reset  /stats  /quit");
    println!();
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "medscreen_cli=debug,medscreen_chat=debug,medscreen_classifiers=debug"
    } else {
        "medscreen_cli=info,medscreen_chat=info,medscreen_classifiers=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
