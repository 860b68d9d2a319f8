use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "medscreen")]
#[command(
    author,
    version,
    about = "Guarded medical-education chat assistant"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive guarded chat session
    Chat {
        /// Model identifier
        #[arg(short, long, default_value = medscreen_chat::DEFAULT_MODEL)]
        model: String,

        /// Model service credential
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Maximum retained conversation turns
        #[arg(long, default_value = "20")]
        max_history: usize,

        /// Model request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Answer from the offline mock backend instead of the model service
        #[arg(long)]
        mock: bool,

        /// Lexicon YAML path overriding the built-in keyword lists
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the guardrail screen once against the given text and exit
    Screen {
        /// Text to screen
        text: String,

        /// Lexicon YAML path overriding the built-in keyword lists
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
