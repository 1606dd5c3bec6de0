//! CLI for the recall-chat binary.
//!
//! Uses clap for argument parsing and owo-colors for colored terminal
//! output. Running without a subcommand starts the HTTP server; `chat`
//! starts an interactive terminal session against the same turn pipeline.

/// Interactive terminal chat session.
pub mod session;

use clap::{Parser, Subcommand};

/// recall-chat - memory-augmented chat server and CLI
#[derive(Parser, Debug)]
#[command(
    name = "recall-chat",
    version,
    about = "Memory-augmented chat server and CLI",
    long_about = "A chat service that persists every conversation turn to a remote\n\
                  memory service and grounds completions in recalled context.\n\n\
                  Run without arguments to start the HTTP server, or use 'chat'\n\
                  for an interactive terminal session.",
    after_help = "EXAMPLES:\n    \
                  recall-chat           # Start the HTTP server\n    \
                  recall-chat chat      # Start an interactive chat session\n\n\
                  Configuration is read from the environment (and .env):\n    \
                  OPENAI_API_KEY, RECALLIO_API_KEY, RECALLIO_PROJECT_ID, ..."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session in the terminal
    Chat,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
