//! Interactive terminal chat session.
//!
//! Reads one line of input per turn, runs it through the orchestrator,
//! and prints the reply. Blank lines are ignored without invoking the
//! pipeline; `exit`, `quit` or EOF ends the session. When a turn used
//! recalled context, the summary is shown dimmed above the reply.

use crate::orchestrator::{Orchestrator, TurnError};
use owo_colors::OwoColorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Colored output helper for the session.
pub struct Output {
    colored: bool,
}

impl Output {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn banner(&self, model: &str) {
        if self.colored {
            println!(
                "{} {}",
                "recall-chat".bright_cyan().bold(),
                format!("v{} ({model})", env!("CARGO_PKG_VERSION")).dimmed()
            );
            println!("{}", "Type a message, or 'exit' to quit.\n".dimmed());
        } else {
            println!(
                "recall-chat v{} ({model})\nType a message, or 'exit' to quit.\n",
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    fn recalled(&self, summary: &str) {
        if self.colored {
            println!("{}", format!("[recalled] {summary}").dimmed());
        } else {
            println!("[recalled] {summary}");
        }
    }

    fn reply(&self, text: &str) {
        if self.colored {
            println!("{} {text}\n", "assistant:".green().bold());
        } else {
            println!("assistant: {text}\n");
        }
    }

    fn warning(&self, text: &str) {
        if self.colored {
            println!("{}", format!("warning: {text}").yellow());
        } else {
            println!("warning: {text}");
        }
    }

    fn error(&self, err: &TurnError) {
        let kind = match err {
            TurnError::WriteFailed(_) => "write",
            TurnError::GenerationFailed(_) => "generate",
        };
        if self.colored {
            eprintln!("{} {err}\n", format!("error[{kind}]:").red().bold());
        } else {
            eprintln!("error[{kind}]: {err}\n");
        }
    }
}

/// Run the interactive session loop until EOF or an exit command.
///
/// Each submitted line is exactly one call to `run_turn`; a failed turn
/// prints the error kind and the loop continues so the user can resubmit.
pub async fn run(
    orchestrator: &Orchestrator,
    user_id: &str,
    project_id: &str,
    model: &str,
    output: &Output,
) -> std::io::Result<()> {
    output.banner(model);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let user_text = line.trim();
        if user_text.is_empty() {
            continue;
        }
        if user_text.eq_ignore_ascii_case("exit") || user_text.eq_ignore_ascii_case("quit") {
            break;
        }

        match orchestrator.run_turn(user_text, user_id, project_id).await {
            Ok(result) => {
                if !result.recalled_summary.is_empty() {
                    output.recalled(&result.recalled_summary);
                }
                for warning in &result.warnings {
                    output.warning(&warning.to_string());
                }
                output.reply(&result.reply);
            }
            Err(err) => output.error(&err),
        }
    }

    Ok(())
}
