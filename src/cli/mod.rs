// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train` — trains the memory network on a bAbI task pair
//   2. `ask`   — loads a checkpoint and answers a question
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AskArgs, Commands, TrainArgs};

use crate::domain::error::QaError;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "story-qa",
    version = "0.1.0",
    about = "Train a memory network on bAbI stories, then ask questions about them."
)]
pub struct Cli {
    /// The subcommand to run (train or ask)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Ask(args)   => Self::run_ask(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on corpus: {}", args.train_file);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    /// Handles the `ask` subcommand.
    /// Loads the model from checkpoint, predicts the answer token
    /// and prints it as a refined sentence with its confidence.
    fn run_ask(args: AskArgs) -> Result<()> {
        use crate::application::ask_use_case::AskUseCase;

        let use_case = AskUseCase::new(&args.checkpoint_dir)?;

        let (token, confidence) = match use_case.predict(&args.story, &args.question) {
            Ok(prediction) => prediction,
            // A blank story or question is a user mistake, not a crash:
            // degrade to a polite message instead of a stack of context.
            Err(err) if err.downcast_ref::<QaError>().map_or(false, |e| {
                matches!(e, QaError::EmptyInput { .. })
            }) =>
            {
                println!("\nI need both a story and a question to answer.");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let answer = use_case.refine(&args.question, &token);
        println!("\nAnswer: {}", answer);
        println!("Confidence: {:.1}%", confidence);
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_args_defaults() {
        let cli = Cli::parse_from(["story-qa", "train"]);
        let Commands::Train(args) = cli.command else {
            panic!("expected train subcommand");
        };
        assert_eq!(args.epochs, 120);
        assert_eq!(args.batch_size, 32);
        assert_eq!(args.embedding_dim, 64);
        assert_eq!(args.checkpoint_dir, "checkpoints");
    }

    #[test]
    fn test_ask_args_required() {
        let cli = Cli::parse_from([
            "story-qa",
            "ask",
            "--story",
            "Mary moved to the bathroom.",
            "--question",
            "Where is Mary?",
        ]);
        let Commands::Ask(args) = cli.command else {
            panic!("expected ask subcommand");
        };
        assert_eq!(args.question, "Where is Mary?");
    }

    #[test]
    fn test_ask_requires_story_and_question() {
        assert!(Cli::try_parse_from(["story-qa", "ask"]).is_err());
    }
}
