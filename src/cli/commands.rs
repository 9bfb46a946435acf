// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `ask`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the memory network on a bAbI train/test file pair
    Train(TrainArgs),

    /// Ask a question about a story using a trained checkpoint
    Ask(AskArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// bAbI training file (one fact or question per line)
    #[arg(long, default_value = "data/qa1_single-supporting-fact_train.txt")]
    pub train_file: String,

    /// bAbI test file, used for validation and vocabulary coverage
    #[arg(long, default_value = "data/qa1_single-supporting-fact_test.txt")]
    pub test_file: String,

    /// Directory to save model checkpoints and the vocabulary
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Width of the word embedding vectors
    #[arg(long, default_value_t = 64)]
    pub embedding_dim: usize,

    /// Hidden size of the LSTM answer decoder
    #[arg(long, default_value_t = 32)]
    pub cells_nb: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 120)]
    pub epochs: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Dropout probability — randomly zeroes activations during training
    /// to prevent overfitting
    #[arg(long, default_value_t = 0.3)]
    pub dropout: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            train_file:     a.train_file,
            test_file:      a.test_file,
            checkpoint_dir: a.checkpoint_dir,
            embedding_dim:  a.embedding_dim,
            dropout:        a.dropout,
            cells_nb:       a.cells_nb,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            lr:             a.lr,
        }
    }
}

/// All arguments for the `ask` command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The story the question is about (facts separated by newlines or periods)
    #[arg(long)]
    pub story: String,

    /// The natural language question to answer
    #[arg(long)]
    pub question: String,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
