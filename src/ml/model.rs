use burn::{
    nn::{
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
};

use crate::domain::error::QaError;
use crate::domain::vocabulary::WordIndex;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct MemoryNetworkConfig {
    /// Output width: every vocabulary token plus the reserved padding slot
    pub vocab_size: usize,
    /// Fixed story input width (tokens)
    pub story_max_len: usize,
    /// Fixed question input width (tokens)
    pub query_max_len: usize,
    #[config(default = 64)]
    pub embedding_dim: usize,
    #[config(default = 32)]
    pub cells_nb: usize,
    #[config(default = 0.3)]
    pub dropout: f64,
}

impl MemoryNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> MemoryNetwork<B> {
        // U and M embed into embedding_dim so their dot product scores
        // fact salience against the question. C embeds into query_max_len
        // so the attended response can be added to the attention matrix
        // elementwise.
        let embedding_u = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let embedding_m = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let embedding_c = EmbeddingConfig::new(self.vocab_size, self.query_max_len).init(device);

        // Decoder input per question position: the transposed response
        // row (story_max_len wide) concatenated with the question
        // embedding (embedding_dim wide).
        let decoder = LstmConfig::new(
            self.story_max_len + self.embedding_dim,
            self.cells_nb,
            true,
        )
        .init(device);

        let output = LinearConfig::new(self.cells_nb, self.vocab_size).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();

        MemoryNetwork {
            embedding_u,
            embedding_m,
            embedding_c,
            decoder,
            output,
            dropout,
        }
    }

    /// A checkpoint and its word index are one unit: refuse to pair this
    /// architecture with an index of a different size, since loading
    /// anyway would produce silently wrong predictions.
    pub fn validate_word_index(&self, index: &WordIndex) -> Result<(), QaError> {
        let found = index.len() + 1;
        if self.vocab_size != found {
            return Err(QaError::ArtifactMismatch {
                expected: self.vocab_size,
                found,
            });
        }
        Ok(())
    }
}

/// Single-hop End-to-End Memory Network.
///
/// Three independent embedding spaces over the vocabulary: M scores how
/// salient each story fact is against the question, C carries the content
/// to report, U encodes the question itself. The split is what makes
/// single-hop memory attention trainable on small QA corpora.
#[derive(Module, Debug)]
pub struct MemoryNetwork<B: Backend> {
    embedding_u: Embedding<B>,
    embedding_m: Embedding<B>,
    embedding_c: Embedding<B>,
    decoder: Lstm<B>,
    output: Linear<B>,
    dropout: Dropout,
}

impl<B: Backend> MemoryNetwork<B> {
    /// stories: [batch, story_len], queries: [batch, query_len]
    /// → logits over the vocabulary: [batch, vocab_size]
    pub fn forward(
        &self,
        stories: Tensor<B, 2, Int>,
        queries: Tensor<B, 2, Int>,
    ) -> Tensor<B, 2> {
        let [batch_size, _] = stories.dims();

        let memory = self.dropout.forward(self.embedding_m.forward(stories.clone()));
        let context = self.dropout.forward(self.embedding_c.forward(stories));
        let question = self.dropout.forward(self.embedding_u.forward(queries));
        // memory:   [batch, story_len, embedding_dim]
        // context:  [batch, story_len, query_len]
        // question: [batch, query_len, embedding_dim]

        // Attention logits: pairwise dot products between memory vectors
        // and question vectors, reducing the embedding axis.
        // [batch, story_len, query_len]
        let scores = memory.matmul(question.clone().swap_dims(1, 2));

        // Softmax over the story axis: each question position gets a
        // normalized soft-pointer over story facts.
        let attention = burn::tensor::activation::softmax(scores, 1);

        // Attended response: attention plus the context embedding
        // (same shape, elementwise), then swap axes so the response is
        // indexed by question position first. [batch, query_len, story_len]
        let response = (attention + context).swap_dims(1, 2);

        // Concatenate with the raw question embedding on the feature axis.
        // [batch, query_len, story_len + embedding_dim]
        let features = Tensor::cat(vec![response, question], 2);

        // The LSTM reduces the query axis to one answer representation:
        // run it over the sequence and keep the final hidden state.
        let (hidden, _state) = self.decoder.forward(features, None);
        let [_, steps, cells] = hidden.dims();
        let summary = hidden
            .slice([0..batch_size, steps - 1..steps, 0..cells])
            .reshape([batch_size, cells]);

        self.output.forward(self.dropout.forward(summary))
    }

    /// Categorical cross-entropy between the predicted distribution and
    /// one-hot targets, averaged over the batch.
    pub fn forward_loss(
        &self,
        stories: Tensor<B, 2, Int>,
        queries: Tensor<B, 2, Int>,
        targets: Tensor<B, 2>,
    ) -> Tensor<B, 1> {
        let logits = self.forward(stories, queries);
        let log_probs = burn::tensor::activation::log_softmax(logits, 1);
        (log_probs * targets).sum_dim(1).mean().neg()
    }
}
