// ============================================================
// Layer 4 — Story Dataset
// ============================================================
// Wraps the vectorized samples in Burn's Dataset trait so the
// DataLoader can call .get(index) and .len() on them.
//
// All sequences are already padded to the shared input geometry
// by the Vectorizer, so every sample in the dataset has the
// same widths.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use burn::data::dataset::Dataset;

use crate::data::vectorizer::StorySample;

pub struct QaDataset {
    samples: Vec<StorySample>,
}

impl QaDataset {
    pub fn new(samples: Vec<StorySample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<StorySample> for QaDataset {
    fn get(&self, index: usize) -> Option<StorySample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
