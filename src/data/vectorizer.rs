// ============================================================
// Layer 4 — TF-IDF Vectorizer
// ============================================================
// Turns a question's token ids into a fixed-length feature
// vector, one slot per vocabulary entry:
//
//   tf(t)   = count of t in the question / tokens in the question
//   idf(t)  = ln((1 + N) / (1 + df(t))) + 1     (smoothed)
//   x[t]    = tf(t) * idf(t), then L2-normalised
//
// N is the number of training questions, df(t) the number of
// them containing t. Padding and unknown tokens never count.

use serde::{Deserialize, Serialize};

/// Token ids the vectorizer ignores: [PAD] and [UNK].
pub const RESERVED_IDS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    idf: Vec<f32>,
}

impl TfIdfVectorizer {
    /// Learn IDF weights from the training questions' token ids.
    pub fn fit(documents: &[Vec<u32>], vocab_size: usize) -> Self {
        let mut df = vec![0usize; vocab_size];
        for doc in documents {
            let mut seen = vec![false; vocab_size];
            for &id in doc {
                let id = id as usize;
                if id >= RESERVED_IDS as usize && id < vocab_size && !seen[id] {
                    seen[id] = true;
                    df[id] += 1;
                }
            }
        }

        let n   = documents.len() as f32;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();
        Self { idf }
    }

    pub fn from_idf(idf: Vec<f32>) -> Self {
        Self { idf }
    }

    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// Vectorise one question. Out-of-range and reserved ids are
    /// skipped; a question with no usable tokens maps to all zeros.
    pub fn transform(&self, ids: &[u32]) -> Vec<f32> {
        let mut x = vec![0.0f32; self.idf.len()];
        let usable: Vec<usize> = ids
            .iter()
            .map(|&id| id as usize)
            .filter(|&id| id >= RESERVED_IDS as usize && id < self.idf.len())
            .collect();
        if usable.is_empty() {
            return x;
        }

        let per_token = 1.0 / usable.len() as f32;
        for id in usable {
            x[id] += per_token;
        }
        for (v, w) in x.iter_mut().zip(&self.idf) {
            *v *= w;
        }

        let norm = x.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            x.iter_mut().for_each(|v| *v /= norm);
        }
        x
    }
}
