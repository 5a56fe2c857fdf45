//! Deterministic text embedding via character n-gram hashing.
//!
//! [`HashEmbedder`] maps each character trigram of a name to a seeded random
//! direction and sums them, so the same text always produces the same vector
//! and texts sharing surface form end up correlated. This is a lightweight
//! stand-in for a learned embedding model; anything implementing
//! [`Embedder`] can replace it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::Rng;
use rand::SeedableRng;

use crate::symbol::Embedder;

/// Default embedding dimension.
pub const DEFAULT_DIMENSION: usize = 256;

/// Character-trigram hashing embedder.
///
/// Each trigram of the padded, lowercased input is hashed into a seed, the
/// seed drives a [`rand::rngs::StdRng`] producing a fixed random direction,
/// and the directions are accumulated and L2-normalized.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn trigram_vector(&self, trigram: &[char]) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        trigram.hash(&mut hasher);
        let mut rng = rand::rngs::StdRng::seed_from_u64(hasher.finish());
        (0..self.dim).map(|_| rng.gen_range(-1.0..1.0)).collect()
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        // Pad with sentinels so one- and two-character names still yield a
        // trigram, and boundary characters carry positional weight.
        let mut chars: Vec<char> = Vec::with_capacity(text.len() + 2);
        chars.push('\u{2}');
        chars.extend(text.to_lowercase().chars());
        chars.push('\u{3}');

        let mut acc = vec![0.0f32; self.dim];
        for window in chars.windows(3) {
            for (slot, value) in acc.iter_mut().zip(self.trigram_vector(window)) {
                *slot += value;
            }
        }

        let norm = acc.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for slot in &mut acc {
                *slot /= norm;
            }
        }
        acc
    }
}
