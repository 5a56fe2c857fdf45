//! Identity primitives for the knowledge graph.
//!
//! [`Entity`] and [`Relation`] are name-keyed tokens: equality and hashing
//! always derive from the name alone, so a token behaves identically as a set
//! member or index key regardless of how it was constructed. On top of exact
//! identity each token offers [`Entity::is_like`], an approximate-equality
//! predicate. In the exact variant it reduces to name equality; in the
//! semantic variant it compares embedding vectors by angular similarity
//! against a configurable threshold.
//!
//! The [`Lexicon`] is the single factory that decides, at graph-construction
//! time, which variant every token gets. Raw strings convert into exact
//! tokens via `From`; semantic tokens are only minted through a lexicon
//! carrying an [`Embedder`].

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Default decision threshold for [`Entity::is_like`] in the semantic variant.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.9;

/// Pluggable text-embedding collaborator.
///
/// The engine does not care how vectors are produced, only that the same
/// text always maps to the same vector and that vectors of one embedder are
/// mutually comparable. See [`crate::embed::HashEmbedder`] for the bundled
/// implementation.
pub trait Embedder: Send + Sync {
    /// Embed a token name into a feature vector.
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// How a token participates in approximate matching.
#[derive(Clone)]
enum Repr {
    /// Name identity only; `is_like` is plain equality.
    Exact,
    /// Embedding computed at construction time, compared by angular
    /// similarity strictly above `threshold`.
    Semantic { vector: Arc<[f32]>, threshold: f32 },
}

impl Repr {
    fn is_like(&self, name: &str, other_name: &str, other: &Repr) -> bool {
        match (self, other) {
            (
                Repr::Semantic { vector: a, threshold },
                Repr::Semantic { vector: b, .. },
            ) => angular_similarity(a, b) > *threshold,
            // A mixed or fully exact pair falls back to name identity.
            _ => name == other_name,
        }
    }
}

/// A named node in the knowledge graph: a symptom, food, dosha, or category.
///
/// Cheap to clone (`Arc<str>` name, shared embedding). Two entities are equal
/// iff their names are equal, in every variant.
#[derive(Clone)]
pub struct Entity {
    name: Arc<str>,
    repr: Repr,
}

/// A named predicate linking two entities in a fact, e.g. `"pacifies"`.
///
/// Structurally identical to [`Entity`]; kept as a separate type so the
/// compiler rejects a relation where a node is expected.
#[derive(Clone)]
pub struct Relation {
    name: Arc<str>,
    repr: Repr,
}

macro_rules! token_impls {
    ($ty:ident) => {
        impl $ty {
            /// Construct the exact (name-identity) variant.
            pub fn new(name: impl Into<Arc<str>>) -> Self {
                Self {
                    name: name.into(),
                    repr: Repr::Exact,
                }
            }

            /// The token's name.
            pub fn name(&self) -> &str {
                &self.name
            }

            /// Approximate equality.
            ///
            /// Name equality, unless both sides carry embeddings, in which
            /// case the angular similarity of the two vectors must strictly
            /// exceed this token's threshold.
            pub fn is_like(&self, other: &$ty) -> bool {
                self.repr.is_like(&self.name, &other.name, &other.repr)
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.name == other.name
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.name.hash(state);
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.name
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.name)
            }
        }

        impl std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($ty), "({})"), self.name)
            }
        }

        impl From<&str> for $ty {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $ty {
            fn from(name: String) -> Self {
                Self::new(name)
            }
        }
    };
}

token_impls!(Entity);
token_impls!(Relation);

/// Token factory selecting the matching strategy for a whole graph.
///
/// Constructed once and handed to the loader / graph; every token minted
/// through the same lexicon shares one strategy, so `is_like` is meaningful
/// across the graph's universe.
#[derive(Clone, Default)]
pub struct Lexicon {
    mode: MatchMode,
}

#[derive(Clone, Default)]
enum MatchMode {
    #[default]
    Exact,
    Semantic {
        embedder: Arc<dyn Embedder>,
        threshold: f32,
    },
}

impl Lexicon {
    /// Exact-identity lexicon: `is_like` is name equality.
    pub fn exact() -> Self {
        Self {
            mode: MatchMode::Exact,
        }
    }

    /// Semantic lexicon: every token is embedded at construction time and
    /// `is_like` compares angular similarity against `threshold`.
    pub fn semantic(embedder: Arc<dyn Embedder>, threshold: f32) -> Self {
        Self {
            mode: MatchMode::Semantic {
                embedder,
                threshold,
            },
        }
    }

    /// Mint an entity under this lexicon's strategy.
    pub fn entity(&self, name: impl Into<Arc<str>>) -> Entity {
        let name = name.into();
        let repr = self.repr_for(&name);
        Entity { name, repr }
    }

    /// Mint a relation under this lexicon's strategy.
    pub fn relation(&self, name: impl Into<Arc<str>>) -> Relation {
        let name = name.into();
        let repr = self.repr_for(&name);
        Relation { name, repr }
    }

    fn repr_for(&self, name: &str) -> Repr {
        match &self.mode {
            MatchMode::Exact => Repr::Exact,
            MatchMode::Semantic {
                embedder,
                threshold,
            } => Repr::Semantic {
                vector: embedder.embed(name).into(),
                threshold: *threshold,
            },
        }
    }
}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match &self.mode {
            MatchMode::Exact => "Exact".to_string(),
            MatchMode::Semantic { threshold, .. } => {
                format!("Semantic(threshold={threshold})")
            }
        };
        f.debug_struct("Lexicon").field("mode", &mode).finish()
    }
}

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 { 0.0 } else { dot / denom }
}

/// Angular similarity in [0, 1]: `1 - arccos(clamp(cos, -1, 1)) / pi`.
///
/// Monotone in cosine similarity; 1.0 for identical directions, 0.5 for
/// orthogonal vectors, 0.0 for opposite directions. Used instead of raw
/// cosine so the value is comparable against a probability-like threshold.
pub fn angular_similarity(a: &[f32], b: &[f32]) -> f32 {
    let cos = cosine_similarity(a, b).clamp(-1.0, 1.0);
    1.0 - cos.acos() / std::f32::consts::PI
}
