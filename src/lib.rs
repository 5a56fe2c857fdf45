//! # vaidya
//!
//! An Ayurvedic diagnosis engine built on a small, embeddable triple-store
//! knowledge graph.
//!
//! ## Architecture
//!
//! - **Identity primitives** (`symbol`): name-keyed [`symbol::Entity`] /
//!   [`symbol::Relation`] tokens with exact equality and a pluggable
//!   approximate `is_like` predicate
//! - **Graph core** (`graph`): triple-indexed fact store with exact search,
//!   fuzzy search, and recursive category expansion
//! - **Ingestion** (`ingest`): fail-fast loader turning a directory tree of
//!   JSON files into one graph
//! - **Anomaly scoring** (`anomaly`): softmax-over-log-scores outlier
//!   detection
//! - **Diagnosis** (`diagnose`): the thin domain layer collecting symptoms
//!   and suggesting pacifying foods
//!
//! ## Library usage
//!
//! ```no_run
//! use vaidya::graph::{Fact, KnowledgeGraph};
//!
//! let mut kg = vaidya::ingest::load_dir_exact("data".as_ref()).unwrap();
//! kg.add(Fact::new("ginger", "pacifies", "pitta"));
//! let foods = kg.objects("food");
//! let hits = kg.exact_search(None, None, Some(&kg.entity("pitta")));
//! ```

pub mod anomaly;
pub mod config;
pub mod diagnose;
pub mod embed;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod symbol;
