//! Knowledge ingestion from a directory tree of JSON data files.
//!
//! Each subdirectory below the root names a category; each `.json` file names
//! a subcategory (the file stem). A file directly under a category directory
//! yields a `(subcategory, "is of", category)` fact; the root itself has no
//! enclosing category, so its immediate files only contribute their contents.
//!
//! File content maps head names to an object of relation names, each holding
//! a tail name or a list of tail names:
//!
//! ```json
//! {
//!     "sweet": { "component": ["earth", "water"] },
//!     "sour":  { "component": ["earth", "fire"] }
//! }
//! ```
//!
//! Every head additionally yields a `(head, "is of", subcategory)` fact.
//! Any unreadable path, non-`.json` file, or malformed mapping aborts the
//! whole load: a partial graph is never returned.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::IngestError;
use crate::graph::{Fact, KnowledgeGraph, SUBCATEGORY};
use crate::symbol::Lexicon;

/// Result type for ingest operations.
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// The only accepted data-file extension.
const DATA_EXTENSION: &str = "json";

/// Tail position of a relation entry: one name or an ordered list of names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Tails {
    One(String),
    Many(Vec<String>),
}

impl Tails {
    fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            Tails::One(tail) => std::slice::from_ref(tail).iter(),
            Tails::Many(tails) => tails.iter(),
        }
        .map(String::as_str)
    }
}

/// On-disk schema of a data file: head -> relation -> tails.
///
/// `BTreeMap` keeps insertion deterministic, so repeated loads of the same
/// tree build identical graphs in identical order.
type DataFile = BTreeMap<String, BTreeMap<String, Tails>>;

/// Load a knowledge graph from `root`, minting tokens through `lexicon`.
///
/// Traversal is depth-first with directory entries visited in name order.
pub fn load_dir(root: &Path, lexicon: Lexicon) -> IngestResult<KnowledgeGraph> {
    let mut graph = KnowledgeGraph::with_lexicon(lexicon);
    walk(root, None, &mut graph)?;
    tracing::info!(
        root = %root.display(),
        facts = graph.fact_count(),
        entities = graph.entity_count(),
        relations = graph.relation_count(),
        "knowledge directory loaded"
    );
    Ok(graph)
}

/// Load a knowledge graph with exact-identity matching.
pub fn load_dir_exact(root: &Path) -> IngestResult<KnowledgeGraph> {
    load_dir(root, Lexicon::exact())
}

fn walk(dir: &Path, category: Option<&str>, graph: &mut KnowledgeGraph) -> IngestResult<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|source| IngestError::Io {
            path: dir.display().to_string(),
            source,
        })?
        .collect::<Result<_, _>>()
        .map_err(|source| IngestError::Io {
            path: dir.display().to_string(),
            source,
        })?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            let name = dir_name(&path)?;
            walk(&path, Some(&name), graph)?;
        } else {
            let subcategory = file_stem(&path)?;
            if let Some(category) = category {
                graph.add(Fact::new(
                    graph.entity(&subcategory),
                    graph.relation(SUBCATEGORY),
                    graph.entity(category),
                ));
            }
            ingest_file(&path, &subcategory, graph)?;
        }
    }
    Ok(())
}

/// Ingest one data file, registering every head under `subcategory`.
pub fn ingest_file(
    path: &Path,
    subcategory: &str,
    graph: &mut KnowledgeGraph,
) -> IngestResult<()> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let heads: DataFile = serde_json::from_str(&content).map_err(|e| IngestError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut count = 0usize;
    for (head, relations) in &heads {
        require_name(head, path, "head")?;
        graph.add(Fact::new(
            graph.entity(head),
            graph.relation(SUBCATEGORY),
            graph.entity(subcategory),
        ));
        count += 1;
        for (relation, tails) in relations {
            require_name(relation, path, "relation")?;
            for tail in tails.iter() {
                require_name(tail, path, "tail")?;
                graph.add(Fact::new(
                    graph.entity(head),
                    graph.relation(relation),
                    graph.entity(tail),
                ));
                count += 1;
            }
        }
    }
    tracing::debug!(path = %path.display(), subcategory, facts = count, "ingested data file");
    Ok(())
}

fn require_name(name: &str, path: &Path, role: &str) -> IngestResult<()> {
    if name.is_empty() {
        return Err(IngestError::EmptyName {
            path: path.display().to_string(),
            context: format!("{role} name must be non-empty"),
        });
    }
    Ok(())
}

fn dir_name(path: &Path) -> IngestResult<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .ok_or_else(|| IngestError::FileName {
            path: path.display().to_string(),
        })
}

fn file_stem(path: &Path) -> IngestResult<String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(DATA_EXTENSION) => {}
        _ => {
            return Err(IngestError::UnsupportedExtension {
                path: path.display().to_string(),
            });
        }
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| IngestError::FileName {
            path: path.display().to_string(),
        })
}
