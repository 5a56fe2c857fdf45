//! End-to-end integration tests for the vaidya engine.
//!
//! These tests build real knowledge directories on disk, load them through
//! the ingest pipeline, and exercise the graph queries and the diagnosis
//! session the way the CLI does.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use vaidya::config::Config;
use vaidya::diagnose::{Ayurveda, Collector, Symptom};
use vaidya::embed::HashEmbedder;
use vaidya::graph::{Fact, SUBCATEGORY};
use vaidya::ingest;
use vaidya::symbol::Lexicon;

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

/// The two-level reference tree: a `diagnosis` category directory with an
/// `eyes.json` subcategory file, plus a root-level `food.json`.
fn reference_tree() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    let diagnosis = dir.path().join("diagnosis");
    std::fs::create_dir(&diagnosis).unwrap();
    write(
        &diagnosis.join("eyes.json"),
        r#"{"redness": {"hints for elevation": "pitta"}}"#,
    );
    write(
        &dir.path().join("food.json"),
        r#"{"ginger": {"pacifies": "pitta"}}"#,
    );
    dir
}

#[test]
fn end_to_end_load_and_query() {
    let dir = reference_tree();
    let kg = ingest::load_dir_exact(dir.path()).unwrap();

    // Category expansion resolves diagnosis down to its leaf symptom.
    let objects: HashSet<String> = kg
        .objects("diagnosis")
        .into_iter()
        .map(|e| e.name().to_owned())
        .collect();
    assert_eq!(objects, HashSet::from(["redness".to_owned()]));

    // The directory structure produced (eyes, is of, diagnosis).
    let hits = kg.exact_search(None, None, Some(&kg.entity("diagnosis")));
    assert!(hits.iter().any(|f| f.head.name() == "eyes"));

    // File contents became plain facts.
    assert!(kg.contains(&Fact::new("redness", "hints for elevation", "pitta")));

    // Fully constrained search returns exactly the one matching fact.
    let hits = kg.exact_search(
        Some(&kg.entity("ginger")),
        Some(&kg.relation("pacifies")),
        Some(&kg.entity("pitta")),
    );
    assert_eq!(hits.len(), 1);
}

#[test]
fn sealed_graph_is_shareable_across_threads() {
    let dir = reference_tree();
    let kg = Arc::new(ingest::load_dir_exact(dir.path()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let kg = Arc::clone(&kg);
            std::thread::spawn(move || kg.objects("diagnosis").len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}

#[test]
fn merge_unions_two_loaded_graphs() {
    let dir_a = reference_tree();
    let dir_b = tempfile::TempDir::new().unwrap();
    write(
        &dir_b.path().join("food.json"),
        r#"{"cucumber": {"pacifies": "pitta"}, "ginger": {"pacifies": "pitta"}}"#,
    );

    let mut kg = ingest::load_dir_exact(dir_a.path()).unwrap();
    let other = ingest::load_dir_exact(dir_b.path()).unwrap();
    let before = kg.fact_count();
    kg.merge(&other);

    // Overlapping ginger facts deduplicate; cucumber's two facts are new.
    assert_eq!(kg.fact_count(), before + 2);
    assert!(kg.contains(&Fact::new("cucumber", SUBCATEGORY, "food")));
}

struct ScriptedCollector;

impl Collector for ScriptedCollector {
    fn select(&mut self, options: &[String]) -> Option<String> {
        options.first().cloned()
    }

    fn rate(&mut self, items: &[String]) -> Vec<f64> {
        items
            .iter()
            .map(|item| if item == "redness" { 1.0 } else { 0.0 })
            .collect()
    }
}

#[test]
fn end_to_end_consultation() {
    let dir = reference_tree();
    let mut session = Ayurveda::open(dir.path(), Config::default()).unwrap();

    assert_eq!(session.positions(), vec!["eyes"]);

    let mut collector = ScriptedCollector;
    let mut rng = rand::thread_rng();
    session.collect_symptoms(&mut collector, &mut rng);
    assert_eq!(session.symptoms().len(), 1);

    let elevated: Vec<String> = session
        .diagnose()
        .unwrap()
        .keys()
        .map(|d| d.name().to_owned())
        .collect();
    assert_eq!(elevated, vec!["pitta"]);

    let foods: HashSet<String> = session
        .suggest_food()
        .into_iter()
        .map(|e| e.name().to_owned())
        .collect();
    assert_eq!(foods, HashSet::from(["ginger".to_owned()]));
}

#[test]
fn semantic_session_tolerates_symptom_wording_drift() {
    let dir = reference_tree();
    let embedder = Arc::new(HashEmbedder::default());
    // Loose threshold: surface-form drift like a plural still matches.
    let config = Config {
        similarity_threshold: 0.75,
        ..Config::default()
    };
    let mut session = Ayurveda::open_semantic(dir.path(), embedder, config).unwrap();

    session.record_symptom(Symptom {
        description: "rednesss".into(),
        score: 1.0,
        position: Some("eyes".into()),
    });
    let elevated: Vec<String> = session
        .diagnose()
        .unwrap()
        .keys()
        .map(|d| d.name().to_owned())
        .collect();
    assert_eq!(elevated, vec!["pitta"]);
}

#[test]
fn semantic_loading_preserves_exact_queries() {
    let dir = reference_tree();
    let lexicon = Lexicon::semantic(Arc::new(HashEmbedder::default()), 0.9);
    let kg = ingest::load_dir(dir.path(), lexicon).unwrap();

    // Exact search is still identity-based under a semantic lexicon.
    let hits = kg.exact_search(Some(&kg.entity("ginger")), None, None);
    assert_eq!(hits.len(), 2); // (ginger, is of, food) + (ginger, pacifies, pitta)
    assert!(kg.exact_search(Some(&kg.entity("gingery")), None, None).is_empty());
}
