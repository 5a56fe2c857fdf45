//! Ayurvedic diagnosis session: the thin domain layer over the graph core.
//!
//! A [`Ayurveda`] session loads a knowledge directory once, then drives three
//! steps: collect rated symptoms from a [`Collector`], score doshas from
//! "hints for elevation" facts and keep the anomalous ones, and finally
//! suggest foods that pacify every elevated dosha. The session only consumes
//! the public graph operations (`add`, `exact_search`, `fuzzy_search`,
//! `objects`, fact iteration); all domain knowledge lives in the data files.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::anomaly;
use crate::config::Config;
use crate::error::{ScoreError, VaidyaResult};
use crate::graph::{KnowledgeGraph, SUBCATEGORY};
use crate::ingest;
use crate::symbol::{Embedder, Entity, Lexicon};

/// Category holding the observable-position hierarchy.
pub const DIAGNOSIS_CATEGORY: &str = "diagnosis";
/// Category holding the food hierarchy.
pub const FOOD_CATEGORY: &str = "food";
/// Relation from a symptom to the dosha it elevates.
pub const ELEVATION_HINT: &str = "hints for elevation";
/// Relation from a food to the dosha it pacifies.
pub const PACIFIES: &str = "pacifies";

/// A rated observation tied to an optional body position.
#[derive(Debug, Clone)]
pub struct Symptom {
    pub description: String,
    pub score: f64,
    pub position: Option<String>,
}

/// Source of interactive answers during symptom collection.
///
/// Implementations range from a terminal prompt loop to a scripted list in
/// tests; the session does not care which.
pub trait Collector {
    /// Pick one option, or none to fall back to the whole diagnosis tree.
    fn select(&mut self, options: &[String]) -> Option<String>;

    /// Rate each item in [0, 1]; must return one score per item.
    fn rate(&mut self, items: &[String]) -> Vec<f64>;
}

/// A diagnostic session owning the loaded knowledge graph.
pub struct Ayurveda {
    graph: KnowledgeGraph,
    config: Config,
    symptoms: Vec<Symptom>,
    elevated: HashMap<Entity, f64>,
}

impl Ayurveda {
    /// Load the knowledge directory with exact-identity matching.
    pub fn open(data_dir: &Path, config: Config) -> VaidyaResult<Self> {
        let graph = ingest::load_dir_exact(data_dir)?;
        Ok(Self::with_graph(graph, config))
    }

    /// Load the knowledge directory with semantic matching through `embedder`.
    pub fn open_semantic(
        data_dir: &Path,
        embedder: Arc<dyn Embedder>,
        config: Config,
    ) -> VaidyaResult<Self> {
        let lexicon = Lexicon::semantic(embedder, config.similarity_threshold);
        let graph = ingest::load_dir(data_dir, lexicon)?;
        Ok(Self::with_graph(graph, config))
    }

    /// Wrap an already-built graph in a session.
    pub fn with_graph(graph: KnowledgeGraph, config: Config) -> Self {
        Self {
            graph,
            config,
            symptoms: Vec::new(),
            elevated: HashMap::new(),
        }
    }

    /// The sealed knowledge graph.
    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    /// Symptoms recorded so far.
    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    /// Doshas flagged as elevated by the last [`diagnose`](Self::diagnose).
    pub fn elevated_doshas(&self) -> &HashMap<Entity, f64> {
        &self.elevated
    }

    /// Forget all recorded symptoms (and any previous diagnosis).
    pub fn clear_symptoms(&mut self) {
        self.symptoms.clear();
        self.elevated.clear();
    }

    /// All known observation positions: direct subcategories of `diagnosis`.
    pub fn positions(&self) -> Vec<String> {
        let relation = self.graph.relation(SUBCATEGORY);
        let tail = self.graph.entity(DIAGNOSIS_CATEGORY);
        let mut positions: Vec<String> = self
            .graph
            .exact_search(None, Some(&relation), Some(&tail))
            .into_iter()
            .map(|fact| fact.head.name().to_owned())
            .collect();
        positions.sort();
        positions
    }

    /// Record a symptom directly, bypassing collection.
    pub fn record_symptom(&mut self, symptom: Symptom) {
        self.symptoms.push(symptom);
    }

    /// One interactive collection round.
    ///
    /// Asks the collector for a position, expands it (or the whole diagnosis
    /// tree) to candidate symptoms, shows at most `max_symptom_prompts`
    /// randomly sampled candidates, and records the returned ratings.
    pub fn collect_symptoms<R: Rng>(&mut self, collector: &mut dyn Collector, rng: &mut R) {
        let positions = self.positions();
        let position = collector.select(&positions);
        let category = position.as_deref().unwrap_or(DIAGNOSIS_CATEGORY);

        let mut candidates: Vec<String> = self
            .graph
            .objects(category)
            .into_iter()
            .map(|entity| entity.name().to_owned())
            .collect();
        candidates.sort();

        let shown = candidates
            .choose_multiple(rng, self.config.max_symptom_prompts.min(candidates.len()))
            .cloned()
            .collect::<Vec<_>>();
        let scores = collector.rate(&shown);

        for (description, score) in shown.into_iter().zip(scores) {
            self.symptoms.push(Symptom {
                description,
                score,
                position: position.clone(),
            });
        }
    }

    /// Score doshas from the recorded symptoms and keep the anomalous subset.
    ///
    /// Each symptom contributes its score to every dosha some
    /// `(symptom, "hints for elevation", dosha)` fact points at, matched
    /// fuzzily so near-miss symptom wording still lands. The accumulated
    /// scores pass through the softmax outlier detector.
    pub fn diagnose(&mut self) -> Result<&HashMap<Entity, f64>, ScoreError> {
        let relation = self.graph.relation(ELEVATION_HINT);
        let mut dosha_scores: HashMap<Entity, f64> = HashMap::new();
        for symptom in &self.symptoms {
            let head = self.graph.entity(&symptom.description);
            for fact in self.graph.fuzzy_search(Some(&head), Some(&relation), None) {
                *dosha_scores.entry(fact.tail).or_default() += symptom.score;
            }
        }

        self.elevated = anomaly::anomalies(&dosha_scores, self.config.anomaly_threshold)?;
        tracing::info!(
            symptoms = self.symptoms.len(),
            candidates = dosha_scores.len(),
            elevated = self.elevated.len(),
            "diagnosis complete"
        );
        Ok(&self.elevated)
    }

    /// Foods that pacify every elevated dosha.
    ///
    /// Empty when no dosha is elevated, and when no single food covers all of
    /// them.
    pub fn suggest_food(&self) -> HashSet<Entity> {
        let mut per_dosha = self.elevated.keys().map(|dosha| self.food_for_dosha(dosha));
        let Some(first) = per_dosha.next() else {
            return HashSet::new();
        };
        per_dosha.fold(first, |acc, foods| {
            acc.intersection(&foods).cloned().collect()
        })
    }

    /// Foods from the food hierarchy with a `(food, "pacifies", dosha)` fact.
    fn food_for_dosha(&self, dosha: &Entity) -> HashSet<Entity> {
        let all_food = self.graph.objects(FOOD_CATEGORY);
        let pacifies = self.graph.relation(PACIFIES);
        self.graph
            .facts()
            .filter(|fact| {
                all_food.contains(&fact.head)
                    && pacifies.is_like(&fact.relation)
                    && dosha.is_like(&fact.tail)
            })
            .map(|fact| fact.head.clone())
            .collect()
    }
}

impl std::fmt::Debug for Ayurveda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ayurveda")
            .field("graph", &self.graph)
            .field("symptoms", &self.symptoms.len())
            .field("elevated", &self.elevated.len())
            .finish()
    }
}
