//! The indexed fact store.
//!
//! [`KnowledgeGraph`] owns the universe of entities, relations, and facts as
//! deduplicated sets, plus three indices (head, relation, tail) kept in
//! lockstep with the fact set. Insertion is idempotent and append-only; no
//! fact is ever edited or removed. Mutation requires `&mut self`, so once the
//! loader hands the graph out behind a shared reference it is sealed: further
//! `add` calls no longer compile, and concurrent readers need no locking.

use std::collections::{HashMap, HashSet};

use crate::symbol::{Entity, Lexicon, Relation};

use super::Fact;

/// Indexed triple store with exact and fuzzy search.
#[derive(Default)]
pub struct KnowledgeGraph {
    lexicon: Lexicon,
    entities: HashSet<Entity>,
    relations: HashSet<Relation>,
    facts: HashSet<Fact>,
    by_head: HashMap<Entity, HashSet<Fact>>,
    by_relation: HashMap<Relation, HashSet<Fact>>,
    by_tail: HashMap<Entity, HashSet<Fact>>,
}

impl KnowledgeGraph {
    /// Create an empty graph with exact-identity matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph whose query tokens are minted through `lexicon`.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            ..Self::default()
        }
    }

    /// The lexicon queries should mint their tokens through.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Mint an entity under this graph's matching strategy.
    pub fn entity(&self, name: &str) -> Entity {
        self.lexicon.entity(name)
    }

    /// Mint a relation under this graph's matching strategy.
    pub fn relation(&self, name: &str) -> Relation {
        self.lexicon.relation(name)
    }

    // -----------------------------------------------------------------------
    // Mutation (build phase)
    // -----------------------------------------------------------------------

    /// Insert a fact, updating the entity/relation sets and all three indices.
    ///
    /// Idempotent: inserting a fact already present changes nothing.
    pub fn add(&mut self, fact: Fact) {
        if !self.facts.insert(fact.clone()) {
            return;
        }
        self.entities.insert(fact.head.clone());
        self.entities.insert(fact.tail.clone());
        self.relations.insert(fact.relation.clone());

        self.by_head
            .entry(fact.head.clone())
            .or_default()
            .insert(fact.clone());
        self.by_relation
            .entry(fact.relation.clone())
            .or_default()
            .insert(fact.clone());
        self.by_tail.entry(fact.tail.clone()).or_default().insert(fact);
    }

    /// Add every fact of `other` into `self` (union semantics).
    pub fn merge(&mut self, other: &KnowledgeGraph) {
        for fact in &other.facts {
            self.add(fact.clone());
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// All facts with the given head. Absent heads yield an empty iterator.
    pub fn facts_by_head(&self, head: &Entity) -> impl Iterator<Item = &Fact> {
        self.by_head.get(head).into_iter().flatten()
    }

    /// All facts with the given relation.
    pub fn facts_by_relation(&self, relation: &Relation) -> impl Iterator<Item = &Fact> {
        self.by_relation.get(relation).into_iter().flatten()
    }

    /// All facts with the given tail.
    pub fn facts_by_tail(&self, tail: &Entity) -> impl Iterator<Item = &Fact> {
        self.by_tail.get(tail).into_iter().flatten()
    }

    /// Iterate over every fact in the graph.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Iterate over every distinct entity.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over every distinct relation.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Index-backed search with strict equality filters.
    ///
    /// Filters combine with AND semantics; absent filters impose no
    /// constraint. The result is seeded from the first present filter's index
    /// and narrowed by set intersection, so the cost is bounded by the
    /// smallest matching index entry rather than the full fact set. With no
    /// filters the result is empty.
    pub fn exact_search(
        &self,
        head: Option<&Entity>,
        relation: Option<&Relation>,
        tail: Option<&Entity>,
    ) -> HashSet<Fact> {
        let mut result: Option<HashSet<Fact>> = None;

        if let Some(head) = head {
            result = Some(self.by_head.get(head).cloned().unwrap_or_default());
        }
        if let Some(relation) = relation {
            let matching = self.by_relation.get(relation);
            result = Some(match result {
                Some(acc) => intersect(acc, matching),
                None => matching.cloned().unwrap_or_default(),
            });
        }
        if let Some(tail) = tail {
            let matching = self.by_tail.get(tail);
            result = Some(match result {
                Some(acc) => intersect(acc, matching),
                None => matching.cloned().unwrap_or_default(),
            });
        }

        result.unwrap_or_default()
    }

    /// Full-scan search with approximate-equality filters.
    ///
    /// Same filter semantics as [`exact_search`](Self::exact_search), but each
    /// present filter is tested via `is_like`. Approximate matching cannot be
    /// pre-indexed, so this is deliberately the O(total facts) slow path. With
    /// no filters the result is empty.
    pub fn fuzzy_search(
        &self,
        head: Option<&Entity>,
        relation: Option<&Relation>,
        tail: Option<&Entity>,
    ) -> HashSet<Fact> {
        if head.is_none() && relation.is_none() && tail.is_none() {
            return HashSet::new();
        }
        self.facts
            .iter()
            .filter(|fact| head.is_none_or(|h| h.is_like(&fact.head)))
            .filter(|fact| relation.is_none_or(|r| r.is_like(&fact.relation)))
            .filter(|fact| tail.is_none_or(|t| t.is_like(&fact.tail)))
            .cloned()
            .collect()
    }
}

fn intersect(acc: HashSet<Fact>, other: Option<&HashSet<Fact>>) -> HashSet<Fact> {
    match other {
        Some(other) => acc.into_iter().filter(|f| other.contains(f)).collect(),
        None => HashSet::new(),
    }
}

impl Extend<Fact> for KnowledgeGraph {
    fn extend<I: IntoIterator<Item = Fact>>(&mut self, facts: I) {
        for fact in facts {
            self.add(fact);
        }
    }
}

impl std::fmt::Debug for KnowledgeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeGraph")
            .field("entities", &self.entity_count())
            .field("relations", &self.relation_count())
            .field("facts", &self.fact_count())
            .finish()
    }
}
