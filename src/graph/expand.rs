//! Recursive category expansion over the subcategory hierarchy.
//!
//! A fact `(x, "is of", c)` declares `x` a member of category `c`. A category
//! with no declared members is a leaf representing exactly itself; a category
//! with members denotes the union of its leaf descendants. Expansion
//! therefore always returns leaf entities, never internal category nodes.

use std::collections::HashSet;

use crate::symbol::{Entity, Relation};

use super::index::KnowledgeGraph;

/// Resolve `category` to its set of leaf members.
///
/// `subcategory` is the privileged hierarchy relation (normally minted from
/// [`super::SUBCATEGORY`]); membership facts are matched against it with
/// `is_like`. The subcategory graph is not structurally acyclic, so visited
/// nodes are tracked: a repeated node is skipped with a warning and the
/// expansion still terminates.
pub fn expand_category(
    graph: &KnowledgeGraph,
    category: &Entity,
    subcategory: &Relation,
) -> HashSet<Entity> {
    let mut visited = HashSet::new();
    expand(graph, category, subcategory, &mut visited)
}

fn expand(
    graph: &KnowledgeGraph,
    category: &Entity,
    subcategory: &Relation,
    visited: &mut HashSet<Entity>,
) -> HashSet<Entity> {
    if !visited.insert(category.clone()) {
        tracing::warn!(
            category = %category,
            "cycle in subcategory hierarchy, skipping repeated node"
        );
        return HashSet::new();
    }

    let mut members = HashSet::new();
    for fact in graph.facts_by_tail(category) {
        if fact.relation.is_like(subcategory) {
            members.extend(expand(graph, &fact.head, subcategory, visited));
        }
    }

    // No members resolved: this node is a leaf denoting itself.
    if members.is_empty() {
        members.insert(category.clone());
    }
    members
}

impl KnowledgeGraph {
    /// Resolve a category name to its leaf members through this graph's
    /// lexicon and the well-known subcategory relation.
    pub fn objects(&self, category: &str) -> HashSet<Entity> {
        let category = self.entity(category);
        let subcategory = self.relation(super::SUBCATEGORY);
        expand_category(self, &category, &subcategory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Fact, SUBCATEGORY};

    fn names(set: &HashSet<Entity>) -> HashSet<&str> {
        set.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn leaf_category_denotes_itself() {
        let kg = KnowledgeGraph::new();
        let objects = kg.objects("vata");
        assert_eq!(names(&objects), HashSet::from(["vata"]));
    }

    #[test]
    fn single_child_replaces_the_category() {
        let mut kg = KnowledgeGraph::new();
        kg.add(Fact::new("redness", SUBCATEGORY, "eyes"));

        let objects = kg.objects("eyes");
        assert_eq!(names(&objects), HashSet::from(["redness"]));
    }

    #[test]
    fn expansion_unions_leaf_descendants_only() {
        let mut kg = KnowledgeGraph::new();
        kg.add(Fact::new("eyes", SUBCATEGORY, "diagnosis"));
        kg.add(Fact::new("skin", SUBCATEGORY, "diagnosis"));
        kg.add(Fact::new("redness", SUBCATEGORY, "eyes"));
        kg.add(Fact::new("dryness", SUBCATEGORY, "eyes"));
        kg.add(Fact::new("rash", SUBCATEGORY, "skin"));

        let objects = kg.objects("diagnosis");
        assert_eq!(names(&objects), HashSet::from(["redness", "dryness", "rash"]));
    }

    #[test]
    fn non_subcategory_relations_are_ignored() {
        let mut kg = KnowledgeGraph::new();
        kg.add(Fact::new("ginger", "pacifies", "pitta"));

        let objects = kg.objects("pitta");
        assert_eq!(names(&objects), HashSet::from(["pitta"]));
    }

    #[test]
    fn two_node_cycle_terminates_with_finite_result() {
        let mut kg = KnowledgeGraph::new();
        kg.add(Fact::new("a", SUBCATEGORY, "b"));
        kg.add(Fact::new("b", SUBCATEGORY, "a"));

        let objects = kg.objects("a");
        assert!(!objects.is_empty());
        assert_eq!(names(&objects), HashSet::from(["b"]));
    }

    #[test]
    fn self_loop_terminates() {
        let mut kg = KnowledgeGraph::new();
        kg.add(Fact::new("a", SUBCATEGORY, "a"));
        kg.add(Fact::new("x", SUBCATEGORY, "a"));

        let objects = kg.objects("a");
        assert!(!objects.is_empty());
        assert!(names(&objects).contains("x"));
    }
}
