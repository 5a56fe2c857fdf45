//! Triple-store knowledge graph.
//!
//! Knowledge is a set of [`Fact`]s: (head, relation, tail) triples over
//! [`Entity`]/[`Relation`] tokens, following the (E, R, F) formulation of
//! [A Survey on Knowledge Graphs](https://arxiv.org/abs/2002.00388v4) §II.B.
//!
//! - [`index::KnowledgeGraph`]: the indexed store with exact and fuzzy search
//! - [`expand`]: recursive category/subcategory resolution

pub mod expand;
pub mod index;

pub use index::KnowledgeGraph;

use crate::symbol::{Entity, Relation};

/// Name of the privileged relation that defines the category hierarchy.
///
/// A fact `(x, "is of", c)` declares `x` a member of category `c`; the
/// hierarchy it spans is what [`expand::expand_category`] traverses.
pub const SUBCATEGORY: &str = "is of";

/// An immutable (head, relation, tail) triple, the graph's atomic unit.
///
/// Heads and tails coerce from raw names (`&str`/`String`) or already-typed
/// tokens; the conversion is total for non-empty names and resolved at
/// compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact {
    pub head: Entity,
    pub relation: Relation,
    pub tail: Entity,
}

impl Fact {
    /// Build a fact from anything convertible into its three components.
    pub fn new(
        head: impl Into<Entity>,
        relation: impl Into<Relation>,
        tail: impl Into<Entity>,
    ) -> Self {
        Self {
            head: head.into(),
            relation: relation.into(),
            tail: tail.into(),
        }
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -- {} --> {}", self.head, self.relation, self.tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_from_names_and_tokens() {
        let from_names = Fact::new("ginger", "pacifies", "pitta");
        let from_tokens = Fact::new(
            Entity::new("ginger"),
            Relation::new("pacifies"),
            Entity::new("pitta"),
        );
        assert_eq!(from_names, from_tokens);
    }

    #[test]
    fn equality_over_all_three_fields() {
        let base = Fact::new("a", "r", "b");
        assert_ne!(base, Fact::new("x", "r", "b"));
        assert_ne!(base, Fact::new("a", "q", "b"));
        assert_ne!(base, Fact::new("a", "r", "y"));
        assert_eq!(base, Fact::new("a", "r", "b"));
    }

    #[test]
    fn display_renders_arrow_form() {
        let fact = Fact::new("redness", "hints for elevation", "pitta");
        assert_eq!(fact.to_string(), "redness -- hints for elevation --> pitta");
    }
}
