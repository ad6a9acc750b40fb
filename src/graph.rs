//! Concept Graph - derived co-occurrence graph over resource concepts
//!
//! The graph is a pure function of the resource collection: nodes are the
//! distinct concept strings, edges are unordered concept pairs that co-occur
//! in at least one resource's concept set, weighted by how many resources
//! they co-occur in. It is rebuilt in full on every request and never
//! persisted.

use std::collections::{BTreeMap, BTreeSet};

use crate::resource::Resource;

/// An unordered pair of concept names.
///
/// Construction normalizes the order so `(a, b)` and `(b, a)` key the same
/// edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConceptPair(String, String);

impl ConceptPair {
    /// Create a pair; the two names are stored in sorted order
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let a = a.into();
        let b = b.into();
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }

    /// Given one endpoint, return the other, or None if not an endpoint
    pub fn other(&self, concept: &str) -> Option<&str> {
        if self.0 == concept {
            Some(&self.1)
        } else if self.1 == concept {
            Some(&self.0)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ConceptPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.0, self.1)
    }
}

/// Derived concept co-occurrence graph.
///
/// Ordered maps internally, so iteration order (and therefore all rendered
/// output) is independent of the order resources were supplied in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConceptGraph {
    /// Every distinct concept seen across the collection
    nodes: BTreeSet<String>,
    /// Co-occurrence count per unordered concept pair
    edges: BTreeMap<ConceptPair, u32>,
}

impl ConceptGraph {
    /// Build the graph from the current resource collection.
    ///
    /// Duplicate concepts within one resource count once (set semantics);
    /// self-pairs are excluded; empty concept sets contribute no edges.
    pub fn build(resources: &[Resource]) -> Self {
        let mut graph = Self::default();

        for resource in resources {
            let concepts: BTreeSet<&str> =
                resource.concepts.iter().map(String::as_str).collect();

            for concept in &concepts {
                graph.nodes.insert((*concept).to_string());
            }

            let list: Vec<&str> = concepts.into_iter().collect();
            for (i, a) in list.iter().enumerate() {
                for b in &list[i + 1..] {
                    *graph.edges.entry(ConceptPair::new(*a, *b)).or_insert(0) += 1;
                }
            }
        }

        graph
    }

    /// Number of distinct concepts
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct co-occurring pairs
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether a concept appears anywhere in the collection
    pub fn contains(&self, concept: &str) -> bool {
        self.nodes.contains(concept)
    }

    /// Co-occurrence weight between two concepts (0 if they never co-occur)
    pub fn weight(&self, a: &str, b: &str) -> u32 {
        self.edges
            .get(&ConceptPair::new(a, b))
            .copied()
            .unwrap_or(0)
    }

    /// All nodes in sorted order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// All edges with their weights, in sorted pair order
    pub fn edges(&self) -> impl Iterator<Item = (&ConceptPair, u32)> {
        self.edges.iter().map(|(pair, w)| (pair, *w))
    }

    /// Concepts sharing an edge with `concept`, sorted by descending weight
    /// then name.
    pub fn neighbors(&self, concept: &str) -> Vec<(&str, u32)> {
        let mut related: Vec<(&str, u32)> = self
            .edges
            .iter()
            .filter_map(|(pair, w)| pair.other(concept).map(|other| (other, *w)))
            .collect();
        related.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        related
    }

    /// The heaviest edges, sorted by descending weight then pair order
    pub fn top_edges(&self, limit: usize) -> Vec<(&ConceptPair, u32)> {
        let mut edges: Vec<(&ConceptPair, u32)> =
            self.edges.iter().map(|(pair, w)| (pair, *w)).collect();
        edges.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        edges.truncate(limit);
        edges
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            total_weight: self.edges.values().map(|w| *w as u64).sum(),
        }
    }
}

/// Statistics about a concept graph
#[derive(Debug, Clone)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub total_weight: u64,
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Concept Graph Statistics:")?;
        writeln!(f, "  Concepts: {}", self.nodes)?;
        writeln!(f, "  Connections: {}", self.edges)?;
        writeln!(f, "  Total co-occurrences: {}", self.total_weight)
    }
}
