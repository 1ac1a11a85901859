use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, hash::Hash};

use crate::error::{invalid_input, Result};

/// Find the [Minimum Spanning Tree (MST)](https://en.wikipedia.org/wiki/Minimum_spanning_tree)
pub mod mst;
/// [Disjoint-set](https://en.wikipedia.org/wiki/Disjoint-set_data_structure) forest for cycle detection
pub mod union_find;

/// Undirected weighted edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge<V> {
    pub u: V,
    pub v: V,
    pub weight: f64,
}

impl<V> Edge<V> {
    pub fn new(u: V, v: V, weight: f64) -> Self {
        Self { u, v, weight }
    }
}

/// Vertex order decides where Prim starts and how its ties break; edge order breaks Kruskal's ties.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Graph<V> {
    pub vertices: Vec<V>,
    pub edges: Vec<Edge<V>>,
}

impl<V> Graph<V> {
    pub fn new(vertices: Vec<V>, edges: Vec<Edge<V>>) -> Self {
        Self { vertices, edges }
    }
}

impl<V: Clone> Graph<V> {
    /// Builds a graph from `(u, v, weight)` triples.
    pub fn from_triples(vertices: &[V], triples: &[(V, V, f64)]) -> Self {
        Self {
            vertices: vertices.to_vec(),
            edges: triples
                .iter()
                .map(|(u, v, weight)| Edge::new(u.clone(), v.clone(), *weight))
                .collect(),
        }
    }
}

impl<V: Eq + Hash + Display> Graph<V> {
    /// Checks the graph and resolves every edge to the positions of its endpoints in `vertices`.
    pub(crate) fn endpoints(&self) -> Result<Vec<[usize; 2]>> {
        if self.vertices.is_empty() {
            invalid_input!("graph needs at least one vertex");
        }
        let mut index_of: HashMap<&V, usize> = HashMap::default();
        index_of.reserve(self.vertices.len());
        for (i, vertex) in self.vertices.iter().enumerate() {
            if index_of.insert(vertex, i).is_some() {
                invalid_input!("vertex {} is listed more than once", vertex);
            }
        }

        self.edges
            .iter()
            .map(|edge| {
                if !edge.weight.is_finite() || edge.weight <= 0. {
                    invalid_input!(
                        "edge {}-{} must have a finite, strictly positive weight, got {}",
                        edge.u,
                        edge.v,
                        edge.weight
                    );
                }
                match (index_of.get(&edge.u), index_of.get(&edge.v)) {
                    (Some(&u), Some(&v)) => Ok([u, v]),
                    (None, _) => invalid_input!("edge references unknown vertex {}", edge.u),
                    (_, None) => invalid_input!("edge references unknown vertex {}", edge.v),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_endpoints_resolve_vertex_positions() {
        let graph = Graph::from_triples(&["A", "B", "C"], &[("C", "A", 2.), ("B", "C", 1.)]);
        assert_eq!(graph.endpoints(), Ok(vec![[2, 0], [1, 2]]));
    }

    #[test]
    fn test_endpoints_reject_malformed_graphs() {
        let empty: Graph<&str> = Graph::new(vec![], vec![]);
        assert!(empty.endpoints().is_err());

        let unknown = Graph::from_triples(&["A", "B"], &[("A", "Z", 1.)]);
        assert_eq!(
            unknown.endpoints(),
            Err(Error::InvalidInput(
                "edge references unknown vertex Z".to_string()
            ))
        );

        for weight in [f64::NAN, f64::INFINITY, 0., -3.] {
            let graph = Graph::from_triples(&["A", "B"], &[("A", "B", weight)]);
            assert!(graph.endpoints().is_err(), "weight {} accepted", weight);
        }

        let duplicate = Graph::from_triples(&["A", "A"], &[]);
        assert!(duplicate.endpoints().is_err());
    }
}
