use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, hash::Hash};
use tracing::debug;

use super::{union_find::UnionFind, Edge, Graph};
use crate::{error::Result, math::KbnSum, step::Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MstAlgorithm {
    Kruskal,
    Prim,
}

impl Display for MstAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kruskal => write!(f, "Kruskal's"),
            Self::Prim => write!(f, "Prim's"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MstDecision<V> {
    /// Prim's initial vertex
    Start { vertex: V },
    /// `index` is the edge's position in the input graph
    Edge { index: usize, edge: Edge<V> },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TreeState {
    pub tree_edges: usize,
    pub total_weight: f64,
}

pub type MstStep<V> = Step<MstDecision<V>, TreeState>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MstResult<V> {
    pub algorithm: MstAlgorithm,
    /// Tree edges in the order they were added
    pub edges: Vec<Edge<V>>,
    /// Positions of `edges` in the input graph
    pub edge_indices: Vec<usize>,
    pub total_weight: f64,
    /// Fewer than `|V| - 1` edges means the input graph was disconnected
    pub spanning: bool,
    pub steps: Vec<MstStep<V>>,
}

/// Growing tree shared by both algorithms.
struct Tree<V> {
    edges: Vec<Edge<V>>,
    edge_indices: Vec<usize>,
    total_weight: KbnSum,
    steps: Vec<MstStep<V>>,
}

impl<V: Clone> Tree<V> {
    fn new(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
            edge_indices: Vec::with_capacity(capacity),
            total_weight: KbnSum::default(),
            steps: vec![],
        }
    }

    fn state(&self) -> TreeState {
        TreeState {
            tree_edges: self.edges.len(),
            total_weight: self.total_weight.total(),
        }
    }

    fn add(&mut self, index: usize, edge: &Edge<V>, description: String) {
        let before = self.state();
        self.edges.push(edge.clone());
        self.edge_indices.push(index);
        self.total_weight.add(edge.weight);
        let after = self.state();
        self.steps.push(Step::accepted(
            MstDecision::Edge {
                index,
                edge: edge.clone(),
            },
            description,
            before,
            after,
        ));
    }

    fn reject(&mut self, index: usize, edge: &Edge<V>, description: String) {
        let state = self.state();
        self.steps.push(Step::rejected(
            MstDecision::Edge {
                index,
                edge: edge.clone(),
            },
            description,
            state,
            state,
        ));
    }

    fn finish(self, algorithm: MstAlgorithm, vertex_count: usize) -> MstResult<V> {
        let total_weight = self.total_weight.total();
        let spanning = self.edges.len() + 1 == vertex_count;
        debug!(%algorithm, total_weight, spanning, "MST complete");
        MstResult {
            algorithm,
            edges: self.edges,
            edge_indices: self.edge_indices,
            total_weight,
            spanning,
            steps: self.steps,
        }
    }
}

/// Kruskal's algorithm in O(E log E + E α(V)) time.
///
/// Edges are considered by ascending weight, equal weights in input order.
/// A disconnected graph yields a spanning forest.
pub fn kruskal<V>(graph: &Graph<V>) -> Result<MstResult<V>>
where
    V: Clone + Eq + Hash + Display,
{
    let endpoints = graph.endpoints()?;
    debug!(
        vertices = graph.vertices.len(),
        edges = graph.edges.len(),
        "Kruskal"
    );

    let mut order = (0..graph.edges.len()).collect::<Vec<_>>();
    // Stable, so ties keep input order
    order.sort_by(|&a, &b| graph.edges[a].weight.total_cmp(&graph.edges[b].weight));

    let mut forest = UnionFind::new(graph.vertices.len());
    let mut tree = Tree::new(graph.vertices.len().saturating_sub(1));
    for index in order {
        let [u, v] = endpoints[index];
        let edge = &graph.edges[index];
        if forest.union(u, v) {
            tree.add(
                index,
                edge,
                format!("Add {}-{} (w={}), no cycle", edge.u, edge.v, edge.weight),
            );
        } else {
            tree.reject(
                index,
                edge,
                format!(
                    "Skip {}-{} (w={}), would form a cycle",
                    edge.u, edge.v, edge.weight
                ),
            );
        }
    }
    Ok(tree.finish(MstAlgorithm::Kruskal, graph.vertices.len()))
}

/// Prim's algorithm with a key array scan in O(V^2 + E) time.
///
/// Starts from the first vertex; ties between equal keys go to the earlier vertex.
/// Stops early on a disconnected graph, leaving the tree of the start vertex's component.
pub fn prim<V>(graph: &Graph<V>) -> Result<MstResult<V>>
where
    V: Clone + Eq + Hash + Display,
{
    let endpoints = graph.endpoints()?;
    let n = graph.vertices.len();
    debug!(vertices = n, edges = graph.edges.len(), "Prim");

    let mut adjacency = vec![vec![]; n];
    for (index, &[u, v]) in endpoints.iter().enumerate() {
        adjacency[u].push((v, index));
        adjacency[v].push((u, index));
    }

    let mut key = vec![f64::INFINITY; n];
    let mut via: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    key[0] = 0.;

    let mut tree = Tree::new(n.saturating_sub(1));
    for _ in 0..n {
        let next = (0..n)
            .filter(|&v| !visited[v] && key[v].is_finite())
            .fold(None, |best: Option<usize>, v| match best {
                Some(best) if key[best] <= key[v] => Some(best),
                _ => Some(v),
            });
        let vertex = match next {
            Some(vertex) => vertex,
            // Everything reachable is already in the tree
            None => break,
        };
        visited[vertex] = true;

        match via[vertex] {
            Some(index) => {
                let edge = &graph.edges[index];
                tree.add(
                    index,
                    edge,
                    format!(
                        "Add {}-{} (w={}), minimum key vertex {}",
                        edge.u, edge.v, edge.weight, graph.vertices[vertex]
                    ),
                );
            }
            None => {
                let state = tree.state();
                tree.steps.push(Step::accepted(
                    MstDecision::Start {
                        vertex: graph.vertices[vertex].clone(),
                    },
                    format!("Start from {}", graph.vertices[vertex]),
                    state,
                    state,
                ));
            }
        }

        for &(neighbor, index) in &adjacency[vertex] {
            let weight = graph.edges[index].weight;
            if !visited[neighbor] && weight < key[neighbor] {
                key[neighbor] = weight;
                via[neighbor] = Some(index);
            }
        }
    }
    Ok(tree.finish(MstAlgorithm::Prim, n))
}

pub fn build_mst<V>(graph: &Graph<V>, algorithm: MstAlgorithm) -> Result<MstResult<V>>
where
    V: Clone + Eq + Hash + Display,
{
    match algorithm {
        MstAlgorithm::Kruskal => kruskal(graph),
        MstAlgorithm::Prim => prim(graph),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn triangle() -> Graph<&'static str> {
        Graph::from_triples(
            &["A", "B", "C"],
            &[("A", "B", 4.), ("A", "C", 2.), ("B", "C", 1.)],
        )
    }

    fn sorted(mut indices: Vec<usize>) -> Vec<usize> {
        indices.sort_unstable();
        indices
    }

    #[test]
    fn mst_is_correct_for_triangle() {
        for algorithm in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
            let result = build_mst(&triangle(), algorithm).unwrap();
            assert_eq!(result.total_weight, 3.);
            assert_eq!(sorted(result.edge_indices.clone()), [1, 2]);
            assert!(result.spanning);
        }
    }

    #[test]
    fn kruskal_steps_reject_cycles() {
        let result = kruskal(&triangle()).unwrap();
        assert_eq!(result.edge_indices, [2, 1]);
        assert_eq!(
            result
                .steps
                .iter()
                .map(|step| step.accepted)
                .collect::<Vec<_>>(),
            [true, true, false]
        );
        let last = result.steps.last().unwrap();
        assert_eq!(
            last.decision,
            MstDecision::Edge {
                index: 0,
                edge: Edge::new("A", "B", 4.)
            }
        );
        assert_eq!(last.before, last.after);
        assert_eq!(last.after.tree_edges, 2);
    }

    #[test]
    fn prim_steps_start_then_grow() {
        let result = prim(&triangle()).unwrap();
        assert_eq!(result.steps.len(), 3);
        assert_eq!(result.steps[0].decision, MstDecision::Start { vertex: "A" });
        assert_eq!(result.edge_indices, [1, 2]);
        assert!(result.steps.iter().all(|step| step.accepted));
        assert_eq!(
            result.steps[2].after,
            TreeState {
                tree_edges: 2,
                total_weight: 3.
            }
        );
    }

    #[test]
    fn mst_is_correct_for_pentagon() {
        let graph = Graph::from_triples(
            &["A", "B", "C", "D", "E"],
            &[
                ("A", "B", 2.),
                ("B", "C", 3.),
                ("C", "D", 1.),
                ("D", "E", 4.),
                ("E", "A", 5.),
                ("B", "D", 6.),
                ("A", "C", 7.),
            ],
        );
        let kruskal = kruskal(&graph).unwrap();
        let prim = prim(&graph).unwrap();
        assert_eq!(kruskal.total_weight, 10.);
        assert_eq!(prim.total_weight, 10.);
        assert_eq!(sorted(kruskal.edge_indices), [0, 1, 2, 3]);
        assert_eq!(sorted(prim.edge_indices), [0, 1, 2, 3]);
    }

    #[test]
    fn parallel_edges_are_independent() {
        let graph = Graph::from_triples(&["A", "B"], &[("A", "B", 3.), ("B", "A", 1.)]);
        for algorithm in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
            let result = build_mst(&graph, algorithm).unwrap();
            assert_eq!(result.edge_indices, [1]);
            assert_eq!(result.total_weight, 1.);
        }
    }

    #[test]
    fn disconnected_graph_is_not_an_error() {
        let graph = Graph::from_triples(
            &["A", "B", "C", "D"],
            &[("A", "B", 1.), ("C", "D", 2.)],
        );
        let kruskal = kruskal(&graph).unwrap();
        assert_eq!(kruskal.edges.len(), 2);
        assert_eq!(kruskal.total_weight, 3.);
        assert!(!kruskal.spanning);

        let prim = prim(&graph).unwrap();
        assert_eq!(prim.edges, [Edge::new("A", "B", 1.)]);
        assert!(!prim.spanning);
    }

    #[test]
    fn single_vertex_is_spanned_by_nothing() {
        let graph: Graph<&str> = Graph::new(vec!["A"], vec![]);
        for algorithm in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
            let result = build_mst(&graph, algorithm).unwrap();
            assert!(result.edges.is_empty());
            assert_eq!(result.total_weight, 0.);
            assert!(result.spanning);
        }
    }

    #[test]
    fn equal_weights_agree_on_total_only() {
        let graph = Graph::from_triples(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", 1.),
                ("B", "C", 1.),
                ("C", "D", 1.),
                ("D", "A", 1.),
                ("A", "C", 1.),
            ],
        );
        assert_eq!(kruskal(&graph).unwrap().total_weight, 3.);
        assert_eq!(prim(&graph).unwrap().total_weight, 3.);
    }

    #[test]
    fn kruskal_and_prim_agree_on_random_connected_graphs() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let n = rng.gen_range(1..12usize);
            let vertices = (0..n).collect::<Vec<_>>();
            // A random spanning path keeps the graph connected
            let mut edges = (1..n)
                .map(|v| Edge::new(rng.gen_range(0..v), v, rng.gen_range(1..20) as f64))
                .collect::<Vec<_>>();
            for _ in 0..rng.gen_range(0..3 * n) {
                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                edges.push(Edge::new(u, v, rng.gen_range(1..20) as f64));
            }
            let graph = Graph::new(vertices, edges);
            let kruskal = kruskal(&graph).unwrap();
            let prim = prim(&graph).unwrap();
            assert!(kruskal.spanning && prim.spanning);
            assert_eq!(kruskal.total_weight, prim.total_weight);
        }
    }

    #[test]
    fn mst_is_deterministic() {
        assert_eq!(kruskal(&triangle()), kruskal(&triangle()));
        assert_eq!(prim(&triangle()), prim(&triangle()));
    }

    #[test]
    fn mst_rejects_invalid_graphs() {
        let empty: Graph<&str> = Graph::new(vec![], vec![]);
        assert!(kruskal(&empty).is_err());
        assert!(prim(&empty).is_err());
        let unknown = Graph::from_triples(&["A"], &[("A", "B", 1.)]);
        assert!(build_mst(&unknown, MstAlgorithm::Prim).is_err());
        let nan = Graph::from_triples(&["A", "B"], &[("A", "B", f64::NAN)]);
        assert!(build_mst(&nan, MstAlgorithm::Kruskal).is_err());
    }
}
