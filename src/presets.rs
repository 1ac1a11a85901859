use clap::ValueEnum;
use serde::Serialize;

use crate::{graph::Graph, item::Instance};

/// Built-in knapsack instances used by the demos.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KnapsackPreset {
    DpDefault,
    FractionalDefault,
    ExhaustiveDefault,
    /// Whole-item greedy by ratio loses to DP here
    GreedyCounterexample,
    /// The highest ratio item crowds out a better pair
    RatioCounterexample,
}

impl KnapsackPreset {
    pub fn instance(self) -> Instance<u64> {
        match self {
            Self::DpDefault => Instance::from_pairs(10, &[(60, 2), (100, 3), (120, 5)]),
            Self::FractionalDefault => Instance::from_pairs(50, &[(60, 10), (100, 20), (120, 30)]),
            Self::ExhaustiveDefault => Instance::from_pairs(15, &[(40, 5), (50, 10), (100, 12)]),
            Self::GreedyCounterexample => Instance::from_pairs(4, &[(24, 3), (15, 2), (15, 2)]),
            Self::RatioCounterexample => Instance::from_pairs(4, &[(4, 3), (3, 2)]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GraphPreset {
    Triangle,
    Pentagon,
}

impl GraphPreset {
    pub fn graph(self) -> Graph<String> {
        let (vertices, triples): (&[&str], &[(&str, &str, f64)]) = match self {
            Self::Triangle => (
                &["A", "B", "C"],
                &[("A", "B", 4.), ("A", "C", 2.), ("B", "C", 1.)],
            ),
            // Ring of five with two chords
            Self::Pentagon => (
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
            ),
        };
        Graph::from_triples(
            &vertices.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
            &triples
                .iter()
                .map(|&(u, v, weight)| (u.to_string(), v.to_string(), weight))
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::mst::{build_mst, MstAlgorithm},
        knapsack::{dp, fractional},
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_knapsack_presets_number_items_from_one() {
        for preset in KnapsackPreset::value_variants() {
            let instance = preset.instance();
            assert_eq!(
                instance.items.iter().map(|item| item.id).collect::<Vec<_>>(),
                (1..=instance.items.len() as u32).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_knapsack_preset_optima() {
        let expected = [
            (KnapsackPreset::DpDefault, 280),
            (KnapsackPreset::FractionalDefault, 220),
            (KnapsackPreset::ExhaustiveDefault, 100),
            (KnapsackPreset::GreedyCounterexample, 30),
            (KnapsackPreset::RatioCounterexample, 4),
        ];
        for (preset, max_profit) in expected {
            let instance = preset.instance();
            let result = dp::solve(instance.capacity, &instance.items).unwrap();
            assert_eq!(result.max_profit, max_profit, "{:?}", preset);
        }

        let instance = KnapsackPreset::FractionalDefault.instance();
        let result = fractional::solve(instance.capacity, &instance.items).unwrap();
        assert_eq!(result.max_profit, 240.);
    }

    #[test]
    fn test_graph_presets() {
        for (preset, total_weight) in [(GraphPreset::Triangle, 3.), (GraphPreset::Pentagon, 10.)] {
            let graph = preset.graph();
            for algorithm in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
                let result = build_mst(&graph, algorithm).unwrap();
                assert!(result.spanning);
                assert_eq!(result.total_weight, total_weight);
            }
        }
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(
            KnapsackPreset::from_str("greedy-counterexample", false),
            Ok(KnapsackPreset::GreedyCounterexample)
        );
        assert_eq!(
            GraphPreset::from_str("pentagon", false),
            Ok(GraphPreset::Pentagon)
        );
    }
}
