use num_traits::{PrimInt, ToPrimitive, Unsigned};
use serde::Serialize;
use std::fmt::{Debug, Display};
use tracing::info;

use crate::{
    error::Result,
    item::{to_f64, Item},
    knapsack::{
        dp::{self, DpResult},
        exhaustive::{self, ExhaustiveResult},
        fractional::{self, FractionalResult},
        greedy::{self, GreedyResult},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    DynamicProgramming,
    Fractional,
    Exhaustive,
    Greedy,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DynamicProgramming => "0/1 (DP)",
            Self::Fractional => "Fractional",
            Self::Exhaustive => "Exhaustive",
            Self::Greedy => "0/1 (Greedy)",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::DynamicProgramming => "Dynamic Programming",
            Self::Fractional => "Greedy by Ratio",
            Self::Exhaustive => "Brute Force",
            Self::Greedy => "Greedy by Ratio (whole items)",
        }
    }

    pub fn complexity(&self) -> &'static str {
        match self {
            Self::DynamicProgramming => "O(n * W)",
            Self::Fractional | Self::Greedy => "O(n log n)",
            Self::Exhaustive => "O(2^n)",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub strategy: Strategy,
    pub name: &'static str,
    pub kind: &'static str,
    pub max_profit: f64,
    pub complexity: &'static str,
    /// Solves its own problem variant exactly
    pub optimal: bool,
    pub best: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub strategy: Strategy,
    pub reason: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub recommendation: Recommendation,
}

/// Side-by-side summary of results the caller already computed.
///
/// Fractional is always marked best for its relaxation; DP is marked best
/// unless the relaxation strictly beats it.
pub fn compare<T: ToPrimitive>(
    dp: &DpResult<T>,
    fractional: &FractionalResult,
    exhaustive: &ExhaustiveResult<T>,
    greedy: Option<&GreedyResult<T>>,
) -> Comparison {
    let dp_profit = to_f64(&dp.max_profit);
    let fractional_wins = fractional.max_profit > dp_profit;

    let row = |strategy: Strategy, max_profit: f64, optimal: bool, best: bool| ComparisonRow {
        strategy,
        name: strategy.name(),
        kind: strategy.kind(),
        max_profit,
        complexity: strategy.complexity(),
        optimal,
        best,
    };
    let mut rows = vec![
        row(Strategy::DynamicProgramming, dp_profit, true, !fractional_wins),
        row(Strategy::Fractional, fractional.max_profit, true, true),
        row(
            Strategy::Exhaustive,
            to_f64(&exhaustive.max_profit),
            true,
            false,
        ),
    ];
    if let Some(greedy) = greedy {
        rows.push(row(
            Strategy::Greedy,
            greedy.max_profit,
            greedy.max_profit == dp_profit,
            false,
        ));
    }

    let recommendation = if fractional_wins {
        Recommendation {
            strategy: Strategy::Fractional,
            reason: "Items can be split, and greedy by ratio gives the highest profit in O(n log n).",
        }
    } else {
        Recommendation {
            strategy: Strategy::DynamicProgramming,
            reason: "For indivisible items, DP is the most efficient optimal strategy, avoiding the O(2^n) cost of brute force.",
        }
    };

    Comparison {
        rows,
        recommendation,
    }
}

/// All solver results for one instance, plus their comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solutions<T> {
    pub dp: DpResult<T>,
    pub fractional: FractionalResult,
    pub exhaustive: ExhaustiveResult<T>,
    pub greedy: GreedyResult<T>,
    pub comparison: Comparison,
}

/// Runs every knapsack solver on the same instance concurrently.
///
/// Includes the exhaustive solver, so the caller must keep the item count small.
pub fn solve_all<T>(capacity: T, items: &[Item<T>]) -> Result<Solutions<T>>
where
    T: PrimInt + Unsigned + Debug + Display + Send + Sync,
{
    let ((dp, exhaustive), (fractional, greedy)) = rayon::join(
        || {
            rayon::join(
                || dp::solve(capacity, items),
                || exhaustive::solve(capacity, items),
            )
        },
        || {
            rayon::join(
                || fractional::solve(capacity, items),
                || greedy::solve(capacity, items),
            )
        },
    );
    let (dp, exhaustive, fractional, greedy) = (dp?, exhaustive?, fractional?, greedy?);
    let comparison = compare(&dp, &fractional, &exhaustive, Some(&greedy));
    info!(
        recommendation = comparison.recommendation.strategy.name(),
        "Compared {} strategies",
        comparison.rows.len()
    );
    Ok(Solutions {
        dp,
        fractional,
        exhaustive,
        greedy,
        comparison,
    })
}
