//! Step-traced solvers for the knapsack family and for minimum spanning trees.
//!
//! Every solver is a pure function of its input and returns its result
//! together with an ordered log of the decisions that produced it.

pub mod error;
/// Items and instances shared by every knapsack solver
pub mod item;
pub mod step;

/// Minimum spanning trees over undirected weighted graphs
pub mod graph;
pub mod knapsack;
/// Side-by-side comparison of knapsack strategies
pub mod report;

/// Built-in demonstration instances
pub mod presets;

mod math;

pub use error::{Error, Result};
pub use graph::{
    mst::{build_mst, MstAlgorithm, MstResult},
    Edge, Graph,
};
pub use item::{Instance, Item, ItemId};
pub use knapsack::{dp::DpResult, exhaustive::ExhaustiveResult, fractional::FractionalResult};
pub use step::Step;

use num_traits::{PrimInt, ToPrimitive, Unsigned};
use std::fmt::{Debug, Display};

/// Exact 0/1 knapsack, see [knapsack::dp::solve].
pub fn solve_knapsack_01<T>(capacity: T, items: &[Item<T>]) -> Result<DpResult<T>>
where
    T: PrimInt + Unsigned + Debug + Display,
{
    knapsack::dp::solve(capacity, items)
}

/// Continuous knapsack, see [knapsack::fractional::solve].
pub fn solve_fractional_knapsack<T>(capacity: T, items: &[Item<T>]) -> Result<FractionalResult>
where
    T: ToPrimitive + Copy + Debug,
{
    knapsack::fractional::solve(capacity, items)
}

/// Brute force over all subsets, see [knapsack::exhaustive::solve].
pub fn solve_exhaustive<T>(capacity: T, items: &[Item<T>]) -> Result<ExhaustiveResult<T>>
where
    T: PrimInt + Unsigned + Debug + Display,
{
    knapsack::exhaustive::solve(capacity, items)
}
