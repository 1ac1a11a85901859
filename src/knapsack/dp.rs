use ndarray::prelude::*;
use num_traits::{PrimInt, Unsigned};
use serde::Serialize;
use std::fmt::{Debug, Display};
use tracing::debug;

use crate::{
    error::{invalid_input, Error, Result},
    item::{validate, Item},
    step::Step,
};

/// The comparison made for one table cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CellDecision<T> {
    pub row: usize,
    pub column: usize,
    /// `None` when the item is heavier than the column's capacity budget
    pub include: Option<T>,
    pub exclude: T,
}

/// `before` is the value inherited from the row above, `after` the value stored in the cell.
pub type DpStep<T> = Step<CellDecision<T>, T>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DpResult<T> {
    pub max_profit: T,
    /// `table[[i, j]]` is the best profit using the first `i` items within capacity `j`
    pub table: Array2<T>,
    /// Selected items in input order
    pub selection: Vec<Item<T>>,
    pub total_weight: T,
    /// Cells where backtracking declared an item selected, in the order they were visited
    pub traceback: Vec<[usize; 2]>,
    pub steps: Vec<DpStep<T>>,
}

/// Exact 0/1 knapsack by tabulation in O(n * capacity) time and space.
///
/// When including and excluding an item tie, the item is treated as not selected during backtracking.
pub fn solve<T>(capacity: T, items: &[Item<T>]) -> Result<DpResult<T>>
where
    T: PrimInt + Unsigned + Debug + Display,
{
    validate(&capacity, items)?;
    let columns = match capacity.to_usize() {
        Some(columns) => columns,
        None => invalid_input!("capacity {} is too large to index a table", capacity),
    };
    let weights = items
        .iter()
        .map(|item| {
            item.weight.to_usize().ok_or_else(|| {
                Error::InvalidInput(format!(
                    "weight {} of item {} is too large to index a table",
                    item.weight, item.id
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    if items
        .iter()
        .try_fold(T::zero(), |acc, item| acc.checked_add(&item.profit))
        .is_none()
    {
        invalid_input!("sum of item profits overflows");
    }

    // Steps are the largest per-cell allocation
    let cells = columns
        .checked_add(1)
        .and_then(|width| width.checked_mul(items.len() + 1))
        .filter(|&cells| {
            cells
                .checked_mul(std::mem::size_of::<DpStep<T>>())
                .map_or(false, |bytes| bytes <= isize::MAX as usize)
        });
    if cells.is_none() {
        invalid_input!(
            "a table for {} items and capacity {} is too large to allocate",
            items.len(),
            capacity
        );
    }

    debug!(items = items.len(), capacity = columns, "Filling DP table");
    let mut table = Array2::<T>::zeros((items.len() + 1, columns + 1));
    let mut steps = Vec::with_capacity(items.len() * (columns + 1));
    for (i, (item, &weight)) in (1..).zip(items.iter().zip(&weights)) {
        for j in 0..=columns {
            let exclude = table[[i - 1, j]];
            let step = if weight <= j {
                let remainder = table[[i - 1, j - weight]];
                let include = item.profit + remainder;
                let value = include.max(exclude);
                table[[i, j]] = value;
                let decision = CellDecision {
                    row: i,
                    column: j,
                    include: Some(include),
                    exclude,
                };
                let description = format!(
                    "Item {} (weight {}) fits capacity {}: include {} + dp[{}][{}] = {}, exclude dp[{}][{}] = {}, keep {}",
                    item.id, weight, j, item.profit, i - 1, j - weight, include, i - 1, j, exclude, value
                );
                if include > exclude {
                    Step::accepted(decision, description, exclude, value)
                } else {
                    Step::rejected(decision, description, exclude, value)
                }
            } else {
                table[[i, j]] = exclude;
                Step::rejected(
                    CellDecision {
                        row: i,
                        column: j,
                        include: None,
                        exclude,
                    },
                    format!(
                        "Item {} (weight {}) exceeds capacity {}, keep dp[{}][{}] = {}",
                        item.id,
                        weight,
                        j,
                        i - 1,
                        j,
                        exclude
                    ),
                    exclude,
                    exclude,
                )
            };
            steps.push(step);
        }
    }

    let max_profit = table[[items.len(), columns]];

    let mut selection = vec![];
    let mut traceback = vec![];
    let mut total_weight = T::zero();
    let (mut i, mut j) = (items.len(), columns);
    while i > 0 && j > 0 {
        if table[[i, j]] != table[[i - 1, j]] {
            selection.push(items[i - 1]);
            traceback.push([i, j]);
            total_weight = total_weight + items[i - 1].weight;
            j -= weights[i - 1];
        }
        i -= 1;
    }
    selection.reverse();
    debug!(%max_profit, selected = selection.len(), "DP table complete");

    Ok(DpResult {
        max_profit,
        table,
        selection,
        total_weight,
        traceback,
        steps,
    })
}
