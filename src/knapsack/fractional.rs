use num_traits::ToPrimitive;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    error::Result,
    item::{to_f64, validate, Item, ItemId},
    math::{fits, KbnSum},
    step::Step,
};

/// How much of one item went into the knapsack.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Allocation {
    pub item_id: ItemId,
    pub ratio: f64,
    /// Proportion of the item taken, in `[0, 1]`
    pub fraction: f64,
    pub weight: f64,
    pub profit: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SackState {
    pub remaining_capacity: f64,
    pub total_profit: f64,
}

pub type FractionalStep = Step<Allocation, SackState>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FractionalResult {
    pub max_profit: f64,
    /// One entry per item, in descending ratio order
    pub allocations: Vec<Allocation>,
    pub remaining_capacity: f64,
    pub steps: Vec<FractionalStep>,
}

impl FractionalResult {
    /// The single partially taken item, if capacity ran out in the middle of one.
    pub fn break_item(&self) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|allocation| allocation.fraction > 0. && allocation.fraction < 1.)
    }

    pub fn allocation(&self, item_id: ItemId) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|allocation| allocation.item_id == item_id)
    }

    /// Allocations that took a non-zero share of their item.
    pub fn taken(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations
            .iter()
            .filter(|allocation| allocation.fraction > 0.)
    }
}

/// Greedy by profit/weight ratio, optimal for the continuous relaxation in O(n log n) time.
///
/// Items with equal ratios keep their input order, which decides the break item under ties.
pub fn solve<T>(capacity: T, items: &[Item<T>]) -> Result<FractionalResult>
where
    T: ToPrimitive + Copy + Debug,
{
    validate(&capacity, items)?;
    let capacity = to_f64(&capacity);
    debug!(items = items.len(), capacity, "Greedy fractional selection");

    let mut by_ratio = items
        .iter()
        .map(|item| (item, item.ratio()))
        .collect::<Vec<_>>();
    // Stable, so equal ratios retain input order
    by_ratio.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut remaining = capacity;
    let mut total_profit = KbnSum::default();
    let mut allocations = Vec::with_capacity(items.len());
    let mut steps = Vec::with_capacity(items.len());
    for (item, ratio) in by_ratio {
        let weight = to_f64(&item.weight);
        let profit = to_f64(&item.profit);
        let before = SackState {
            remaining_capacity: remaining,
            total_profit: total_profit.total(),
        };

        let (allocation, description) = if fits(weight, remaining) {
            remaining = (remaining - weight).max(0.);
            total_profit.add(profit);
            (
                Allocation {
                    item_id: item.id,
                    ratio,
                    fraction: 1.,
                    weight,
                    profit,
                },
                format!(
                    "Taken 100% of item #{}. Remaining capacity: {:.2}",
                    item.id, remaining
                ),
            )
        } else if remaining > 0. {
            let fraction = remaining / weight;
            let partial_profit = profit * fraction;
            total_profit.add(partial_profit);
            let allocation = Allocation {
                item_id: item.id,
                ratio,
                fraction,
                weight: remaining,
                profit: partial_profit,
            };
            remaining = 0.;
            (
                allocation,
                format!(
                    "Taken {:.1}% of item #{} (profit {:.2}). Knapsack full",
                    fraction * 100.,
                    item.id,
                    partial_profit
                ),
            )
        } else {
            (
                Allocation {
                    item_id: item.id,
                    ratio,
                    fraction: 0.,
                    weight: 0.,
                    profit: 0.,
                },
                format!("Item #{} skipped, no capacity remaining", item.id),
            )
        };

        let after = SackState {
            remaining_capacity: remaining,
            total_profit: total_profit.total(),
        };
        steps.push(if allocation.fraction > 0. {
            Step::accepted(allocation, description, before, after)
        } else {
            Step::rejected(allocation, description, before, after)
        });
        allocations.push(allocation);
    }

    let max_profit = total_profit.total();
    debug!(max_profit, remaining, "Fractional selection complete");
    Ok(FractionalResult {
        max_profit,
        allocations,
        remaining_capacity: remaining,
        steps,
    })
}
