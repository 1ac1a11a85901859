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

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Candidate {
    pub item_id: ItemId,
    pub ratio: f64,
    pub weight: f64,
    pub profit: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GreedyState {
    pub remaining_capacity: f64,
    pub total_profit: f64,
}

pub type GreedyStep = Step<Candidate, GreedyState>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GreedyResult<T> {
    pub max_profit: f64,
    /// Taken items, in the order greedy picked them
    pub selection: Vec<Item<T>>,
    pub remaining_capacity: f64,
    pub steps: Vec<GreedyStep>,
}

/// 0/1 heuristic: take whole items by descending profit/weight ratio whenever they still fit.
///
/// Not optimal; the classic failure is a high ratio item blocking a heavier, more profitable one.
pub fn solve<T>(capacity: T, items: &[Item<T>]) -> Result<GreedyResult<T>>
where
    T: ToPrimitive + Copy + Debug,
{
    validate(&capacity, items)?;
    let mut remaining = to_f64(&capacity);

    let mut by_ratio = items.iter().collect::<Vec<_>>();
    by_ratio.sort_by(|a, b| b.ratio().total_cmp(&a.ratio()));

    let mut total_profit = KbnSum::default();
    let mut selection = vec![];
    let mut steps = Vec::with_capacity(items.len());
    for item in by_ratio {
        let candidate = Candidate {
            item_id: item.id,
            ratio: item.ratio(),
            weight: to_f64(&item.weight),
            profit: to_f64(&item.profit),
        };
        let before = GreedyState {
            remaining_capacity: remaining,
            total_profit: total_profit.total(),
        };
        if fits(candidate.weight, remaining) {
            remaining = (remaining - candidate.weight).max(0.);
            total_profit.add(candidate.profit);
            selection.push(*item);
            let after = GreedyState {
                remaining_capacity: remaining,
                total_profit: total_profit.total(),
            };
            steps.push(Step::accepted(
                candidate,
                format!(
                    "Item #{} (ratio {:.2}) fits, taken. Remaining capacity: {}",
                    item.id, candidate.ratio, remaining
                ),
                before,
                after,
            ));
        } else {
            steps.push(Step::rejected(
                candidate,
                format!(
                    "Item #{} (weight {}) does not fit remaining capacity {}, skipped",
                    item.id, candidate.weight, remaining
                ),
                before,
                before,
            ));
        }
    }

    let max_profit = total_profit.total();
    debug!(max_profit, taken = selection.len(), "Greedy 0/1 selection complete");
    Ok(GreedyResult {
        max_profit,
        selection,
        remaining_capacity: remaining,
        steps,
    })
}
