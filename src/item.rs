use num_traits::ToPrimitive;
use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::{invalid_input, Result};

/// Caller-assigned identifier, unique within one problem instance.
pub type ItemId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item<T> {
    pub id: ItemId,
    pub profit: T,
    pub weight: T,
}

impl<T> Item<T> {
    pub fn new(id: ItemId, profit: T, weight: T) -> Self {
        Self { id, profit, weight }
    }
}

impl<T: ToPrimitive> Item<T> {
    /// Value density of the item, the greedy ordering key.
    ///
    /// Only meaningful once the item passed [validate], which guarantees a positive, finite weight.
    pub fn ratio(&self) -> f64 {
        to_f64(&self.profit) / to_f64(&self.weight)
    }
}

/// A knapsack capacity and the ordered items competing for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instance<T> {
    pub capacity: T,
    pub items: Vec<Item<T>>,
}

impl<T> Instance<T> {
    pub fn new(capacity: T, items: Vec<Item<T>>) -> Self {
        Self { capacity, items }
    }
}

impl<T: Copy> Instance<T> {
    /// Numbers items 1.. in the given order from `(profit, weight)` pairs.
    pub fn from_pairs(capacity: T, pairs: &[(T, T)]) -> Self {
        Self {
            capacity,
            items: pairs
                .iter()
                .zip(1..)
                .map(|(&(profit, weight), id)| Item::new(id, profit, weight))
                .collect(),
        }
    }
}

/// Lossy conversion that maps unrepresentable values to NaN so that validation rejects them.
pub(crate) fn to_f64<T: ToPrimitive>(value: &T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Input contract shared by every knapsack solver.
pub(crate) fn validate<T: ToPrimitive + Debug>(capacity: &T, items: &[Item<T>]) -> Result<()> {
    let capacity_f64 = to_f64(capacity);
    if !capacity_f64.is_finite() || capacity_f64 < 0. {
        invalid_input!("capacity must be a finite, non-negative number, got {:?}", capacity);
    }

    let mut seen = HashSet::default();
    seen.reserve(items.len());
    for item in items {
        if !seen.insert(item.id) {
            invalid_input!("item id {} is used more than once", item.id);
        }
        let weight = to_f64(&item.weight);
        if !weight.is_finite() || weight <= 0. {
            invalid_input!(
                "item {} must have a finite, strictly positive weight, got {:?}",
                item.id,
                item.weight
            );
        }
        let profit = to_f64(&item.profit);
        if !profit.is_finite() || profit < 0. {
            invalid_input!(
                "item {} must have a finite, non-negative profit, got {:?}",
                item.id,
                item.profit
            );
        }
    }
    Ok(())
}
