use num_traits::{PrimInt, Unsigned};
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;
use serde_with::skip_serializing_none;
use std::fmt::{Debug, Display};
use tracing::{debug, warn};

use crate::{
    error::{invalid_input, Result},
    item::{validate, Item, ItemId},
};

/// Past this many items the decision tree becomes too large to be worth drawing.
pub const LARGE_ENUMERATION: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Include,
    Exclude,
}

/// Outcome of one complete assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Leaf {
    /// Total weight fits the capacity
    pub valid: bool,
    /// Included items in input order
    pub subset: Vec<ItemId>,
}

/// A node of the binary include/exclude decision tree.
///
/// The root carries no decision. Every inner node has exactly two children,
/// the include branch first.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubsetNode<T> {
    pub branch: Option<Branch>,
    pub item_id: Option<ItemId>,
    /// Cumulative weight of the items included on the path to this node
    pub weight: T,
    /// Cumulative profit of the items included on the path to this node
    pub profit: T,
    pub leaf: Option<Leaf>,
    /// On the root-to-leaf path of the recorded best subset
    pub optimal: bool,
    pub children: Vec<SubsetNode<T>>,
}

impl<T> SubsetNode<T> {
    fn new(branch: Option<Branch>, item_id: Option<ItemId>, weight: T, profit: T) -> Self {
        Self {
            branch,
            item_id,
            weight,
            profit,
            leaf: None,
            optimal: false,
            children: vec![],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    /// Leaves from left to right, i.e. in enumeration order.
    pub fn leaves(&self) -> Leaves<'_, T> {
        Leaves { stack: vec![self] }
    }

    /// Nodes from the root down to the optimal leaf, empty if nothing is marked.
    pub fn optimal_path(&self) -> Vec<&SubsetNode<T>> {
        let mut path = vec![];
        let mut head = Some(self);
        while let Some(node) = head.filter(|node| node.optimal) {
            path.push(node);
            head = node.children.iter().find(|child| child.optimal);
        }
        path
    }
}

pub struct Leaves<'a, T> {
    stack: Vec<&'a SubsetNode<T>>,
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a SubsetNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_leaf() {
                return Some(node);
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExhaustiveResult<T> {
    pub max_profit: T,
    /// Items of the first leaf, in include-before-exclude order, that attains `max_profit`
    pub best_subset: Vec<ItemId>,
    /// Number of leaves explored, always `2^n`
    pub subset_count: usize,
    pub tree: SubsetNode<T>,
}

impl<T> ExhaustiveResult<T> {
    pub fn best_subset_ids(&self) -> HashSet<ItemId> {
        self.best_subset.iter().copied().collect()
    }
}

struct Enumeration<'a, T> {
    capacity: T,
    items: &'a [Item<T>],
    subset_count: usize,
    best: Option<(T, Vec<ItemId>)>,
}

impl<'a, T: PrimInt> Enumeration<'a, T> {
    fn explore(&mut self, index: usize, node: &mut SubsetNode<T>, included: &mut Vec<ItemId>) {
        let items = self.items;
        let item = match items.get(index) {
            Some(item) => item,
            None => {
                self.subset_count += 1;
                let valid = node.weight <= self.capacity;
                let improves = match &self.best {
                    Some((max_profit, _)) => node.profit > *max_profit,
                    None => true,
                };
                if valid && improves {
                    self.best = Some((node.profit, included.clone()));
                }
                node.leaf = Some(Leaf {
                    valid,
                    subset: included.clone(),
                });
                return;
            }
        };

        let mut include = SubsetNode::new(
            Some(Branch::Include),
            Some(item.id),
            node.weight + item.weight,
            node.profit + item.profit,
        );
        included.push(item.id);
        self.explore(index + 1, &mut include, included);
        included.pop();

        let mut exclude =
            SubsetNode::new(Some(Branch::Exclude), Some(item.id), node.weight, node.profit);
        self.explore(index + 1, &mut exclude, included);

        node.children = vec![include, exclude];
    }
}

fn mark_optimal<T: PartialEq + Copy>(
    node: &mut SubsetNode<T>,
    max_profit: T,
    best: &HashSet<ItemId>,
) -> bool {
    node.optimal = match &node.leaf {
        Some(leaf) => {
            leaf.valid
                && node.profit == max_profit
                && leaf.subset.len() == best.len()
                && leaf.subset.iter().all(|id| best.contains(id))
        }
        None => {
            let mut on_path = false;
            for child in &mut node.children {
                on_path |= mark_optimal(child, max_profit, best);
            }
            on_path
        }
    };
    node.optimal
}

/// Enumerates all `2^n` subsets in O(2^n * n) time, building the full decision tree.
///
/// Callers are responsible for keeping `n` small.
pub fn solve<T>(capacity: T, items: &[Item<T>]) -> Result<ExhaustiveResult<T>>
where
    T: PrimInt + Unsigned + Debug + Display,
{
    validate(&capacity, items)?;
    if items
        .iter()
        .try_fold((T::zero(), T::zero()), |(profit, weight), item| {
            Some((
                profit.checked_add(&item.profit)?,
                weight.checked_add(&item.weight)?,
            ))
        })
        .is_none()
    {
        invalid_input!("sum of item profits or weights overflows");
    }
    if items.len() > LARGE_ENUMERATION {
        warn!(
            "Enumerating 2^{} subsets, this will take a while",
            items.len()
        );
    }
    debug!(items = items.len(), %capacity, "Exhaustive subset enumeration");

    let mut enumeration = Enumeration {
        capacity,
        items,
        subset_count: 0,
        best: None,
    };
    let mut tree = SubsetNode::new(None, None, T::zero(), T::zero());
    enumeration.explore(0, &mut tree, &mut Vec::with_capacity(items.len()));

    // The empty subset always fits, so some leaf was recorded
    let (max_profit, best_subset) = enumeration.best.unwrap_or((T::zero(), vec![]));
    let best_ids = best_subset.iter().copied().collect::<HashSet<_>>();
    mark_optimal(&mut tree, max_profit, &best_ids);
    debug!(%max_profit, subsets = enumeration.subset_count, "Enumeration complete");

    Ok(ExhaustiveResult {
        max_profit,
        best_subset,
        subset_count: enumeration.subset_count,
        tree,
    })
}
