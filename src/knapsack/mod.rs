/// Exact [0/1 knapsack](https://en.wikipedia.org/wiki/Knapsack_problem#0-1_knapsack_problem) by dynamic programming
pub mod dp;
/// Enumerate every subset of items as a decision tree (brute force)
pub mod exhaustive;
/// Solve the [continuous knapsack problem](https://en.wikipedia.org/wiki/Continuous_knapsack_problem) greedily
pub mod fractional;
/// Greedy-by-ratio heuristic for the 0/1 problem, to contrast with the exact solvers
pub mod greedy;
