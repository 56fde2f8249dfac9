//! A* search for the cheapest way to sort a burrow.
//!
//! The frontier is a min-heap keyed on `cost so far + heuristic`; a table of
//! the best known cost per state lets stale frontier entries be discarded.
//! Because the heuristic is admissible, the first time the sorted state is
//! popped its cost is optimal.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::burrow::{Burrow, StepCosts};
use crate::heuristic::estimate_remaining_cost;
use crate::moves::successors;

/// How often (in expansions) progress is logged
const PROGRESS_INTERVAL: usize = 100_000;

/// Order among frontier entries with equal estimate and cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Earliest pushed first
    #[default]
    Fifo,
    /// Latest pushed first
    Lifo,
}

/// Configuration for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Energy per step for each amphipod type
    pub costs: StepCosts,
    /// Stop after this many state expansions
    pub max_expansions: Option<usize>,
    /// Stop once this much time has passed
    pub timeout: Option<Duration>,
    /// Stop as soon as this flag is set by another thread
    pub cancel: Option<Arc<AtomicBool>>,
    pub tie_break: TieBreak,
}

/// Why a search gave up before reaching a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    ExpansionLimit,
    Timeout,
    Cancelled,
}

impl AbortReason {
    pub fn as_str(self) -> &'static str {
        match self {
            AbortReason::ExpansionLimit => "expansion_limit",
            AbortReason::Timeout => "timeout",
            AbortReason::Cancelled => "cancelled",
        }
    }
}

/// Verdict of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Minimum total energy to reach the sorted burrow
    Solved { cost: u64 },
    /// The frontier ran dry: the sorted burrow cannot be reached
    Unreachable,
    Aborted(AbortReason),
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub outcome: SearchOutcome,
    /// States popped and expanded
    pub expansions: usize,
    /// Distinct states recorded in the best-cost table
    pub states_seen: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

impl SolverResult {
    pub fn cost(&self) -> Option<u64> {
        match self.outcome {
            SearchOutcome::Solved { cost } => Some(cost),
            _ => None,
        }
    }
}

/// A frontier entry. Ordered by estimate, then cost, then tie-break key.
#[derive(Debug)]
struct FrontierEntry {
    estimate: u64,
    cost: u64,
    tie: u64,
    burrow: Burrow,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.estimate, self.cost, self.tie).cmp(&(other.estimate, other.cost, other.tie))
    }
}

/// Insertion-order tie-break keys; smaller keys pop first
struct TieCounter {
    policy: TieBreak,
    pushed: u64,
}

impl TieCounter {
    fn next(&mut self) -> u64 {
        self.pushed += 1;
        match self.policy {
            TieBreak::Fifo => self.pushed,
            TieBreak::Lifo => u64::MAX - self.pushed,
        }
    }
}

/// Find the minimum energy needed to sort `start`.
///
/// Panics if `start` does not hold exactly `depth` amphipods of every type.
pub fn find_minimum_cost(start: &Burrow, config: &SolverConfig) -> SolverResult {
    assert!(
        start.is_conserving(),
        "burrow must hold exactly {} amphipods of each type, found {:?}",
        start.depth(),
        start.token_counts()
    );

    let start_time = Instant::now();
    let deadline = config.timeout.map(|timeout| start_time + timeout);
    let costs = &config.costs;

    let mut ties = TieCounter {
        policy: config.tie_break,
        pushed: 0,
    };
    let mut best_costs: HashMap<Burrow, u64> = HashMap::new();
    let mut frontier: BinaryHeap<Reverse<FrontierEntry>> = BinaryHeap::new();

    best_costs.insert(start.clone(), 0);
    frontier.push(Reverse(FrontierEntry {
        estimate: estimate_remaining_cost(start, costs),
        cost: 0,
        tie: ties.next(),
        burrow: start.clone(),
    }));

    let mut expansions: usize = 0;
    let finish = |outcome: SearchOutcome, expansions: usize, states_seen: usize| {
        let result = SolverResult {
            outcome,
            expansions,
            states_seen,
            time_elapsed_ms: start_time.elapsed().as_millis() as u64,
        };
        debug!(
            outcome = ?result.outcome,
            expansions = result.expansions,
            states_seen = result.states_seen,
            elapsed_ms = result.time_elapsed_ms,
            "search finished"
        );
        result
    };

    while let Some(Reverse(entry)) = frontier.pop() {
        if entry.burrow.is_target() {
            return finish(
                SearchOutcome::Solved { cost: entry.cost },
                expansions,
                best_costs.len(),
            );
        }
        // Superseded by a cheaper path pushed later
        if best_costs
            .get(&entry.burrow)
            .is_some_and(|&best| entry.cost > best)
        {
            continue;
        }

        if let Some(reason) = abort_reason(config, deadline, expansions) {
            return finish(SearchOutcome::Aborted(reason), expansions, best_costs.len());
        }
        expansions += 1;
        if expansions % PROGRESS_INTERVAL == 0 {
            debug!(
                expansions,
                frontier = frontier.len(),
                states_seen = best_costs.len(),
                estimate = entry.estimate,
                "search progress"
            );
        }

        for successor in successors(&entry.burrow, costs) {
            let cost = entry.cost + successor.cost;
            let improved = best_costs
                .get(&successor.next)
                .map_or(true, |&best| cost < best);
            if !improved {
                continue;
            }
            best_costs.insert(successor.next.clone(), cost);
            frontier.push(Reverse(FrontierEntry {
                estimate: cost + estimate_remaining_cost(&successor.next, costs),
                cost,
                tie: ties.next(),
                burrow: successor.next,
            }));
        }
    }

    finish(SearchOutcome::Unreachable, expansions, best_costs.len())
}

/// Check the external limits before expanding another state
fn abort_reason(
    config: &SolverConfig,
    deadline: Option<Instant>,
    expansions: usize,
) -> Option<AbortReason> {
    if config
        .cancel
        .as_ref()
        .is_some_and(|flag| flag.load(AtomicOrdering::Relaxed))
    {
        return Some(AbortReason::Cancelled);
    }
    if config.max_expansions.is_some_and(|max| expansions >= max) {
        return Some(AbortReason::ExpansionLimit);
    }
    if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
        return Some(AbortReason::Timeout);
    }
    None
}

/// Minimum energy to sort `start` with the given step costs, or `None` if
/// it cannot be sorted
pub fn minimum_cost(start: &Burrow, costs: &StepCosts) -> Option<u64> {
    let config = SolverConfig {
        costs: *costs,
        ..Default::default()
    };
    find_minimum_cost(start, &config).cost()
}
