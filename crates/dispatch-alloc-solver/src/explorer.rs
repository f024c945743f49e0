// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Best-first exploration of the relocation neighborhood.
//!
//! The explorer keeps an incumbent allocation across planning rounds. Each
//! call to [`Explorer::explore`] starts from the incumbent, repeatedly pops
//! the cheapest allocation from the frontier, adopts it if it beats the
//! incumbent and pushes its unseen neighbors. The round ends when the
//! frontier runs dry, when too many pops in a row fail to improve, or when
//! one of the optional iteration and time budgets is spent.

use crate::{
    config::ExplorerConfig,
    err::ExplorerError,
    eval::{ScheduleCost, evaluate, schedule, simulate},
    frontier::{Frontier, VisitedSet},
    monitor::{ExplorerMonitor, NoOpMonitor},
    neighbors::RelocateNeighborhood,
    state::Allocation,
    stats::SearchStatistics,
};
use dispatch_alloc_core::time::TimePoint;
use dispatch_alloc_model::{
    id::{JobId, OperatorIndex},
    problem::Problem,
    sol::{JobMove, Schedule},
};
use rand::Rng;
use rayon::prelude::*;
use std::{collections::HashMap, fmt::Display, time::Instant};
use tracing::{debug, instrument, trace};

/// Why an exploration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The frontier is empty.
    Converged,
    /// The stagnation limit was exceeded.
    Exhausted,
    IterationLimit,
    TimeLimit,
}

impl Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Converged => write!(f, "Converged"),
            Termination::Exhausted => write!(f, "Exhausted"),
            Termination::IterationLimit => write!(f, "IterationLimit"),
            Termination::TimeLimit => write!(f, "TimeLimit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExploreOutcome {
    termination: Termination,
    cost: ScheduleCost,
    statistics: SearchStatistics,
    moves: Vec<JobMove>,
}

impl ExploreOutcome {
    #[inline]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    #[inline]
    pub fn cost(&self) -> ScheduleCost {
        self.cost
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Jobs that ended the round on a different operator than they started
    /// it on, ordered by job id.
    #[inline]
    pub fn moves(&self) -> &[JobMove] {
        &self.moves
    }
}

impl Display for ExploreOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ExploreOutcome(termination: {}, cost: {}, iterations: {}, moves: {})",
            self.termination,
            self.cost,
            self.statistics.iterations,
            self.moves.len()
        )
    }
}

#[derive(Debug, Clone)]
pub struct Explorer {
    config: ExplorerConfig,
    neighborhood: RelocateNeighborhood,
    allocation: Allocation,
    cost: ScheduleCost,
    moves: Vec<JobMove>,
}

impl Explorer {
    /// Creates an explorer seeded with the round-robin allocation of
    /// `problem`.
    pub fn new(problem: &Problem, config: ExplorerConfig) -> Result<Self, ExplorerError> {
        Self::from_allocation(problem, Allocation::round_robin(problem), config)
    }

    /// Creates an explorer that continues from a known allocation, e.g. the
    /// result of an earlier round.
    pub fn from_allocation(
        problem: &Problem,
        allocation: Allocation,
        config: ExplorerConfig,
    ) -> Result<Self, ExplorerError> {
        allocation.validate(problem)?;
        let cost = evaluate(&allocation, problem);
        Ok(Self {
            config,
            neighborhood: RelocateNeighborhood::new(),
            allocation,
            cost,
            moves: Vec::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// The current incumbent.
    #[inline]
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Cost of the incumbent as of the last evaluation. Window changes made
    /// to the problem afterwards are not reflected until the next round.
    #[inline]
    pub fn cost(&self) -> ScheduleCost {
        self.cost
    }

    /// Moves made by the most recent round.
    #[inline]
    pub fn moves(&self) -> &[JobMove] {
        &self.moves
    }

    #[inline]
    pub fn schedule(&self, problem: &Problem) -> Schedule {
        schedule(&self.allocation, problem)
    }

    /// Runs one planning round at time `now`.
    pub fn explore<R: Rng + ?Sized>(
        &mut self,
        problem: &Problem,
        now: TimePoint<i64>,
        rng: &mut R,
    ) -> Result<ExploreOutcome, ExplorerError> {
        self.explore_with_monitor(problem, now, rng, &mut NoOpMonitor)
    }

    #[instrument(
        skip_all,
        fields(now_ms = now.value(), stagnation_limit = self.config.stagnation_limit),
        err(Display)
    )]
    pub fn explore_with_monitor<R, M>(
        &mut self,
        problem: &Problem,
        now: TimePoint<i64>,
        rng: &mut R,
        monitor: &mut M,
    ) -> Result<ExploreOutcome, ExplorerError>
    where
        R: Rng + ?Sized,
        M: ExplorerMonitor + ?Sized,
    {
        self.allocation.validate(problem)?;
        let started = Instant::now();

        let root = self.allocation.clone();
        let root_cost = evaluate(&root, problem);

        let mut stats = SearchStatistics::default();
        let mut frontier = Frontier::new();
        let mut visited = VisitedSet::new();
        visited.insert(root.clone());
        frontier.push(root_cost, root.clone());
        stats.on_admitted();
        stats.observe_frontier(frontier.len());

        let mut incumbent = root.clone();
        let mut incumbent_cost = root_cost;
        monitor.on_start(&incumbent, incumbent_cost);
        debug!(cost = %root_cost, "Starting exploration");

        let termination = loop {
            let Some(entry) = frontier.pop() else {
                break Termination::Converged;
            };
            stats.on_iteration();

            if entry.cost() < incumbent_cost {
                incumbent = entry.allocation().clone();
                incumbent_cost = entry.cost();
                stats.on_improvement();
                monitor.on_improvement(&incumbent, incumbent_cost, &stats);
            } else if entry.sequence() != 0 {
                // the start allocation is the incumbent and not a failed attempt
                stats.on_stagnation();
            }

            if stats.stagnation > self.config.stagnation_limit {
                break Termination::Exhausted;
            }
            if self
                .config
                .max_iterations
                .is_some_and(|max| stats.iterations >= max)
            {
                break Termination::IterationLimit;
            }
            if self
                .config
                .time_limit
                .is_some_and(|limit| started.elapsed() >= limit)
            {
                break Termination::TimeLimit;
            }

            for (cost, allocation) in
                self.expand(entry.allocation(), problem, now, rng, &mut visited, &mut stats)
            {
                frontier.push(cost, allocation);
                stats.on_admitted();
            }
            stats.observe_frontier(frontier.len());
            monitor.on_expansion(incumbent_cost, &stats);
        };

        stats.set_elapsed(started.elapsed());
        let moves = diff_moves(&root, &incumbent);
        monitor.on_end(&incumbent, incumbent_cost, termination, &stats);
        debug!(
            %termination,
            cost = %incumbent_cost,
            iterations = stats.iterations,
            moves = moves.len(),
            "Exploration finished"
        );

        self.allocation = incumbent;
        self.cost = incumbent_cost;
        self.moves = moves.clone();

        Ok(ExploreOutcome {
            termination,
            cost: incumbent_cost,
            statistics: stats,
            moves,
        })
    }

    /// Generates the neighbors of `allocation`, drops those already seen and
    /// evaluates the rest, preserving generation order.
    fn expand<R: Rng + ?Sized>(
        &self,
        allocation: &Allocation,
        problem: &Problem,
        now: TimePoint<i64>,
        rng: &mut R,
        visited: &mut VisitedSet,
        stats: &mut SearchStatistics,
    ) -> Vec<(ScheduleCost, Allocation)> {
        let trace = simulate(allocation, problem);
        let neighbors = self
            .neighborhood
            .neighbors(allocation, &trace, problem, now, rng);
        stats.on_generated(neighbors.len());

        let mut novel = Vec::with_capacity(neighbors.len());
        for n in neighbors {
            let relocation = n.relocation();
            let a = n.into_allocation();
            if visited.insert(a.clone()) {
                novel.push(a);
            } else {
                trace!(%relocation, "Duplicate neighbor");
                stats.on_duplicate();
            }
        }

        let costs: Vec<ScheduleCost> = if self.config.parallel_evaluation {
            novel.par_iter().map(|a| evaluate(a, problem)).collect()
        } else {
            novel.iter().map(|a| evaluate(a, problem)).collect()
        };
        costs.into_iter().zip(novel).collect()
    }
}

/// Jobs whose operator differs between `start` and `end`, by job id.
fn diff_moves(start: &Allocation, end: &Allocation) -> Vec<JobMove> {
    let before: HashMap<JobId, OperatorIndex> = start.iter_jobs().collect();
    let mut moves: Vec<JobMove> = end
        .iter_jobs()
        .filter(|(job, op)| before.get(job) != Some(op))
        .map(|(job, op)| JobMove::new(job, op))
        .collect();
    moves.sort_by_key(JobMove::job);
    moves
}
