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

//! Stochastic relocation neighborhood.
//!
//! One expansion draws a single job to move, weighted by how much delay and
//! travel it currently accrues, and a single destination timeline, weighted
//! towards lightly loaded operators. The job is then tried at every legal
//! position of the destination, which yields one neighbor per position.
//!
//! Jobs whose effective start lies before the planning time are frozen: they
//! are never moved, and nothing is inserted ahead of them.

use crate::{
    eval::{AllocationTrace, TimelineTrace, simulate_timeline},
    sampling::CumulativeWeights,
    state::Allocation,
};
use dispatch_alloc_core::time::{TimeDelta, TimePoint};
use dispatch_alloc_model::{
    id::{JobId, OperatorIndex},
    job::Job,
    problem::Problem,
};
use rand::Rng;
use std::fmt::Display;
use tracing::trace;

/// Moving `job` from `from` to position `position` of `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relocation {
    job: JobId,
    from: OperatorIndex,
    to: OperatorIndex,
    position: usize,
}

impl Relocation {
    #[inline]
    pub fn new(job: JobId, from: OperatorIndex, to: OperatorIndex, position: usize) -> Self {
        Self {
            job,
            from,
            to,
            position,
        }
    }

    #[inline]
    pub fn job(&self) -> JobId {
        self.job
    }

    #[inline]
    pub fn from(&self) -> OperatorIndex {
        self.from
    }

    #[inline]
    pub fn to(&self) -> OperatorIndex {
        self.to
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Display for Relocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Relocation({} from {} to {} at {})",
            self.job, self.from, self.to, self.position
        )
    }
}

/// A candidate allocation together with the move that produced it.
#[derive(Debug, Clone)]
pub struct Neighbor {
    allocation: Allocation,
    relocation: Relocation,
}

impl Neighbor {
    #[inline]
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    #[inline]
    pub fn relocation(&self) -> Relocation {
        self.relocation
    }

    #[inline]
    pub fn into_allocation(self) -> Allocation {
        self.allocation
    }
}

/// Whether `job`, simulated with `delay`, has already effectively started
/// at `now`.
///
/// Uses the current window start, not the expected one; the two differ once
/// a job has been shifted.
#[inline]
pub fn is_frozen(job: &Job, delay: TimeDelta<i64>, now: TimePoint<i64>) -> bool {
    job.start() + delay < now
}

/// Index one past the last frozen job of a timeline. Insertions must not
/// happen before it.
pub fn frozen_boundary(
    timeline: &[JobId],
    trace: &TimelineTrace,
    problem: &Problem,
    now: TimePoint<i64>,
) -> usize {
    timeline
        .iter()
        .zip(trace.delays())
        .rposition(|(&id, &delay)| is_frozen(&problem[id], delay, now))
        .map_or(0, |i| i + 1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    job: JobId,
    operator: OperatorIndex,
    weight: f64,
}

fn movable_jobs(
    allocation: &Allocation,
    trace: &AllocationTrace,
    problem: &Problem,
    now: TimePoint<i64>,
) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(allocation.job_count());
    for (op, (timeline, tt)) in allocation
        .timelines()
        .iter()
        .zip(trace.timelines())
        .enumerate()
    {
        for (pos, &id) in timeline.iter().enumerate() {
            if is_frozen(&problem[id], tt.delays()[pos], now) {
                continue;
            }
            out.push(Candidate {
                job: id,
                operator: OperatorIndex::new(op),
                weight: tt.job_load_seconds(pos),
            });
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelocateNeighborhood;

impl RelocateNeighborhood {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Generates the neighbors of `allocation` at planning time `now`.
    ///
    /// `trace` must be the simulation of `allocation` against `problem`.
    /// Returns an empty set when every job is frozen or no movable job
    /// accrues any delay or travel.
    pub fn neighbors<R: Rng + ?Sized>(
        &self,
        allocation: &Allocation,
        trace: &AllocationTrace,
        problem: &Problem,
        now: TimePoint<i64>,
        rng: &mut R,
    ) -> Vec<Neighbor> {
        let candidates = movable_jobs(allocation, trace, problem, now);
        let Some(pick) = CumulativeWeights::new(candidates.iter().map(|c| c.weight)).sample(rng)
        else {
            trace!(movable = candidates.len(), "No relocatable job");
            return Vec::new();
        };
        let Candidate {
            job, operator: from, ..
        } = candidates[pick];

        let destinations =
            CumulativeWeights::new(trace.timelines().iter().map(|t| 1.0 / (t.load_seconds() + 1.0)));
        let Some(to) = destinations.sample(rng).map(OperatorIndex::new) else {
            return Vec::new();
        };

        let relocations = allocation.relocations(job, from, to, |target| {
            let target_trace = simulate_timeline(target, problem);
            frozen_boundary(target, &target_trace, problem, now)
        });

        trace!(
            job = %job,
            from = from.get(),
            to = to.get(),
            positions = relocations.len(),
            "Relocating job"
        );

        relocations
            .into_iter()
            .map(|(position, allocation)| Neighbor {
                allocation,
                relocation: Relocation::new(job, from, to, position),
            })
            .collect()
    }
}
