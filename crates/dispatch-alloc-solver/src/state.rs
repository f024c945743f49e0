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

//! Allocation state of the search.
//!
//! An [`Allocation`] maps every operator to the ordered sequence of jobs it
//! dispatches. Allocations are immutable values: every move produces a new
//! allocation which shares the untouched timelines with its parent through
//! `Arc<[JobId]>`, so a neighbor only pays for the one or two timelines it
//! actually changes.
//!
//! Operators are anonymous for deduplication purposes. Two allocations are
//! equal when they hold the same set of timeline sequences, no matter which
//! operator holds which sequence; `Hash` follows the same canonical order.

use crate::err::{AllocationError, OperatorCountMismatchError};
use dispatch_alloc_model::{
    id::{JobId, OperatorIndex},
    problem::Problem,
};
use std::{
    collections::HashSet,
    fmt::Display,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Ordered job sequence per operator, indexed by [`OperatorIndex`].
#[derive(Debug, Clone)]
pub struct Allocation {
    timelines: Vec<Arc<[JobId]>>,
}

impl Allocation {
    /// Distributes the jobs of `problem` in order across the operators:
    /// job `i` goes to operator `i % operator_count`.
    pub fn round_robin(problem: &Problem) -> Self {
        let operators = problem.operator_count();
        let mut timelines: Vec<Vec<JobId>> = vec![Vec::new(); operators];
        for (i, id) in problem.iter_job_ids().enumerate() {
            timelines[i % operators].push(id);
        }
        Self::from_timelines(timelines)
    }

    /// Builds an allocation from explicit timelines. No validation is done;
    /// use [`Allocation::validate`] against the problem it is meant for.
    pub fn from_timelines<I, T>(timelines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<[JobId]>>,
    {
        Self {
            timelines: timelines.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn operator_count(&self) -> usize {
        self.timelines.len()
    }

    #[inline]
    pub fn job_count(&self) -> usize {
        self.timelines.iter().map(|t| t.len()).sum()
    }

    #[inline]
    pub fn timelines(&self) -> &[Arc<[JobId]>] {
        &self.timelines
    }

    /// # Panics
    ///
    /// If `operator` is out of range.
    #[inline]
    pub fn timeline(&self, operator: OperatorIndex) -> &[JobId] {
        &self.timelines[operator.get()]
    }

    pub fn timeline_of(&self, job: JobId) -> Option<OperatorIndex> {
        self.timelines
            .iter()
            .position(|t| t.contains(&job))
            .map(OperatorIndex::new)
    }

    /// All `(job, operator)` pairs in operator order, then dispatch order.
    pub fn iter_jobs(&self) -> impl Iterator<Item = (JobId, OperatorIndex)> + '_ {
        self.timelines
            .iter()
            .enumerate()
            .flat_map(|(op, t)| t.iter().map(move |&j| (j, OperatorIndex::new(op))))
    }

    #[inline]
    fn replace_timeline(&self, operator: OperatorIndex, timeline: Vec<JobId>) -> Self {
        let mut timelines = self.timelines.clone();
        timelines[operator.get()] = timeline.into();
        Self { timelines }
    }

    /// Returns a copy with `job` removed from the given timeline, or `None`
    /// if the timeline does not hold the job.
    pub fn without_job(&self, operator: OperatorIndex, job: JobId) -> Option<Self> {
        let timeline = self.timelines.get(operator.get())?;
        if !timeline.contains(&job) {
            return None;
        }
        let reduced: Vec<JobId> = timeline.iter().copied().filter(|&j| j != job).collect();
        Some(self.replace_timeline(operator, reduced))
    }

    /// Returns a copy with `job` inserted before position `position` of the
    /// given timeline. `position == len` appends.
    ///
    /// # Panics
    ///
    /// If `operator` or `position` is out of range.
    pub fn with_job_inserted(&self, operator: OperatorIndex, position: usize, job: JobId) -> Self {
        let timeline = &self.timelines[operator.get()];
        let mut extended = Vec::with_capacity(timeline.len() + 1);
        extended.extend_from_slice(&timeline[..position]);
        extended.push(job);
        extended.extend_from_slice(&timeline[position..]);
        self.replace_timeline(operator, extended)
    }

    /// Every allocation obtained by moving `job` from `from` to a position
    /// of `to`, paired with the insertion position. Empty if `from` does not
    /// hold the job.
    ///
    /// `min_position` receives the destination timeline with `job` already
    /// removed and returns the first position a job may be inserted at.
    ///
    /// # Panics
    ///
    /// If `to` is out of range.
    pub fn relocations<F>(
        &self,
        job: JobId,
        from: OperatorIndex,
        to: OperatorIndex,
        min_position: F,
    ) -> Vec<(usize, Allocation)>
    where
        F: FnOnce(&[JobId]) -> usize,
    {
        let Some(reduced) = self.without_job(from, job) else {
            return Vec::new();
        };
        let target = reduced.timeline(to);
        let first = min_position(target);
        (first..=target.len())
            .map(|pos| (pos, reduced.with_job_inserted(to, pos, job)))
            .collect()
    }

    /// Checks that this allocation places every job of `problem` exactly
    /// once on one of its operators.
    pub fn validate(&self, problem: &Problem) -> Result<(), AllocationError> {
        if self.operator_count() != problem.operator_count() {
            return Err(
                OperatorCountMismatchError::new(problem.operator_count(), self.operator_count())
                    .into(),
            );
        }
        let mut seen = HashSet::with_capacity(problem.job_count());
        for (job, _) in self.iter_jobs() {
            if !problem.contains(job) {
                return Err(AllocationError::UnknownJob(job));
            }
            if !seen.insert(job) {
                return Err(AllocationError::DuplicateJob(job));
            }
        }
        if let Some(missing) = problem.iter_job_ids().find(|id| !seen.contains(id)) {
            return Err(AllocationError::MissingJob(missing));
        }
        Ok(())
    }

    fn canonical(&self) -> Vec<&[JobId]> {
        let mut sorted: Vec<&[JobId]> = self.timelines.iter().map(|t| &t[..]).collect();
        sorted.sort_unstable();
        sorted
    }
}

impl PartialEq for Allocation {
    fn eq(&self, other: &Self) -> bool {
        self.timelines.len() == other.timelines.len() && self.canonical() == other.canonical()
    }
}

impl Eq for Allocation {}

impl Hash for Allocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Allocation[")?;
        for (op, t) in self.timelines.iter().enumerate() {
            if op > 0 {
                write!(f, " |")?;
            }
            for j in t.iter() {
                write!(f, " {}", j.value())?;
            }
        }
        write!(f, " ]")
    }
}
