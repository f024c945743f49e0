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

//! Dispatch simulation and cost evaluation.
//!
//! Each timeline is simulated from an empty clock at the epoch with no prior
//! location. For every job in order the operator travels from the previous
//! job's location, the job starts as soon as the operator arrives (never
//! earlier than its window), and the operator becomes free again once the
//! job is processed but not before the job's window ends.

use crate::state::Allocation;
use dispatch_alloc_core::{
    cost::Cost,
    space::Location,
    time::{MILLIS_PER_MINUTE, TimeDelta, TimePoint},
};
use dispatch_alloc_model::{
    id::{JobId, OperatorIndex},
    problem::Problem,
    sol::{Schedule, ScheduledJob, TimelineSchedule},
};
use std::fmt::Display;

/// Per-job delays and travel times of one timeline, index-aligned with its
/// job sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimelineTrace {
    delays: Vec<TimeDelta<i64>>,
    travels: Vec<TimeDelta<i64>>,
}

impl TimelineTrace {
    #[inline]
    pub fn delays(&self) -> &[TimeDelta<i64>] {
        &self.delays
    }

    #[inline]
    pub fn travels(&self) -> &[TimeDelta<i64>] {
        &self.travels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    #[inline]
    pub fn total_delay(&self) -> TimeDelta<i64> {
        self.delays.iter().sum()
    }

    #[inline]
    pub fn total_travel(&self) -> TimeDelta<i64> {
        self.travels.iter().sum()
    }

    /// Delay plus travel of the job at `position`, in seconds.
    #[inline]
    pub fn job_load_seconds(&self, position: usize) -> f64 {
        (self.delays[position] + self.travels[position]).as_seconds_f64()
    }

    /// Total delay plus total travel of the timeline, in seconds.
    #[inline]
    pub fn load_seconds(&self) -> f64 {
        (self.total_delay() + self.total_travel()).as_seconds_f64()
    }

    fn squared_delay(&self) -> i128 {
        self.delays
            .iter()
            .map(|d| {
                let ms = d.value() as i128;
                ms * ms
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationTrace {
    timelines: Vec<TimelineTrace>,
}

impl AllocationTrace {
    #[inline]
    pub fn timelines(&self) -> &[TimelineTrace] {
        &self.timelines
    }

    #[inline]
    pub fn timeline(&self, operator: OperatorIndex) -> &TimelineTrace {
        &self.timelines[operator.get()]
    }

    pub fn total_delay(&self) -> TimeDelta<i64> {
        self.timelines.iter().map(TimelineTrace::total_delay).sum()
    }

    pub fn total_travel(&self) -> TimeDelta<i64> {
        self.timelines.iter().map(TimelineTrace::total_travel).sum()
    }

    pub fn cost(&self) -> ScheduleCost {
        ScheduleCost::new(
            Cost::new(self.timelines.iter().map(TimelineTrace::squared_delay).sum()),
            self.total_travel(),
        )
    }
}

/// Objective of an allocation: squared job delays first, travel second.
///
/// The squared delay is kept in exact squared milliseconds, which orders
/// allocations the same way as squared minutes do. Comparison is
/// lexicographic in field order, lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleCost {
    squared_delay: Cost<i128>,
    travel: TimeDelta<i64>,
}

impl ScheduleCost {
    pub const ZERO: ScheduleCost = ScheduleCost {
        squared_delay: Cost::new(0),
        travel: TimeDelta::from_millis(0),
    };

    #[inline]
    pub const fn new(squared_delay: Cost<i128>, travel: TimeDelta<i64>) -> Self {
        Self {
            squared_delay,
            travel,
        }
    }

    /// Sum of squared delays in ms².
    #[inline]
    pub fn squared_delay(&self) -> Cost<i128> {
        self.squared_delay
    }

    #[inline]
    pub fn travel(&self) -> TimeDelta<i64> {
        self.travel
    }

    /// Sum over all jobs of the squared delay in minutes.
    #[inline]
    pub fn squared_delay_minutes(&self) -> f64 {
        let per_minute = (MILLIS_PER_MINUTE as i128 * MILLIS_PER_MINUTE as i128) as f64;
        self.squared_delay.value() as f64 / per_minute
    }

    #[inline]
    pub fn travel_minutes(&self) -> f64 {
        self.travel.as_minutes_f64()
    }

    /// The cost as a `(squared delay minutes, travel minutes)` pair.
    #[inline]
    pub fn as_minutes(&self) -> (f64, f64) {
        (self.squared_delay_minutes(), self.travel_minutes())
    }
}

impl Display for ScheduleCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.3}, {:.3})",
            self.squared_delay_minutes(),
            self.travel_minutes()
        )
    }
}

/// Simulates one timeline.
///
/// # Panics
///
/// If a job id is not part of `problem`.
pub fn simulate_timeline(jobs: &[JobId], problem: &Problem) -> TimelineTrace {
    let speed = problem.travel_speed();
    let mut delays = Vec::with_capacity(jobs.len());
    let mut travels = Vec::with_capacity(jobs.len());
    let mut clock = TimePoint::<i64>::zero();
    let mut last: Option<&Location> = None;

    for &id in jobs {
        let job = &problem[id];
        let travel = job.travel_time_from(last, speed);
        let arrival = clock + travel;
        delays.push((arrival - job.start()).non_negative());
        travels.push(travel);
        clock = (arrival + job.duration()).max(job.end());
        last = Some(job.location());
    }

    TimelineTrace { delays, travels }
}

pub fn simulate(allocation: &Allocation, problem: &Problem) -> AllocationTrace {
    AllocationTrace {
        timelines: allocation
            .timelines()
            .iter()
            .map(|t| simulate_timeline(t, problem))
            .collect(),
    }
}

#[inline]
pub fn evaluate(allocation: &Allocation, problem: &Problem) -> ScheduleCost {
    simulate(allocation, problem).cost()
}

/// Expands an allocation into its full read-only schedule.
pub fn schedule(allocation: &Allocation, problem: &Problem) -> Schedule {
    let trace = simulate(allocation, problem);
    let timelines = allocation
        .timelines()
        .iter()
        .zip(trace.timelines())
        .enumerate()
        .map(|(op, (jobs, tt))| {
            let scheduled = jobs
                .iter()
                .zip(tt.delays().iter().zip(tt.travels()))
                .map(|(&id, (&delay, &travel))| ScheduledJob::new(&problem[id], delay, travel))
                .collect();
            TimelineSchedule::new(OperatorIndex::new(op), scheduled)
        })
        .collect();
    Schedule::new(timelines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_alloc_core::space::TravelSpeed;
    use dispatch_alloc_model::problem::ProblemBuilder;

    fn min(m: i64) -> TimeDelta<i64> {
        TimeDelta::from_minutes(m)
    }

    fn tp(m: i64) -> TimePoint<i64> {
        TimePoint::from_minutes(m)
    }

    fn id(i: u64) -> JobId {
        JobId::new(i)
    }

    fn builder(operators: usize) -> ProblemBuilder {
        ProblemBuilder::new(operators, TravelSpeed::new(250.0).unwrap())
    }

    #[test]
    fn test_identical_jobs_accumulate_thirty_minutes_in_any_order() {
        let mut b = builder(1);
        b.add(id(0), tp(0), tp(30), Location::new(5.0, 5.0)).unwrap();
        b.add(id(1), tp(0), tp(30), Location::new(5.0, 5.0)).unwrap();
        let p = b.build().unwrap();

        for order in [[0, 1], [1, 0]] {
            let a = Allocation::from_timelines([vec![id(order[0]), id(order[1])]]);
            let trace = simulate(&a, &p);
            assert_eq!(trace.total_delay(), min(30));
            assert_eq!(trace.total_travel(), TimeDelta::zero());
            assert_eq!(evaluate(&a, &p).as_minutes(), (900.0, 0.0));
        }
    }

    #[test]
    fn test_single_job_costs_nothing() {
        let mut b = builder(1);
        b.add(id(0), tp(10), tp(40), Location::new(0.0, 0.0)).unwrap();
        let p = b.build().unwrap();
        let a = Allocation::round_robin(&p);
        assert_eq!(evaluate(&a, &p), ScheduleCost::ZERO);
    }

    #[test]
    fn test_travel_and_early_arrival_waits_for_window_end() {
        let mut b = builder(1);
        // 1000 m apart is 4 minutes of travel
        b.add(id(0), tp(0), tp(10), Location::new(0.0, 0.0)).unwrap();
        b.add(id(1), tp(30), tp(40), Location::new(1000.0, 0.0)).unwrap();
        b.add(id(2), tp(40), tp(50), Location::new(0.0, 0.0)).unwrap();
        let p = b.build().unwrap();
        let a = Allocation::from_timelines([vec![id(0), id(1), id(2)]]);
        let t = simulate(&a, &p);
        let tl = t.timeline(OperatorIndex::new(0));
        assert_eq!(tl.travels(), &[TimeDelta::zero(), min(4), min(4)]);
        // job 1: arrive at 14, no delay, clock held until its end at 40
        // job 2: arrive at 44, 4 minutes late
        assert_eq!(tl.delays(), &[TimeDelta::zero(), TimeDelta::zero(), min(4)]);
        let cost = t.cost();
        assert_eq!(cost.squared_delay_minutes(), 16.0);
        assert_eq!(cost.travel_minutes(), 8.0);
    }

    #[test]
    fn test_overrun_pushes_following_job() {
        let mut b = builder(1);
        b.add(id(0), tp(0), tp(30), Location::new(0.0, 0.0)).unwrap();
        b.add(id(1), tp(30), tp(60), Location::new(0.0, 0.0)).unwrap();
        let mut p = b.build().unwrap();
        p.extend_job_end(id(0), min(25)).unwrap();
        let a = Allocation::from_timelines([vec![id(0), id(1)]]);
        let tl = simulate(&a, &p);
        assert_eq!(tl.timeline(OperatorIndex::new(0)).delays()[1], min(25));
    }

    #[test]
    fn test_cost_ordering_is_lexicographic() {
        let low_delay_high_travel = ScheduleCost::new(Cost::new(1), min(100));
        let high_delay_no_travel = ScheduleCost::new(Cost::new(2), TimeDelta::zero());
        assert!(low_delay_high_travel < high_delay_no_travel);
        assert!(
            ScheduleCost::new(Cost::new(1), min(1)) < ScheduleCost::new(Cost::new(1), min(2))
        );
    }

    #[test]
    fn test_schedule_matches_trace() {
        let mut b = builder(2);
        b.add(id(0), tp(0), tp(30), Location::new(0.0, 0.0)).unwrap();
        b.add(id(1), tp(0), tp(30), Location::new(0.0, 0.0)).unwrap();
        b.add(id(2), tp(0), tp(30), Location::new(0.0, 0.0)).unwrap();
        let p = b.build().unwrap();
        let a = Allocation::from_timelines([vec![id(0), id(2)], vec![id(1)]]);
        let s = schedule(&a, &p);
        assert_eq!(s.timelines().len(), 2);
        assert_eq!(s.total_delay(), min(30));
        assert_eq!(s.squared_delay_minutes(), evaluate(&a, &p).squared_delay_minutes());
        let (op, sj) = s.scheduled_job(id(2)).unwrap();
        assert_eq!(op, OperatorIndex::new(0));
        assert_eq!(sj.start(), tp(30));
        assert_eq!(sj.end(), tp(60));
    }

    #[test]
    fn test_empty_timeline_load_is_zero() {
        let mut b = builder(1);
        b.add(id(0), tp(0), tp(1), Location::new(0.0, 0.0)).unwrap();
        let t = simulate_timeline(&[], &b.build().unwrap());
        assert!(t.is_empty());
        assert_eq!(t.load_seconds(), 0.0);
    }
}
