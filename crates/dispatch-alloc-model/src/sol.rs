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

use crate::{
    id::{JobId, OperatorIndex},
    job::Job,
};
use dispatch_alloc_core::{
    space::Location,
    time::{TimeDelta, TimePoint},
};
use serde::Serialize;
use std::fmt::Display;

/// One job as it plays out on an operator's timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledJob {
    job: JobId,
    location: Location,
    travel_start: TimePoint<i64>,
    start: TimePoint<i64>,
    end: TimePoint<i64>,
    delay: TimeDelta<i64>,
    travel: TimeDelta<i64>,
    expected_start: TimePoint<i64>,
    expected_end: TimePoint<i64>,
    duration: TimeDelta<i64>,
}

impl ScheduledJob {
    /// Derives the effective times of `job` from its simulated delay and the
    /// travel leading up to it. The whole window slides by `delay`.
    pub fn new(job: &Job, delay: TimeDelta<i64>, travel: TimeDelta<i64>) -> Self {
        Self {
            job: job.id(),
            location: *job.location(),
            travel_start: job.start() - travel + delay,
            start: job.start() + delay,
            end: job.end() + delay,
            delay,
            travel,
            expected_start: job.expected_start(),
            expected_end: job.expected_end(),
            duration: job.duration(),
        }
    }

    #[inline]
    pub fn job(&self) -> JobId {
        self.job
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// When the operator leaves for this job.
    #[inline]
    pub fn travel_start(&self) -> TimePoint<i64> {
        self.travel_start
    }

    #[inline]
    pub fn start(&self) -> TimePoint<i64> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> TimePoint<i64> {
        self.end
    }

    #[inline]
    pub fn delay(&self) -> TimeDelta<i64> {
        self.delay
    }

    #[inline]
    pub fn travel(&self) -> TimeDelta<i64> {
        self.travel
    }

    #[inline]
    pub fn expected_start(&self) -> TimePoint<i64> {
        self.expected_start
    }

    #[inline]
    pub fn expected_end(&self) -> TimePoint<i64> {
        self.expected_end
    }

    #[inline]
    pub fn duration(&self) -> TimeDelta<i64> {
        self.duration
    }
}

fn clock(t: TimePoint<i64>) -> String {
    t.since_epoch().to_clock_string()
}

impl Display for ScheduledJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Job: {:<4} | Travel start: {:>9} | Start: {:>9} | End: {:>9} | Delay: {:>9} | Travel time: {:>9} | Expected start: {:>9} | Expected end: {:>9} | Duration: {:>9} | Location: {}",
            self.job.value(),
            clock(self.travel_start),
            clock(self.start),
            clock(self.end),
            self.delay.to_clock_string(),
            self.travel.to_clock_string(),
            clock(self.expected_start),
            clock(self.expected_end),
            self.duration.to_clock_string(),
            self.location
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSchedule {
    operator: OperatorIndex,
    jobs: Vec<ScheduledJob>,
    total_delay: TimeDelta<i64>,
    total_travel: TimeDelta<i64>,
}

impl TimelineSchedule {
    pub fn new(operator: OperatorIndex, jobs: Vec<ScheduledJob>) -> Self {
        let total_delay = jobs.iter().map(ScheduledJob::delay).sum();
        let total_travel = jobs.iter().map(ScheduledJob::travel).sum();
        Self {
            operator,
            jobs,
            total_delay,
            total_travel,
        }
    }

    #[inline]
    pub fn operator(&self) -> OperatorIndex {
        self.operator
    }

    /// Jobs in dispatch order.
    #[inline]
    pub fn jobs(&self) -> &[ScheduledJob] {
        &self.jobs
    }

    #[inline]
    pub fn job_ids(&self) -> impl Iterator<Item = JobId> + '_ {
        self.jobs.iter().map(ScheduledJob::job)
    }

    #[inline]
    pub fn total_delay(&self) -> TimeDelta<i64> {
        self.total_delay
    }

    #[inline]
    pub fn total_travel(&self) -> TimeDelta<i64> {
        self.total_travel
    }
}

impl Display for TimelineSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Op.: {:<4} | Total delay: {:>9} | Total travel: {:>9}",
            self.operator.get(),
            self.total_delay.to_clock_string(),
            self.total_travel.to_clock_string()
        )?;
        for j in &self.jobs {
            writeln!(f, "{}", j)?;
        }
        Ok(())
    }
}

/// Read-only view of a complete allocation, one entry per operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    timelines: Vec<TimelineSchedule>,
    total_delay: TimeDelta<i64>,
    total_travel: TimeDelta<i64>,
    squared_delay_minutes: f64,
    travel_minutes: f64,
}

impl Schedule {
    pub fn new(timelines: Vec<TimelineSchedule>) -> Self {
        let total_delay = timelines.iter().map(TimelineSchedule::total_delay).sum();
        let total_travel: TimeDelta<i64> =
            timelines.iter().map(TimelineSchedule::total_travel).sum();
        let squared_delay_minutes = timelines
            .iter()
            .flat_map(TimelineSchedule::jobs)
            .map(|j| j.delay().as_minutes_f64().powi(2))
            .sum();
        Self {
            timelines,
            total_delay,
            total_travel,
            squared_delay_minutes,
            travel_minutes: total_travel.as_minutes_f64(),
        }
    }

    #[inline]
    pub fn timelines(&self) -> &[TimelineSchedule] {
        &self.timelines
    }

    #[inline]
    pub fn timeline(&self, operator: OperatorIndex) -> Option<&TimelineSchedule> {
        self.timelines.get(operator.get())
    }

    pub fn scheduled_job(&self, id: JobId) -> Option<(OperatorIndex, &ScheduledJob)> {
        self.timelines.iter().find_map(|tl| {
            tl.jobs()
                .iter()
                .find(|j| j.job() == id)
                .map(|j| (tl.operator(), j))
        })
    }

    #[inline]
    pub fn total_delay(&self) -> TimeDelta<i64> {
        self.total_delay
    }

    #[inline]
    pub fn total_travel(&self) -> TimeDelta<i64> {
        self.total_travel
    }

    /// Sum over all jobs of the squared delay in minutes.
    #[inline]
    pub fn squared_delay_minutes(&self) -> f64 {
        self.squared_delay_minutes
    }

    #[inline]
    pub fn travel_minutes(&self) -> f64 {
        self.travel_minutes
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(
            f,
            "Total delay: {}, Total travel: {}, Total delay squared: {:.3}",
            self.total_delay.to_clock_string(),
            self.total_travel.to_clock_string(),
            self.squared_delay_minutes
        )?;
        for tl in &self.timelines {
            writeln!(f, "{}", "-".repeat(30))?;
            write!(f, "{}", tl)?;
        }
        Ok(())
    }
}

/// A job that changed operator during a planning round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct JobMove {
    job: JobId,
    operator: OperatorIndex,
}

impl JobMove {
    #[inline]
    pub fn new(job: JobId, operator: OperatorIndex) -> Self {
        Self { job, operator }
    }

    #[inline]
    pub fn job(&self) -> JobId {
        self.job
    }

    /// The operator the job ended up on.
    #[inline]
    pub fn operator(&self) -> OperatorIndex {
        self.operator
    }
}

impl Display for JobMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Job {} was moved to Operator {}",
            self.job.value(),
            self.operator.get()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: u64, start: i64, end: i64) -> Job {
        Job::new(
            JobId::new(id),
            TimePoint::from_minutes(start),
            TimePoint::from_minutes(end),
            Location::new(0.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn test_scheduled_job_slides_window_by_delay() {
        let j = job(1, 30, 60);
        let sj = ScheduledJob::new(&j, TimeDelta::from_minutes(5), TimeDelta::from_minutes(2));
        assert_eq!(sj.start(), TimePoint::from_minutes(35));
        assert_eq!(sj.end(), TimePoint::from_minutes(65));
        assert_eq!(sj.travel_start(), TimePoint::from_minutes(33));
        assert_eq!(sj.expected_start(), TimePoint::from_minutes(30));
        assert_eq!(sj.duration(), TimeDelta::from_minutes(30));
    }

    #[test]
    fn test_schedule_aggregates() {
        let a = ScheduledJob::new(&job(1, 0, 30), TimeDelta::zero(), TimeDelta::zero());
        let b = ScheduledJob::new(
            &job(2, 0, 30),
            TimeDelta::from_minutes(30),
            TimeDelta::zero(),
        );
        let c = ScheduledJob::new(
            &job(3, 0, 30),
            TimeDelta::from_minutes(3),
            TimeDelta::from_minutes(4),
        );
        let s = Schedule::new(vec![
            TimelineSchedule::new(OperatorIndex::new(0), vec![a, b]),
            TimelineSchedule::new(OperatorIndex::new(1), vec![c]),
        ]);
        assert_eq!(s.total_delay(), TimeDelta::from_minutes(33));
        assert_eq!(s.total_travel(), TimeDelta::from_minutes(4));
        assert_eq!(s.squared_delay_minutes(), 909.0);
        assert_eq!(s.travel_minutes(), 4.0);
        assert_eq!(
            s.timeline(OperatorIndex::new(0)).unwrap().total_delay(),
            TimeDelta::from_minutes(30)
        );
        let (op, sj) = s.scheduled_job(JobId::new(3)).unwrap();
        assert_eq!(op, OperatorIndex::new(1));
        assert_eq!(sj.travel(), TimeDelta::from_minutes(4));
        assert!(s.scheduled_job(JobId::new(9)).is_none());
    }

    #[test]
    fn test_display_contains_rows() {
        let a = ScheduledJob::new(&job(7, 0, 30), TimeDelta::zero(), TimeDelta::zero());
        let s = Schedule::new(vec![TimelineSchedule::new(OperatorIndex::new(0), vec![a])]);
        let out = format!("{}", s);
        assert!(out.contains("Op.: 0"));
        assert!(out.contains("Job: 7"));
        assert!(out.contains("End:   0:30:00"));
        assert_eq!(
            format!("{}", JobMove::new(JobId::new(3), OperatorIndex::new(2))),
            "Job 3 was moved to Operator 2"
        );
    }
}
