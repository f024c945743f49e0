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
    err::{DisruptionError, ProblemBuildError},
    id::JobId,
    job::Job,
};
use dispatch_alloc_core::{
    space::{Location, TravelSpeed},
    time::{TimeDelta, TimePoint},
};
use std::{collections::HashMap, fmt::Display, ops::Index};

/// A planning instance: the fixed job set, the number of operators and
/// their shared travel speed.
///
/// Jobs are looked up by [`JobId`]. The job set never changes once built;
/// only job windows can be moved through the disruption methods, which the
/// instance provider calls between planning rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    jobs: Vec<Job>,
    index: HashMap<JobId, usize>,
    operator_count: usize,
    travel_speed: TravelSpeed,
}

impl Problem {
    #[inline]
    pub fn operator_count(&self) -> usize {
        self.operator_count
    }

    #[inline]
    pub fn travel_speed(&self) -> TravelSpeed {
        self.travel_speed
    }

    #[inline]
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Jobs in the order they were added.
    #[inline]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    #[inline]
    pub fn iter_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    #[inline]
    pub fn iter_job_ids(&self) -> impl Iterator<Item = JobId> + '_ {
        self.jobs.iter().map(Job::id)
    }

    #[inline]
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.index.get(&id).map(|&i| &self.jobs[i])
    }

    #[inline]
    pub fn contains(&self, id: JobId) -> bool {
        self.index.contains_key(&id)
    }

    fn job_mut(&mut self, id: JobId) -> Result<&mut Job, DisruptionError> {
        let i = *self
            .index
            .get(&id)
            .ok_or(DisruptionError::UnknownJob(id))?;
        Ok(&mut self.jobs[i])
    }

    /// Replaces the current window of a job.
    pub fn set_job_window(
        &mut self,
        id: JobId,
        start: TimePoint<i64>,
        end: TimePoint<i64>,
    ) -> Result<(), DisruptionError> {
        self.job_mut(id)?.set_window(start, end)?;
        Ok(())
    }

    /// Moves the end of a job's current window by `delta`, e.g. because the
    /// job runs long.
    pub fn extend_job_end(&mut self, id: JobId, delta: TimeDelta<i64>) -> Result<(), DisruptionError> {
        let job = self.job_mut(id)?;
        let (start, end) = (job.start(), job.end() + delta);
        job.set_window(start, end)?;
        Ok(())
    }

    /// Moves the whole current window of a job by `delta`.
    pub fn shift_job(&mut self, id: JobId, delta: TimeDelta<i64>) -> Result<(), DisruptionError> {
        let job = self.job_mut(id)?;
        let (start, end) = (job.start() + delta, job.end() + delta);
        job.set_window(start, end)?;
        Ok(())
    }
}

impl Index<JobId> for Problem {
    type Output = Job;

    /// # Panics
    ///
    /// If the job id is not part of this problem.
    #[inline]
    fn index(&self, id: JobId) -> &Self::Output {
        match self.job(id) {
            Some(job) => job,
            None => panic!("{} is not part of the problem", id),
        }
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Problem:")?;
        writeln!(f, "  Operators: {}", self.operator_count)?;
        writeln!(f, "  Travel speed: {}", self.travel_speed)?;
        writeln!(f, "  Jobs ({}):", self.jobs.len())?;
        for j in &self.jobs {
            writeln!(f, "    {}", j)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    jobs: Vec<Job>,
    index: HashMap<JobId, usize>,
    operator_count: usize,
    travel_speed: TravelSpeed,
}

impl ProblemBuilder {
    #[inline]
    pub fn new(operator_count: usize, travel_speed: TravelSpeed) -> Self {
        Self {
            jobs: Vec::new(),
            index: HashMap::new(),
            operator_count,
            travel_speed,
        }
    }

    #[inline]
    pub fn operator_count(&mut self, operator_count: usize) -> &mut Self {
        self.operator_count = operator_count;
        self
    }

    #[inline]
    pub fn travel_speed(&mut self, travel_speed: TravelSpeed) -> &mut Self {
        self.travel_speed = travel_speed;
        self
    }

    pub fn add_job(&mut self, job: Job) -> Result<&mut Self, ProblemBuildError> {
        let id = job.id();
        if self.index.contains_key(&id) {
            return Err(ProblemBuildError::DuplicateJobId(id));
        }
        self.index.insert(id, self.jobs.len());
        self.jobs.push(job);
        Ok(self)
    }

    /// Shorthand for [`Job::new`] followed by [`ProblemBuilder::add_job`].
    pub fn add(
        &mut self,
        id: JobId,
        expected_start: TimePoint<i64>,
        expected_end: TimePoint<i64>,
        location: Location,
    ) -> Result<&mut Self, ProblemBuildError> {
        let job = Job::new(id, expected_start, expected_end, location)?;
        self.add_job(job)
    }

    pub fn build(self) -> Result<Problem, ProblemBuildError> {
        if self.operator_count == 0 {
            return Err(ProblemBuildError::NoOperators);
        }
        if self.jobs.is_empty() {
            return Err(ProblemBuildError::NoJobs);
        }
        Ok(Problem {
            jobs: self.jobs,
            index: self.index,
            operator_count: self.operator_count,
            travel_speed: self.travel_speed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speed() -> TravelSpeed {
        TravelSpeed::new(250.0).unwrap()
    }

    fn tp(m: i64) -> TimePoint<i64> {
        TimePoint::from_minutes(m)
    }

    fn origin() -> Location {
        Location::new(0.0, 0.0)
    }

    fn two_job_problem() -> Problem {
        let mut b = ProblemBuilder::new(2, speed());
        b.add(JobId::new(10), tp(0), tp(30), origin()).unwrap();
        b.add(JobId::new(20), tp(30), tp(60), Location::new(1000.0, 0.0))
            .unwrap();
        b.build().unwrap()
    }

    #[test]
    fn test_build_ok_when_valid() {
        let p = two_job_problem();
        assert_eq!(p.operator_count(), 2);
        assert_eq!(p.job_count(), 2);
        assert_eq!(
            p.iter_job_ids().collect::<Vec<_>>(),
            vec![JobId::new(10), JobId::new(20)]
        );
        assert!(p.contains(JobId::new(20)));
        assert!(!p.contains(JobId::new(0)));
        assert_eq!(p[JobId::new(20)].start(), tp(30));
    }

    #[test]
    fn test_zero_operators_rejected() {
        let mut b = ProblemBuilder::new(0, speed());
        b.add(JobId::new(1), tp(0), tp(30), origin()).unwrap();
        assert_eq!(b.build().unwrap_err(), ProblemBuildError::NoOperators);
    }

    #[test]
    fn test_empty_job_set_rejected() {
        let b = ProblemBuilder::new(3, speed());
        assert_eq!(b.build().unwrap_err(), ProblemBuildError::NoJobs);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut b = ProblemBuilder::new(1, speed());
        b.add(JobId::new(1), tp(0), tp(30), origin()).unwrap();
        let err = b.add(JobId::new(1), tp(5), tp(20), origin()).unwrap_err();
        assert_eq!(err, ProblemBuildError::DuplicateJobId(JobId::new(1)));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut b = ProblemBuilder::new(1, speed());
        let err = b.add(JobId::new(1), tp(30), tp(0), origin()).unwrap_err();
        assert!(matches!(err, ProblemBuildError::InvertedWindow(_)));
    }

    #[test]
    fn test_extend_job_end() {
        let mut p = two_job_problem();
        p.extend_job_end(JobId::new(10), TimeDelta::from_minutes(25))
            .unwrap();
        let j = &p[JobId::new(10)];
        assert_eq!(j.end(), tp(55));
        assert_eq!(j.expected_end(), tp(30));
        assert_eq!(j.duration(), TimeDelta::from_minutes(55));
    }

    #[test]
    fn test_extend_job_end_rejects_inversion() {
        let mut p = two_job_problem();
        let err = p
            .extend_job_end(JobId::new(10), TimeDelta::from_minutes(-31))
            .unwrap_err();
        assert!(matches!(err, DisruptionError::InvertedWindow(_)));
        assert_eq!(p[JobId::new(10)].end(), tp(30));
    }

    #[test]
    fn test_shift_and_set_window() {
        let mut p = two_job_problem();
        p.shift_job(JobId::new(20), TimeDelta::from_minutes(10))
            .unwrap();
        assert_eq!(p[JobId::new(20)].start(), tp(40));
        assert_eq!(p[JobId::new(20)].end(), tp(70));
        p.set_job_window(JobId::new(20), tp(5), tp(6)).unwrap();
        assert_eq!(p[JobId::new(20)].duration(), TimeDelta::from_minutes(1));
    }

    #[test]
    fn test_disruption_on_unknown_job() {
        let mut p = two_job_problem();
        assert_eq!(
            p.extend_job_end(JobId::new(99), TimeDelta::from_minutes(1)),
            Err(DisruptionError::UnknownJob(JobId::new(99)))
        );
    }

    #[test]
    #[should_panic(expected = "is not part of the problem")]
    fn test_index_unknown_job_panics() {
        let p = two_job_problem();
        let _ = &p[JobId::new(99)];
    }
}
