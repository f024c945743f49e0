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

mod config;
mod err;

pub use config::{InstanceGenConfig, InstanceGenConfigBuilder};
pub use err::{DurationRangeError, InstanceGenConfigError};

use crate::{
    err::ProblemBuildError,
    id::JobId,
    problem::{Problem, ProblemBuilder},
};
use dispatch_alloc_core::{
    space::Location,
    time::{TimeDelta, TimePoint},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};

/// Produces random [`Problem`]s from an [`InstanceGenConfig`].
///
/// The generator owns a seeded `ChaCha8Rng`, so the sequence of generated
/// instances is fully determined by the configured seed.
pub struct InstanceGenerator {
    config: InstanceGenConfig,
    rng: ChaCha8Rng,
    coordinate_distribution: Uniform<f64>,
    start_distribution: Uniform<i64>,
    duration_distribution: Uniform<i64>,
}

impl InstanceGenerator {
    pub fn new(config: InstanceGenConfig) -> Result<Self, InstanceGenConfigError> {
        let coordinate_distribution = Uniform::new_inclusive(0.0, config.area_side)
            .map_err(|_| InstanceGenConfigError::EmptySamplingRange("coordinates"))?;
        let start_distribution = Uniform::new_inclusive(0, config.horizon.value())
            .map_err(|_| InstanceGenConfigError::EmptySamplingRange("start times"))?;
        let duration_distribution =
            Uniform::new_inclusive(config.min_duration.value(), config.max_duration.value())
                .map_err(|_| InstanceGenConfigError::EmptySamplingRange("durations"))?;

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            coordinate_distribution,
            start_distribution,
            duration_distribution,
        })
    }

    #[inline]
    pub fn config(&self) -> &InstanceGenConfig {
        &self.config
    }

    fn sample_location(&mut self) -> Location {
        let x = self.coordinate_distribution.sample(&mut self.rng);
        let y = self.coordinate_distribution.sample(&mut self.rng);
        Location::new(x, y)
    }

    /// Generates the next instance. Job ids are `0..job_count` in the order
    /// the jobs were drawn.
    pub fn generate(&mut self) -> Result<Problem, ProblemBuildError> {
        let mut builder =
            ProblemBuilder::new(self.config.operator_count, self.config.travel_speed);
        for i in 0..self.config.job_count {
            let location = self.sample_location();
            let start = TimePoint::new(self.start_distribution.sample(&mut self.rng));
            let duration = TimeDelta::new(self.duration_distribution.sample(&mut self.rng));
            builder.add(JobId::new(i as u64), start, start + duration, location)?;
        }
        builder.build()
    }
}

impl TryFrom<InstanceGenConfig> for InstanceGenerator {
    type Error = InstanceGenConfigError;

    fn try_from(config: InstanceGenConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(seed: u64) -> InstanceGenConfig {
        InstanceGenConfig::builder()
            .job_count(25)
            .operator_count(3)
            .area_side(1_500.0)
            .horizon(TimeDelta::from_minutes(240))
            .duration_range(TimeDelta::from_minutes(10), TimeDelta::from_minutes(45))
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn generate_shapes_and_counts() {
        let config = cfg(7);
        let mut generator = InstanceGenerator::new(config.clone()).unwrap();
        let problem = generator.generate().unwrap();

        assert_eq!(problem.job_count(), config.job_count());
        assert_eq!(problem.operator_count(), config.operator_count());
        assert_eq!(problem.travel_speed(), config.travel_speed());
        let ids: Vec<u64> = problem.iter_job_ids().map(|id| id.value()).collect();
        assert_eq!(ids, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn jobs_respect_configured_ranges() {
        let config = cfg(123);
        let mut generator = InstanceGenerator::new(config.clone()).unwrap();
        let problem = generator.generate().unwrap();

        for job in problem.iter_jobs() {
            assert!(job.start() >= TimePoint::zero());
            assert!(job.start() <= TimePoint::zero() + config.horizon());
            assert!(job.duration() >= config.min_duration());
            assert!(job.duration() <= config.max_duration());
            assert_eq!(job.window(), job.expected_window());
            let l = job.location();
            assert!((0.0..=config.area_side()).contains(&l.x()));
            assert!((0.0..=config.area_side()).contains(&l.y()));
        }
    }

    #[test]
    fn same_seed_same_instance() {
        let a = InstanceGenerator::new(cfg(99)).unwrap().generate().unwrap();
        let b = InstanceGenerator::new(cfg(99)).unwrap().generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_instance() {
        let a = InstanceGenerator::new(cfg(1)).unwrap().generate().unwrap();
        let b = InstanceGenerator::new(cfg(2)).unwrap().generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_duration_range_is_accepted() {
        let config = InstanceGenConfig::builder()
            .job_count(3)
            .duration_range(TimeDelta::from_minutes(30), TimeDelta::from_minutes(30))
            .build()
            .unwrap();
        let problem = InstanceGenerator::try_from(config)
            .unwrap()
            .generate()
            .unwrap();
        assert!(
            problem
                .iter_jobs()
                .all(|j| j.duration() == TimeDelta::from_minutes(30))
        );
    }
}
