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

use super::err::{DurationRangeError, InstanceGenConfigError};
use dispatch_alloc_core::{space::TravelSpeed, time::TimeDelta};
use std::fmt::Display;

/// Configuration for synthetic dispatch instances.
///
/// Jobs are scattered uniformly over a square of `area_side` meters, start
/// uniformly within `[0, horizon]` and last between `min_duration` and
/// `max_duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceGenConfig {
    pub(crate) job_count: usize,
    pub(crate) operator_count: usize,
    pub(crate) travel_speed: TravelSpeed,
    pub(crate) area_side: f64,
    pub(crate) horizon: TimeDelta<i64>,
    pub(crate) min_duration: TimeDelta<i64>,
    pub(crate) max_duration: TimeDelta<i64>,
    pub(crate) seed: u64,
}

impl InstanceGenConfig {
    #[inline]
    pub fn builder() -> InstanceGenConfigBuilder {
        InstanceGenConfigBuilder::default()
    }

    #[inline]
    pub fn job_count(&self) -> usize {
        self.job_count
    }
    #[inline]
    pub fn operator_count(&self) -> usize {
        self.operator_count
    }
    #[inline]
    pub fn travel_speed(&self) -> TravelSpeed {
        self.travel_speed
    }
    #[inline]
    pub fn area_side(&self) -> f64 {
        self.area_side
    }
    #[inline]
    pub fn horizon(&self) -> TimeDelta<i64> {
        self.horizon
    }
    #[inline]
    pub fn min_duration(&self) -> TimeDelta<i64> {
        self.min_duration
    }
    #[inline]
    pub fn max_duration(&self) -> TimeDelta<i64> {
        self.max_duration
    }
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Display for InstanceGenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InstanceGenConfig {{ job_count: {}, operator_count: {}, travel_speed: {}, \
             area_side: {:.1}, horizon: {}, min_duration: {}, max_duration: {}, seed: {} }}",
            self.job_count,
            self.operator_count,
            self.travel_speed,
            self.area_side,
            self.horizon.to_clock_string(),
            self.min_duration.to_clock_string(),
            self.max_duration.to_clock_string(),
            self.seed
        )
    }
}

/// Builder for `InstanceGenConfig`.
#[derive(Debug, Clone)]
pub struct InstanceGenConfigBuilder {
    job_count: usize,
    operator_count: usize,
    meters_per_minute: f64,
    area_side: f64,
    horizon: TimeDelta<i64>,
    min_duration: TimeDelta<i64>,
    max_duration: TimeDelta<i64>,
    seed: u64,
}

impl Default for InstanceGenConfigBuilder {
    fn default() -> Self {
        Self {
            job_count: 40,
            operator_count: 5,
            meters_per_minute: 250.0,
            area_side: 2_000.0,
            horizon: TimeDelta::from_minutes(8 * 60),
            min_duration: TimeDelta::from_minutes(15),
            max_duration: TimeDelta::from_minutes(60),
            seed: 42,
        }
    }
}

impl InstanceGenConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn job_count(mut self, v: usize) -> Self {
        self.job_count = v;
        self
    }
    #[inline]
    pub fn operator_count(mut self, v: usize) -> Self {
        self.operator_count = v;
        self
    }
    #[inline]
    pub fn meters_per_minute(mut self, v: f64) -> Self {
        self.meters_per_minute = v;
        self
    }
    #[inline]
    pub fn area_side(mut self, v: f64) -> Self {
        self.area_side = v;
        self
    }
    #[inline]
    pub fn horizon(mut self, v: TimeDelta<i64>) -> Self {
        self.horizon = v;
        self
    }
    #[inline]
    pub fn duration_range(mut self, min: TimeDelta<i64>, max: TimeDelta<i64>) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }
    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    pub fn build(self) -> Result<InstanceGenConfig, InstanceGenConfigError> {
        if self.job_count == 0 {
            return Err(InstanceGenConfigError::NoJobs);
        }
        if self.operator_count == 0 {
            return Err(InstanceGenConfigError::NoOperators);
        }
        if !self.horizon.is_positive() {
            return Err(InstanceGenConfigError::NonPositiveHorizon);
        }
        if !(self.area_side.is_finite() && self.area_side >= 0.0) {
            return Err(InstanceGenConfigError::InvalidAreaSide(self.area_side));
        }
        if self.min_duration.is_negative() || self.min_duration > self.max_duration {
            return Err(DurationRangeError::new(self.min_duration, self.max_duration).into());
        }
        let travel_speed = TravelSpeed::new(self.meters_per_minute)?;

        Ok(InstanceGenConfig {
            job_count: self.job_count,
            operator_count: self.operator_count,
            travel_speed,
            area_side: self.area_side,
            horizon: self.horizon,
            min_duration: self.min_duration,
            max_duration: self.max_duration,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder_is_valid() {
        let cfg = InstanceGenConfigBuilder::new().build().unwrap();
        assert_eq!(cfg.job_count(), 40);
        assert_eq!(cfg.operator_count(), 5);
        assert_eq!(cfg.travel_speed().meters_per_minute(), 250.0);
        assert_eq!(cfg.seed(), 42);
    }

    #[test]
    fn test_rejects_empty_counts() {
        assert_eq!(
            InstanceGenConfig::builder().job_count(0).build(),
            Err(InstanceGenConfigError::NoJobs)
        );
        assert_eq!(
            InstanceGenConfig::builder().operator_count(0).build(),
            Err(InstanceGenConfigError::NoOperators)
        );
    }

    #[test]
    fn test_rejects_inverted_duration_range() {
        let err = InstanceGenConfig::builder()
            .duration_range(TimeDelta::from_minutes(30), TimeDelta::from_minutes(10))
            .build()
            .unwrap_err();
        assert!(matches!(err, InstanceGenConfigError::DurationRange(_)));
    }

    #[test]
    fn test_rejects_bad_speed_and_horizon() {
        assert!(matches!(
            InstanceGenConfig::builder().meters_per_minute(0.0).build(),
            Err(InstanceGenConfigError::InvalidTravelSpeed(_))
        ));
        assert_eq!(
            InstanceGenConfig::builder().horizon(TimeDelta::zero()).build(),
            Err(InstanceGenConfigError::NonPositiveHorizon)
        );
        assert!(matches!(
            InstanceGenConfig::builder().area_side(f64::NAN).build(),
            Err(InstanceGenConfigError::InvalidAreaSide(_))
        ));
    }
}
