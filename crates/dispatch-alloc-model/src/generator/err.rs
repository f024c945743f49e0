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

use dispatch_alloc_core::{space::InvalidTravelSpeedError, time::TimeDelta};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRangeError {
    min: TimeDelta<i64>,
    max: TimeDelta<i64>,
}

impl DurationRangeError {
    pub fn new(min: TimeDelta<i64>, max: TimeDelta<i64>) -> Self {
        Self { min, max }
    }
    pub fn min(&self) -> TimeDelta<i64> {
        self.min
    }
    pub fn max(&self) -> TimeDelta<i64> {
        self.max
    }
}

impl Display for DurationRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DurationRangeError: min duration {} exceeds max duration {} or is negative",
            self.min, self.max
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstanceGenConfigError {
    NoJobs,
    NoOperators,
    NonPositiveHorizon,
    InvalidAreaSide(f64),
    InvalidTravelSpeed(InvalidTravelSpeedError),
    DurationRange(DurationRangeError),
    EmptySamplingRange(&'static str),
}

impl Display for InstanceGenConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InstanceGenConfigError::*;
        match self {
            NoJobs => write!(f, "Instance must contain at least one job"),
            NoOperators => write!(f, "Instance must contain at least one operator"),
            NonPositiveHorizon => write!(f, "Horizon must be positive"),
            InvalidAreaSide(side) => write!(f, "Invalid area side length {}", side),
            InvalidTravelSpeed(e) => write!(f, "{}", e),
            DurationRange(e) => write!(f, "{}", e),
            EmptySamplingRange(what) => write!(f, "Empty sampling range for {}", what),
        }
    }
}

impl From<InvalidTravelSpeedError> for InstanceGenConfigError {
    fn from(err: InvalidTravelSpeedError) -> Self {
        Self::InvalidTravelSpeed(err)
    }
}

impl From<DurationRangeError> for InstanceGenConfigError {
    fn from(err: DurationRangeError) -> Self {
        Self::DurationRange(err)
    }
}

impl std::error::Error for InstanceGenConfigError {}
