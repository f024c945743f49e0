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

//! # Time Primitives
//!
//! - `TimePoint<T>`: an offset from the planning epoch.
//! - `TimeDelta<T>`: a duration or the difference between two time points.
//! - `TimeInterval<T>`: a half-open window `[start, end)` of two `TimePoint`s.
//!
//! The solver works in integer **milliseconds** (`T = i64`). The concrete
//! `i64` impls below provide the minute/second conversions used throughout
//! the workspace. Distinct newtypes prevent adding two `TimePoint`s, and the
//! operator impls panic on overflow instead of wrapping silently.

use crate::{SolverVariable, primitives::Interval};
use num_traits::{PrimInt, Signed};
use serde::Serialize;
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Sub},
};

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TimePoint<T: PrimInt>(T);

impl<T: PrimInt + Display> Display for TimePoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimePoint({})", self.value())
    }
}

pub type TimeInterval<T> = Interval<TimePoint<T>>;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TimeDelta<T: PrimInt + Signed>(T);

impl<T: PrimInt + Signed> TimeDelta<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_positive()
    }
}

impl<T: SolverVariable> TimeDelta<T> {
    /// Clamps negative durations to zero.
    #[inline]
    pub fn non_negative(self) -> Self {
        if self.0.is_negative() {
            Self::zero()
        } else {
            self
        }
    }
}

impl TimeDelta<i64> {
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[inline]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes * MILLIS_PER_MINUTE)
    }

    /// Rounds a fractional number of minutes to the nearest millisecond.
    #[inline]
    pub fn from_minutes_f64(minutes: f64) -> Self {
        Self((minutes * MILLIS_PER_MINUTE as f64).round() as i64)
    }

    #[inline]
    pub fn as_seconds_f64(self) -> f64 {
        self.0 as f64 / MILLIS_PER_SECOND as f64
    }

    #[inline]
    pub fn as_minutes_f64(self) -> f64 {
        self.0 as f64 / MILLIS_PER_MINUTE as f64
    }

    /// Formats the duration as `[-]H:MM:SS`, truncating milliseconds.
    pub fn to_clock_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total_seconds = self.0.unsigned_abs() / MILLIS_PER_SECOND as u64;
        let hours = total_seconds / 3_600;
        let minutes = (total_seconds % 3_600) / 60;
        let seconds = total_seconds % 60;
        format!("{sign}{hours}:{minutes:02}:{seconds:02}")
    }
}

impl<T: PrimInt> TimePoint<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        TimePoint(value)
    }

    #[inline]
    pub fn zero() -> Self {
        TimePoint::new(T::zero())
    }

    #[inline]
    pub const fn value(self) -> T {
        self.0
    }
}

impl<T: PrimInt + Signed> TimePoint<T> {
    /// Returns the duration elapsed since the epoch.
    #[inline]
    pub fn since_epoch(self) -> TimeDelta<T> {
        TimeDelta(self.0)
    }
}

impl TimePoint<i64> {
    #[inline]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes * MILLIS_PER_MINUTE)
    }

    #[inline]
    pub fn as_minutes_f64(self) -> f64 {
        self.0 as f64 / MILLIS_PER_MINUTE as f64
    }
}

impl<T: PrimInt + Display + Signed> Display for TimeDelta<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeDelta({})", self.0)
    }
}

impl<T: PrimInt + Signed> Add<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    #[inline]
    fn add(self, rhs: TimeDelta<T>) -> Self::Output {
        TimePoint(
            self.0
                .checked_add(&rhs.0)
                .expect("overflow in TimePoint + TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> Sub<TimeDelta<T>> for TimePoint<T> {
    type Output = TimePoint<T>;

    fn sub(self, rhs: TimeDelta<T>) -> Self::Output {
        TimePoint(
            self.0
                .checked_sub(&rhs.0)
                .expect("underflow in TimePoint - TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> Sub<TimePoint<T>> for TimePoint<T> {
    type Output = TimeDelta<T>;

    fn sub(self, rhs: TimePoint<T>) -> Self::Output {
        TimeDelta::new(
            self.0
                .checked_sub(&rhs.0)
                .expect("underflow in TimePoint - TimePoint"),
        )
    }
}

impl<T: PrimInt + Signed> Add for TimeDelta<T> {
    type Output = TimeDelta<T>;

    fn add(self, rhs: Self) -> Self::Output {
        TimeDelta::new(
            self.0
                .checked_add(&rhs.0)
                .expect("overflow in TimeDelta + TimeDelta"),
        )
    }
}

impl<T: PrimInt + Signed> Sum for TimeDelta<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a, T: PrimInt + Signed> Sum<&'a TimeDelta<T>> for TimeDelta<T> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + *x)
    }
}

impl<T: PrimInt + Signed> Interval<TimePoint<T>> {
    #[inline]
    pub fn duration(&self) -> TimeDelta<T> {
        self.end() - self.start()
    }
}
