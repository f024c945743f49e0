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

use crate::{err::InvertedWindowError, id::JobId};
use dispatch_alloc_core::{
    space::{Location, TravelSpeed},
    time::{TimeDelta, TimeInterval, TimePoint},
};
use std::fmt::Display;

/// A job to be dispatched at a fixed location.
///
/// The expected window is what was originally planned and never changes.
/// The current window starts out equal to it and may be moved by the
/// instance provider between planning rounds (e.g. a job overrunning).
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    id: JobId,
    expected_window: TimeInterval<i64>,
    window: TimeInterval<i64>,
    location: Location,
}

#[inline]
fn checked_window(
    id: JobId,
    start: TimePoint<i64>,
    end: TimePoint<i64>,
) -> Result<TimeInterval<i64>, InvertedWindowError> {
    if end < start {
        return Err(InvertedWindowError::new(id, start, end));
    }
    Ok(TimeInterval::new(start, end))
}

impl Job {
    pub fn new(
        id: JobId,
        expected_start: TimePoint<i64>,
        expected_end: TimePoint<i64>,
        location: Location,
    ) -> Result<Self, InvertedWindowError> {
        let window = checked_window(id, expected_start, expected_end)?;
        Ok(Self {
            id,
            expected_window: window,
            window,
            location,
        })
    }

    #[inline]
    pub fn id(&self) -> JobId {
        self.id
    }

    #[inline]
    pub fn expected_window(&self) -> TimeInterval<i64> {
        self.expected_window
    }

    #[inline]
    pub fn expected_start(&self) -> TimePoint<i64> {
        self.expected_window.start()
    }

    #[inline]
    pub fn expected_end(&self) -> TimePoint<i64> {
        self.expected_window.end()
    }

    #[inline]
    pub fn window(&self) -> TimeInterval<i64> {
        self.window
    }

    #[inline]
    pub fn start(&self) -> TimePoint<i64> {
        self.window.start()
    }

    #[inline]
    pub fn end(&self) -> TimePoint<i64> {
        self.window.end()
    }

    /// `end - start` of the current window.
    #[inline]
    pub fn duration(&self) -> TimeDelta<i64> {
        self.window.duration()
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Travel time to reach this job from `from`. The first job of a
    /// timeline has no predecessor and therefore no travel.
    #[inline]
    pub fn travel_time_from(&self, from: Option<&Location>, speed: TravelSpeed) -> TimeDelta<i64> {
        match from {
            Some(from) => speed.travel_time_between(from, &self.location),
            None => TimeDelta::zero(),
        }
    }

    pub(crate) fn set_window(
        &mut self,
        start: TimePoint<i64>,
        end: TimePoint<i64>,
    ) -> Result<(), InvertedWindowError> {
        self.window = checked_window(self.id, start, end)?;
        Ok(())
    }
}

impl Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Job(id: {}, window: {}, expected: {}, location: {})",
            self.id.value(),
            self.window,
            self.expected_window,
            self.location
        )
    }
}
