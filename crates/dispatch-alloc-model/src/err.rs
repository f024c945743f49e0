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

use crate::id::JobId;
use dispatch_alloc_core::time::TimePoint;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvertedWindowError {
    id: JobId,
    start: TimePoint<i64>,
    end: TimePoint<i64>,
}

impl InvertedWindowError {
    #[inline]
    pub fn new(id: JobId, start: TimePoint<i64>, end: TimePoint<i64>) -> Self {
        Self { id, start, end }
    }

    #[inline]
    pub fn id(&self) -> JobId {
        self.id
    }

    #[inline]
    pub fn start(&self) -> TimePoint<i64> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> TimePoint<i64> {
        self.end
    }
}

impl Display for InvertedWindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Job {} ends before it starts: end {} < start {}",
            self.id, self.end, self.start
        )
    }
}

impl std::error::Error for InvertedWindowError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemBuildError {
    /// At least one operator is required.
    NoOperators,
    /// At least one job is required.
    NoJobs,
    DuplicateJobId(JobId),
    InvertedWindow(InvertedWindowError),
}

impl Display for ProblemBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemBuildError::NoOperators => write!(f, "Problem has no operators"),
            ProblemBuildError::NoJobs => write!(f, "Problem has no jobs"),
            ProblemBuildError::DuplicateJobId(id) => write!(f, "Duplicate job id {}", id),
            ProblemBuildError::InvertedWindow(e) => write!(f, "{}", e),
        }
    }
}

impl From<InvertedWindowError> for ProblemBuildError {
    fn from(e: InvertedWindowError) -> Self {
        ProblemBuildError::InvertedWindow(e)
    }
}

impl std::error::Error for ProblemBuildError {}

/// Errors raised while applying a real-world disruption to a job window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisruptionError {
    UnknownJob(JobId),
    InvertedWindow(InvertedWindowError),
}

impl Display for DisruptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisruptionError::UnknownJob(id) => write!(f, "Unknown job {}", id),
            DisruptionError::InvertedWindow(e) => write!(f, "{}", e),
        }
    }
}

impl From<InvertedWindowError> for DisruptionError {
    fn from(e: InvertedWindowError) -> Self {
        DisruptionError::InvertedWindow(e)
    }
}

impl std::error::Error for DisruptionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = InvertedWindowError::new(JobId::new(3), TimePoint::new(10), TimePoint::new(5));
        assert_eq!(
            format!("{}", e),
            "Job JobId(3) ends before it starts: end TimePoint(5) < start TimePoint(10)"
        );
        assert_eq!(
            format!("{}", ProblemBuildError::DuplicateJobId(JobId::new(1))),
            "Duplicate job id JobId(1)"
        );
        assert_eq!(
            format!("{}", DisruptionError::UnknownJob(JobId::new(9))),
            "Unknown job JobId(9)"
        );
    }

    #[test]
    fn test_from_conversions() {
        let e = InvertedWindowError::new(JobId::new(3), TimePoint::new(10), TimePoint::new(5));
        assert_eq!(
            ProblemBuildError::from(e),
            ProblemBuildError::InvertedWindow(e)
        );
        assert_eq!(DisruptionError::from(e), DisruptionError::InvertedWindow(e));
    }
}
