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

use dispatch_alloc_model::id::JobId;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorCountMismatchError {
    expected: usize,
    found: usize,
}

impl OperatorCountMismatchError {
    #[inline]
    pub fn new(expected: usize, found: usize) -> Self {
        Self { expected, found }
    }

    #[inline]
    pub fn expected(&self) -> usize {
        self.expected
    }

    #[inline]
    pub fn found(&self) -> usize {
        self.found
    }
}

impl Display for OperatorCountMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Allocation has {} timelines but the problem has {} operators",
            self.found, self.expected
        )
    }
}

impl std::error::Error for OperatorCountMismatchError {}

/// An allocation that does not place every job of its problem exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationError {
    OperatorCountMismatch(OperatorCountMismatchError),
    UnknownJob(JobId),
    DuplicateJob(JobId),
    MissingJob(JobId),
}

impl Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationError::OperatorCountMismatch(e) => write!(f, "{}", e),
            AllocationError::UnknownJob(id) => {
                write!(f, "Allocation contains {} which is not part of the problem", id)
            }
            AllocationError::DuplicateJob(id) => {
                write!(f, "Allocation contains {} more than once", id)
            }
            AllocationError::MissingJob(id) => write!(f, "Allocation does not contain {}", id),
        }
    }
}

impl From<OperatorCountMismatchError> for AllocationError {
    fn from(e: OperatorCountMismatchError) -> Self {
        AllocationError::OperatorCountMismatch(e)
    }
}

impl std::error::Error for AllocationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplorerError {
    InvalidAllocation(AllocationError),
}

impl Display for ExplorerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExplorerError::InvalidAllocation(e) => write!(f, "Invalid allocation: {}", e),
        }
    }
}

impl From<AllocationError> for ExplorerError {
    fn from(e: AllocationError) -> Self {
        ExplorerError::InvalidAllocation(e)
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExplorerError::InvalidAllocation(e) => Some(e),
        }
    }
}
