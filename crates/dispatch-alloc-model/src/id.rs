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

use serde::Serialize;
use std::fmt::Display;

/// Caller-assigned identity of a job. Ids are opaque; any unique `u64` works.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(u64);

impl JobId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        JobId(id)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JobId({})", self.0)
    }
}

impl From<u64> for JobId {
    fn from(value: u64) -> Self {
        JobId(value)
    }
}

/// Position of an operator (and its timeline) in `0..operator_count`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OperatorIndex(usize);

impl OperatorIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        OperatorIndex(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Display for OperatorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OperatorIndex({})", self.0)
    }
}

impl From<usize> for OperatorIndex {
    fn from(value: usize) -> Self {
        OperatorIndex(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_roundtrip_and_display() {
        let id: JobId = 7u64.into();
        assert_eq!(id.value(), 7);
        assert_eq!(format!("{}", id), "JobId(7)");
    }

    #[test]
    fn test_operator_index_ordering() {
        assert!(OperatorIndex::new(1) < OperatorIndex::new(2));
        assert_eq!(OperatorIndex::from(3).get(), 3);
        assert_eq!(format!("{}", OperatorIndex::new(4)), "OperatorIndex(4)");
    }
}
