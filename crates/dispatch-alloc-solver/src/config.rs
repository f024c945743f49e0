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

//! Search parameters of the [`Explorer`](crate::explorer::Explorer).
//!
//! Only the stagnation limit is active by default. The iteration and time
//! limits bound the effort of a single call when set.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Consecutive non-improving pops tolerated before the search gives up.
    pub stagnation_limit: u64,
    pub max_iterations: Option<u64>,
    pub time_limit: Option<Duration>,
    /// Evaluate the neighbors of one expansion on the rayon pool. Results are
    /// identical to sequential evaluation.
    pub parallel_evaluation: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            stagnation_limit: 10_000,
            max_iterations: None,
            time_limit: None,
            parallel_evaluation: false,
        }
    }
}

impl ExplorerConfig {
    #[inline]
    pub fn with_stagnation_limit(mut self, limit: u64) -> Self {
        self.stagnation_limit = limit;
        self
    }

    #[inline]
    pub fn with_max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = Some(max);
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_parallel_evaluation(mut self, enabled: bool) -> Self {
        self.parallel_evaluation = enabled;
        self
    }
}
