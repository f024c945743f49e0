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

//! # Dispatch Allocation Model (`dispatch-alloc-model`)
//!
//! Instance data for allocating time-windowed jobs to operator timelines,
//! built on the primitives of `dispatch-alloc-core`.
//!
//! ## Key Data Structures
//!
//! - **`JobId`**: caller-supplied unique key of a job.
//! - **`Job`**: a location plus an expected window that never changes and a
//!   current window that the instance provider may move between planning
//!   rounds.
//! - **`Problem`**: the jobs, the operator count and the shared travel speed.
//!   Built through `ProblemBuilder`, which rejects empty or inconsistent
//!   instances up front.
//! - **`Schedule`**: the read-only outcome of an allocation, i.e. per operator
//!   the dispatch order with delays, travel times and effective start and end.
//! - **`JobMove`**: a job that ended a round on a different operator.
//!
//! The `generator` module produces seeded random instances for experiments
//! and benchmarks.

pub mod err;
pub mod generator;
pub mod id;
pub mod job;
pub mod problem;
pub mod sol;

pub mod prelude {
    pub use crate::err::{DisruptionError, InvertedWindowError, ProblemBuildError};
    pub use crate::id::{JobId, OperatorIndex};
    pub use crate::job::Job;
    pub use crate::problem::{Problem, ProblemBuilder};
    pub use crate::sol::{JobMove, Schedule, ScheduledJob, TimelineSchedule};
}
