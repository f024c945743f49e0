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

//! # Dispatch Allocation Solver (`dispatch-alloc-solver`)
//!
//! Stochastic best-first local search that assigns jobs to operator
//! timelines, minimizing squared job delay first and travel time second.
//!
//! - [`state::Allocation`]: immutable job sequences per operator with
//!   canonical, operator-agnostic equality.
//! - [`eval`]: dispatch simulation producing per-job delays and travel
//!   times, the lexicographic [`eval::ScheduleCost`] and full schedules.
//! - [`neighbors::RelocateNeighborhood`]: weighted choice of a job and a
//!   destination operator, enumerated over every legal insertion position.
//! - [`explorer::Explorer`]: the search driver, carrying its incumbent from
//!   one planning round to the next so that started jobs stay put.

pub mod config;
pub mod err;
pub mod eval;
pub mod explorer;
pub mod frontier;
pub mod monitor;
pub mod neighbors;
pub mod sampling;
pub mod state;
pub mod stats;

pub mod prelude {
    pub use crate::config::ExplorerConfig;
    pub use crate::err::{AllocationError, ExplorerError};
    pub use crate::eval::{ScheduleCost, evaluate, schedule, simulate};
    pub use crate::explorer::{ExploreOutcome, Explorer, Termination};
    pub use crate::monitor::{ExplorerMonitor, NoOpMonitor, TracingMonitor};
    pub use crate::state::Allocation;
    pub use crate::stats::SearchStatistics;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Allocation: Send, Sync, Clone);
    assert_impl_all!(Explorer: Send, Sync);
    assert_impl_all!(ExploreOutcome: Send, Sync);
    assert_impl_all!(TracingMonitor: Send, Sync);
}
