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

//! Hooks into the explorer loop.

use crate::{eval::ScheduleCost, explorer::Termination, state::Allocation, stats::SearchStatistics};
use tracing::{debug, info};

pub trait ExplorerMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before the first pop, with the start allocation.
    fn on_start(&mut self, initial: &Allocation, cost: ScheduleCost);

    /// Called whenever a popped allocation becomes the new incumbent.
    fn on_improvement(
        &mut self,
        incumbent: &Allocation,
        cost: ScheduleCost,
        statistics: &SearchStatistics,
    );

    /// Called after the neighbors of a popped allocation were pushed.
    fn on_expansion(&mut self, incumbent_cost: ScheduleCost, statistics: &SearchStatistics);

    /// Called once when the search stops, with the final incumbent.
    fn on_end(
        &mut self,
        best: &Allocation,
        cost: ScheduleCost,
        termination: Termination,
        statistics: &SearchStatistics,
    );
}

impl std::fmt::Debug for dyn ExplorerMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExplorerMonitor {{ name: {} }}", self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpMonitor;

impl ExplorerMonitor for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    fn on_start(&mut self, _initial: &Allocation, _cost: ScheduleCost) {}

    fn on_improvement(
        &mut self,
        _incumbent: &Allocation,
        _cost: ScheduleCost,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_expansion(&mut self, _incumbent_cost: ScheduleCost, _statistics: &SearchStatistics) {}

    fn on_end(
        &mut self,
        _best: &Allocation,
        _cost: ScheduleCost,
        _termination: Termination,
        _statistics: &SearchStatistics,
    ) {
    }
}

/// Reports progress through `tracing`: improvements at debug level and a
/// heartbeat every `log_every` expansions at info level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingMonitor {
    log_every: u64,
}

impl TracingMonitor {
    const DEFAULT_LOG_EVERY: u64 = 1_000;

    pub fn new(log_every: u64) -> Self {
        Self {
            log_every: log_every.max(1),
        }
    }

    #[inline]
    pub fn log_every(&self) -> u64 {
        self.log_every
    }
}

impl Default for TracingMonitor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOG_EVERY)
    }
}

impl ExplorerMonitor for TracingMonitor {
    fn name(&self) -> &str {
        "TracingMonitor"
    }

    fn on_start(&mut self, initial: &Allocation, cost: ScheduleCost) {
        info!(%cost, operators = initial.operator_count(), jobs = initial.job_count(), "Starting exploration");
    }

    fn on_improvement(
        &mut self,
        _incumbent: &Allocation,
        cost: ScheduleCost,
        statistics: &SearchStatistics,
    ) {
        debug!(iteration = statistics.iterations, %cost, "New best score");
    }

    fn on_expansion(&mut self, incumbent_cost: ScheduleCost, statistics: &SearchStatistics) {
        if statistics.iterations % self.log_every == 0 {
            info!(
                iteration = statistics.iterations,
                best = %incumbent_cost,
                stagnation = statistics.stagnation,
                admitted = statistics.admitted_states,
                "Exploring"
            );
        }
    }

    fn on_end(
        &mut self,
        _best: &Allocation,
        cost: ScheduleCost,
        termination: Termination,
        statistics: &SearchStatistics,
    ) {
        info!(
            %termination,
            %cost,
            iterations = statistics.iterations,
            improvements = statistics.improvements,
            elapsed = ?statistics.elapsed,
            "Exploration finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_monitor_interval_is_positive() {
        assert_eq!(TracingMonitor::new(0).log_every(), 1);
        assert_eq!(TracingMonitor::default().log_every(), 1_000);
    }

    #[test]
    fn test_dyn_debug_uses_name() {
        let m: Box<dyn ExplorerMonitor> = Box::new(NoOpMonitor);
        assert_eq!(format!("{:?}", m), "ExplorerMonitor { name: NoOpMonitor }");
    }
}
