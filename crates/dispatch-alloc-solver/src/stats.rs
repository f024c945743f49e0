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

//! Counters collected during one `explore` call.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchStatistics {
    /// Frontier entries popped.
    pub iterations: u64,

    /// Neighbors produced by the neighborhood, duplicates included.
    pub generated_neighbors: u64,

    /// Neighbors dropped because an equivalent allocation was already seen.
    pub duplicate_neighbors: u64,

    /// Allocations pushed onto the frontier, the start allocation included.
    pub admitted_states: u64,

    /// Pops that lowered the incumbent cost.
    pub improvements: u64,

    /// Non-improving pops since the last improvement.
    pub stagnation: u64,

    pub peak_frontier: usize,

    pub elapsed: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    #[inline]
    pub fn on_generated(&mut self, count: usize) {
        self.generated_neighbors = self.generated_neighbors.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_duplicate(&mut self) {
        self.duplicate_neighbors = self.duplicate_neighbors.saturating_add(1);
    }

    #[inline]
    pub fn on_admitted(&mut self) {
        self.admitted_states = self.admitted_states.saturating_add(1);
    }

    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
        self.stagnation = 0;
    }

    #[inline]
    pub fn on_stagnation(&mut self) {
        self.stagnation = self.stagnation.saturating_add(1);
    }

    #[inline]
    pub fn observe_frontier(&mut self, len: usize) {
        self.peak_frontier = self.peak_frontier.max(len);
    }

    #[inline]
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Explorer Statistics:")?;
        writeln!(f, "   Iterations:           {}", self.iterations)?;
        writeln!(f, "   Generated Neighbors:  {}", self.generated_neighbors)?;
        writeln!(f, "   Duplicate Neighbors:  {}", self.duplicate_neighbors)?;
        writeln!(f, "   Admitted States:      {}", self.admitted_states)?;
        writeln!(f, "   Improvements:         {}", self.improvements)?;
        writeln!(f, "   Stagnation:           {}", self.stagnation)?;
        writeln!(f, "   Peak Frontier:        {}", self.peak_frontier)?;
        writeln!(f, "   Total Time:           {:?}", self.elapsed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improvement_resets_stagnation() {
        let mut s = SearchStatistics::default();
        s.on_stagnation();
        s.on_stagnation();
        assert_eq!(s.stagnation, 2);
        s.on_improvement();
        assert_eq!(s.stagnation, 0);
        assert_eq!(s.improvements, 1);
    }

    #[test]
    fn test_peak_frontier_keeps_maximum() {
        let mut s = SearchStatistics::default();
        s.observe_frontier(4);
        s.observe_frontier(2);
        assert_eq!(s.peak_frontier, 4);
    }

    #[test]
    fn test_display_lists_counters() {
        let mut s = SearchStatistics::default();
        s.on_generated(3);
        s.on_duplicate();
        let out = s.to_string();
        assert!(out.contains("Generated Neighbors:  3"));
        assert!(out.contains("Duplicate Neighbors:  1"));
    }
}
