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

//! Best-first frontier and visited set of the explorer.

use crate::{eval::ScheduleCost, state::Allocation};
use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashSet},
};

/// An allocation waiting on the frontier together with its cost.
///
/// The sequence number records insertion order; among equal costs the entry
/// pushed first is popped first.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    cost: ScheduleCost,
    sequence: u64,
    allocation: Allocation,
}

impl FrontierEntry {
    #[inline]
    pub fn cost(&self) -> ScheduleCost {
        self.cost
    }

    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[inline]
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.sequence == other.sequence
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // BinaryHeap is a max-heap, so lower (cost, sequence) must compare greater.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl Frontier {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, cost: ScheduleCost, allocation: Allocation) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            cost,
            sequence,
            allocation,
        });
    }

    /// Removes the cheapest entry.
    #[inline]
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }
}

/// Allocations admitted to the frontier during one search, compared
/// canonically.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    seen: HashSet<Allocation>,
}

impl VisitedSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `allocation` was not seen before.
    #[inline]
    pub fn insert(&mut self, allocation: Allocation) -> bool {
        self.seen.insert(allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_alloc_core::{cost::Cost, time::TimeDelta};
    use dispatch_alloc_model::id::JobId;

    fn cost(d: i128, t: i64) -> ScheduleCost {
        ScheduleCost::new(Cost::new(d), TimeDelta::from_millis(t))
    }

    fn alloc(tls: &[&[u64]]) -> Allocation {
        Allocation::from_timelines(
            tls.iter()
                .map(|t| t.iter().copied().map(JobId::new).collect::<Vec<_>>()),
        )
    }

    #[test]
    fn test_pops_cheapest_first() {
        let mut f = Frontier::new();
        f.push(cost(5, 0), alloc(&[&[1]]));
        f.push(cost(1, 9), alloc(&[&[2]]));
        f.push(cost(1, 3), alloc(&[&[3]]));
        assert_eq!(f.len(), 3);
        let order: Vec<ScheduleCost> = std::iter::from_fn(|| f.pop().map(|e| e.cost())).collect();
        assert_eq!(order, vec![cost(1, 3), cost(1, 9), cost(5, 0)]);
        assert!(f.is_empty());
    }

    #[test]
    fn test_equal_costs_pop_in_insertion_order() {
        let mut f = Frontier::new();
        for i in 0..5 {
            f.push(cost(7, 7), alloc(&[&[i]]));
        }
        let seqs: Vec<u64> = std::iter::from_fn(|| f.pop().map(|e| e.sequence())).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_visited_is_canonical() {
        let mut v = VisitedSet::new();
        assert!(v.insert(alloc(&[&[1, 2], &[3]])));
        assert!(!v.insert(alloc(&[&[3], &[1, 2]])));
        assert!(v.insert(alloc(&[&[2, 1], &[3]])));
        assert!(!v.insert(alloc(&[&[3], &[2, 1]])));
    }
}
