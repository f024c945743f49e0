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

//! Roulette-wheel sampling over non-negative weights.

use rand::Rng;

/// Cumulative distribution over a slice of weights.
///
/// Weights that are non-positive or not finite carry no probability mass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CumulativeWeights {
    cumulative: Vec<f64>,
}

impl CumulativeWeights {
    pub fn new<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut acc = 0.0;
        let cumulative = weights
            .into_iter()
            .map(|w| {
                if w.is_finite() && w > 0.0 {
                    acc += w;
                }
                acc
            })
            .collect();
        Self { cumulative }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Draws one index with probability proportional to its weight, using a
    /// single uniform draw. `None` if the total mass is zero.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        let u = rng.random::<f64>() * total;
        let idx = self.cumulative.partition_point(|&c| c <= u);
        if idx < self.cumulative.len() {
            return Some(idx);
        }
        // u rounded up to the total; fall back to the last entry with mass
        let last = self.cumulative.partition_point(|&c| c < total);
        Some(last)
    }
}

/// Samples one index of `weights` proportionally to its weight.
#[inline]
pub fn sample_weighted<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    CumulativeWeights::new(weights.iter().copied()).sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_total_yields_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample_weighted(&[], &mut rng), None);
        assert_eq!(sample_weighted(&[0.0, 0.0], &mut rng), None);
        assert_eq!(sample_weighted(&[-1.0, f64::NAN], &mut rng), None);
    }

    #[test]
    fn test_zero_weights_never_sampled() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..1_000 {
            let i = sample_weighted(&[0.0, 3.0, 0.0, f64::INFINITY, 1.0, 0.0], &mut rng).unwrap();
            assert!(i == 1 || i == 4, "sampled index {i}");
        }
    }

    #[test]
    fn test_single_positive_weight_always_chosen() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(sample_weighted(&[0.0, 0.0, 0.5], &mut rng), Some(2));
        }
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let cw = CumulativeWeights::new([1.0, 3.0]);
        assert_eq!(cw.total(), 4.0);
        let mut hits = [0usize; 2];
        for _ in 0..20_000 {
            hits[cw.sample(&mut rng).unwrap()] += 1;
        }
        let share = hits[1] as f64 / 20_000.0;
        assert!((share - 0.75).abs() < 0.03, "share {share}");
    }

    #[test]
    fn test_same_seed_same_draws() {
        let w = [1.0, 2.0, 3.0, 4.0];
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        let xs: Vec<_> = (0..50).map(|_| sample_weighted(&w, &mut a)).collect();
        let ys: Vec<_> = (0..50).map(|_| sample_weighted(&w, &mut b)).collect();
        assert_eq!(xs, ys);
    }
}
