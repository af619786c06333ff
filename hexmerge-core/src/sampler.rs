//! Weighted categorical sampling
//!
//! A uniform draw in `[0, 1)` is scaled by the total weight and the
//! cumulative distribution is walked in insertion order. `pick` exposes the
//! draw-to-outcome mapping directly so other implementations can be checked
//! against the same inputs.

use rand::Rng;

#[derive(Clone, Debug)]
pub struct Categorical<T> {
    outcomes: Vec<T>,
    weights: Vec<f64>,
    total: f64,
}

impl<T> Categorical<T> {
    /// Build a sampler from `(outcome, weight)` pairs.
    ///
    /// Returns `None` if there are no outcomes or any weight is not a
    /// positive finite number.
    pub fn new(entries: impl IntoIterator<Item = (T, f64)>) -> Option<Self> {
        let (outcomes, weights): (Vec<T>, Vec<f64>) = entries.into_iter().unzip();
        if outcomes.is_empty() || weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return None;
        }
        let total = weights.iter().sum();
        Some(Self { outcomes, weights, total })
    }

    /// Probability of the outcome at `index`
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.weights.get(index).map(|w| w / self.total)
    }

    /// Map a uniform draw `u` in `[0, 1)` to an outcome
    pub fn pick(&self, u: f64) -> &T {
        let target = u.clamp(0.0, 1.0) * self.total;
        let mut cumulative = 0.0;
        for (outcome, weight) in self.outcomes.iter().zip(&self.weights) {
            cumulative += weight;
            if target < cumulative {
                return outcome;
            }
        }
        // u == 1.0 or accumulated rounding error
        &self.outcomes[self.outcomes.len() - 1]
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        self.pick(rng.gen::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rejects_bad_weights() {
        assert!(Categorical::<u8>::new(vec![]).is_none());
        assert!(Categorical::new(vec![(1, 0.0)]).is_none());
        assert!(Categorical::new(vec![(1, 1.0), (2, -1.0)]).is_none());
        assert!(Categorical::new(vec![(1, f64::NAN)]).is_none());
    }

    #[test]
    fn test_pick_walks_cumulative() {
        let c = Categorical::new(vec![('a', 1.0), ('b', 2.0), ('c', 1.0)]).unwrap();
        assert_eq!(*c.pick(0.0), 'a');
        assert_eq!(*c.pick(0.24), 'a');
        assert_eq!(*c.pick(0.25), 'b');
        assert_eq!(*c.pick(0.74), 'b');
        assert_eq!(*c.pick(0.75), 'c');
        assert_eq!(*c.pick(1.0), 'c');
        assert_eq!(c.probability(1), Some(0.5));
        assert_eq!(c.probability(3), None);
    }

    #[test]
    fn test_sample_frequencies() {
        let c = Categorical::new(vec![(0usize, 3.0), (1usize, 1.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut counts = [0usize; 2];
        for _ in 0..20_000 {
            counts[*c.sample(&mut rng)] += 1;
        }
        let ratio = counts[0] as f64 / 20_000.0;
        assert!((ratio - 0.75).abs() < 0.02, "ratio was {}", ratio);
    }
}
