use std::fmt;

use serde::{Deserialize, Serialize};

/// min / max / mean over aggregated word counts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrequencyStats {
    pub min: u64,
    pub max: u64,
    /// rounded to 2 decimal places
    pub mean: f64,
}

impl FrequencyStats {
    /// Computes the statistics of `counts`.
    /// An empty input gives all zeros.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let mut min = u64::MAX;
        let mut max = 0u64;
        let mut sum = 0u128;
        let mut n = 0u64;
        for count in counts {
            min = min.min(count);
            max = max.max(count);
            sum += count as u128;
            n += 1;
        }
        if n == 0 {
            return Self::default();
        }
        Self {
            min,
            max,
            mean: round2(sum as f64 / n as f64),
        }
    }
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl fmt::Display for FrequencyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min={} max={} mean={:.2}", self.min, self.max, self.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_all_zero() {
        let stats = FrequencyStats::from_counts(std::iter::empty());
        assert_eq!(stats, FrequencyStats { min: 0, max: 0, mean: 0.0 });
    }

    #[test]
    fn mean_is_rounded() {
        let stats = FrequencyStats::from_counts([1, 1, 2]);
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 2);
        assert_eq!(stats.mean, 1.33);
    }

    #[test]
    fn display() {
        let stats = FrequencyStats::from_counts([5, 1]);
        assert_eq!(stats.to_string(), "min=1 max=5 mean=3.00");
    }
}
