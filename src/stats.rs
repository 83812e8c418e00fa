//! Summary statistics over timing samples.
//!
//! Explicit reductions over an immutable sample slice; nothing here mutates
//! its input (the median works on a sorted copy). Variance is the population
//! variance, matching how the benchmark logs have always been summarized.

/// All the aggregates the drivers print, computed in one pass over a sample
/// vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub samples: usize,
    pub mean: f64,
    /// `None` when any sample is non-positive.
    pub harmonic_mean: Option<f64>,
    /// Upper median: element `len / 2` of the sorted samples.
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub std_error: f64,
    /// Half-width of the 95% confidence interval (1.96 × std error).
    pub ci95: f64,
}

impl Summary {
    /// `None` for an empty slice; all statistics otherwise.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len();
        let mean = mean(samples);
        let variance = population_variance(samples, mean);
        let std_dev = variance.sqrt();
        let std_error = std_dev / (n as f64).sqrt();

        Some(Summary {
            samples: n,
            mean,
            harmonic_mean: harmonic_mean(samples),
            median: median(samples),
            min: min(samples),
            max: max(samples),
            variance,
            std_dev,
            std_error,
            ci95: 1.96 * std_error,
        })
    }
}

pub fn sum(samples: &[f64]) -> f64 {
    samples.iter().sum()
}

/// Arithmetic mean. Caller guarantees a non-empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    sum(samples) / samples.len() as f64
}

/// Harmonic mean; `None` when empty or any sample is non-positive (a zero
/// sample has no reciprocal, a negative one makes the result meaningless).
pub fn harmonic_mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() || samples.iter().any(|&x| x <= 0.0) {
        return None;
    }
    let recip_sum: f64 = samples.iter().map(|&x| 1.0 / x).sum();
    Some(samples.len() as f64 / recip_sum)
}

/// Upper median of the sorted samples (`sorted[len / 2]`).
pub fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[sorted.len() / 2]
}

pub fn min(samples: &[f64]) -> f64 {
    samples.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn max(samples: &[f64]) -> f64 {
    samples.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Population variance around a precomputed mean.
pub fn population_variance(samples: &[f64], mean: f64) -> f64 {
    let sq_dev: f64 = samples.iter().map(|&x| (x - mean) * (x - mean)).sum();
    sq_dev / samples.len() as f64
}
