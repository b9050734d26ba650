//! Moment and norm helpers shared by patch normalization and color matching.

/// Population mean and standard deviation of a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Moments {
    pub mean: f64,
    pub std: f64,
}

impl Moments {
    /// Accumulates moments in `f64`; an empty iterator yields zeros.
    pub(crate) fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for v in values {
            count += 1;
            sum += v;
            sum_sq += v * v;
        }
        if count == 0 {
            return Self {
                mean: 0.0,
                std: 0.0,
            };
        }
        let n = count as f64;
        let mean = sum / n;
        let variance = (sum_sq / n - mean * mean).max(0.0);
        Self {
            mean,
            std: variance.sqrt(),
        }
    }
}

/// Euclidean norm of a flat vector.
pub(crate) fn l2_norm(values: &[f32]) -> f32 {
    values.iter().map(|v| v * v).sum::<f32>().sqrt()
}
