use serde::{Deserialize, Serialize};

/// Decay applied per position in a best-scores listing.
pub const DEFAULT_DECAY: f64 = 0.95;

/// Weight attached to a score that is part of a best-scores listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeight {
    pub percentage: f64,
    pub pp: f64,
}

/// Diminishing-return weighting over a pp-sorted listing.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeighting {
    decay: f64,
}

impl Default for ScoreWeighting {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreWeighting {
    pub fn new() -> Self {
        Self {
            decay: DEFAULT_DECAY,
        }
    }

    #[cfg(test)]
    pub fn with_decay(decay: f64) -> Self {
        Self { decay }
    }

    /// Weight for the score at `index` within a page that starts at `offset`.
    pub fn weigh(&self, offset: u32, index: usize, pp: f64) -> ScoreWeight {
        let position = offset as i64 + index as i64;
        let percentage = self.decay.powi(position.min(i32::MAX as i64) as i32);
        ScoreWeight {
            percentage,
            pp: pp * percentage,
        }
    }

    /// Weights for a whole page of pp values, in listing order.
    pub fn weigh_page<I>(&self, offset: u32, pps: I) -> Vec<ScoreWeight>
    where
        I: IntoIterator<Item = f64>,
    {
        pps.into_iter()
            .enumerate()
            .map(|(index, pp)| self.weigh(offset, index, pp))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn first_score_on_first_page_has_full_weight() {
        let weight = ScoreWeighting::new().weigh(0, 0, 200.0);
        assert_eq!(weight.percentage, 1.0);
        assert_eq!(weight.pp, 200.0);
    }

    #[test]
    fn offset_shifts_the_decay() {
        let weight = ScoreWeighting::new().weigh(5, 0, 100.0);
        assert!((weight.percentage - 0.95_f64.powi(5)).abs() < EPSILON);
        assert!((weight.pp - 100.0 * 0.95_f64.powi(5)).abs() < EPSILON);
    }

    #[test]
    fn weighs_page_in_order() {
        let weights = ScoreWeighting::new().weigh_page(0, [200.0, 150.0]);
        assert_eq!(weights.len(), 2);
        assert!((weights[0].pp - 200.0).abs() < EPSILON);
        assert!((weights[1].pp - 0.95 * 150.0).abs() < EPSILON);
    }

    #[test]
    fn custom_decay() {
        let weight = ScoreWeighting::with_decay(0.5).weigh(1, 1, 80.0);
        assert!((weight.percentage - 0.25).abs() < EPSILON);
        assert!((weight.pp - 20.0).abs() < EPSILON);
    }
}
