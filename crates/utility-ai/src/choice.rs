//! Scored choices.
//!
//! A [`Choice`] pairs a payload (what to do) with an ordered list of
//! considerations (why to do it). Scoring multiplies the clamped consideration
//! outputs and then applies [`crate::compensate`].

use crate::consideration::{Consideration, evaluate};
use crate::score::compensate;

/// A candidate in a utility decision.
///
/// Insertion order of considerations only affects iteration order (and thus
/// which considerations are skipped by zero pruning), never the final score.
#[derive(Debug, Clone)]
pub struct Choice<T, K> {
    payload: T,
    considerations: Vec<K>,
    consideration_scores: Vec<f64>,
    score: f64,
}

impl<T, K> Choice<T, K> {
    /// Creates a new choice with the given payload and considerations.
    pub fn new(payload: T, considerations: Vec<K>) -> Self {
        let consideration_scores = vec![0.0; considerations.len()];
        Self {
            payload,
            considerations,
            consideration_scores,
            score: 0.0,
        }
    }

    /// The payload this choice stands for.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// The considerations in evaluation order.
    pub fn considerations(&self) -> &[K] {
        &self.considerations
    }

    /// Last computed score (cached for inspection only).
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Last computed per-consideration scores, aligned with
    /// [`Self::considerations`]. Entries skipped by zero pruning read `0.0`.
    pub fn consideration_scores(&self) -> &[f64] {
        &self.consideration_scores
    }

    /// Scores this choice against `ctx` and caches the result.
    ///
    /// # Semantics
    ///
    /// - Start from `1.0` and multiply by each clamped consideration output
    /// - If the running product hits exactly `0.0`, stop and return `0.0`
    ///   without evaluating the remaining considerations
    /// - Otherwise compensate the full product for the consideration count
    /// - A choice without considerations scores `0.0`
    pub fn evaluate<C: ?Sized>(&mut self, ctx: &C) -> f64
    where
        K: Consideration<C>,
    {
        self.consideration_scores.iter_mut().for_each(|s| *s = 0.0);

        if self.considerations.is_empty() {
            self.score = 0.0;
            return self.score;
        }

        let mut product = 1.0;
        for (consideration, slot) in self
            .considerations
            .iter()
            .zip(self.consideration_scores.iter_mut())
        {
            let value = evaluate(consideration, ctx);
            *slot = value;
            product *= value;
            if product == 0.0 {
                // Short-circuit: remaining considerations cannot lift a zero
                self.score = 0.0;
                return self.score;
            }
        }

        self.score = compensate(product, self.considerations.len());
        self.score
    }
}
