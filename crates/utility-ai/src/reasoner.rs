//! Argmax selection over scored choices.
//!
//! The [`Reasoner`] evaluates every [`Choice`] against a context and picks the
//! highest score. Selection is deterministic: in case of a tie the choice that
//! appears first in list order wins, and when every choice scores `0.0` the
//! first choice is returned.

use crate::choice::Choice;
use crate::consideration::Consideration;

/// Outcome of a single [`Reasoner::decide`] pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Index of the winning choice in list order.
    pub index: usize,
    /// Score of the winning choice.
    pub score: f64,
}

/// Ordered collection of choices evaluated together.
#[derive(Debug, Clone)]
pub struct Reasoner<T, K> {
    choices: Vec<Choice<T, K>>,
}

impl<T, K> Reasoner<T, K> {
    /// Creates a reasoner over the given choices.
    pub fn new(choices: Vec<Choice<T, K>>) -> Self {
        Self { choices }
    }

    /// Choices in evaluation order.
    pub fn choices(&self) -> &[Choice<T, K>] {
        &self.choices
    }

    /// Returns `true` if there is nothing to choose from.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Payload of the choice at `index`.
    pub fn payload(&self, index: usize) -> Option<&T> {
        self.choices.get(index).map(Choice::payload)
    }

    /// Cached scores from the last [`Self::decide`] call, in list order.
    pub fn last_scores(&self) -> impl Iterator<Item = (&T, f64)> {
        self.choices.iter().map(|c| (c.payload(), c.score()))
    }

    /// Scores every choice and returns the winner.
    ///
    /// Returns `None` only when the reasoner has no choices.
    pub fn decide<C: ?Sized>(&mut self, ctx: &C) -> Option<Decision>
    where
        K: Consideration<C>,
    {
        let mut best: Option<Decision> = None;

        for (index, choice) in self.choices.iter_mut().enumerate() {
            let score = choice.evaluate(ctx);
            match best {
                // Strictly greater: ties keep the earlier choice
                Some(current) if score <= current.score => {}
                _ => best = Some(Decision { index, score }),
            }
        }

        best
    }
}
