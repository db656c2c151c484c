//! Core consideration trait.
//!
//! This module defines the [`Consideration`] trait, the fundamental scoring
//! input of the utility system. The trait is generic over a context type `C`
//! so considerations can read whatever world view the host provides.

use crate::score::clamp_score;

/// A pure scoring function over a read-only context.
///
/// Implementations return their natural value; the framework clamps it into
/// `[0, 1]` (see [`evaluate`]). A consideration must not mutate the context.
pub trait Consideration<C: ?Sized> {
    /// Computes the unclamped utility contribution for `ctx`.
    fn score(&self, ctx: &C) -> f64;

    /// Human-readable label used when reporting scores.
    fn label(&self) -> &str {
        "consideration"
    }
}

/// Blanket implementation for boxed considerations.
///
/// This allows `Box<dyn Consideration<C>>` to also implement `Consideration<C>`,
/// enabling open sets of considerations alongside closed enums.
impl<C: ?Sized, K: Consideration<C> + ?Sized> Consideration<C> for Box<K> {
    #[inline]
    fn score(&self, ctx: &C) -> f64 {
        (**self).score(ctx)
    }

    #[inline]
    fn label(&self) -> &str {
        (**self).label()
    }
}

/// Scores `consideration` against `ctx` and clamps the result into `[0, 1]`.
#[inline]
pub fn evaluate<C: ?Sized, K: Consideration<C> + ?Sized>(consideration: &K, ctx: &C) -> f64 {
    clamp_score(consideration.score(ctx))
}

/// Consideration backed by a closure.
pub struct FnConsideration<F> {
    label: &'static str,
    f: F,
}

impl<F> FnConsideration<F> {
    /// Wraps `f` under the given label.
    pub const fn new(label: &'static str, f: F) -> Self {
        Self { label, f }
    }
}

impl<C: ?Sized, F: Fn(&C) -> f64> Consideration<C> for FnConsideration<F> {
    fn score(&self, ctx: &C) -> f64 {
        (self.f)(ctx)
    }

    fn label(&self) -> &str {
        self.label
    }
}
