//! Move representation.

use crate::Square;
use std::fmt;

/// A proposed move: an ordered source/target pair.
///
/// A `Move` is a claim, not a fact; whether it is legal is decided by the
/// rules engine against a concrete board. A move whose source equals its
/// target is representable but never legal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// The square the piece moves from.
    pub from: Square,
    /// The square the piece moves to.
    pub to: Square,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
