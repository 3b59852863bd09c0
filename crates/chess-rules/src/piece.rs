//! Piece values.

use crate::{Board, Capability};
use chess_model::{Color, Move, Role};
use std::fmt;

/// A piece as it sits on the board: a role owned by a colour.
///
/// The square a piece stands on is the board's key for it, so a `Piece`
/// value itself never changes. "Moving" a piece produces a new board with
/// the same value under a different key, which keeps historical snapshots
/// stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// The piece kind.
    pub role: Role,
    /// The owning player.
    pub color: Color,
}

impl Piece {
    /// Creates a new piece.
    #[inline]
    pub const fn new(role: Role, color: Color) -> Self {
        Piece { role, color }
    }

    /// Returns the fixed capability set for this piece's role.
    #[inline]
    pub const fn capabilities(self) -> &'static [Capability] {
        Capability::of(self.role)
    }

    /// Returns true if any capability of this piece allows `m` on `board`.
    pub fn can_move(self, m: Move, board: &Board) -> bool {
        self.capabilities()
            .iter()
            .any(|capability| capability.can_move(m, board))
    }

    /// Applies `m` through the single capability that allows it.
    ///
    /// # Panics
    ///
    /// Panics if no capability allows the move, or if more than one does.
    /// The per-role rule sets are mutually exclusive, so either case is a
    /// broken engine invariant rather than bad input; validate with
    /// [`Piece::can_move`] first.
    pub fn apply(self, m: Move, board: &Board) -> Board {
        let mut accepting = self
            .capabilities()
            .iter()
            .filter(|capability| capability.can_move(m, board));

        let capability = accepting
            .next()
            .unwrap_or_else(|| panic!("no capability of the {} allows {}", self.role, m));
        assert!(
            accepting.next().is_none(),
            "capabilities of the {} overlap on {}",
            self.role,
            m
        );

        capability.apply(m, board)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.role)
    }
}
