//! Board snapshots.

use crate::Piece;
use chess_model::{Color, File, Move, Rank, Role, Square};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when constructing a board from explicit placements.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("two pieces placed on {0}")]
    SquareOccupied(Square),
}

/// An immutable arrangement of pieces, addressable by square.
///
/// Keying pieces by their square makes the no-two-pieces-per-square
/// invariant structural. Boards are produced fresh by every move
/// application and never mutated in place, so snapshots taken at different
/// points of a game stay valid and can be shared freely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    pieces: HashMap<Square, Piece>,
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            pieces: HashMap::new(),
        }
    }

    /// Creates the conventional 32-piece starting arrangement.
    pub fn standard() -> Self {
        const BACK_RANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut pieces = HashMap::with_capacity(32);
        for (file, role) in File::ALL.into_iter().zip(BACK_RANK) {
            pieces.insert(
                Square::new(file, Rank::R1),
                Piece::new(role, Color::White),
            );
            pieces.insert(
                Square::new(file, Rank::R2),
                Piece::new(Role::Pawn, Color::White),
            );
            pieces.insert(
                Square::new(file, Rank::R7),
                Piece::new(Role::Pawn, Color::Black),
            );
            pieces.insert(
                Square::new(file, Rank::R8),
                Piece::new(role, Color::Black),
            );
        }
        Board { pieces }
    }

    /// Creates a board from explicit placements.
    ///
    /// Placing two pieces on the same square is rejected rather than
    /// silently overwritten.
    pub fn from_placements(
        placements: impl IntoIterator<Item = (Role, Color, Square)>,
    ) -> Result<Self, BoardError> {
        let mut pieces = HashMap::new();
        for (role, color, square) in placements {
            if pieces.insert(square, Piece::new(role, color)).is_some() {
                return Err(BoardError::SquareOccupied(square));
            }
        }
        Ok(Board { pieces })
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    /// Returns the colour of the piece on the given square, if any.
    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color)
    }

    /// Returns true if the given square holds a piece.
    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.pieces.contains_key(&square)
    }

    /// Iterates over all pieces with their squares, in no particular order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces.iter().map(|(&square, &piece)| (square, piece))
    }

    /// Returns the number of pieces on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true if the board holds no pieces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns the square of the given colour's king, or `None` on a
    /// kingless board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece.role == Role::King && piece.color == color)
            .map(|(square, _)| square)
    }

    /// Returns a read-only listing of every piece, ordered by square, for
    /// rendering or serialization by a presentation layer.
    pub fn snapshot(&self) -> Vec<(Role, Color, Square)> {
        let mut listing: Vec<_> = self
            .pieces()
            .map(|(square, piece)| (piece.role, piece.color, square))
            .collect();
        listing.sort_by_key(|&(_, _, square)| square.index());
        listing
    }

    /// Re-places the piece on `m.from` onto `m.to`, removing whatever was
    /// there, and returns the new snapshot. This is the shared apply step
    /// behind every capability.
    ///
    /// # Panics
    ///
    /// Panics if `m.from` is empty; capability checks run first.
    pub(crate) fn move_piece(&self, m: Move) -> Board {
        let mut pieces = self.pieces.clone();
        let mover = pieces
            .remove(&m.from)
            .unwrap_or_else(|| panic!("no piece to move on {}", m.from));
        pieces.insert(m.to, mover);
        Board { pieces }
    }
}

impl fmt::Display for Board {
    /// Renders the board as a text grid, rank 8 at the top, with `.` for
    /// empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{}", rank)?;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, " {}", piece.role.to_char(piece.color))?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for file in File::ALL {
            write!(f, " {}", file)?;
        }
        Ok(())
    }
}
