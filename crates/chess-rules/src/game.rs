//! Turn-aware game state and move arbitration.

use crate::Board;
use chess_model::{Color, Move, Role, Square};
use thiserror::Error;

/// Why a proposed move was rejected.
///
/// All variants are recoverable user-input failures; a rejected move never
/// changes the game. Out-of-bounds targets have no variant because a
/// [`Square`] cannot name an off-board coordinate in the first place.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// There is nothing to move on the source square.
    #[error("no piece on {0}")]
    NoPieceAt(Square),

    /// The piece on the source square belongs to the waiting player.
    #[error("the piece on {at} belongs to {owner}, but it is {turn}'s turn")]
    NotYourTurn {
        at: Square,
        owner: Color,
        turn: Color,
    },

    /// No capability of the piece allows the move (shape, path, or
    /// occupancy rules failed).
    #[error("the {role} on {from} cannot move to {to}")]
    ImpossibleMove {
        role: Role,
        from: Square,
        to: Square,
    },

    /// The move would leave the mover's own king attacked.
    #[error("moving {from} to {to} would leave the own king attacked")]
    ExposesKing { from: Square, to: Square },
}

/// The turn-aware game state machine.
///
/// `Game` is the only mutable component of the engine: it owns the current
/// [`Board`] and the side to move, and replaces both atomically when a legal
/// move is applied. Every query leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side_to_move: Color,
}

impl Game {
    /// Creates a game from the standard starting position, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            side_to_move: Color::White,
        }
    }

    /// Creates a game from a caller-supplied position.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Game {
            board,
            side_to_move,
        }
    }

    /// Returns the current board snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the colour whose turn it is.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Runs the full legality arbitration for `m` and, on success, returns
    /// the board the move would produce. The simulated board is what the
    /// exposes-own-king test runs against, so accepting callers get it for
    /// free.
    fn arbitrate(&self, m: Move) -> Result<Board, MoveError> {
        let piece = self
            .board
            .piece_at(m.from)
            .ok_or(MoveError::NoPieceAt(m.from))?;

        if piece.color != self.side_to_move {
            return Err(MoveError::NotYourTurn {
                at: m.from,
                owner: piece.color,
                turn: self.side_to_move,
            });
        }

        if !piece.can_move(m, &self.board) {
            return Err(MoveError::ImpossibleMove {
                role: piece.role,
                from: m.from,
                to: m.to,
            });
        }

        let after = piece.apply(m, &self.board);
        if color_in_check(&after, piece.color) {
            return Err(MoveError::ExposesKing {
                from: m.from,
                to: m.to,
            });
        }

        Ok(after)
    }

    /// Checks whether `m` is legal, reporting the first failed rule.
    pub fn check_move(&self, m: Move) -> Result<(), MoveError> {
        self.arbitrate(m).map(|_| ())
    }

    /// Returns true if `m` passes every legality rule.
    pub fn is_move_legal(&self, m: Move) -> bool {
        self.arbitrate(m).is_ok()
    }

    /// Applies `m` if it is legal, replacing the board and flipping the
    /// side to move. A rejected move leaves the game entirely unchanged.
    pub fn make_move(&mut self, m: Move) -> Result<(), MoveError> {
        self.board = self.arbitrate(m)?;
        self.side_to_move = self.side_to_move.opposite();
        Ok(())
    }

    /// Returns every square the piece on `from` can legally move to.
    ///
    /// A bounded scan over all 64 target squares; the board is small enough
    /// that enumerating beats bookkeeping.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        Square::all()
            .filter(|&to| self.is_move_legal(Move::new(from, to)))
            .collect()
    }

    /// Returns true if the given colour's king is attacked on the current
    /// board. Turn-independent; a colour without a king is reported as not
    /// in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        color_in_check(&self.board, color)
    }

    /// Returns true if the side to move is in check and has no legal move.
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move) && !self.has_legal_move()
    }

    /// Returns true if the side to move is not in check but has no legal
    /// move.
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side_to_move) && !self.has_legal_move()
    }

    fn has_legal_move(&self) -> bool {
        self.board
            .pieces()
            .filter(|&(_, piece)| piece.color == self.side_to_move)
            .any(|(from, _)| {
                Square::all().any(|to| self.is_move_legal(Move::new(from, to)))
            })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Attack scan behind both the check query and the exposes-own-king rule:
/// the colour is in check if any piece's capability set accepts a raw move
/// onto the king's square. Whose turn it is does not matter for an attack,
/// and same-coloured pieces rule themselves out through the own-colour
/// capture rules.
fn color_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_square(color) else {
        return false;
    };
    board
        .pieces()
        .any(|(square, piece)| piece.can_move(Move::new(square, king), board))
}
