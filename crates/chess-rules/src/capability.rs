//! Movement capabilities.
//!
//! Each capability is one movement rule, dispatched through a single `match`
//! in [`Capability::can_move`]. A capability carries no state of its own:
//! the moving piece's colour is derived from the board at the move's source
//! square, and capture/own-colour rules are evaluated through the board
//! alone.

use crate::{Board, Piece};
use chess_model::{Move, Role};

/// A single movement rule a piece kind possesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// One step in the colour's forward direction onto an empty square, or
    /// two steps from the pawn's start rank when both squares are empty.
    PawnForward,
    /// Exactly one diagonal forward step onto an enemy piece.
    PawnCapture,
    /// Any distance along a rank or file, blocked by the first occupied
    /// square in the path.
    Linear,
    /// Any distance along a diagonal, blocked like [`Capability::Linear`].
    Diagonal,
    /// The knight's jump: (1,2) or (2,1) in any sign combination. Nothing
    /// in between can block it.
    KnightJump,
    /// Exactly one step in any of the eight directions.
    KingStep,
}

impl Capability {
    /// Returns the fixed capability set for a role.
    pub const fn of(role: Role) -> &'static [Capability] {
        match role {
            Role::Pawn => &[Capability::PawnForward, Capability::PawnCapture],
            Role::Knight => &[Capability::KnightJump],
            Role::Bishop => &[Capability::Diagonal],
            Role::Rook => &[Capability::Linear],
            Role::Queen => &[Capability::Linear, Capability::Diagonal],
            Role::King => &[Capability::KingStep],
        }
    }

    /// Returns true if this rule allows `m` on `board`.
    ///
    /// Returns false when the source square is empty: with no piece there is
    /// no mover whose colour the rule could apply to.
    pub fn can_move(self, m: Move, board: &Board) -> bool {
        let Some(mover) = board.piece_at(m.from) else {
            return false;
        };
        match self {
            Capability::PawnForward => pawn_forward(m, mover, board),
            Capability::PawnCapture => pawn_capture(m, mover, board),
            Capability::Linear => linear(m, mover, board),
            Capability::Diagonal => diagonal(m, mover, board),
            Capability::KnightJump => knight_jump(m, mover, board),
            Capability::KingStep => king_step(m, mover, board),
        }
    }

    /// Applies `m` to `board`, returning the resulting snapshot.
    ///
    /// Every capability applies a move the same way: the source piece is
    /// re-placed on the target square and whatever previously occupied the
    /// target is removed. The rule checks guarantee the removed piece is an
    /// enemy one, so this uniformly implements capture-by-overwrite.
    ///
    /// # Panics
    ///
    /// Panics if the source square is empty. Callers validate moves with
    /// [`Capability::can_move`] first; an unvalidated apply is an engine
    /// bug, not bad input.
    pub fn apply(self, m: Move, board: &Board) -> Board {
        board.move_piece(m)
    }
}

fn friendly_fire(m: Move, mover: Piece, board: &Board) -> bool {
    board.color_at(m.to) == Some(mover.color)
}

fn pawn_forward(m: Move, mover: Piece, board: &Board) -> bool {
    // Pushes never capture, friend or foe.
    if board.is_occupied(m.to) {
        return false;
    }
    if m.from.file() != m.to.file() {
        return false;
    }

    let direction = mover.color.pawn_direction();
    let rank_delta = m.from.rank_delta(m.to);
    if rank_delta == direction {
        return true;
    }

    // Double step, only from the start rank and only through an empty square.
    if m.from.rank() != mover.color.pawn_start_rank() || rank_delta != 2 * direction {
        return false;
    }
    match m.from.offset(0, direction) {
        Some(skipped) => !board.is_occupied(skipped),
        None => false,
    }
}

fn pawn_capture(m: Move, mover: Piece, board: &Board) -> bool {
    // Must capture an enemy piece.
    match board.color_at(m.to) {
        Some(color) if color != mover.color => {}
        _ => return false,
    }

    m.from.rank_delta(m.to) == mover.color.pawn_direction() && m.from.file_delta(m.to).abs() == 1
}

fn linear(m: Move, mover: Piece, board: &Board) -> bool {
    if friendly_fire(m, mover, board) {
        return false;
    }

    let file_delta = m.from.file_delta(m.to);
    let rank_delta = m.from.rank_delta(m.to);
    // Exactly one axis moves.
    if (file_delta == 0) == (rank_delta == 0) {
        return false;
    }

    path_is_clear(m, board)
}

fn diagonal(m: Move, mover: Piece, board: &Board) -> bool {
    if friendly_fire(m, mover, board) {
        return false;
    }

    let file_delta = m.from.file_delta(m.to);
    if file_delta == 0 || file_delta.abs() != m.from.rank_delta(m.to).abs() {
        return false;
    }

    path_is_clear(m, board)
}

fn knight_jump(m: Move, mover: Piece, board: &Board) -> bool {
    if friendly_fire(m, mover, board) {
        return false;
    }

    let file_delta = m.from.file_delta(m.to).abs();
    let rank_delta = m.from.rank_delta(m.to).abs();
    (file_delta == 2 && rank_delta == 1) || (file_delta == 1 && rank_delta == 2)
}

fn king_step(m: Move, mover: Piece, board: &Board) -> bool {
    if friendly_fire(m, mover, board) {
        return false;
    }

    let file_delta = m.from.file_delta(m.to).abs();
    let rank_delta = m.from.rank_delta(m.to).abs();
    file_delta.max(rank_delta) == 1
}

/// Walks the exclusive squares between source and target and reports whether
/// all of them are empty. The caller has already established that the move
/// is collinear, so stepping by the per-axis sign reaches the target.
fn path_is_clear(m: Move, board: &Board) -> bool {
    let file_step = m.from.file_delta(m.to).signum();
    let rank_step = m.from.rank_delta(m.to).signum();

    let mut square = m.from;
    loop {
        square = match square.offset(file_step, rank_step) {
            Some(next) => next,
            None => return false,
        };
        if square == m.to {
            return true;
        }
        if board.is_occupied(square) {
            return false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_model::{Color, Square};

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).expect("valid square")
    }

    fn board(placements: &[(Role, Color, &str)]) -> Board {
        Board::from_placements(
            placements
                .iter()
                .map(|&(role, color, name)| (role, color, sq(name))),
        )
        .expect("no duplicate squares")
    }

    #[test]
    fn capability_sets_per_role() {
        assert_eq!(
            Capability::of(Role::Queen),
            &[Capability::Linear, Capability::Diagonal]
        );
        assert_eq!(Capability::of(Role::Rook), &[Capability::Linear]);
        assert_eq!(Capability::of(Role::Bishop), &[Capability::Diagonal]);
        assert_eq!(Capability::of(Role::Knight), &[Capability::KnightJump]);
        assert_eq!(Capability::of(Role::King), &[Capability::KingStep]);
        assert_eq!(
            Capability::of(Role::Pawn),
            &[Capability::PawnForward, Capability::PawnCapture]
        );
    }

    #[test]
    fn empty_source_is_never_movable() {
        let board = board(&[]);
        let m = Move::new(sq("e2"), sq("e4"));
        assert!(!Capability::PawnForward.can_move(m, &board));
        assert!(!Capability::Linear.can_move(m, &board));
    }

    #[test]
    fn pawn_forward_single_step() {
        let board = board(&[
            (Role::Pawn, Color::White, "e2"),
            (Role::Pawn, Color::Black, "d7"),
        ]);
        assert!(Capability::PawnForward.can_move(Move::new(sq("e2"), sq("e3")), &board));
        assert!(Capability::PawnForward.can_move(Move::new(sq("d7"), sq("d6")), &board));
        // Backwards is not forward.
        assert!(!Capability::PawnForward.can_move(Move::new(sq("e2"), sq("e1")), &board));
        assert!(!Capability::PawnForward.can_move(Move::new(sq("d7"), sq("d8")), &board));
    }

    #[test]
    fn pawn_forward_double_step_from_start_rank() {
        let board = board(&[
            (Role::Pawn, Color::White, "e2"),
            (Role::Pawn, Color::Black, "d7"),
        ]);
        assert!(Capability::PawnForward.can_move(Move::new(sq("e2"), sq("e4")), &board));
        assert!(Capability::PawnForward.can_move(Move::new(sq("d7"), sq("d5")), &board));
        // Three steps is out of range.
        assert!(!Capability::PawnForward.can_move(Move::new(sq("e2"), sq("e5")), &board));
    }

    #[test]
    fn pawn_forward_double_step_needs_both_squares_free() {
        let blocked_near = board(&[
            (Role::Pawn, Color::White, "e2"),
            (Role::Knight, Color::Black, "e3"),
        ]);
        assert!(!Capability::PawnForward.can_move(Move::new(sq("e2"), sq("e4")), &blocked_near));

        let blocked_far = board(&[
            (Role::Pawn, Color::White, "e2"),
            (Role::Knight, Color::Black, "e4"),
        ]);
        assert!(!Capability::PawnForward.can_move(Move::new(sq("e2"), sq("e4")), &blocked_far));
    }

    #[test]
    fn pawn_forward_not_from_middle_of_board() {
        let board = board(&[(Role::Pawn, Color::White, "e4")]);
        assert!(Capability::PawnForward.can_move(Move::new(sq("e4"), sq("e5")), &board));
        assert!(!Capability::PawnForward.can_move(Move::new(sq("e4"), sq("e6")), &board));
    }

    #[test]
    fn pawn_forward_cannot_capture() {
        let board = board(&[
            (Role::Pawn, Color::White, "e2"),
            (Role::Pawn, Color::Black, "e3"),
        ]);
        assert!(!Capability::PawnForward.can_move(Move::new(sq("e2"), sq("e3")), &board));
    }

    #[test]
    fn pawn_capture_takes_diagonally_forward() {
        let board = board(&[
            (Role::Pawn, Color::White, "e4"),
            (Role::Pawn, Color::Black, "d5"),
            (Role::Pawn, Color::Black, "f5"),
        ]);
        assert!(Capability::PawnCapture.can_move(Move::new(sq("e4"), sq("d5")), &board));
        assert!(Capability::PawnCapture.can_move(Move::new(sq("e4"), sq("f5")), &board));
    }

    #[test]
    fn pawn_capture_needs_a_victim() {
        let board = board(&[(Role::Pawn, Color::White, "e4")]);
        assert!(!Capability::PawnCapture.can_move(Move::new(sq("e4"), sq("d5")), &board));
    }

    #[test]
    fn pawn_capture_rejects_own_colour_and_backwards() {
        let board = board(&[
            (Role::Pawn, Color::White, "e4"),
            (Role::Knight, Color::White, "d5"),
            (Role::Pawn, Color::Black, "d3"),
        ]);
        assert!(!Capability::PawnCapture.can_move(Move::new(sq("e4"), sq("d5")), &board));
        // Diagonally backwards.
        assert!(!Capability::PawnCapture.can_move(Move::new(sq("e4"), sq("d3")), &board));
    }

    #[test]
    fn linear_moves_along_rank_and_file() {
        let board = board(&[(Role::Rook, Color::White, "d4")]);
        assert!(Capability::Linear.can_move(Move::new(sq("d4"), sq("d8")), &board));
        assert!(Capability::Linear.can_move(Move::new(sq("d4"), sq("a4")), &board));
        assert!(Capability::Linear.can_move(Move::new(sq("d4"), sq("h4")), &board));
        assert!(Capability::Linear.can_move(Move::new(sq("d4"), sq("d1")), &board));
    }

    #[test]
    fn linear_rejects_diagonals_and_null_moves() {
        let board = board(&[(Role::Rook, Color::White, "d4")]);
        assert!(!Capability::Linear.can_move(Move::new(sq("d4"), sq("f6")), &board));
        assert!(!Capability::Linear.can_move(Move::new(sq("d4"), sq("d4")), &board));
    }

    #[test]
    fn linear_is_blocked_by_any_piece_in_the_path() {
        let board = board(&[
            (Role::Rook, Color::White, "d4"),
            (Role::Pawn, Color::Black, "d6"),
        ]);
        assert!(Capability::Linear.can_move(Move::new(sq("d4"), sq("d5")), &board));
        // Capturing the blocker is fine, passing it is not.
        assert!(Capability::Linear.can_move(Move::new(sq("d4"), sq("d6")), &board));
        assert!(!Capability::Linear.can_move(Move::new(sq("d4"), sq("d7")), &board));
        assert!(!Capability::Linear.can_move(Move::new(sq("d4"), sq("d8")), &board));
    }

    #[test]
    fn linear_cannot_land_on_own_piece() {
        let board = board(&[
            (Role::Rook, Color::White, "d4"),
            (Role::Knight, Color::White, "d6"),
        ]);
        assert!(!Capability::Linear.can_move(Move::new(sq("d4"), sq("d6")), &board));
    }

    #[test]
    fn diagonal_moves_and_blocking() {
        let board = board(&[
            (Role::Bishop, Color::White, "c1"),
            (Role::Pawn, Color::Black, "f4"),
        ]);
        assert!(Capability::Diagonal.can_move(Move::new(sq("c1"), sq("e3")), &board));
        assert!(Capability::Diagonal.can_move(Move::new(sq("c1"), sq("f4")), &board));
        assert!(!Capability::Diagonal.can_move(Move::new(sq("c1"), sq("g5")), &board));
        assert!(!Capability::Diagonal.can_move(Move::new(sq("c1"), sq("a2")), &board));
        assert!(!Capability::Diagonal.can_move(Move::new(sq("c1"), sq("c4")), &board));
    }

    #[test]
    fn knight_jump_shape() {
        let board = board(&[(Role::Knight, Color::White, "d4")]);
        for target in ["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"] {
            assert!(
                Capability::KnightJump.can_move(Move::new(sq("d4"), sq(target)), &board),
                "d4 -> {target} should be a knight move"
            );
        }
        for target in ["d5", "e5", "f4", "d4", "g5"] {
            assert!(
                !Capability::KnightJump.can_move(Move::new(sq("d4"), sq(target)), &board),
                "d4 -> {target} should not be a knight move"
            );
        }
    }

    #[test]
    fn knight_jump_ignores_blockers() {
        // Surround the knight completely; the jump still works.
        let board = board(&[
            (Role::Knight, Color::White, "d4"),
            (Role::Pawn, Color::White, "c3"),
            (Role::Pawn, Color::White, "c4"),
            (Role::Pawn, Color::White, "c5"),
            (Role::Pawn, Color::White, "d3"),
            (Role::Pawn, Color::White, "d5"),
            (Role::Pawn, Color::White, "e3"),
            (Role::Pawn, Color::White, "e4"),
            (Role::Pawn, Color::White, "e5"),
        ]);
        assert!(Capability::KnightJump.can_move(Move::new(sq("d4"), sq("b5")), &board));
    }

    #[test]
    fn king_step_one_square_any_direction() {
        let board = board(&[(Role::King, Color::White, "d4")]);
        for target in ["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5"] {
            assert!(Capability::KingStep.can_move(Move::new(sq("d4"), sq(target)), &board));
        }
        assert!(!Capability::KingStep.can_move(Move::new(sq("d4"), sq("d6")), &board));
        assert!(!Capability::KingStep.can_move(Move::new(sq("d4"), sq("f6")), &board));
        assert!(!Capability::KingStep.can_move(Move::new(sq("d4"), sq("d4")), &board));
    }

    #[test]
    fn apply_moves_the_piece_and_captures_by_overwrite() {
        let before = board(&[
            (Role::Rook, Color::White, "d4"),
            (Role::Pawn, Color::Black, "d7"),
        ]);
        let m = Move::new(sq("d4"), sq("d7"));
        assert!(Capability::Linear.can_move(m, &before));

        let after = Capability::Linear.apply(m, &before);
        assert_eq!(after.len(), 1);
        assert_eq!(
            after.piece_at(sq("d7")),
            Some(Piece::new(Role::Rook, Color::White))
        );
        assert!(!after.is_occupied(sq("d4")));
        // The pre-move snapshot is untouched.
        assert_eq!(before.len(), 2);
    }

    #[test]
    #[should_panic(expected = "no piece")]
    fn apply_with_empty_source_is_fatal() {
        let empty = board(&[]);
        Capability::Linear.apply(Move::new(sq("a1"), sq("a2")), &empty);
    }
}
