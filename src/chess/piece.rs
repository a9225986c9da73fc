//! A single piece on the board, its state flags and the move generation
//! dispatch.

use crate::chess::board::Board;
use crate::chess::core::{Direction, PieceKind, Player, Square};
use crate::chess::movegen;
use crate::chess::pieces::Pieces;

/// Represents a specific piece owned by a player.
///
/// Captured pieces are not removed from [`Pieces`]: they stay in the
/// collection with `captured` set and are ignored by all queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    #[allow(missing_docs)]
    pub kind: PieceKind,
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub square: Square,
    #[allow(missing_docs)]
    pub captured: bool,
    /// Gates castling rights and the pawn double push.
    pub has_moved: bool,
    /// Only meaningful for pawns: set right after a double push and cleared
    /// after the opponent's next move.
    pub en_passant_eligible: bool,
    /// The piece was created by promoting a pawn.
    pub promoted: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind, square: Square) -> Self {
        Self {
            kind,
            owner,
            square,
            captured: false,
            has_moved: false,
            en_passant_eligible: false,
            promoted: false,
        }
    }

    /// The queen a pawn turns into on the opponent's back rank.
    #[must_use]
    pub const fn promotion(owner: Player, square: Square) -> Self {
        Self {
            has_moved: true,
            promoted: true,
            ..Self::new(owner, PieceKind::Queen, square)
        }
    }

    /// Returns `true` unless the piece was captured.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.captured
    }

    /// Calculates the list of pseudo-legal moves: the moves obeying piece
    /// movement, capture and blocking rules. Whether the move leaves our king
    /// in check is not considered here.
    ///
    /// `ours` are the pieces of the player owning this piece and `theirs` are
    /// the opponent's.
    #[must_use]
    pub fn generate_moves(&self, ours: &Pieces, theirs: &Pieces, board: &Board) -> Vec<Square> {
        match self.kind {
            PieceKind::Rook => {
                movegen::slide(self.square, &Direction::ORTHOGONAL, ours, theirs, board)
            },
            PieceKind::Bishop => {
                movegen::slide(self.square, &Direction::DIAGONAL, ours, theirs, board)
            },
            PieceKind::Queen => movegen::slide(self.square, &Direction::ALL, ours, theirs, board),
            PieceKind::Knight => {
                movegen::leap(self.square, &movegen::KNIGHT_JUMPS, ours, board).to_vec()
            },
            PieceKind::King => {
                movegen::leap(self.square, &movegen::KING_STEPS, ours, board).to_vec()
            },
            PieceKind::Pawn => movegen::pawn_moves(self, ours, theirs, board).to_vec(),
        }
    }

    /// Checks whether the piece can go to `to`: the target has to be among the
    /// pseudo-legal moves and not occupied by our own piece.
    #[must_use]
    pub fn can_move_to(&self, to: Square, ours: &Pieces, theirs: &Pieces, board: &Board) -> bool {
        board.in_board(to)
            && !ours.is_occupied(to)
            && self.generate_moves(ours, theirs, board).contains(&to)
    }
}
