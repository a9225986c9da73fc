//! All pieces of one player: the original set, promoted queens and the
//! captured pieces which are kept around but ignored.

use crate::chess::board::Board;
use crate::chess::core::{MoveEffects, PieceKind, Player, Square};
use crate::chess::piece::Piece;

/// Piece set of one player, including promoted pieces.
///
/// At most one active piece occupies any square. This is not enforced here:
/// it holds as long as the pieces are moved by [`Pieces::move_piece`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pieces {
    owner: Player,
    pieces: Vec<Piece>,
    /// Number of moves made since the last capture by this player.
    halfmove_clock: u16,
}

impl Pieces {
    /// Creates a player without any pieces.
    #[must_use]
    pub const fn empty(owner: Player) -> Self {
        Self {
            owner,
            pieces: Vec::new(),
            halfmove_clock: 0,
        }
    }

    /// Standard set of 16 pieces on their starting squares: two rooks, eight
    /// pawns, a queen, two bishops, the king and two knights.
    #[must_use]
    pub fn starting(owner: Player, board: &Board) -> Self {
        let mut result = Self::empty(owner);
        let size = board.size();
        let backrank = owner.backrank(size);
        let (_, forward) = owner.push_direction().delta();
        let pawns_rank = backrank + forward;
        result.place(PieceKind::Rook, Square::new(1, backrank));
        result.place(PieceKind::Rook, Square::new(size, backrank));
        for file in 1..=size {
            result.place(PieceKind::Pawn, Square::new(file, pawns_rank));
        }
        result.place(PieceKind::Queen, Square::new(4, backrank));
        result.place(PieceKind::Bishop, Square::new(3, backrank));
        result.place(PieceKind::Bishop, Square::new(6, backrank));
        result.place(PieceKind::King, Square::new(5, backrank));
        result.place(PieceKind::Knight, Square::new(2, backrank));
        result.place(PieceKind::Knight, Square::new(7, backrank));
        result
    }

    /// Puts a new piece that has not moved yet on the square.
    pub fn place(&mut self, kind: PieceKind, square: Square) {
        self.pieces.push(Piece::new(self.owner, kind, square));
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn owner(&self) -> Player {
        self.owner
    }

    /// Number of moves since the last capture made by this player.
    #[must_use]
    pub const fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Every piece ever owned by the player, including captured ones.
    #[must_use]
    pub fn all(&self) -> &[Piece] {
        &self.pieces
    }

    /// Pieces that are still on the board.
    pub fn active(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(|piece| piece.is_active())
    }

    /// Active pieces that were created by promoting a pawn.
    pub fn promotions(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.active().filter(|piece| piece.promoted)
    }

    /// Returns the king unless it is missing (only possible in hand-made
    /// positions).
    #[must_use]
    pub fn king(&self) -> Option<&Piece> {
        self.active().find(|piece| piece.kind == PieceKind::King)
    }

    fn index_at(&self, square: Square) -> Option<usize> {
        self.pieces
            .iter()
            .position(|piece| piece.is_active() && piece.square == square)
    }

    /// Finds the active piece standing on the square.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<&Piece> {
        self.index_at(square).map(|index| &self.pieces[index])
    }

    #[allow(missing_docs)]
    pub fn at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.index_at(square).map(|index| &mut self.pieces[index])
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.index_at(square).is_some()
    }

    /// Moves our piece from `from` to `to` if it is a pseudo-legal move.
    /// Returns `false` and does not change anything otherwise.
    ///
    /// This does not check whether our king stays safe: the caller has to try
    /// the move on a copy first (see
    /// [`crate::chess::position::Position::attempt`]).
    pub fn move_piece(&mut self, from: Square, to: Square, enemy: &mut Self, board: &Board) -> bool {
        self.make_move(from, to, enemy, board).is_some()
    }

    /// Same as [`Pieces::move_piece`] but also reports what happened.
    ///
    /// On success:
    ///
    /// - The piece is relocated and marked as moved. A pawn advancing two
    ///   ranks becomes eligible for en passant capture.
    /// - The opponent's piece on the target square is captured. Otherwise, a
    ///   pawn moving diagonally captures an eligible pawn behind the target
    ///   square (en passant).
    /// - Half-move clock is reset on capture and incremented otherwise.
    /// - En passant rights of the opponent are cleared: they only last for a
    ///   single move.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        enemy: &mut Self,
        board: &Board,
    ) -> Option<MoveEffects> {
        let index = self.index_at(from)?;
        let piece = self.pieces[index];
        if !piece.can_move_to(to, self, enemy, board) {
            return None;
        }

        let mut effects = MoveEffects::empty();
        let moved = &mut self.pieces[index];
        moved.square = to;
        moved.has_moved = true;
        if piece.kind == PieceKind::Pawn && (to.y - from.y).abs() == 2 {
            moved.en_passant_eligible = true;
            effects |= MoveEffects::DOUBLE_PAWN_PUSH;
        }

        if let Some(victim) = enemy.at_mut(to) {
            victim.captured = true;
            effects |= MoveEffects::CAPTURE;
        } else if piece.kind == PieceKind::Pawn && (to.x - from.x).abs() == 1 {
            let (_, forward) = self.owner.push_direction().delta();
            if let Some(victim) = enemy.at_mut(to.offset(0, -forward)) {
                if victim.kind == PieceKind::Pawn && victim.en_passant_eligible {
                    victim.captured = true;
                    effects |= MoveEffects::CAPTURE | MoveEffects::EN_PASSANT;
                }
            }
        }

        self.tick(effects.contains(MoveEffects::CAPTURE));
        enemy.clear_en_passant();
        Some(effects)
    }

    /// Updates the half-move clock after a move.
    pub(super) fn tick(&mut self, capture: bool) {
        self.halfmove_clock = if capture {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
    }

    /// Revokes en passant eligibility of all our pawns.
    pub fn clear_en_passant(&mut self) {
        for pawn in &mut self.pieces {
            pawn.en_passant_eligible = false;
        }
    }

    /// Replaces each of our pawns that reached the opponent's back rank with a
    /// queen. Returns the number of promoted pawns.
    pub fn promote_pawns(&mut self, board: &Board) -> usize {
        let rank = self.owner.promotion_rank(board.size());
        let promoted: Vec<Square> = self
            .pieces
            .iter_mut()
            .filter(|piece| {
                piece.is_active() && piece.kind == PieceKind::Pawn && piece.square.y == rank
            })
            .map(|pawn| {
                pawn.captured = true;
                pawn.square
            })
            .collect();
        for &square in &promoted {
            self.pieces.push(Piece::promotion(self.owner, square));
        }
        promoted.len()
    }
}
