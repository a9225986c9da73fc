//! Provides fully-specified chess position: the board with the pieces of both
//! players, and the rules that need to look at both sides at once: check,
//! checkmate, castling and promotion.
//!
//! Moves are applied speculatively: a [`Position`] is cheap enough to clone,
//! so the candidate move is played on a copy, the king safety is verified on
//! the copy and only then the copy replaces the live position. Rejected moves
//! never leave a partially updated position behind.

use std::fmt;

use anyhow::bail;
use itertools::Itertools;

use crate::chess::board::Board;
use crate::chess::core::{MoveEffects, PieceKind, Player, Square, BOARD_WIDTH};
use crate::chess::game::{Action, Rejection};
use crate::chess::pieces::Pieces;

/// Determines whether the `defender`'s king is attacked: whether any active
/// piece of the `attacker` has a pseudo-legal move landing on it.
///
/// A side without a king (only possible in hand-made positions) is never in
/// check.
#[must_use]
pub fn in_check(defender: &Pieces, attacker: &Pieces, board: &Board) -> bool {
    let Some(king) = defender.king() else {
        return false;
    };
    board.squares().iter().any(|&square| {
        attacker.at(square).is_some_and(|piece| {
            piece
                .generate_moves(attacker, defender, board)
                .contains(&king.square)
        })
    })
}

/// Brute-force [checkmate] detection: the `defender` is in check and no
/// single move of any of its pieces gets it out of check.
///
/// Every candidate move is tried on copies of both sides, the most mobile
/// pieces first (see [`PieceKind::ESCAPE_ORDER`]). Stalemate is not detected:
/// a side which is not in check is never mated.
///
/// [checkmate]: https://www.chessprogramming.org/Checkmate
#[must_use]
pub fn is_checkmate(defender: &Pieces, attacker: &Pieces, board: &Board) -> bool {
    if !in_check(defender, attacker, board) {
        return false;
    }
    for kind in PieceKind::ESCAPE_ORDER {
        for piece in defender.active().filter(|piece| piece.kind == kind) {
            for target in piece.generate_moves(defender, attacker, board) {
                let mut ours = defender.clone();
                let mut theirs = attacker.clone();
                if ours.move_piece(piece.square, target, &mut theirs, board)
                    && !in_check(&ours, &theirs, board)
                {
                    return false;
                }
            }
        }
    }
    true
}

/// State of the board: where the pieces of both players are and what they are
/// allowed to do next (castling rights, en passant, half-move clocks).
///
/// Whose turn it is is not tracked here: see [`crate::chess::game::Game`].
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    white: Pieces,
    black: Pieces,
}

impl Position {
    /// Creates the starting position of the standard chess.
    ///
    /// ```
    /// use tabiya::chess::position::Position;
    ///
    /// let starting_position = Position::starting();
    /// assert_eq!(
    ///     &starting_position.to_string().lines().nth(1).unwrap(),
    ///     &"8 bR bk bB bQ bK bB bk bR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let board = Board::standard();
        Self {
            white: Pieces::starting(Player::White, &board),
            black: Pieces::starting(Player::Black, &board),
            board,
        }
    }

    /// Board without any pieces.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            board: Board::standard(),
            white: Pieces::empty(Player::White),
            black: Pieces::empty(Player::Black),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces of the given player.
    #[must_use]
    pub const fn pieces(&self, player: Player) -> &Pieces {
        match player {
            Player::White => &self.white,
            Player::Black => &self.black,
        }
    }

    fn pieces_mut(&mut self, player: Player) -> &mut Pieces {
        match player {
            Player::White => &mut self.white,
            Player::Black => &mut self.black,
        }
    }

    /// Splits the position into the pieces of the `player`, the pieces of
    /// the opponent and the board.
    fn split(&mut self, player: Player) -> (&mut Pieces, &mut Pieces, &Board) {
        match player {
            Player::White => (&mut self.white, &mut self.black, &self.board),
            Player::Black => (&mut self.black, &mut self.white, &self.board),
        }
    }

    /// Returns `true` if the king of `player` is attacked.
    #[must_use]
    pub fn is_in_check(&self, player: Player) -> bool {
        in_check(self.pieces(player), self.pieces(!player), &self.board)
    }

    /// Returns `true` if `player` is in check and can not escape it.
    #[must_use]
    pub fn is_checkmate(&self, player: Player) -> bool {
        is_checkmate(self.pieces(player), self.pieces(!player), &self.board)
    }

    /// Moves the piece of `player` if the move is pseudo-legal. Returns
    /// `false` without changing anything otherwise.
    ///
    /// The king safety is not verified: use [`Position::attempt_move`] for
    /// that.
    pub fn move_piece(&mut self, player: Player, from: Square, to: Square) -> bool {
        self.play(player, Action::Move { from, to }).is_some()
    }

    /// Castles with the `player`'s rook standing on `rook`. Returns `false`
    /// without changing anything if castling is not allowed.
    ///
    /// The king safety is not verified: use [`Position::attempt_castle`] for
    /// that.
    pub fn castle(&mut self, player: Player, rook: Square) -> bool {
        self.play(player, Action::Castle { rook }).is_some()
    }

    /// Plays the action without verifying the king safety and reports what
    /// the move did. Returns `None` and leaves the position intact if the
    /// action is not allowed.
    pub fn play(&mut self, player: Player, action: Action) -> Option<MoveEffects> {
        match action {
            Action::Move { from, to } => {
                let (ours, theirs, board) = self.split(player);
                ours.make_move(from, to, theirs, board)
            },
            Action::Castle { rook } => self.make_castle(player, rook),
        }
    }

    /// Castling requires:
    ///
    /// - Our rook on the `rook` square and our king, neither of them moved.
    /// - For the queenside rook (on the first file): no pieces on the three
    ///   files between them. The king lands on `c` file and the rook on `d`.
    /// - For any other rook: no pieces on the two files next to it, where the
    ///   king (`g` file) and the rook (`f` file) land.
    ///
    /// Whether the king passes through or lands on an attacked square is not
    /// verified here.
    fn make_castle(&mut self, player: Player, rook: Square) -> Option<MoveEffects> {
        let (ours, theirs, board) = self.split(player);
        let size = board.size();
        let rank = player.backrank(size);
        let castling_rook = *ours.at(rook)?;
        let king = *ours.king()?;
        if castling_rook.kind != PieceKind::Rook || castling_rook.has_moved || king.has_moved {
            return None;
        }
        let (between, king_to, rook_to, effect) = if rook.x == 1 {
            (2..=4, 3, 4, MoveEffects::QUEENSIDE_CASTLE)
        } else {
            (
                size - 2..=size - 1,
                size - 1,
                size - 2,
                MoveEffects::KINGSIDE_CASTLE,
            )
        };
        if between
            .map(|file| Square::new(file, rank))
            .any(|square| ours.is_occupied(square) || theirs.is_occupied(square))
        {
            return None;
        }

        let king = ours.at_mut(king.square)?;
        king.square = Square::new(king_to, rank);
        king.has_moved = true;
        let castling_rook = ours.at_mut(rook)?;
        castling_rook.square = Square::new(rook_to, rank);
        castling_rook.has_moved = true;

        ours.tick(false);
        theirs.clear_en_passant();
        Some(effect)
    }

    /// Replaces the pawns of `player` that reached the last rank with queens.
    /// Returns the number of promoted pawns.
    pub fn promote(&mut self, player: Player) -> usize {
        let (ours, _, board) = self.split(player);
        ours.promote_pawns(board)
    }

    /// Speculatively plays the action on a copy of the position and commits
    /// it only if the `player`'s king is not in check afterwards.
    ///
    /// # Errors
    ///
    /// - [`Rejection::IllegalMove`] if the action is not allowed by the piece
    ///   movement or castling rules.
    /// - [`Rejection::KingInCheck`] if it would leave the king of `player` in
    ///   check.
    pub fn attempt(&mut self, player: Player, action: Action) -> Result<MoveEffects, Rejection> {
        let mut speculative = self.clone();
        let effects = speculative
            .play(player, action)
            .ok_or(Rejection::IllegalMove)?;
        if speculative.is_in_check(player) {
            return Err(Rejection::KingInCheck);
        }
        *self = speculative;
        Ok(effects)
    }

    /// Plays the move if it is legal. Returns whether it was.
    pub fn attempt_move(&mut self, player: Player, from: Square, to: Square) -> bool {
        self.attempt(player, Action::Move { from, to }).is_ok()
    }

    /// Castles if it is legal. Returns whether it was.
    pub fn attempt_castle(&mut self, player: Player, rook: Square) -> bool {
        self.attempt(player, Action::Castle { rook }).is_ok()
    }

    /// Two-character labels of all squares (see [`Board::labels`]).
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.board.labels(&self.white, &self.black)
    }

    /// Parses the piece placement part of [Forsyth-Edwards Notation] (FEN):
    /// ranks from 8 to 1 separated by `/`, White pieces in upper case
    /// (`KQRBNP`), Black pieces in lower case and digits for the runs of empty
    /// squares.
    ///
    /// Only the pieces that stand on their original squares keep the right to
    /// double push (pawns) and castle (king and rooks).
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    ///
    /// # Errors
    ///
    /// Malformed placement or anything but exactly one king per side.
    pub fn from_fen(placement: &str) -> anyhow::Result<Self> {
        let mut result = Self::empty();
        let ranks = placement.split('/').collect_vec();
        if ranks.len() != usize::from(BOARD_WIDTH.unsigned_abs()) {
            bail!("incorrect FEN: expected {BOARD_WIDTH} ranks, got {placement}");
        }
        for (rank_fen, rank) in ranks.into_iter().zip((1..=BOARD_WIDTH).rev()) {
            let mut file: i8 = 1;
            for symbol in rank_fen.chars() {
                if file > BOARD_WIDTH {
                    bail!("file exceeded {BOARD_WIDTH} in {rank_fen}");
                }
                if let Some(increment) = symbol.to_digit(10) {
                    if increment == 0 {
                        bail!("increment can not be 0");
                    }
                    file += i8::try_from(increment)?;
                    continue;
                }
                let kind = PieceKind::try_from(symbol)?;
                let owner = if symbol.is_ascii_uppercase() {
                    Player::White
                } else {
                    Player::Black
                };
                result.place(owner, kind, Square::new(file, rank));
                file += 1;
            }
            if file != BOARD_WIDTH + 1 {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of length {}",
                    file - 1
                );
            }
        }
        for player in [Player::White, Player::Black] {
            let kings = result
                .pieces(player)
                .active()
                .filter(|piece| piece.kind == PieceKind::King)
                .count();
            if kings != 1 {
                bail!(
                    "expected 1 {} king, got {kings}",
                    player.name().to_lowercase()
                );
            }
        }
        Ok(result)
    }

    /// Puts a piece on the board. Pieces away from their starting squares are
    /// marked as moved.
    fn place(&mut self, owner: Player, kind: PieceKind, square: Square) {
        let size = self.board.size();
        let backrank = owner.backrank(size);
        let (_, forward) = owner.push_direction().delta();
        let at_home = match kind {
            PieceKind::Pawn => square.y == backrank + forward,
            PieceKind::King => square == Square::new(5, backrank),
            PieceKind::Rook => square.y == backrank && (square.x == 1 || square.x == size),
            PieceKind::Queen | PieceKind::Bishop | PieceKind::Knight => true,
        };
        let pieces = self.pieces_mut(owner);
        pieces.place(kind, square);
        if !at_home {
            if let Some(piece) = pieces.at_mut(square) {
                piece.has_moved = true;
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Position {
    /// Renders the board as a grid of square labels, rank 8 on top.
    ///
    /// ```text
    ///   a  b  c  d  e  f  g  h
    /// 8 bR bk bB bQ bK bB bk bR
    /// 7 bP bP bP bP bP bP bP bP
    /// ...
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = usize::from(self.board.size().unsigned_abs());
        let files = (b'a'..).take(size).map(char::from).join("  ");
        writeln!(f, "  {files}")?;
        let labels = self.labels();
        for (rank, row) in labels.chunks(size).enumerate().rev() {
            writeln!(f, "{} {}", rank + 1, row.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")?;
        writeln!(
            f,
            "Half-move clocks: {} (white), {} (black)",
            self.white.halfmove_clock(),
            self.black.halfmove_clock()
        )
    }
}
