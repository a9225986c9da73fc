//! The board itself does not hold any pieces: it only knows its size and
//! enumerates the squares. Pieces are owned by [`Pieces`] of each player.

use itertools::iproduct;

use crate::chess::core::{PieceKind, Square, BOARD_WIDTH};
use crate::chess::piece::Piece;
use crate::chess::pieces::Pieces;

/// Label of a square without any piece in [`Board::labels`].
pub const EMPTY_LABEL: &str = "  ";

/// Standard grid of 8x8 squares. The full square enumeration is generated
/// once at construction in row-major order (rank 1 first, files `a` to `h`
/// within a rank) and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: Vec<Square>,
}

impl Board {
    /// Standard 8x8 board.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            squares: iproduct!(1..=BOARD_WIDTH, 1..=BOARD_WIDTH)
                .map(|(y, x)| Square::new(x, y))
                .collect(),
        }
    }

    /// Number of files (and ranks).
    #[must_use]
    pub const fn size(&self) -> i8 {
        BOARD_WIDTH
    }

    /// Determines whether the square is within the board.
    #[must_use]
    pub const fn in_board(&self, square: Square) -> bool {
        let size = self.size();
        1 <= square.x && square.x <= size && 1 <= square.y && square.y <= size
    }

    /// All squares of the board in row-major order.
    #[must_use]
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Produces a snapshot of the board for rendering: for each square in
    /// row-major order a two-character `{player}{piece}` label (e.g. `wQ` or
    /// `bk` for a black knight), or [`EMPTY_LABEL`] if nothing stands there.
    /// White pieces take precedence over Black ones. Within one player, the
    /// piece is picked in [`PieceKind::LABEL_PRECEDENCE`] order.
    #[must_use]
    pub fn labels(&self, white: &Pieces, black: &Pieces) -> Vec<String> {
        self.squares
            .iter()
            .map(|&square| {
                labelled_piece(white, square)
                    .or_else(|| labelled_piece(black, square))
                    .map_or_else(
                        || EMPTY_LABEL.to_string(),
                        |piece| format!("{}{}", piece.owner, piece.kind),
                    )
            })
            .collect()
    }
}

fn labelled_piece(pieces: &Pieces, square: Square) -> Option<&Piece> {
    PieceKind::LABEL_PRECEDENCE.iter().find_map(|&kind| {
        pieces
            .active()
            .find(|piece| piece.square == square && piece.kind == kind)
    })
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
