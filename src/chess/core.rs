//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::ops::Not;

use anyhow::bail;
use itertools::Itertools;

/// Number of files (and ranks) of the standard board.
pub const BOARD_WIDTH: i8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_WIDTH as usize);

/// A square is a pair of 1-based coordinates: `x` is the file (column, `a` is
/// 1) and `y` is the rank (row, White's back rank is 1).
///
/// Squares know nothing about the board they are placed on: stepping off the
/// edge produces a perfectly valid value which is simply not
/// [`crate::chess::board::Board::in_board`].
///
/// ```
/// use tabiya::chess::core::Square;
///
/// let e4 = Square::new(5, 4);
/// assert_eq!(e4.to_string(), "e4");
/// assert_eq!(Square::try_from("E4").unwrap(), e4);
/// assert_eq!(Square::new(0, 9).to_string(), "(0, 9)");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    #[allow(missing_docs)]
    pub x: i8,
    #[allow(missing_docs)]
    pub y: i8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Returns the square `dx` files and `dy` ranks away. The result can be
    /// outside of the board. Coordinates saturate at the `i8` bounds, which
    /// are never on the board.
    #[must_use]
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Returns the neighbouring square in the given direction.
    #[must_use]
    pub const fn shift(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Converts a two-character label (file letter `A`..`H`, case does not
    /// matter, followed by rank digit `1`..`8`) to a square. Anything else
    /// yields `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::try_from(label).ok()
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(label: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = label.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got {label} with {} chars",
                label.chars().count()
            );
        };
        let x = match file.to_ascii_lowercase() {
            lowercase @ 'a'..='h' => lowercase as u8 - b'a' + 1,
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        let y = match rank {
            '1'..='8' => rank as u8 - b'0',
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        Ok(Self::new(i8::try_from(x)?, i8::try_from(y)?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (1..=BOARD_WIDTH).contains(&self.x) && (1..=BOARD_WIDTH).contains(&self.y) {
            #[allow(clippy::cast_sign_loss)]
            let file = (b'a' + (self.x - 1) as u8) as char;
            write!(f, "{file}{}", self.y)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Direction in which the pawns of this player advance.
    #[must_use]
    pub const fn push_direction(self) -> Direction {
        match self {
            Self::White => Direction::Up,
            Self::Black => Direction::Down,
        }
    }

    /// Rank the pieces of this player start on for a board of given size.
    #[must_use]
    pub const fn backrank(self, size: i8) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => size,
        }
    }

    /// Rank on which the pawns of this player get promoted.
    #[must_use]
    pub const fn promotion_rank(self, size: i8) -> i8 {
        self.opponent().backrank(size)
    }

    /// Human-readable name of the player.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Order in which checkmate detection looks for an escape: the most mobile
    /// pieces first.
    pub const ESCAPE_ORDER: [Self; 6] = [
        Self::Queen,
        Self::King,
        Self::Pawn,
        Self::Rook,
        Self::Bishop,
        Self::Knight,
    ];

    /// Order in which a board label is picked when several pieces of the same
    /// player share a square.
    pub const LABEL_PRECEDENCE: [Self; 6] = [
        Self::Queen,
        Self::King,
        Self::Knight,
        Self::Rook,
        Self::Bishop,
        Self::Pawn,
    ];
}

impl TryFrom<char> for PieceKind {
    type Error = anyhow::Error;

    /// Parses FEN piece symbol regardless of the owner.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol.to_ascii_lowercase() {
            'k' => Ok(Self::King),
            'q' => Ok(Self::Queen),
            'r' => Ok(Self::Rook),
            'b' => Ok(Self::Bishop),
            'n' => Ok(Self::Knight),
            'p' => Ok(Self::Pawn),
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for PieceKind {
    /// Board label of the piece. Knight is a lowercase `k` to tell it apart
    /// from the King.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'k',
            Self::Pawn => 'P',
        })
    }
}

/// Directions on the board from a perspective of White player.
///
/// Traditionally those are North (Up), West (Left), East (Right), South (Down)
/// and their combinations. However, using cardinal directions is confusing,
/// hence they are replaced by relative directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Also known as NorthWest.
    UpLeft,
    /// Also known as North.
    Up,
    /// Also known as NorthEast.
    UpRight,
    /// Also known as East.
    Right,
    /// Also known as West.
    Left,
    /// Also known as SouthWest.
    DownLeft,
    /// Also known as South.
    Down,
    /// Also known as SouthEast.
    DownRight,
}

impl Direction {
    /// Directions a rook slides in.
    pub const ORTHOGONAL: [Self; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];
    /// Directions a bishop slides in.
    pub const DIAGONAL: [Self; 4] = [Self::UpRight, Self::UpLeft, Self::DownRight, Self::DownLeft];
    /// Directions a queen slides in.
    pub const ALL: [Self; 8] = [
        Self::Right,
        Self::Left,
        Self::Up,
        Self::Down,
        Self::UpRight,
        Self::UpLeft,
        Self::DownRight,
        Self::DownLeft,
    ];

    /// File and rank increments of a single step.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (-1, 1),
            Self::Up => (0, 1),
            Self::UpRight => (1, 1),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::DownLeft => (-1, -1),
            Self::Down => (0, -1),
            Self::DownRight => (1, -1),
        }
    }
}

bitflags::bitflags! {
    /// Describes what an accepted move did to the position.
    ///
    /// Apart from the "regular" or "quiet" moves (simply moving a piece from
    /// one square to the other, an empty set of flags), there are few
    /// important rules:
    ///
    /// - [En passant] is a capture of opponent's pawn "in passing" (when it
    ///   advances two squares from its original position).
    /// - The [Castle] move that will involve a king and a rook "jumping" over
    ///   each other.
    /// - Promotion happens after the move itself, when the pawn reaches the
    ///   opponent's back rank.
    ///
    /// [Castle]: https://en.wikipedia.org/wiki/Castling
    /// [En passant]: https://en.wikipedia.org/wiki/En_passant
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveEffects: u8 {
        /// Pawn advancement by 2 squares from its original square.
        const DOUBLE_PAWN_PUSH = 0b0000_0001;
        /// Moves that change the material balance.
        const CAPTURE = 0b0000_0010;
        /// Capture of the pawn that has just made a double push.
        const EN_PASSANT = 0b0000_0100;
        /// Short castle or O-O.
        const KINGSIDE_CASTLE = 0b0000_1000;
        /// Long castle or O-O-O.
        const QUEENSIDE_CASTLE = 0b0001_0000;
        /// Pawn reached the opponent's back rank and became a queen.
        const PROMOTION = 0b0010_0000;
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn square_labels() {
        assert_eq!(
            ["a1", "H8", "e4", "B3", "f5"]
                .iter()
                .filter_map(|label| Square::parse(label))
                .collect::<Vec<_>>(),
            vec![
                Square::new(1, 1),
                Square::new(8, 8),
                Square::new(5, 4),
                Square::new(2, 3),
                Square::new(6, 5),
            ]
        );
        for label in ["", "e", "e44", "i1", "e9", "e0", "44", "ee", "1e"] {
            assert_eq!(Square::parse(label), None, "{label}");
        }
    }

    #[test]
    #[should_panic(expected = "file should be within 'a'..='h', got 'z'")]
    fn square_from_incorrect_file() {
        let _ = Square::try_from("z1").unwrap();
    }

    #[test]
    #[should_panic(expected = "rank should be within '1'..='8', got '9'")]
    fn square_from_incorrect_rank() {
        let _ = Square::try_from("a9").unwrap();
    }

    #[test]
    #[should_panic(expected = "square should be two-char, got a10 with 3 chars")]
    fn square_from_long_label() {
        let _ = Square::try_from("a10").unwrap();
    }

    #[test]
    fn square_display() {
        assert_eq!(Square::new(1, 1).to_string(), "a1");
        assert_eq!(Square::new(8, 8).to_string(), "h8");
        assert_eq!(Square::new(9, 1).to_string(), "(9, 1)");
        assert_eq!(Square::new(-1, 3).to_string(), "(-1, 3)");
    }

    #[test]
    fn shifts() {
        let square = Square::new(5, 4);
        assert_eq!(square.shift(Direction::Left), Square::new(4, 4));
        assert_eq!(square.shift(Direction::Up), Square::new(5, 5));
        assert_eq!(square.shift(Direction::UpRight), Square::new(6, 5));
        assert_eq!(square.shift(Direction::UpLeft), Square::new(4, 5));
        assert_eq!(square.shift(Direction::Right), Square::new(6, 4));
        assert_eq!(square.shift(Direction::Down), Square::new(5, 3));
        assert_eq!(square.shift(Direction::DownRight), Square::new(6, 3));
        assert_eq!(square.shift(Direction::DownLeft), Square::new(4, 3));
        // Squares are unbounded.
        assert_eq!(
            Square::new(1, 1).shift(Direction::DownLeft),
            Square::new(0, 0)
        );
        assert_eq!(Direction::ALL.len(), 8);
        for direction in Direction::ORTHOGONAL
            .into_iter()
            .chain(Direction::DIAGONAL)
        {
            assert!(Direction::ALL.contains(&direction));
            let (dx, dy) = direction.delta();
            assert_eq!(square.shift(direction).offset(-dx, -dy), square);
        }
    }

    #[test]
    fn offsets_saturate() {
        let edge = Square::new(i8::MAX, 1);
        assert_eq!(edge.offset(1, 0), edge);
        assert_eq!(edge.shift(Direction::UpRight), Square::new(i8::MAX, 2));
        assert_eq!(
            Square::new(i8::MIN, i8::MIN).shift(Direction::DownLeft),
            Square::new(i8::MIN, i8::MIN)
        );
        assert_eq!(Square::new(1, 1).offset(-2, 7), Square::new(-1, 8));
    }

    #[test]
    fn players() {
        assert_eq!(!Player::White, Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.backrank(BOARD_WIDTH), 1);
        assert_eq!(Player::Black.backrank(BOARD_WIDTH), 8);
        assert_eq!(Player::White.promotion_rank(BOARD_WIDTH), 8);
        assert_eq!(Player::Black.promotion_rank(BOARD_WIDTH), 1);
        assert_eq!(Player::try_from("w").unwrap(), Player::White);
        assert!(Player::try_from("white").is_err());
        assert_eq!(format!("{}{}", Player::Black, PieceKind::Knight), "bk");
    }

    #[test]
    fn piece_symbols() {
        assert_eq!(
            "KQRBNPkqrbnp"
                .chars()
                .filter_map(|symbol| PieceKind::try_from(symbol).ok())
                .map(|kind| kind.to_string())
                .collect::<String>(),
            "KQRBkPKQRBkP"
        );
        assert!(PieceKind::try_from('x').is_err());
    }
}
