//! Pseudo-legal move [generation] by walking the board square by square.
//!
//! Sliding pieces (rook, bishop, queen) share the same sweep: step outward
//! from the piece until the edge of the board or a blocker. Knights and kings
//! are "leapers" with a fixed set of offsets. Pawns have their own rules.
//!
//! [generation]: https://www.chessprogramming.org/Move_Generation

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Direction, PieceKind, Square};
use crate::chess::piece::Piece;
use crate::chess::pieces::Pieces;

/// Knight jumps: two squares in one direction and one in the other.
pub(super) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-2, 1),
    (-1, 2),
    (-1, -2),
    (-2, -1),
    (1, -2),
    (2, -1),
];

/// King steps to each of the adjacent squares.
pub(super) const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (-1, 0),
    (0, 1),
    (0, -1),
];

/// Walks from `from` in each of the `directions` and collects the reachable
/// squares.
pub(super) fn slide(
    from: Square,
    directions: &[Direction],
    ours: &Pieces,
    theirs: &Pieces,
    board: &Board,
) -> Vec<Square> {
    let mut moves = Vec::new();
    for &direction in directions {
        sweep(from, direction, ours, theirs, board, &mut moves);
    }
    moves
}

/// A single ray of [`slide`]. The sweep stops at the edge of the board, right
/// before our piece or right at the opponent's piece (capture).
fn sweep(
    from: Square,
    direction: Direction,
    ours: &Pieces,
    theirs: &Pieces,
    board: &Board,
    moves: &mut Vec<Square>,
) {
    let mut target = from.shift(direction);
    while board.in_board(target) {
        if theirs.is_occupied(target) {
            moves.push(target);
            break;
        }
        if ours.is_occupied(target) {
            break;
        }
        moves.push(target);
        target = target.shift(direction);
    }
}

/// Squares reached by a fixed set of jumps that are on the board and not
/// occupied by our pieces. The opponent's pieces can be captured.
pub(super) fn leap(
    from: Square,
    offsets: &[(i8, i8); 8],
    ours: &Pieces,
    board: &Board,
) -> ArrayVec<Square, 8> {
    offsets
        .iter()
        .map(|&(dx, dy)| from.offset(dx, dy))
        .filter(|&target| board.in_board(target) && !ours.is_occupied(target))
        .collect()
}

/// Pawn moves:
///
/// - One square forward if it is empty.
/// - Two squares forward from the original square if both squares are empty.
/// - Diagonal capture if the opponent's piece is there.
/// - [En passant]: diagonal move behind the opponent's pawn standing next to
///   ours if it has just been pushed by two squares.
///
/// [En passant]: https://en.wikipedia.org/wiki/En_passant
pub(super) fn pawn_moves(
    pawn: &Piece,
    ours: &Pieces,
    theirs: &Pieces,
    board: &Board,
) -> ArrayVec<Square, 4> {
    let from = pawn.square;
    let (_, forward) = pawn.owner.push_direction().delta();
    let is_empty = |square| !ours.is_occupied(square) && !theirs.is_occupied(square);
    let mut moves = ArrayVec::new();

    let push = from.offset(0, forward);
    if is_empty(push) {
        moves.push(push);
        let double_push = push.offset(0, forward);
        if !pawn.has_moved && is_empty(double_push) {
            moves.push(double_push);
        }
    }
    for side in [-1, 1] {
        let capture = from.offset(side, forward);
        let passed = theirs.at(from.offset(side, 0)).is_some_and(|piece| {
            piece.kind == PieceKind::Pawn && piece.en_passant_eligible
        });
        if theirs.is_occupied(capture) || passed {
            moves.push(capture);
        }
    }

    moves.retain(|target| board.in_board(*target) && !ours.is_occupied(*target));
    moves
}
