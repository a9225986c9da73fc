use itertools::Itertools;
use pretty_assertions::assert_eq;
use tabiya::chess::board::Board;
use tabiya::chess::core::{MoveEffects, PieceKind, Player, Square};
use tabiya::chess::game::{Action, Game, Outcome, Rejection, Rules, State};
use tabiya::chess::pieces::Pieces;
use tabiya::chess::position::{in_check, is_checkmate, Position};

fn sq(label: &str) -> Square {
    Square::parse(label).expect("valid square label")
}

fn setup(placement: &str) -> Position {
    Position::from_fen(placement).expect("we are parsing valid placement: {placement}")
}

fn play(game: &mut Game, moves: &str) {
    for (from, to) in moves.split_whitespace().map(|m| m.split_at(2)) {
        let player = game.side_to_move().expect("the game is not over");
        let result = game.submit(
            player,
            Action::Move {
                from: sq(from),
                to: sq(to),
            },
        );
        assert!(result.is_ok(), "{player:?} {from}{to}: {result:?}");
    }
}

#[test]
fn capture_in_the_center() {
    let mut position = Position::starting();
    assert!(position.attempt_move(Player::White, Square::new(5, 2), Square::new(5, 4)));
    assert!(position.attempt_move(Player::Black, Square::new(4, 7), Square::new(4, 5)));
    assert!(position.attempt_move(Player::White, Square::new(5, 4), Square::new(4, 5)));

    let white = position.pieces(Player::White);
    let black = position.pieces(Player::Black);
    assert!(white.at(sq("e4")).is_none());
    assert_eq!(white.at(sq("d5")).unwrap().kind, PieceKind::Pawn);
    assert!(black.at(sq("d5")).is_none());
    assert_eq!(black.active().count(), 15);
    assert_eq!(white.halfmove_clock(), 0);
    assert_eq!(black.halfmove_clock(), 1);
}

#[test]
fn kingside_castle() {
    let mut position = setup("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQK2R");
    assert!(position.attempt_castle(Player::White, Square::new(8, 1)));
    let white = position.pieces(Player::White);
    assert_eq!(white.king().unwrap().square, Square::new(7, 1));
    let rook = white.at(Square::new(6, 1)).unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(rook.has_moved);
    assert!(white.at(Square::new(8, 1)).is_none());
}

#[test]
fn capturing_the_checker() {
    // The knight on f2 checks the king, the bishop takes it.
    let position = setup("k7/8/8/8/8/8/5nPP/4B1RK");
    assert!(position.is_in_check(Player::White));
    assert!(!position.is_checkmate(Player::White));
    // Without the bishop, it is a smothered mate.
    let position = setup("k7/8/8/8/8/8/5nPP/6RK");
    assert!(position.is_checkmate(Player::White));
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play(&mut game, "f2f3 e7e5 g2g4 d8h4");
    assert!(game.is_over());
    assert_eq!(
        game.state(),
        State::Over(Outcome::Checkmate {
            winner: Player::Black
        })
    );
    assert_eq!(
        game.submit(
            Player::White,
            Action::Move {
                from: sq("a2"),
                to: sq("a3")
            }
        ),
        Err(Rejection::GameOver)
    );
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    play(&mut game, "e2e4 e7e5 f1c4 b8c6 d1h5 g8f6");
    let report = game
        .submit(
            Player::White,
            Action::Move {
                from: sq("h5"),
                to: sq("f7"),
            },
        )
        .unwrap();
    assert_eq!(report.effects, MoveEffects::CAPTURE);
    assert!(report.check);
    assert_eq!(
        report.outcome,
        Some(Outcome::Checkmate {
            winner: Player::White
        })
    );
    assert_eq!(game.ply(), 7);
}

#[test]
fn en_passant() {
    let mut game = Game::new();
    play(&mut game, "e2e4 a7a6 e4e5 d7d5");
    let report = game
        .submit(
            Player::White,
            Action::Move {
                from: sq("e5"),
                to: sq("d6"),
            },
        )
        .unwrap();
    assert_eq!(report.effects, MoveEffects::CAPTURE | MoveEffects::EN_PASSANT);
    assert!(game.position().pieces(Player::Black).at(sq("d5")).is_none());
}

#[test]
fn black_en_passant() {
    let mut game = Game::from_fen("4k3/3p4/8/8/4p3/8/3P4/4K3 w", Rules::default()).unwrap();
    play(&mut game, "d2d4");
    let report = game
        .submit(
            Player::Black,
            Action::Move {
                from: sq("e4"),
                to: sq("d3"),
            },
        )
        .unwrap();
    assert_eq!(report.effects, MoveEffects::CAPTURE | MoveEffects::EN_PASSANT);
    let white = game.position().pieces(Player::White);
    assert!(white.at(sq("d4")).is_none());
    assert_eq!(white.active().count(), 1);
    let black = game.position().pieces(Player::Black);
    assert_eq!(black.at(sq("d3")).unwrap().kind, PieceKind::Pawn);
    assert!(black.at(sq("e4")).is_none());
    assert_eq!(game.state(), State::WhiteToMove);
}

#[test]
fn en_passant_lasts_one_move() {
    let mut game = Game::new();
    play(&mut game, "e2e4 a7a6 e4e5 d7d5 h2h3 a6a5");
    assert_eq!(
        game.submit(
            Player::White,
            Action::Move {
                from: sq("e5"),
                to: sq("d6"),
            },
        ),
        Err(Rejection::IllegalMove)
    );
}

#[test]
fn castling_clears_en_passant() {
    let mut game = Game::from_fen("4k3/3p4/8/4P3/8/8/8/4K2R b", Rules::default()).unwrap();
    play(&mut game, "d7d5");
    assert!(game
        .position()
        .pieces(Player::Black)
        .at(sq("d5"))
        .unwrap()
        .en_passant_eligible);
    assert!(game
        .submit(Player::White, Action::Castle { rook: sq("h1") })
        .is_ok());
    assert!(!game
        .position()
        .pieces(Player::Black)
        .at(sq("d5"))
        .unwrap()
        .en_passant_eligible);
}

#[test]
fn promotion_to_queen() {
    let mut game = Game::from_fen("k7/4P3/8/8/8/8/8/4K3 w", Rules::default()).unwrap();
    play(&mut game, "e7e8");
    let white = game.position().pieces(Player::White);
    let queen = white.at(sq("e8")).unwrap();
    assert_eq!(queen.kind, PieceKind::Queen);
    assert!(queen.promoted);
    assert_eq!(white.promotions().count(), 1);
    assert!(game.position().is_in_check(Player::Black));
}

#[test]
fn check_detection_matches_move_generation() {
    let positions = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR",
        "k7/8/8/8/8/8/5nPP/4B1RK",
        "4k3/8/8/8/1b6/8/8/4K3",
        "4k3/8/8/8/8/8/3n4/4K3",
        "4k3/8/8/8/8/8/8/r3K3",
    ];
    for placement in positions {
        let position = setup(placement);
        let board = position.board();
        for player in [Player::White, Player::Black] {
            let defender = position.pieces(player);
            let attacker = position.pieces(!player);
            let king = defender.king().unwrap().square;
            let attacked = attacker
                .active()
                .any(|piece| piece.generate_moves(attacker, defender, board).contains(&king));
            assert_eq!(in_check(defender, attacker, board), attacked, "{placement}");
            assert_eq!(position.is_in_check(player), attacked, "{placement}");
            if !attacked {
                assert!(!is_checkmate(defender, attacker, board), "{placement}");
            }
        }
    }
}

#[test]
fn accepted_moves_relocate_the_piece() {
    let board = Board::standard();
    let mut white = Pieces::starting(Player::White, &board);
    let mut black = Pieces::starting(Player::Black, &board);
    let candidates = white
        .active()
        .flat_map(|piece| {
            piece
                .generate_moves(&white, &black, &board)
                .into_iter()
                .map(|to| (piece.square, to))
                .collect_vec()
        })
        .collect_vec();
    // 8 pawns with 2 moves each and 2 knights with 2 moves each.
    assert_eq!(candidates.len(), 20);
    let (from, to) = candidates[0];
    let piece = *white.at(from).unwrap();
    assert!(white.move_piece(from, to, &mut black, &board));
    assert!(white.at(from).is_none());
    let moved = white.at(to).unwrap();
    assert_eq!(moved.kind, piece.kind);
    assert!(moved.has_moved);
}

#[test]
fn labels_snapshot() {
    let labels = Position::starting().labels();
    assert_eq!(labels.len(), 64);
    assert_eq!(
        labels.iter().step_by(8).join(","),
        "wR,wP,  ,  ,  ,  ,bP,bR"
    );
}

#[test]
fn square_labels() {
    assert_eq!(Square::parse("A1"), Some(Square::new(1, 1)));
    assert_eq!(Square::parse("h8"), Some(Square::new(8, 8)));
    assert_eq!(Square::parse("I1"), None);
    assert_eq!(Square::parse("A0"), None);
    assert_eq!(Square::parse("A10"), None);
    assert_eq!(Square::parse(""), None);
}
