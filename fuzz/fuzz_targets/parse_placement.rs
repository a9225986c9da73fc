#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use tabiya::chess::core::{Player, Square};
use tabiya::chess::position::Position;

fuzz_target!(|data: &[u8]| {
    let input = match std::str::from_utf8(data) {
        Ok(input) => input,
        Err(_) => return,
    };
    if let Some(square) = Square::parse(input) {
        assert_eq!(square.to_string(), input.to_ascii_lowercase());
    }
    let position = match Position::from_fen(input) {
        Ok(position) => position,
        Err(_) => return,
    };
    assert_eq!(position.labels().len(), 64);
    for player in [Player::White, Player::Black] {
        if position.is_checkmate(player) {
            assert!(position.is_in_check(player));
        }
    }
});
