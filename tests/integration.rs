use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

const BINARY_NAME: &str = "tabiya";

#[test]
fn startup_info() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("version\nquit\n")
            .assert()
            .success()
            .stdout(
                contains("Tabiya chess rules engine")
                    .and(contains("Release build"))
                    .and(contains("id name tabiya"))
                    .and(contains("id author")),
            ),
    );
}

#[test]
fn fools_mate() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("new\nmove f2 f3\nmove e7 e5\nmove g2 g4\nmove d8 h4\nmove a2 a3\n")
            .assert()
            .success()
            .stdout(
                contains("White is now in check")
                    .and(contains("White is in checkmate, Black wins"))
                    .and(contains("game is over")),
            ),
    );
}

#[test]
fn board_rendering() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("move e2 e4\nboard\n")
            .assert()
            .success()
            .stdout(
                contains("  a  b  c  d  e  f  g  h")
                    .and(contains("4             wP         "))
                    .and(contains("1 wR wk wB wQ wK wB wk wR")),
            ),
    );
}

#[test]
fn malformed_input_is_skipped() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("go infinite\nmove e2 i4\nposition fen 8/8 w\nmove e2 e4\n")
            .assert()
            .success()
            .stdout(
                contains("info string Unsupported command: go infinite")
                    .and(contains("info string Invalid square"))
                    .and(contains("info string Invalid position"))
                    .and(contains("Black to move")),
            ),
    );
}
