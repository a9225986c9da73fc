//! The engine connects the rules with the outside world: it reads commands
//! from the input stream, plays them on the [`Game`] and reports the results.
//!
//! [`Engine::run`] is the "main loop" of the engine. Supported commands:
//!
//! - `new`: starts a new game from the standard position.
//! - `position startpos` or `position fen <placement> <w|b>`.
//! - `move <from> <to>` and `castle <rook square>`: play for the side to move.
//! - `board`, `labels` and `status`: print the current state.
//! - `setoption name DrawLimit value <n|none>`: changes the half-move limit.
//! - `version` and `quit`.

use std::io::{BufRead, Write};

use crate::chess::core::{Player, Square};
use crate::chess::game::{Action, Game, MoveReport, State};
use crate::engine::protocol::{Command, EngineOption, OptionValue};

mod protocol;

/// The Engine connects everything together and handles the commands sent by
/// the client, including I/O.
pub struct Engine<'a, R: BufRead, W: Write> {
    game: Game,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with starting position and provided
    /// I/O.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            game: Game::new(),
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes the commands until
    /// "quit" is sent or the input is exhausted.
    ///
    /// Commands that can not be parsed or executed are reported to the output
    /// and skipped.
    ///
    /// # Errors
    ///
    /// Only I/O errors are propagated.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            match Command::parse(&line) {
                Command::NewGame => self.handle_new()?,
                Command::SetPosition { fen } => self.handle_position(fen.as_deref())?,
                Command::Move { from, to } => self.handle_move(&from, &to)?,
                Command::Castle { rook } => self.handle_castle(&rook)?,
                Command::Board => write!(self.output, "{}", self.game.position())?,
                Command::Labels => {
                    writeln!(self.output, "{}", self.game.position().labels().join("|"))?;
                },
                Command::Status => self.handle_status()?,
                Command::SetOption { option, value } => self.handle_setoption(&option, &value)?,
                Command::Version => self.handle_version()?,
                Command::Quit => break,
                Command::Unknown(command) => {
                    writeln!(self.output, "info string Unsupported command: {command}")?;
                },
            }
        }
        Ok(())
    }

    /// Starts a new game from the standard position, keeping the rules.
    fn handle_new(&mut self) -> anyhow::Result<()> {
        self.game = Game::with_rules(self.game.rules());
        self.write_state()
    }

    /// Changes the position of the board to the one specified in the command.
    fn handle_position(&mut self, fen: Option<&str>) -> anyhow::Result<()> {
        let rules = self.game.rules();
        match fen {
            None => self.game = Game::with_rules(rules),
            Some(fen) => match Game::from_fen(fen, rules) {
                Ok(game) => self.game = game,
                Err(e) => {
                    writeln!(self.output, "info string Invalid position: {e}")?;
                    return Ok(());
                },
            },
        }
        self.write_state()
    }

    fn handle_move(&mut self, from: &str, to: &str) -> anyhow::Result<()> {
        let (from, to) = match (Square::try_from(from), Square::try_from(to)) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => {
                writeln!(self.output, "info string Invalid square: {e}")?;
                return Ok(());
            },
        };
        self.submit(Action::Move { from, to })
    }

    fn handle_castle(&mut self, rook: &str) -> anyhow::Result<()> {
        match Square::try_from(rook) {
            Ok(rook) => self.submit(Action::Castle { rook }),
            Err(e) => {
                writeln!(self.output, "info string Invalid square: {e}")?;
                Ok(())
            },
        }
    }

    /// Plays the action for the player to move and reports the result.
    fn submit(&mut self, action: Action) -> anyhow::Result<()> {
        // The game refuses any action once it is over, whoever submits it.
        let player = self.game.side_to_move().unwrap_or(Player::White);
        match self.game.submit(player, action) {
            Ok(report) => self.write_report(player, &report),
            Err(rejection) => {
                writeln!(self.output, "{rejection}")?;
                Ok(())
            },
        }
    }

    fn write_report(&mut self, mover: Player, report: &MoveReport) -> anyhow::Result<()> {
        if report.check {
            writeln!(self.output, "{} is now in check", mover.opponent().name())?;
        }
        self.write_state()
    }

    /// Reports whose turn it is or how the game ended.
    fn write_state(&mut self) -> anyhow::Result<()> {
        match self.game.state() {
            State::WhiteToMove => writeln!(self.output, "{} to move", Player::White.name())?,
            State::BlackToMove => writeln!(self.output, "{} to move", Player::Black.name())?,
            State::Over(outcome) => writeln!(self.output, "{outcome}")?,
        }
        Ok(())
    }

    fn handle_status(&mut self) -> anyhow::Result<()> {
        self.write_state()?;
        let position = self.game.position();
        writeln!(
            self.output,
            "info string ply {}, half-move clocks {} {}",
            self.game.ply(),
            position.pieces(Player::White).halfmove_clock(),
            position.pieces(Player::Black).halfmove_clock()
        )?;
        Ok(())
    }

    /// Changes the rules of the current game and the following ones.
    fn handle_setoption(
        &mut self,
        option: &EngineOption,
        value: &OptionValue,
    ) -> anyhow::Result<()> {
        let mut rules = self.game.rules();
        match (option, value) {
            (EngineOption::DrawLimit, OptionValue::Disabled) => {
                rules.halfmove_draw_limit = None;
            },
            (EngineOption::DrawLimit, OptionValue::Integer(limit)) => {
                match u16::try_from(*limit) {
                    Ok(limit) => rules.halfmove_draw_limit = Some(limit),
                    Err(e) => {
                        writeln!(self.output, "info string Invalid DrawLimit {limit}: {e}")?;
                        return Ok(());
                    },
                }
            },
        }
        self.game.set_rules(rules);
        Ok(())
    }

    /// Identifies the engine.
    fn handle_version(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "id name {} {}",
            env!("CARGO_PKG_NAME"),
            crate::engine_version()
        )?;
        writeln!(self.output, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
        Ok(())
    }
}
