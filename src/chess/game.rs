//! The game: a [`Position`] plus whose turn it is, driven one action at a
//! time through [`Game::submit`].

use std::fmt;

use anyhow::bail;

use crate::chess::core::{MoveEffects, Player, Square};
use crate::chess::position::Position;

/// What a player can do on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Moves the piece standing on `from` to `to`.
    Move {
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
    },
    /// Castles with the rook standing on the given square.
    Castle {
        #[allow(missing_docs)]
        rook: Square,
    },
}

/// How the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    #[allow(missing_docs)]
    Checkmate { winner: Player },
    /// Too many moves were made without captures (see [`Rules`]).
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkmate { winner } => write!(
                f,
                "{} is in checkmate, {} wins",
                winner.opponent().name(),
                winner.name()
            ),
            Self::Draw => write!(f, "draw by move limit"),
        }
    }
}

/// The game is either waiting for one of the players or finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    #[allow(missing_docs)]
    WhiteToMove,
    #[allow(missing_docs)]
    BlackToMove,
    /// Terminal state: no more actions are accepted.
    Over(Outcome),
}

impl State {
    const fn to_move(player: Player) -> Self {
        match player {
            Player::White => Self::WhiteToMove,
            Player::Black => Self::BlackToMove,
        }
    }
}

/// Reasons for refusing an action. The game is not changed in either case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The game has already ended.
    GameOver,
    /// It is the other player's turn.
    NotYourTurn,
    /// The move breaks the piece movement rules or castling is not allowed.
    IllegalMove,
    /// The move would leave the player's own king in check.
    KingInCheck,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GameOver => "game is over",
            Self::NotYourTurn => "not your turn",
            Self::IllegalMove => "illegal move",
            Self::KingInCheck => "illegal move: king would be in check",
        })
    }
}

impl std::error::Error for Rejection {}

/// Adjustable rules of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    /// The game is drawn once the half-move clocks of both players (moves
    /// since the player's last capture) add up to more than the limit. `None`
    /// disables the rule.
    pub halfmove_draw_limit: Option<u16>,
}

impl Rules {
    /// Checks whether the position is drawn by the half-move limit.
    #[must_use]
    pub fn is_draw(&self, position: &Position) -> bool {
        self.halfmove_draw_limit.is_some_and(|limit| {
            u32::from(position.pieces(Player::White).halfmove_clock())
                + u32::from(position.pieces(Player::Black).halfmove_clock())
                > u32::from(limit)
        })
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            halfmove_draw_limit: Some(50),
        }
    }
}

/// Summary of an accepted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// What the move did, including [`MoveEffects::PROMOTION`].
    pub effects: MoveEffects,
    /// Number of the mover's pawns promoted after the move.
    pub promotions: usize,
    /// Whether the opponent is now in check.
    pub check: bool,
    /// Set when the action ended the game.
    pub outcome: Option<Outcome>,
}

/// A game between two players. White moves first.
///
/// ```
/// use tabiya::chess::core::{Player, Square};
/// use tabiya::chess::game::{Action, Game, State};
///
/// let mut game = Game::new();
/// let report = game
///     .submit(
///         Player::White,
///         Action::Move {
///             from: Square::new(5, 2),
///             to: Square::new(5, 4),
///         },
///     )
///     .unwrap();
/// assert!(!report.check);
/// assert_eq!(game.state(), State::BlackToMove);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    rules: Rules,
    state: State,
    ply: u32,
}

impl Game {
    /// Starts a game from the standard position with the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn with_rules(rules: Rules) -> Self {
        Self::from_position(Position::starting(), Player::White, rules)
    }

    /// Continues the game from an arbitrary position.
    #[must_use]
    pub const fn from_position(position: Position, side_to_move: Player, rules: Rules) -> Self {
        Self {
            position,
            rules,
            state: State::to_move(side_to_move),
            ply: 0,
        }
    }

    /// Parses the piece placement and the side to move: the first two fields
    /// of FEN, e.g. `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b`.
    ///
    /// # Errors
    ///
    /// See [`Position::from_fen`]. Both fields are required and nothing else
    /// is allowed.
    pub fn from_fen(input: &str, rules: Rules) -> anyhow::Result<Self> {
        let mut parts = input.split_whitespace();
        let Some(placement) = parts.next() else {
            bail!("incorrect FEN: missing pieces placement");
        };
        let position = Position::from_fen(placement)?;
        let side_to_move = match parts.next() {
            Some(side) => Player::try_from(side)?,
            None => bail!("incorrect FEN: missing side to move"),
        };
        if parts.next().is_some() {
            bail!("trailing symbols are not allowed in FEN");
        }
        Ok(Self::from_position(position, side_to_move, rules))
    }

    /// Plays the action for `player` if it is their turn and the action is
    /// legal.
    ///
    /// After the move, the mover's pawns on the last rank are promoted and the
    /// game ends if the opponent is checkmated or the half-move limit of the
    /// [`Rules`] is exceeded. Otherwise, the turn passes to the opponent.
    ///
    /// # Errors
    ///
    /// Returns the reason of refusal, the game is left intact.
    pub fn submit(&mut self, player: Player, action: Action) -> Result<MoveReport, Rejection> {
        let to_move = match self.state {
            State::WhiteToMove => Player::White,
            State::BlackToMove => Player::Black,
            State::Over(_) => return Err(Rejection::GameOver),
        };
        if player != to_move {
            return Err(Rejection::NotYourTurn);
        }

        let mut effects = self.position.attempt(player, action)?;
        let promotions = self.position.promote(player);
        if promotions > 0 {
            effects |= MoveEffects::PROMOTION;
        }
        self.ply += 1;

        let opponent = player.opponent();
        let check = self.position.is_in_check(opponent);
        let outcome = if check && self.position.is_checkmate(opponent) {
            Some(Outcome::Checkmate { winner: player })
        } else if self.rules.is_draw(&self.position) {
            Some(Outcome::Draw)
        } else {
            None
        };
        self.state = outcome.map_or(State::to_move(opponent), State::Over);

        Ok(MoveReport {
            effects,
            promotions,
            check,
            outcome,
        })
    }

    /// Returns the player expected to act next, or `None` if the game is
    /// over.
    #[must_use]
    pub const fn side_to_move(&self) -> Option<Player> {
        match self.state {
            State::WhiteToMove => Some(Player::White),
            State::BlackToMove => Some(Player::Black),
            State::Over(_) => None,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.state, State::Over(_))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Rules the game is played by.
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// Changes the rules for the rest of the game.
    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    /// Number of accepted actions.
    #[must_use]
    pub const fn ply(&self) -> u32 {
        self.ply
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
