//! Line-oriented text protocol of the engine. Each line of the input is a
//! single command; the arguments are separated by whitespace.

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    NewGame,
    /// `position startpos` or `position fen <placement> <side to move>`.
    SetPosition {
        fen: Option<String>,
    },
    Move {
        from: String,
        to: String,
    },
    Castle {
        rook: String,
    },
    Board,
    Labels,
    Status,
    SetOption {
        option: EngineOption,
        value: OptionValue,
    },
    Version,
    Quit,
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub(super) enum EngineOption {
    DrawLimit,
}

#[derive(Debug, PartialEq, Eq)]
pub(super) enum OptionValue {
    Integer(usize),
    Disabled,
}

fn parse_setoption(parts: &[&str]) -> Command {
    if parts.len() > 3 && parts[1] == "name" {
        let name_end = parts
            .iter()
            .position(|&x| x == "value")
            .unwrap_or(parts.len());
        let option = match parts[2..name_end].join(" ").as_str() {
            "DrawLimit" => EngineOption::DrawLimit,
            _ => return Command::Unknown(parts.join(" ")),
        };
        let value = match parts.get(name_end + 1..) {
            Some(["none"]) => Some(OptionValue::Disabled),
            Some([value]) => value.parse::<usize>().ok().map(OptionValue::Integer),
            _ => None,
        };
        match value {
            Some(value) => Command::SetOption { option, value },
            None => Command::Unknown(parts.join(" ")),
        }
    } else {
        Command::Unknown(parts.join(" "))
    }
}

fn parse_setposition(parts: &[&str]) -> Command {
    match parts.get(1..) {
        Some(["startpos"]) => Command::SetPosition { fen: None },
        Some(["fen", fen @ ..]) if !fen.is_empty() => Command::SetPosition {
            fen: Some(fen.join(" ")),
        },
        _ => Command::Unknown(parts.join(" ")),
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            ["new"] => Self::NewGame,
            ["position", ..] => parse_setposition(&parts),
            ["move", from, to] => Self::Move {
                from: (*from).to_string(),
                to: (*to).to_string(),
            },
            ["castle", rook] => Self::Castle {
                rook: (*rook).to_string(),
            },
            ["board"] => Self::Board,
            ["labels"] => Self::Labels,
            ["status"] => Self::Status,
            ["setoption", ..] => parse_setoption(&parts),
            ["version"] => Self::Version,
            ["quit"] => Self::Quit,
            _ => Self::Unknown(input.trim().to_string()),
        }
    }
}
