//! Player commands typed at the prompt.
use std::str::FromStr;

use tactics_core::{StanceKind, UnitId};

pub const HELP: &str = "\
commands:
  move                          spend the movement action
  attack <unit> [slot] [burst]  attack a unit (#id) with a loadout slot
  stance <name>                 neutral | defensive | aggressive | focused | evasive
  reload [slot]                 reload a ranged weapon
  end                           end the turn
  status                        show combatants and loadout
  help                          show this text
  quit                          leave the battle";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move,
    Attack {
        target: UnitId,
        slot: usize,
        burst: Option<u32>,
    },
    Stance(StanceKind),
    Reload(usize),
    End,
    Status,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("cannot read '{0}' as a number")]
    BadNumber(String),

    #[error("unknown stance '{0}'")]
    BadStance(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?;

        match head.to_ascii_lowercase().as_str() {
            "move" | "m" => Ok(Command::Move),
            "attack" | "a" => {
                let target = words.next().ok_or(CommandError::MissingArgument {
                    command: "attack",
                    expected: "a target unit",
                })?;
                let target = UnitId(number(target.trim_start_matches('#'))?);
                let slot = words.next().map(number).transpose()?.unwrap_or(0);
                let burst = words.next().map(number).transpose()?;
                Ok(Command::Attack {
                    target,
                    slot,
                    burst,
                })
            }
            "stance" | "s" => {
                let name = words.next().ok_or(CommandError::MissingArgument {
                    command: "stance",
                    expected: "a stance name",
                })?;
                name.parse()
                    .map(Command::Stance)
                    .map_err(|_| CommandError::BadStance(name.to_string()))
            }
            "reload" | "r" => Ok(Command::Reload(
                words.next().map(number).transpose()?.unwrap_or(0),
            )),
            "end" | "e" => Ok(Command::End),
            "status" | "st" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn number<T: FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::BadNumber(word.to_string()))
}
