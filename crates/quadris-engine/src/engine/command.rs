use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A discrete input applied to a playing game.
///
/// Commands arriving outside the `Playing` phase are ignored. The kebab-case
/// tag is shared by `Display`, `FromStr` and serde.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    #[display("move-left")]
    MoveLeft,
    #[display("move-right")]
    MoveRight,
    /// Move one row down, locking the piece if it cannot descend.
    #[display("soft-drop")]
    SoftDrop,
    /// Drop to the lowest valid row and lock immediately.
    #[display("hard-drop")]
    HardDrop,
    /// Rotate clockwise, resolving wall kicks.
    #[display("rotate")]
    Rotate,
    /// Gravity step scheduled by the driver.
    #[display("tick")]
    Tick,
}

impl Command {
    pub const ALL: [Self; 6] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::Rotate,
        Command::Tick,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown command: {tag:?}")]
pub struct UnknownCommandError {
    tag: String,
}

/// Parses a kebab-case command tag.
///
/// ```
/// use quadris_engine::Command;
///
/// assert_eq!("hard-drop".parse::<Command>(), Ok(Command::HardDrop));
/// assert!("hold".parse::<Command>().is_err());
/// ```
impl FromStr for Command {
    type Err = UnknownCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.to_string() == s)
            .ok_or_else(|| UnknownCommandError { tag: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for command in Command::ALL {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
            let json = serde_json::to_string(&command).unwrap();
            assert_eq!(json, format!("\"{command}\""));
            assert_eq!(serde_json::from_str::<Command>(&json).unwrap(), command);
        }
        assert_eq!(Command::SoftDrop.to_string(), "soft-drop");
        assert_eq!(Command::MoveRight.to_string(), "move-right");
    }

    #[test]
    fn test_unknown_tag_fails_fast() {
        let err = "MoveLeft".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "unknown command: \"MoveLeft\"");
        assert!(serde_json::from_str::<Command>("\"pause\"").is_err());
    }
}
