use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Robot command vocabulary accepted in reference code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Forward,
    Left,
    Right,
    Reverse,
}

impl Command {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Forward => "forward",
            Command::Left => "left",
            Command::Right => "right",
            Command::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ChartError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_lowercase().as_str() {
            "forward" => Ok(Command::Forward),
            "left" => Ok(Command::Left),
            "right" => Ok(Command::Right),
            "reverse" => Ok(Command::Reverse),
            _ => Err(ChartError::InvalidReferenceCode(format!(
                "unknown command `{token}`; use forward, right, left, reverse"
            ))),
        }
    }
}

/// Instructor-supplied ideal program. The default value is the unset state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReferenceCode {
    commands: Vec<Command>,
}

impl ReferenceCode {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Validates whitespace-separated commands, case-insensitively.
    pub fn parse(input: &str) -> ChartResult<Self> {
        if input.trim().is_empty() {
            return Err(ChartError::InvalidReferenceCode(
                "reference code must not be empty".to_owned(),
            ));
        }
        let commands = input
            .split_whitespace()
            .map(Command::from_str)
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self { commands })
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        !self.commands.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(command.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, ReferenceCode};
    use crate::ChartError;

    #[test]
    fn parse_is_case_insensitive_and_keeps_order() {
        let code = ReferenceCode::parse("Forward RIGHT  right forward Left").expect("code");
        assert_eq!(
            code.commands(),
            &[
                Command::Forward,
                Command::Right,
                Command::Right,
                Command::Forward,
                Command::Left
            ]
        );
        assert_eq!(code.to_string(), "forward right right forward left");
    }

    #[test]
    fn parse_rejects_blank_and_unknown_tokens() {
        assert!(matches!(
            ReferenceCode::parse("   "),
            Err(ChartError::InvalidReferenceCode(_))
        ));
        let err = ReferenceCode::parse("forward jump").expect_err("unknown token");
        assert!(err.to_string().contains("jump"));
    }

    #[test]
    fn default_is_unset() {
        assert!(!ReferenceCode::none().is_set());
    }
}
