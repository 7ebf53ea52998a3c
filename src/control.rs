//! Control-surface commands.
//!
//! Buttons and menus on the control surface map to a [`Command`]. The text
//! form is what the headless driver reads, one command per line:
//!
//! ```text
//! zoom-in
//! move-left
//! export png
//! source noise_5x5
//! ```

use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::viewport::Direction;
use std::fmt;
use std::str::FromStr;

/// One control-surface action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Step the zoom up.
    ZoomIn,
    /// Step the zoom down.
    ZoomOut,
    /// Shift the window by one pan step.
    Pan(Direction),
    /// Drop the selection.
    ClearSelection,
    /// Export the selection in the given format.
    Export(ExportFormat),
    /// Load another dataset.
    ChangeSource(String),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let unknown = || Error::UnknownCommand(s.trim().to_string());

        let head = words.next().ok_or_else(unknown)?;
        let arg = words.next();
        if words.next().is_some() {
            return Err(unknown());
        }

        let command = match (head, arg) {
            ("zoom-in", None) => Self::ZoomIn,
            ("zoom-out", None) => Self::ZoomOut,
            ("clear", None) => Self::ClearSelection,
            ("export", Some(format)) => Self::Export(format.parse()?),
            ("source", Some(name)) => Self::ChangeSource(name.to_string()),
            (head, None) => match head.strip_prefix("move-") {
                Some(direction) => Self::Pan(direction.parse()?),
                None => return Err(unknown()),
            },
            _ => return Err(unknown()),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoomIn => f.write_str("zoom-in"),
            Self::ZoomOut => f.write_str("zoom-out"),
            Self::Pan(direction) => write!(f, "move-{direction}"),
            Self::ClearSelection => f.write_str("clear"),
            Self::Export(format) => write!(f, "export {format}"),
            Self::ChangeSource(name) => write!(f, "source {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("zoom-in".parse::<Command>().unwrap(), Command::ZoomIn);
        assert_eq!(" zoom-out ".parse::<Command>().unwrap(), Command::ZoomOut);
        assert_eq!("clear".parse::<Command>().unwrap(), Command::ClearSelection);
    }

    #[test]
    fn test_parse_pan() {
        for direction in Direction::ALL {
            let text = format!("move-{direction}");
            assert_eq!(text.parse::<Command>().unwrap(), Command::Pan(direction));
        }
        assert!(matches!(
            "move-sideways".parse::<Command>(),
            Err(Error::UnknownDirection(_))
        ));
    }

    #[test]
    fn test_parse_export_and_source() {
        assert_eq!(
            "export png".parse::<Command>().unwrap(),
            Command::Export(ExportFormat::Png)
        );
        assert_eq!(
            "source noise_5x5".parse::<Command>().unwrap(),
            Command::ChangeSource("noise_5x5".to_string())
        );
        assert!(matches!(
            "export bmp".parse::<Command>(),
            Err(Error::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_parse_unknown() {
        for text in ["", "zoom", "explode", "export", "source", "clear now", "source a b"] {
            assert!(
                matches!(text.parse::<Command>(), Err(Error::UnknownCommand(_))),
                "{text:?} should be unknown"
            );
        }
    }

    #[test]
    fn test_display_parses_back() {
        let commands = [
            Command::ZoomIn,
            Command::ZoomOut,
            Command::Pan(Direction::Left),
            Command::ClearSelection,
            Command::Export(ExportFormat::Json),
            Command::ChangeSource("logo".to_string()),
        ];
        for command in commands {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
    }
}
