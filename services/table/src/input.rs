//! Terminal command parsing.

use soulbet_types::{BetSlip, Color, Pick, SelectionError};
use thiserror::Error;

use crate::driver::Command;

pub const HELP: &str = "\
commands:
  bet <amount> <color> <number>   spin with a bet on a color and one of its numbers
  sacrifice                       trade clock time once the sacrifice is ready
  status                          show money, turn, clock and sacrifice charge
  numbers <color>                 list the numbers offered for a color
  help                            show this help
  quit                            leave the table";

const BET_USAGE: &str = "bet <amount> <color> <number>";
const NUMBERS_USAGE: &str = "numbers <color>";

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Forwarded to the session driver.
    Command(Command),
    Numbers(Color),
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Parse a line. Blank lines yield `None`.
///
/// The bet amount is passed through as typed; the controller decides whether it is valid.
pub fn parse_line(line: &str) -> Result<Option<Input>, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let input = match head.to_ascii_lowercase().as_str() {
        "bet" => {
            let [amount, color, number] = rest.as_slice() else {
                return Err(InputError::Usage(BET_USAGE));
            };
            let color: Color = color.parse()?;
            let number: u8 = number.parse().map_err(|_| InputError::Usage(BET_USAGE))?;
            let pick = Pick::new(color, number)?;
            Input::Command(Command::PlaceBet(BetSlip::new(*amount, pick)))
        }
        "numbers" => {
            let [color] = rest.as_slice() else {
                return Err(InputError::Usage(NUMBERS_USAGE));
            };
            Input::Numbers(color.parse()?)
        }
        "sacrifice" => Input::Command(Command::UseSacrifice),
        "status" => Input::Command(Command::Status),
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Command(Command::Quit),
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Some(input))
}

/// `"Red: 1 3 5 ..."`
pub fn describe_numbers(color: Color) -> String {
    let numbers: Vec<String> = color.numbers().iter().map(u8::to_string).collect();
    format!("{color}: {}", numbers.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bet() {
        let input = parse_line("  bet 100 red 7 ").unwrap().unwrap();
        assert_eq!(
            input,
            Input::Command(Command::PlaceBet(BetSlip::new(
                "100",
                Pick::new(Color::Red, 7).unwrap()
            )))
        );
    }

    #[test]
    fn test_bet_amount_is_passed_through() {
        let Some(Input::Command(Command::PlaceBet(slip))) =
            parse_line("bet abc black 2").unwrap()
        else {
            panic!("expected a bet");
        };
        assert_eq!(slip.amount, "abc");
    }

    #[test]
    fn test_bet_rejects_inconsistent_pick() {
        assert_eq!(
            parse_line("bet 10 green 7"),
            Err(InputError::Selection(SelectionError::ColorMismatch {
                color: Color::Green,
                number: 7
            }))
        );
        assert_eq!(
            parse_line("bet 10 purple 7"),
            Err(InputError::Selection(SelectionError::UnknownColor(
                "purple".to_string()
            )))
        );
        assert_eq!(parse_line("bet 10 red"), Err(InputError::Usage(BET_USAGE)));
        assert_eq!(
            parse_line("bet 10 red seven"),
            Err(InputError::Usage(BET_USAGE))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(
            parse_line("SACRIFICE"),
            Ok(Some(Input::Command(Command::UseSacrifice)))
        );
        assert_eq!(parse_line("status"), Ok(Some(Input::Command(Command::Status))));
        assert_eq!(parse_line("quit"), Ok(Some(Input::Command(Command::Quit))));
        assert_eq!(parse_line("help"), Ok(Some(Input::Help)));
        assert_eq!(
            parse_line("numbers g"),
            Ok(Some(Input::Numbers(Color::Green)))
        );
        assert_eq!(
            parse_line("dance"),
            Err(InputError::UnknownCommand("dance".to_string()))
        );
    }

    #[test]
    fn test_describe_numbers() {
        assert_eq!(describe_numbers(Color::Green), "Green: 0");
        assert!(describe_numbers(Color::Red).starts_with("Red: 1 3 5 7 9 12"));
    }
}
