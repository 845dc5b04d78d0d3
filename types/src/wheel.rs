use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{SelectionError, BLACK_NUMBERS, MAX_NUMBER, RED_NUMBERS};

/// Pocket color on a single-zero wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Black, Color::Green];

    /// Classify a pocket.
    ///
    /// The red/black partition is a fixed table, not a parity rule: 10 and 11 are both black,
    /// 18 and 19 are both red.
    pub fn of(number: u8) -> Color {
        if number == 0 {
            Color::Green
        } else if RED_NUMBERS.contains(&number) {
            Color::Red
        } else {
            Color::Black
        }
    }

    /// Numbers offered for this color, in table order.
    pub fn numbers(self) -> &'static [u8] {
        match self {
            Color::Red => &RED_NUMBERS,
            Color::Black => &BLACK_NUMBERS,
            Color::Green => &[0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Black => "Black",
            Color::Green => "Green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Color::Red),
            "black" | "b" => Ok(Color::Black),
            "green" | "g" => Ok(Color::Green),
            _ => Err(SelectionError::UnknownColor(raw.to_string())),
        }
    }
}

/// A color and number chosen together from the betting surface.
///
/// Only numbers of the chosen color are offered, so a pick is always consistent with the wheel
/// table: Green pairs only with 0, Red and Black only with their own pockets. Deserialization
/// goes through [`Pick::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPick")]
pub struct Pick {
    color: Color,
    number: u8,
}

impl Pick {
    pub fn new(color: Color, number: u8) -> Result<Self, SelectionError> {
        if number > MAX_NUMBER {
            return Err(SelectionError::NumberOutOfRange(number));
        }
        if Color::of(number) != color {
            return Err(SelectionError::ColorMismatch { color, number });
        }
        Ok(Self { color, number })
    }

    /// The first number offered for a color, which is what the surface preselects.
    pub fn first_of(color: Color) -> Self {
        let number = color.numbers()[0];
        Self { color, number }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn number(&self) -> u8 {
        self.number
    }
}

#[derive(Deserialize)]
struct RawPick {
    color: Color,
    number: u8,
}

impl TryFrom<RawPick> for Pick {
    type Error = SelectionError;

    fn try_from(raw: RawPick) -> Result<Self, Self::Error> {
        Pick::new(raw.color, raw.number)
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.number)
    }
}
