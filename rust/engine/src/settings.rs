use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// How many cards each stock draw turns over.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    #[default]
    One,
    Three,
}

/// How many times the talon may be turned back into the stock per deal.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipLimit {
    #[default]
    None,
    Zero,
    One,
    Three,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreVisibility {
    #[default]
    Show,
    Hide,
}

/// Player-adjustable settings, persisted with the game.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub draw: DrawMode,
    pub flip_limit: FlipLimit,
    pub score: ScoreVisibility,
}

impl DrawMode {
    pub fn to_byte(self) -> u8 {
        match self {
            DrawMode::One => 0,
            DrawMode::Three => 1,
        }
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(DrawMode::One),
            1 => Some(DrawMode::Three),
            _ => None,
        }
    }

    /// Extra window cards shown beside the playable talon card.
    pub fn extra_showing(self) -> usize {
        match self {
            DrawMode::One => 0,
            DrawMode::Three => 2,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DrawMode::One => DrawMode::Three,
            DrawMode::Three => DrawMode::One,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DrawMode::One => "one",
            DrawMode::Three => "three",
        }
    }
}

impl FlipLimit {
    pub fn to_byte(self) -> u8 {
        match self {
            FlipLimit::None => 0,
            FlipLimit::Zero => 1,
            FlipLimit::One => 2,
            FlipLimit::Three => 3,
        }
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(FlipLimit::None),
            1 => Some(FlipLimit::Zero),
            2 => Some(FlipLimit::One),
            3 => Some(FlipLimit::Three),
            _ => None,
        }
    }

    /// Whether another re-deal is allowed after `flips` re-deals.
    pub fn allows(self, flips: u8) -> bool {
        match self {
            FlipLimit::None => true,
            FlipLimit::Zero => false,
            FlipLimit::One => flips < 1,
            FlipLimit::Three => flips < 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            FlipLimit::None => FlipLimit::Zero,
            FlipLimit::Zero => FlipLimit::One,
            FlipLimit::One => FlipLimit::Three,
            FlipLimit::Three => FlipLimit::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlipLimit::None => "none",
            FlipLimit::Zero => "zero",
            FlipLimit::One => "one",
            FlipLimit::Three => "three",
        }
    }
}

impl ScoreVisibility {
    pub fn to_byte(self) -> u8 {
        match self {
            ScoreVisibility::Show => 0,
            ScoreVisibility::Hide => 1,
        }
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(ScoreVisibility::Show),
            1 => Some(ScoreVisibility::Hide),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ScoreVisibility::Show => ScoreVisibility::Hide,
            ScoreVisibility::Hide => ScoreVisibility::Show,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreVisibility::Show => "show",
            ScoreVisibility::Hide => "hide",
        }
    }
}

/// Error for a setting name that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized setting value '{0}'")]
pub struct ParseSettingError(pub String);

impl FromStr for DrawMode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "one" | "1" => Ok(DrawMode::One),
            "three" | "3" => Ok(DrawMode::Three),
            _ => Err(ParseSettingError(s.to_string())),
        }
    }
}

impl FromStr for FlipLimit {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "unlimited" | "no-limit" => Ok(FlipLimit::None),
            "zero" | "0" => Ok(FlipLimit::Zero),
            "one" | "1" => Ok(FlipLimit::One),
            "three" | "3" => Ok(FlipLimit::Three),
            _ => Err(ParseSettingError(s.to_string())),
        }
    }
}

impl FromStr for ScoreVisibility {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "show" => Ok(ScoreVisibility::Show),
            "hide" => Ok(ScoreVisibility::Hide),
            _ => Err(ParseSettingError(s.to_string())),
        }
    }
}
