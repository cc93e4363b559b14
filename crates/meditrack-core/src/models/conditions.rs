use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::MediTrackError;

/// Calendar season, derived from the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }
}

/// Coarse climate label, derived from the season of the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Rainy,
    Dry,
    Cold,
    Hot,
}

impl Climate {
    pub const ALL: [Climate; 4] = [Climate::Rainy, Climate::Dry, Climate::Cold, Climate::Hot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rainy => "rainy",
            Self::Dry => "dry",
            Self::Cold => "cold",
            Self::Hot => "hot",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = MediTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| MediTrackError::invalid_value("season", s))
    }
}

impl FromStr for Climate {
    type Err = MediTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Climate::ALL
            .into_iter()
            .find(|climate| climate.as_str() == s)
            .ok_or_else(|| MediTrackError::invalid_value("climate", s))
    }
}

/// The season and climate that apply at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    pub season: Season,
    pub climate: Climate,
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.season, self.climate)
    }
}
