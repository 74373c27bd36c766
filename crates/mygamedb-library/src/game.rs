//! Platforms, content ratings and searchable fields

use crate::CatalogError;
use std::fmt;
use std::str::FromStr;

/// Platforms a game can be catalogued under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Xbox One
    Xone,
    /// PlayStation 4
    Ps4,
    /// Wii U
    WiiU,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Xone, Platform::Ps4, Platform::WiiU];

    /// Value persisted in the platform column
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Xone => "XONE",
            Platform::Ps4 => "PS4",
            Platform::WiiU => "WiiU",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Xone => "Xbox One",
            Platform::Ps4 => "PlayStation 4",
            Platform::WiiU => "WiiU",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidPlatform(s.to_string()))
    }
}

/// ESRB content ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    /// Everyone 10 and up
    E10Plus,
    Teen,
    Mature,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::E10Plus, Rating::Teen, Rating::Mature];

    /// Value persisted in the rating column
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::E10Plus => "E10+",
            Rating::Teen => "T",
            Rating::Mature => "M",
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match self {
            Rating::E10Plus => "Everyone 10 and up",
            Rating::Teen => "Teen",
            Rating::Mature => "Mature",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidRating(s.to_string()))
    }
}

/// Columns that can be matched with [`CatalogStore::find_by_field`]
///
/// [`CatalogStore::find_by_field`]: crate::CatalogStore::find_by_field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameField {
    Platform,
    Rating,
}

impl GameField {
    /// Column name in the catalog table
    pub fn column(&self) -> &'static str {
        match self {
            GameField::Platform => "platform",
            GameField::Rating => "rating",
        }
    }
}

impl FromStr for GameField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform" => Ok(GameField::Platform),
            "rating" => Ok(GameField::Rating),
            other => Err(CatalogError::InvalidField(other.to_string())),
        }
    }
}
