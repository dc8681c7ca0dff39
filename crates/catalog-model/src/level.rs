//! Hierarchy levels and the configured level set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LevelParseError;

/// One of the four fixed ranks of the catalog hierarchy, shallowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Category,
    Subcategory,
    Class,
    Product,
}

impl Level {
    /// All levels in depth order.
    pub const ALL: [Level; 4] = [
        Level::Category,
        Level::Subcategory,
        Level::Class,
        Level::Product,
    ];

    /// Lowercase name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::Class => "class",
            Self::Product => "product",
        }
    }

    /// Short tag used when composing node ids.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Category => "c",
            Self::Subcategory => "s",
            Self::Class => "k",
            Self::Product => "p",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" | "cat" => Ok(Self::Category),
            "subcategory" | "sub" => Ok(Self::Subcategory),
            "class" => Ok(Self::Class),
            "product" => Ok(Self::Product),
            _ => Err(LevelParseError::UnknownLevel(s.to_string())),
        }
    }
}

/// The subset of levels materialized when building a tree.
///
/// `Category` is always a member; constructing a set without it adds it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Level>", into = "Vec<Level>")]
pub struct LevelSet {
    mask: u8,
}

impl LevelSet {
    /// Build a level set from any collection of levels.
    pub fn new(levels: impl IntoIterator<Item = Level>) -> Self {
        let mut mask = Level::Category.bit();
        for level in levels {
            mask |= level.bit();
        }
        Self { mask }
    }

    /// Every level: category, subcategory, class and product.
    pub fn all() -> Self {
        Self::new(Level::ALL)
    }

    /// Returns a copy with `level` added.
    #[must_use]
    pub fn with(mut self, level: Level) -> Self {
        self.mask |= level.bit();
        self
    }

    #[inline]
    pub fn contains(&self, level: Level) -> bool {
        self.mask & level.bit() != 0
    }

    /// Active levels in depth order.
    pub fn iter(&self) -> impl Iterator<Item = Level> + '_ {
        Level::ALL
            .into_iter()
            .filter(move |level| self.contains(*level))
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::all()
    }
}

impl From<Vec<Level>> for LevelSet {
    fn from(levels: Vec<Level>) -> Self {
        Self::new(levels)
    }
}

impl From<LevelSet> for Vec<Level> {
    fn from(set: LevelSet) -> Self {
        set.iter().collect()
    }
}

impl FromStr for LevelSet {
    type Err = LevelParseError;

    /// Parses a comma-separated list such as `category,subcategory,product`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let levels = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Level>, _>>()?;
        Ok(Self::new(levels))
    }
}

impl fmt::Display for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|level| level.as_str()).collect();
        f.write_str(&names.join(","))
    }
}
