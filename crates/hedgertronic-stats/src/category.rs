// Career categories and the fixed level -> category mapping.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Top-level grouping of a pitching career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Category {
    College,
    Summer,
    Independent,
    #[default]
    Minors,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category `{0}` (expected College, Summer, Independent or Minors)")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Display order for selectors and career-total rows.
    pub const ALL: [Category; 4] = [
        Category::College,
        Category::Summer,
        Category::Independent,
        Category::Minors,
    ];

    /// Exact match on the canonical name, as stored in the stats table.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "College" => Some(Category::College),
            "Summer" => Some(Category::Summer),
            "Independent" => Some(Category::Independent),
            "Minors" => Some(Category::Minors),
            _ => None,
        }
    }

    /// Map a level code to its category.
    ///
    /// A level that is itself a category name maps to that category; anything
    /// else is unmapped.
    pub fn from_level(level: &str) -> Option<Self> {
        match level {
            "NCAA" => Some(Category::College),
            "Summer" => Some(Category::Summer),
            "Independent" => Some(Category::Independent),
            "Rk+" | "A-" | "A+" | "AA" | "AAA" => Some(Category::Minors),
            other => Category::from_name(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::College => "College",
            Category::Summer => "Summer",
            Category::Independent => "Independent",
            Category::Minors => "Minors",
        }
    }

    /// Affiliated pro ball: rows show organizations and per-level badges
    /// rather than a team and a single league.
    pub fn is_affiliated(&self) -> bool {
        matches!(self, Category::Minors)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse, for CLI flags and config values.
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
