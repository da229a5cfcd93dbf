// ABOUTME: Indexer category codes and their query-string serialisation.
// ABOUTME: Provides the standard TV and movie category constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric indexer category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category(pub u32);

impl Category {
    /// All TV shows.
    pub const TV_ALL: Category = Category(5000);
    /// Foreign TV shows.
    pub const TV_FOREIGN: Category = Category(5020);
    /// Standard-definition TV shows.
    pub const TV_SD: Category = Category(5030);
    /// High-definition TV shows.
    pub const TV_HD: Category = Category(5040);
    /// Other TV shows.
    pub const TV_OTHER: Category = Category(5050);
    /// Sports shows.
    pub const TV_SPORT: Category = Category(5060);

    /// All movies.
    pub const MOVIE_ALL: Category = Category(2000);
    /// Foreign movies.
    pub const MOVIE_FOREIGN: Category = Category(2010);
    /// Other movies.
    pub const MOVIE_OTHER: Category = Category(2020);
    /// Standard-definition movies.
    pub const MOVIE_SD: Category = Category(2030);
    /// High-definition movies.
    pub const MOVIE_HD: Category = Category(2040);
    /// Blu-ray movies.
    pub const MOVIE_BLURAY: Category = Category(2050);
    /// 3-D movies.
    pub const MOVIE_3D: Category = Category(2060);
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialises categories as the comma-joined list the API query string
/// expects.
pub fn stringify_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(Category::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
