use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Unique catalog identifier for a game.
pub type GameId = u32;

/// Integer hundredths of the price unit.
pub type Cents = u64;

/// Genres offered by the browse-by-genre grid. These are UI categories and
/// do not have to match any catalog entry's genre.
pub const BROWSE_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "RPG",
    "Strategy",
    "Sports",
    "Simulation",
    "Indie",
    "Multiplayer",
    "Racing",
    "Horror",
    "Puzzle",
    "Shooter",
];

/// Listed price of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Price {
    Free,
    Priced(Cents),
}

impl Price {
    /// Ordering key used by the price sorts. Free sorts as -1 so it lands
    /// before every priced game in ascending order.
    pub fn sort_key(self) -> i64 {
        match self {
            Self::Free => -1,
            Self::Priced(cents) => i64::try_from(cents).unwrap_or(i64::MAX),
        }
    }

    /// Amount this price adds to a cart total. Free contributes nothing.
    pub fn total_contribution(self) -> Cents {
        match self {
            Self::Free => 0,
            Self::Priced(cents) => cents,
        }
    }

    pub fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Priced(cents) => write!(f, "{}", format_cents(*cents)),
        }
    }
}

/// Render a cent amount as `$D.CC`.
pub fn format_cents(cents: Cents) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// A purchasable game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub price: Price,
    pub genre: String,
    pub image_ref: String,
}

impl Game {
    pub fn new(
        id: GameId,
        name: impl Into<String>,
        price: Price,
        genre: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            genre: genre.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// Fixed, ordered list of games. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    games: Vec<Game>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(games: Vec<Game>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(games.len());
        for game in &games {
            if !seen.insert(game.id) {
                return Err(CatalogError::DuplicateId(game.id));
            }
        }
        Ok(Self { games })
    }

    /// The storefront's launch lineup.
    pub fn sample() -> Self {
        let games = vec![
            Game::new(1, "Fortnite", Price::Free, "Battle Royale", "/fortnite.jpg"),
            Game::new(
                2,
                "Assassin's Creed Mirage",
                Price::Priced(4999),
                "Action Adventure",
                "/ac-mirage.jpg",
            ),
            Game::new(3, "Alan Wake 2", Price::Priced(5999), "Horror", "/alan-wake-2.jpg"),
            Game::new(4, "Cyberpunk 2077", Price::Priced(5999), "RPG", "/cyberpunk-2077.jpg"),
            Game::new(5, "Hogwarts Legacy", Price::Priced(5999), "RPG", "/hogwarts-legacy.jpg"),
            Game::new(
                6,
                "Red Dead Redemption 2",
                Price::Priced(5999),
                "Action Adventure",
                "/rdr2.jpg",
            ),
            Game::new(7, "The Witcher 3", Price::Priced(3999), "RPG", "/witcher-3.jpg"),
            Game::new(8, "Rocket League", Price::Free, "Sports", "/rocket-league.jpg"),
            Game::new(9, "Fall Guys", Price::Free, "Party", "/fall-guys.jpg"),
        ];
        Self { games }
    }

    /// All games in catalog order.
    pub fn list(&self) -> &[Game] {
        &self.games
    }

    /// Free-priced games in catalog order. Filters and sort never apply.
    pub fn free_games(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(|g| g.price.is_free())
    }

    pub fn get(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}
