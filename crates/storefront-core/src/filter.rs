use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Game};

/// Ordering applied to the visible games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Featured,
    PriceAscending,
    PriceDescending,
}

/// Search query, genre filters and sort order chosen by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub genres: BTreeSet<String>,
    pub sort_order: SortOrder,
    /// Tracked for the rendering layer. No catalog entry carries a rating,
    /// so this does not gate anything.
    pub show_adult_content: bool,
}

impl FilterState {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Add the genre if absent, remove it if present. Returns true when the
    /// genre is active after the call.
    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        if self.genres.remove(genre) {
            false
        } else {
            self.genres.insert(genre.to_string());
            true
        }
    }

    pub fn clear_genres(&mut self) {
        self.genres.clear();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn toggle_adult_content(&mut self) -> bool {
        self.show_adult_content = !self.show_adult_content;
        self.show_adult_content
    }

    fn matches(&self, game: &Game, query_lower: &str) -> bool {
        game.name.to_lowercase().contains(query_lower)
            && (self.genres.is_empty() || self.genres.contains(&game.genre))
    }
}

/// Compute the games to show for the given filter state, in display order.
///
/// Filtering keeps games whose name contains the query (case-insensitive) and,
/// when any genre is selected, whose genre is one of them. Sorting is stable,
/// so games with equal sort keys keep catalog order in both price directions.
pub fn visible_games(catalog: &Catalog, filter: &FilterState) -> Vec<Game> {
    let query_lower = filter.query.to_lowercase();
    let mut games: Vec<Game> = catalog
        .list()
        .iter()
        .filter(|g| filter.matches(g, &query_lower))
        .cloned()
        .collect();

    match filter.sort_order {
        SortOrder::Featured => {},
        SortOrder::PriceAscending => games.sort_by_key(|g| g.price.sort_key()),
        SortOrder::PriceDescending => {
            games.sort_by(|a, b| b.price.sort_key().cmp(&a.price.sort_key()));
        },
    }
    games
}
