use crate::catalog::{Game, GameId};

/// Saved games, unique by id, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    items: Vec<Game>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `game` unless an entry with the same id exists.
    pub fn add_item(&mut self, game: &Game) -> bool {
        if self.contains(game.id) {
            return false;
        }
        self.items.push(game.clone());
        true
    }

    /// Remove the entry for `id`. Absent ids are a no-op.
    pub fn remove_item(&mut self, id: GameId) -> bool {
        let before = self.items.len();
        self.items.retain(|g| g.id != id);
        self.items.len() != before
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.items.iter().any(|g| g.id == id)
    }

    pub fn items(&self) -> &[Game] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
