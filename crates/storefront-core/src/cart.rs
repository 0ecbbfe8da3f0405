use serde::{Deserialize, Serialize};

use crate::catalog::{Cents, Game, GameId};

/// One cart line. There is at most one per game id and its quantity is
/// always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub game: Game,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line; Free lines total zero.
    pub fn line_total(&self) -> Cents {
        self.game
            .price
            .total_contribution()
            .saturating_mul(u64::from(self.quantity))
    }
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now holds exactly this quantity.
    Updated(u32),
    /// The requested quantity was zero or negative, so the line was dropped.
    Removed,
    /// No line for that id; nothing changed.
    NotFound,
}

/// Shopping cart contents in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `game`, merging with an existing line for the same id.
    /// Returns the line's quantity after the add.
    pub fn add_item(&mut self, game: &Game) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|i| i.game.id == game.id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }
        self.items.push(CartItem {
            game: game.clone(),
            quantity: 1,
        });
        1
    }

    /// Remove the line for `id`. Absent ids are a no-op.
    pub fn remove_item(&mut self, id: GameId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.game.id != id);
        self.items.len() != before
    }

    /// Set the quantity for `id` to exactly `new_quantity`.
    ///
    /// Zero or negative quantities remove the line. Values beyond `u32::MAX`
    /// are clamped.
    pub fn update_quantity(&mut self, id: GameId, new_quantity: i64) -> QuantityUpdate {
        let Some(pos) = self.items.iter().position(|i| i.game.id == id) else {
            return QuantityUpdate::NotFound;
        };
        if new_quantity <= 0 {
            self.items.remove(pos);
            return QuantityUpdate::Removed;
        }
        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        self.items[pos].quantity = quantity;
        QuantityUpdate::Updated(quantity)
    }

    /// Sum of every line's price times quantity, in cents.
    pub fn total(&self) -> Cents {
        self.items
            .iter()
            .fold(0, |acc: Cents, item| acc.saturating_add(item.line_total()))
    }

    /// Number of distinct lines, as shown on the cart badge.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines.
    pub fn units(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn quantity_of(&self, id: GameId) -> Option<u32> {
        self.items
            .iter()
            .find(|i| i.game.id == id)
            .map(|i| i.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
