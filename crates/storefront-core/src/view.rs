use std::collections::BTreeMap;

use serde::Serialize;

use crate::cart::CartItem;
use crate::catalog::{Cents, Game, GameId};
use crate::filter::FilterState;
use crate::preferences::Preferences;
use crate::session::Session;

/// Everything the rendering layer reads, recomputed after each intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreView {
    pub visible_games: Vec<Game>,
    /// Free-priced games, unaffected by the filters.
    pub free_games: Vec<Game>,
    pub cart_items: Vec<CartItem>,
    pub cart_total_cents: Cents,
    /// `cart_total_cents` formatted as `$D.CC`.
    pub cart_total: String,
    /// Distinct cart lines, for the badge.
    pub cart_count: usize,
    pub wishlist_items: Vec<Game>,
    pub download_progress: BTreeMap<GameId, u8>,
    pub session: Session,
    pub notification_count: usize,
    pub filters: FilterState,
    pub preferences: Preferences,
}
