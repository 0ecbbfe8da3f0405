use std::collections::BTreeMap;

use crate::cart::{Cart, CartItem, QuantityUpdate};
use crate::catalog::{Catalog, Cents, Game, GameId, format_cents};
use crate::downloads::{Downloads, TickReport};
use crate::error::StoreError;
use crate::filter::{FilterState, SortOrder, visible_games};
use crate::intents::Intent;
use crate::notifications::{Notification, NotificationQueue};
use crate::preferences::{Currency, Language, Preferences, StoreTab};
use crate::session::{Credentials, Session, SessionIdentity, SessionManager};
use crate::view::StoreView;
use crate::wishlist::Wishlist;

/// Top-level storefront state. Each concern lives in its own slice and is
/// only changed through the intent methods below.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    downloads: Downloads,
    filters: FilterState,
    session: SessionManager,
    notifications: NotificationQueue,
    preferences: Preferences,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new(Catalog::sample(), SessionIdentity::default())
    }
}

impl Storefront {
    pub fn new(catalog: Catalog, identity: SessionIdentity) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            wishlist: Wishlist::new(),
            downloads: Downloads::new(),
            filters: FilterState::default(),
            session: SessionManager::new(identity),
            notifications: NotificationQueue::new(),
            preferences: Preferences::default(),
        }
    }

    /// Seed the filter and preference slices, e.g. from host configuration.
    pub fn with_defaults(mut self, filters: FilterState, preferences: Preferences) -> Self {
        self.filters = filters;
        self.preferences = preferences;
        self
    }

    fn game(&self, id: GameId) -> Result<&Game, StoreError> {
        self.catalog.get(id).ok_or(StoreError::UnknownGame(id))
    }

    // ----------------------------------------------------------------
    // Intents
    // ----------------------------------------------------------------

    pub fn add_to_cart(&mut self, id: GameId) -> Result<u32, StoreError> {
        let game = self.game(id)?.clone();
        let quantity = self.cart.add_item(&game);
        tracing::debug!(game_id = id, quantity, "Added to cart");
        Ok(quantity)
    }

    pub fn remove_from_cart(&mut self, id: GameId) -> bool {
        self.cart.remove_item(id)
    }

    pub fn set_quantity(&mut self, id: GameId, quantity: i64) -> QuantityUpdate {
        let outcome = self.cart.update_quantity(id, quantity);
        if outcome == QuantityUpdate::Removed {
            tracing::debug!(game_id = id, quantity, "Quantity dropped to zero, removed line");
        }
        outcome
    }

    pub fn add_to_wishlist(&mut self, id: GameId) -> Result<bool, StoreError> {
        let game = self.game(id)?.clone();
        Ok(self.wishlist.add_item(&game))
    }

    pub fn remove_from_wishlist(&mut self, id: GameId) -> bool {
        self.wishlist.remove_item(id)
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.filters.set_query(text);
    }

    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        self.filters.toggle_genre(genre)
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.filters.set_sort_order(order);
    }

    pub fn toggle_adult_content(&mut self) -> bool {
        self.filters.toggle_adult_content()
    }

    pub fn start_download(&mut self, id: GameId) -> Result<bool, StoreError> {
        self.game(id)?;
        let started = self.downloads.start(id);
        if started {
            tracing::info!(game_id = id, "Download started");
        }
        Ok(started)
    }

    pub fn login(&mut self, credentials: &Credentials) -> &Session {
        let session = self.session.login(credentials);
        if let Session::Authenticated { name, .. } = session {
            tracing::info!(user = %name, "Signed in");
        }
        session
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Send a catalog game to someone else. Nothing is charged; the sender
    /// gets a confirmation notification.
    pub fn send_gift(&mut self, id: GameId, recipient: &str) -> Result<(), StoreError> {
        let name = self.game(id)?.name.clone();
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(StoreError::EmptyRecipient);
        }
        tracing::debug!(game_id = id, "Gift sent");
        self.notifications.push(Notification::new(
            "Gift sent",
            Some(format!("{name} sent to {recipient}")),
        ));
        Ok(())
    }

    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn clear_notifications(&mut self) -> usize {
        self.notifications.clear_all()
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.preferences.set_currency(currency);
    }

    pub fn set_language(&mut self, language: Language) {
        self.preferences.set_language(language);
    }

    pub fn set_active_tab(&mut self, tab: StoreTab) {
        self.preferences.set_active_tab(tab);
    }

    /// Apply a decoded intent. A rejected intent leaves every slice unchanged.
    pub fn apply(&mut self, intent: Intent) -> Result<(), StoreError> {
        tracing::debug!(intent = intent.kind(), "Applying intent");
        match intent {
            Intent::AddToCart { game_id } => {
                self.add_to_cart(game_id)?;
            },
            Intent::RemoveFromCart { game_id } => {
                self.remove_from_cart(game_id);
            },
            Intent::SetQuantity { game_id, quantity } => {
                self.set_quantity(game_id, quantity);
            },
            Intent::AddToWishlist { game_id } => {
                self.add_to_wishlist(game_id)?;
            },
            Intent::RemoveFromWishlist { game_id } => {
                self.remove_from_wishlist(game_id);
            },
            Intent::SetQuery { text } => self.set_query(text),
            Intent::ToggleGenre { genre } => {
                self.toggle_genre(&genre);
            },
            Intent::SetSortOrder { order } => self.set_sort_order(order),
            Intent::ToggleAdultContent => {
                self.toggle_adult_content();
            },
            Intent::StartDownload { game_id } => {
                self.start_download(game_id)?;
            },
            Intent::SendGift { game_id, recipient } => self.send_gift(game_id, &recipient)?,
            Intent::Login { email, password } => {
                let credentials = Credentials::new(email, &password)?;
                self.login(&credentials);
            },
            Intent::Logout => self.logout(),
            Intent::PushNotification { title, body } => {
                self.push_notification(Notification::new(title, body));
            },
            Intent::ClearNotifications => {
                self.clear_notifications();
            },
            Intent::SetCurrency { currency } => self.set_currency(currency),
            Intent::SetLanguage { language } => self.set_language(language),
            Intent::SetActiveTab { tab } => self.set_active_tab(tab),
        }
        Ok(())
    }

    /// Advance all active downloads by one step and announce the ones that
    /// finished.
    pub fn tick_downloads(&mut self) -> TickReport {
        let report = self.downloads.tick();
        for &id in &report.completed {
            let name = self
                .catalog
                .get(id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| format!("Game {id}"));
            tracing::info!(game_id = id, "Download complete");
            self.notifications.push(Notification::new(
                "Download complete",
                Some(format!("{name} is ready to play")),
            ));
        }
        report
    }

    // ----------------------------------------------------------------
    // Derived views
    // ----------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn visible_games(&self) -> Vec<Game> {
        visible_games(&self.catalog, &self.filters)
    }

    pub fn free_games(&self) -> Vec<Game> {
        self.catalog.free_games().cloned().collect()
    }

    pub fn cart_items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn cart_total(&self) -> Cents {
        self.cart.total()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn wishlist_items(&self) -> &[Game] {
        self.wishlist.items()
    }

    pub fn downloads(&self) -> &Downloads {
        &self.downloads
    }

    pub fn download_progress(&self) -> &BTreeMap<GameId, u8> {
        self.downloads.progress_by_id()
    }

    pub fn current_session(&self) -> &Session {
        self.session.current()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Snapshot every derived view.
    pub fn view(&self) -> StoreView {
        let total = self.cart_total();
        StoreView {
            visible_games: self.visible_games(),
            free_games: self.free_games(),
            cart_items: self.cart_items().to_vec(),
            cart_total_cents: total,
            cart_total: format_cents(total),
            cart_count: self.cart.size(),
            wishlist_items: self.wishlist_items().to_vec(),
            download_progress: self.download_progress().clone(),
            session: self.current_session().clone(),
            notification_count: self.notification_count(),
            filters: self.filters.clone(),
            preferences: self.preferences,
        }
    }
}
