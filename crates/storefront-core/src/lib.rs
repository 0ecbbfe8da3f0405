pub mod cart;
pub mod catalog;
pub mod downloads;
pub mod error;
pub mod filter;
pub mod intents;
pub mod notifications;
pub mod preferences;
pub mod session;
pub mod store;
pub mod view;
pub mod wishlist;

pub use error::{CatalogError, StoreError};
pub use store::Storefront;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::catalog::{Catalog, Game, Price};
    use crate::intents::Intent;
    use crate::session::SessionIdentity;
    use crate::store::Storefront;

    /// A storefront over the sample catalog with the default identity.
    pub fn sample_store() -> Storefront {
        Storefront::new(Catalog::sample(), SessionIdentity::default())
    }

    /// A small catalog with one free and two priced games, ids 1..=3.
    pub fn tiny_catalog() -> Catalog {
        Catalog::new(vec![
            Game::new(1, "Free Game", Price::Free, "Party", "/free.jpg"),
            Game::new(2, "Cheap Game", Price::Priced(999), "RPG", "/cheap.jpg"),
            Game::new(3, "Pricey Game", Price::Priced(6999), "RPG", "/pricey.jpg"),
        ])
        .expect("tiny catalog ids are unique")
    }

    /// Apply every intent, panicking on the first rejection.
    pub fn apply_all(store: &mut Storefront, intents: Vec<Intent>) {
        for intent in intents {
            let kind = intent.kind();
            if let Err(e) = store.apply(intent) {
                panic!("intent {kind} was rejected: {e}");
            }
        }
    }

    /// Run `n` download ticks.
    pub fn run_ticks(store: &mut Storefront, n: usize) {
        for _ in 0..n {
            store.tick_downloads();
        }
    }
}
