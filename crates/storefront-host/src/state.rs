use std::sync::Arc;
use tokio::sync::RwLock;

use storefront_core::Storefront;
use storefront_core::catalog::Catalog;
use storefront_core::filter::FilterState;
use storefront_core::preferences::Preferences;

use crate::config::HostConfig;

/// The storefront behind one exclusive-access lock. Intents and download
/// ticks both take the write half, so they never interleave.
pub type SharedStorefront = Arc<RwLock<Storefront>>;

/// Build the shared storefront over `catalog`, seeded from `config`.
pub fn build_storefront(config: &HostConfig, catalog: Catalog) -> SharedStorefront {
    let filters = FilterState {
        show_adult_content: config.filters.show_adult_content,
        ..FilterState::default()
    };
    let preferences = Preferences {
        currency: config.preferences.currency,
        language: config.preferences.language,
        ..Preferences::default()
    };
    let store =
        Storefront::new(catalog, config.session.clone()).with_defaults(filters, preferences);
    Arc::new(RwLock::new(store))
}
