use serde::Deserialize;

use crate::catalog::GameId;
use crate::filter::SortOrder;
use crate::preferences::{Currency, Language, StoreTab};

/// A state change requested by the rendering layer.
///
/// On the wire each intent is a JSON object tagged by `type`, e.g.
/// `{"type":"add_to_cart","game_id":4}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    AddToCart {
        game_id: GameId,
    },
    RemoveFromCart {
        game_id: GameId,
    },
    SetQuantity {
        game_id: GameId,
        quantity: i64,
    },
    AddToWishlist {
        game_id: GameId,
    },
    RemoveFromWishlist {
        game_id: GameId,
    },
    SetQuery {
        text: String,
    },
    ToggleGenre {
        genre: String,
    },
    SetSortOrder {
        order: SortOrder,
    },
    ToggleAdultContent,
    StartDownload {
        game_id: GameId,
    },
    SendGift {
        game_id: GameId,
        recipient: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    PushNotification {
        title: String,
        #[serde(default)]
        body: Option<String>,
    },
    ClearNotifications,
    SetCurrency {
        currency: Currency,
    },
    SetLanguage {
        language: Language,
    },
    SetActiveTab {
        tab: StoreTab,
    },
}

impl Intent {
    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddToCart { .. } => "add_to_cart",
            Self::RemoveFromCart { .. } => "remove_from_cart",
            Self::SetQuantity { .. } => "set_quantity",
            Self::AddToWishlist { .. } => "add_to_wishlist",
            Self::RemoveFromWishlist { .. } => "remove_from_wishlist",
            Self::SetQuery { .. } => "set_query",
            Self::ToggleGenre { .. } => "toggle_genre",
            Self::SetSortOrder { .. } => "set_sort_order",
            Self::ToggleAdultContent => "toggle_adult_content",
            Self::StartDownload { .. } => "start_download",
            Self::SendGift { .. } => "send_gift",
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::PushNotification { .. } => "push_notification",
            Self::ClearNotifications => "clear_notifications",
            Self::SetCurrency { .. } => "set_currency",
            Self::SetLanguage { .. } => "set_language",
            Self::SetActiveTab { .. } => "set_active_tab",
        }
    }
}

/// Decode one intent from a JSON line.
pub fn parse_intent(line: &str) -> Result<Intent, serde_json::Error> {
    serde_json::from_str(line)
}
