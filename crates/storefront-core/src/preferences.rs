use serde::{Deserialize, Serialize};

/// Display currency label. Prices are never converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

/// Interface language label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
}

/// Top navigation section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreTab {
    #[default]
    Store,
    News,
    Faq,
    Help,
    UnrealEngine,
}

/// Shopper display choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub currency: Currency,
    pub language: Language,
    pub active_tab: StoreTab,
}

impl Preferences {
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_active_tab(&mut self, tab: StoreTab) {
        self.active_tab = tab;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.currency, Currency::Usd);
        assert_eq!(prefs.language, Language::English);
        assert_eq!(prefs.active_tab, StoreTab::Store);
    }

    #[test]
    fn labels_serialize_as_shown() {
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), r#""GBP""#);
        assert_eq!(
            serde_json::to_string(&StoreTab::UnrealEngine).unwrap(),
            r#""unreal_engine""#
        );
        let lang: Language = serde_json::from_str(r#""Spanish""#).unwrap();
        assert_eq!(lang, Language::Spanish);
    }
}
