use crate::catalog::GameId;

/// Why an intent was rejected. State is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The intent named a game id that is not in the catalog.
    UnknownGame(GameId),
    /// Login was attempted with an empty email or password.
    EmptyCredentials,
    /// A gift was sent without naming who receives it.
    EmptyRecipient,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownGame(id) => write!(f, "unknown game id: {id}"),
            Self::EmptyCredentials => write!(f, "email and password must not be empty"),
            Self::EmptyRecipient => write!(f, "gift recipient must not be empty"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateId(GameId),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate game id in catalog: {id}"),
        }
    }
}

impl std::error::Error for CatalogError {}
