use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Not in a cardstudio project. Run 'cardstudio init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .cardstudio/ to reinitialize.")]
    AlreadyInitialized,

    #[error("{0}")]
    Validation(String),

    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    #[error("Design not found: {0}")]
    DesignNotFound(i64),

    #[error("Card not found: {0}")]
    CardNotFound(i64),

    #[error("Invalid share code: {0}")]
    ShareCodeNotFound(String),

    #[error("Invalid role: {0}. Valid roles: company, designer, hr, employee")]
    InvalidRole(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StudioError>;
