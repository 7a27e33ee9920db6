use thiserror::Error;

#[derive(Error, Debug)]
pub enum FbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The handler declared a parameter the update does not carry (e.g. `message_id` on a callback).
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Update has no effective user")]
    NoEffectiveUser,

    #[error("Update has no effective chat")]
    NoEffectiveChat,

    #[error("Unsupported update: {0}")]
    UnsupportedUpdate(String),
}

pub type Result<T> = std::result::Result<T, FbotError>;
