use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
