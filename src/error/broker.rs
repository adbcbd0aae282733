use thiserror::Error;

use crate::broker::ClientId;

pub type BrokerResult<T> = Result<T, BrokerError>;

/// Ошибка операции брокера.
///
/// Все ошибки возвращаются синхронно той операцией, которая их обнаружила;
/// брокер ничего не повторяет сам — политика повторов остаётся за вызывающим.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokerError {
    #[error("unknown client: {0}")]
    UnknownClient(ClientId),

    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("client already registered: {0}")]
    AlreadyRegistered(ClientId),

    #[error("channel already exists: {0}")]
    AlreadyExistingChannel(String),

    #[error("client is not authorized for this operation")]
    Unauthorized,

    #[error("privileged channel quota reached for {client} (limit {limit})")]
    QuotaExceeded { client: ClientId, limit: usize },

    #[error("client {client} is not subscribed to {channel}")]
    NotSubscribed { client: ClientId, channel: String },

    #[error("client id cannot be empty")]
    InvalidClientId,

    #[error("channel name cannot be empty")]
    InvalidChannelName,

    #[error("invalid access pattern: {0}")]
    InvalidPattern(String),
}

impl From<globset::Error> for BrokerError {
    fn from(err: globset::Error) -> Self {
        BrokerError::InvalidPattern(err.to_string())
    }
}
