use thiserror::Error;
use tokio::sync::mpsc;

/// Ошибка при получении доставленного сообщения из входящей очереди.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecvError {
    #[error("delivery queue is closed")]
    Closed,
}

/// Ошибка при неблокирующем получении из входящей очереди.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TryRecvError {
    #[error("no deliveries available")]
    Empty,

    #[error("delivery queue is closed")]
    Closed,
}

impl From<mpsc::error::TryRecvError> for TryRecvError {
    fn from(err: mpsc::error::TryRecvError) -> Self {
        match err {
            mpsc::error::TryRecvError::Empty => TryRecvError::Empty,
            mpsc::error::TryRecvError::Disconnected => TryRecvError::Closed,
        }
    }
}
