//! Централизованные типы ошибок брокера.
//!
//! - `broker`: ошибки операций брокера (регистрация, каналы, подписки,
//!   публикация).
//! - `message`: ошибки работы со свойствами сообщения.
//! - `recv`: ошибки получения сообщений из локального транспорта.

pub mod broker;
pub mod message;
pub mod recv;

pub use broker::{BrokerError, BrokerResult};
pub use message::MessageError;
pub use recv::{RecvError, TryRecvError};
