//! Транспортный слой-коллаборатор.
//!
//! Ядро брокера не знает сетевых деталей: оно лишь просит транспорт
//! открыть точку доставки при регистрации, положить сообщение в очередь
//! клиента при разветвлении публикации и освободить точку при отмене
//! регистрации.
//!
//! - `delivery`: контракт [`Transport`] и единица доставки [`Delivery`].
//! - `local`: внутрипроцессная реализация на очередях tokio mpsc.

pub mod delivery;
pub mod local;

pub use delivery::{Delivery, Transport};
pub use local::{Inbox, LocalTransport};
