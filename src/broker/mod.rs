//! Ядро брокера: реестры, авторизация, подписки и публикация.
//!
//! - `client`: идентификаторы клиентов и классы обслуживания.
//! - `acl`: правило доступа привилегированного канала.
//! - `channel`: каналы FREE и привилегированные.
//! - `state` (приватный): все таблицы состояния под одним замком.
//! - `core`: фасад [`Broker`] и конвейер публикации.

pub mod acl;
pub mod channel;
pub mod client;
pub mod core;
mod state;

pub use acl::ChannelAcl;
pub use channel::{Channel, PrivilegedChannel};
pub use client::{ClientId, ServiceTier};
pub use self::core::Broker;
