//! Модель сообщений брокера.
//!
//! - `message`: контейнер с неизменяемым payload, таблицей именованных
//!   свойств и фиксированной меткой времени создания.
//! - `value`: типизированные значения свойств с упорядоченным сравнением
//!   внутри одного варианта.

pub mod message;
pub mod value;

pub use message::Message;
pub use value::PropertyValue;
