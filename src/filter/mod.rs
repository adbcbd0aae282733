//! Движок фильтрации сообщений.
//!
//! Подписка несёт композитный фильтр [`MessageFilter`]: набор фильтров по
//! отдельным свойствам, набор фильтров по группам свойств и один фильтр по
//! метке времени. Сообщение принимается только если все компоненты его
//! приняли (чистая конъюнкция, без OR/NOT на этом уровне).
//!
//! - `value`: предикаты над значением одного свойства.
//! - `time`: предикаты над меткой времени сообщения.
//! - `property`: фильтр «имя свойства + предикат значения».
//! - `properties`: кросс-свойственный фильтр над кортежем значений.
//! - `message_filter`: композиция и алгоритм сопоставления.

pub mod message_filter;
pub mod properties;
pub mod property;
pub mod time;
pub mod value;

pub use message_filter::MessageFilter;
pub use properties::{MultiValuesFilter, PropertiesFilter};
pub use property::PropertyFilter;
pub use time::TimeFilter;
pub use value::ValueFilter;
