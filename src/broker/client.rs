use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Непрозрачный идентификатор точки доставки зарегистрированного клиента.
///
/// Выдаётся транспортным слоем при регистрации и не переиспользуется,
/// пока клиент зарегистрирован. Хранится как `Arc<str>`: идентификатор
/// расходится по таблицам брокера и по снимкам доставки без копирования
/// строки.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(Arc<str>);

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        ClientId(Arc::from(id))
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        ClientId(Arc::from(id))
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Класс обслуживания клиента.
///
/// Определяет квоту на количество одновременно принадлежащих клиенту
/// привилегированных каналов: `Free` — ноль, `Standard` и `Premium` —
/// настраиваемые пределы (см. [`crate::Settings`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    Free,
    Standard,
    Premium,
}
