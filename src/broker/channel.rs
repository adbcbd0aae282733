use super::{ChannelAcl, ClientId};

/// Канал брокера.
///
/// FREE-каналы создаются при конструировании брокера и живут до конца его
/// жизни. Привилегированные каналы создаются клиентами STANDARD/PREMIUM,
/// имеют ровно одного владельца и правило доступа; уничтожаются только
/// владельцем. Имя канала уникально среди каналов обоих видов.
#[derive(Debug, Clone)]
pub enum Channel {
    Free,
    Privileged(PrivilegedChannel),
}

/// Метаданные привилегированного канала.
#[derive(Debug, Clone)]
pub struct PrivilegedChannel {
    pub owner: ClientId,
    pub acl: ChannelAcl,
}

impl Channel {
    pub fn is_privileged(&self) -> bool {
        matches!(self, Channel::Privileged(_))
    }

    /// Владелец привилегированного канала; `None` для FREE-канала.
    pub fn owner(&self) -> Option<&ClientId> {
        match self {
            Channel::Free => None,
            Channel::Privileged(info) => Some(&info.owner),
        }
    }

    /// Авторизован ли зарегистрированный клиент использовать канал.
    ///
    /// FREE-канал авторизует любого зарегистрированного клиента. Владелец
    /// привилегированного канала авторизован всегда, даже если не совпадает
    /// с собственным разрешающим шаблоном: иначе он не смог бы публиковать
    /// в канал, чьё правило описывает только подписчиков.
    pub fn authorizes(&self, client: &ClientId) -> bool {
        match self {
            Channel::Free => true,
            Channel::Privileged(info) => info.owner == *client || info.acl.authorizes(client),
        }
    }
}
