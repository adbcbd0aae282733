use std::collections::HashMap;

use super::{Channel, ChannelAcl, ClientId, PrivilegedChannel, ServiceTier};
use crate::{BrokerError, BrokerResult, Message, MessageFilter, Settings};

/// Всё изменяемое состояние брокера под одним замком.
///
/// Создание канала, проверка авторизации, подписка и публикация читают и
/// пишут одни и те же таблицы, поэтому весь узел защищён единой взаимной
/// блокировкой (см. [`super::Broker`]). Каждая операция здесь — ограниченное
/// локальное вычисление без ввода-вывода и ожидания.
#[derive(Debug)]
pub(crate) struct BrokerState {
    settings: Settings,
    /// Зарегистрированные клиенты и их классы обслуживания.
    clients: HashMap<ClientId, ServiceTier>,
    /// Все каналы, FREE и привилегированные; имена уникальны.
    channels: HashMap<String, Channel>,
    /// Подписки: канал -> (клиент -> фильтр).
    subscriptions: HashMap<String, HashMap<ClientId, MessageFilter>>,
    /// Счётчик принадлежащих клиенту привилегированных каналов.
    owned_channels: HashMap<ClientId, usize>,
}

impl BrokerState {
    /// Создаёт состояние с набором FREE-каналов `channel0..channel{N-1}`.
    pub(crate) fn new(settings: Settings) -> Self {
        let mut channels = HashMap::new();
        let mut subscriptions = HashMap::new();
        for i in 0..settings.free_channels {
            let name = format!("channel{i}");
            channels.insert(name.clone(), Channel::Free);
            subscriptions.insert(name, HashMap::new());
        }
        Self {
            settings,
            clients: HashMap::new(),
            channels,
            subscriptions,
            owned_channels: HashMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // Предусловия
    // -------------------------------------------------------------------

    fn ensure_registered(&self, client: &ClientId) -> BrokerResult<ServiceTier> {
        self.clients
            .get(client)
            .copied()
            .ok_or_else(|| BrokerError::UnknownClient(client.clone()))
    }

    fn ensure_channel(&self, channel: &str) -> BrokerResult<&Channel> {
        self.channels
            .get(channel)
            .ok_or_else(|| BrokerError::UnknownChannel(channel.to_string()))
    }

    /// Привилегированный канал, принадлежащий вызывающему. Операции
    /// владельца над FREE-каналом или чужим каналом — `Unauthorized`.
    fn ensure_owned_privileged(
        &mut self,
        owner: &ClientId,
        channel: &str,
    ) -> BrokerResult<&mut PrivilegedChannel> {
        self.ensure_registered(owner)?;
        let ch = self
            .channels
            .get_mut(channel)
            .ok_or_else(|| BrokerError::UnknownChannel(channel.to_string()))?;
        match ch {
            Channel::Privileged(info) if info.owner == *owner => Ok(info),
            _ => Err(BrokerError::Unauthorized),
        }
    }

    // -------------------------------------------------------------------
    // Реестр клиентов
    // -------------------------------------------------------------------

    pub(crate) fn is_registered(&self, client: &ClientId) -> bool {
        self.clients.contains_key(client)
    }

    pub(crate) fn is_registered_with_tier(&self, client: &ClientId, tier: ServiceTier) -> bool {
        self.clients.get(client) == Some(&tier)
    }

    pub(crate) fn register(&mut self, client: ClientId, tier: ServiceTier) -> BrokerResult<()> {
        if client.is_empty() {
            return Err(BrokerError::InvalidClientId);
        }
        if self.clients.contains_key(&client) {
            return Err(BrokerError::AlreadyRegistered(client));
        }
        self.owned_channels.entry(client.clone()).or_insert(0);
        self.clients.insert(client, tier);
        Ok(())
    }

    pub(crate) fn modify_service_class(
        &mut self,
        client: &ClientId,
        tier: ServiceTier,
    ) -> BrokerResult<()> {
        self.ensure_registered(client)?;
        // Замена безусловная: повышение, понижение и no-op равно допустимы.
        self.clients.insert(client.clone(), tier);
        Ok(())
    }

    pub(crate) fn unregister(&mut self, client: &ClientId) -> BrokerResult<()> {
        self.ensure_registered(client)?;
        for subs in self.subscriptions.values_mut() {
            subs.remove(client);
        }
        self.clients.remove(client);
        self.owned_channels.remove(client);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Каналы и авторизация
    // -------------------------------------------------------------------

    pub(crate) fn channel_exists(&self, channel: &str) -> bool {
        self.channels.contains_key(channel)
    }

    pub(crate) fn is_authorized(&self, client: &ClientId, channel: &str) -> BrokerResult<bool> {
        self.ensure_registered(client)?;
        Ok(self.ensure_channel(channel)?.authorizes(client))
    }

    pub(crate) fn quota_reached(&self, client: &ClientId) -> BrokerResult<bool> {
        let tier = self.ensure_registered(client)?;
        let owned = self.owned_channels.get(client).copied().unwrap_or(0);
        Ok(owned >= self.settings.privileged_quota(tier))
    }

    pub(crate) fn has_created_channel(
        &self,
        client: &ClientId,
        channel: &str,
    ) -> BrokerResult<bool> {
        self.ensure_registered(client)?;
        Ok(self.ensure_channel(channel)?.owner() == Some(client))
    }

    pub(crate) fn create_channel(
        &mut self,
        owner: &ClientId,
        channel: &str,
        allow_pattern: Option<&str>,
    ) -> BrokerResult<()> {
        let tier = self.ensure_registered(owner)?;
        if channel.is_empty() {
            return Err(BrokerError::InvalidChannelName);
        }
        if self.channels.contains_key(channel) {
            return Err(BrokerError::AlreadyExistingChannel(channel.to_string()));
        }
        if tier == ServiceTier::Free {
            return Err(BrokerError::Unauthorized);
        }
        if self.quota_reached(owner)? {
            return Err(BrokerError::QuotaExceeded {
                client: owner.clone(),
                limit: self.settings.privileged_quota(tier),
            });
        }

        // Скомпилировать шаблон до любых вставок: ошибка шаблона не должна
        // оставить канал наполовину созданным.
        let acl = match allow_pattern {
            Some(pattern) => ChannelAcl::with_pattern(pattern)?,
            None => ChannelAcl::allow_all(),
        };

        self.channels.insert(
            channel.to_string(),
            Channel::Privileged(PrivilegedChannel {
                owner: owner.clone(),
                acl,
            }),
        );
        self.subscriptions.insert(channel.to_string(), HashMap::new());
        *self.owned_channels.entry(owner.clone()).or_insert(0) += 1;
        Ok(())
    }

    pub(crate) fn modify_authorized_users(
        &mut self,
        owner: &ClientId,
        channel: &str,
        pattern: &str,
    ) -> BrokerResult<()> {
        self.ensure_owned_privileged(owner, channel)?
            .acl
            .set_allow_pattern(pattern)
    }

    pub(crate) fn remove_authorized_users(
        &mut self,
        owner: &ClientId,
        channel: &str,
        pattern: &str,
    ) -> BrokerResult<()> {
        self.ensure_owned_privileged(owner, channel)?
            .acl
            .add_deny_pattern(pattern)
    }

    pub(crate) fn destroy_channel(&mut self, owner: &ClientId, channel: &str) -> BrokerResult<()> {
        self.ensure_owned_privileged(owner, channel)?;
        self.subscriptions.remove(channel);
        self.channels.remove(channel);
        if let Some(count) = self.owned_channels.get_mut(owner) {
            *count = count.saturating_sub(1);
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Таблица подписок
    // -------------------------------------------------------------------

    pub(crate) fn is_subscribed(&self, client: &ClientId, channel: &str) -> BrokerResult<bool> {
        self.ensure_registered(client)?;
        self.ensure_channel(channel)?;
        Ok(self
            .subscriptions
            .get(channel)
            .is_some_and(|subs| subs.contains_key(client)))
    }

    pub(crate) fn subscribe(
        &mut self,
        client: &ClientId,
        channel: &str,
        filter: MessageFilter,
    ) -> BrokerResult<()> {
        if !self.is_authorized(client, channel)? {
            return Err(BrokerError::Unauthorized);
        }
        // Повторная подписка той же пары (канал, клиент) заменяет фильтр.
        if let Some(subs) = self.subscriptions.get_mut(channel) {
            subs.insert(client.clone(), filter);
        }
        Ok(())
    }

    pub(crate) fn unsubscribe(&mut self, client: &ClientId, channel: &str) -> BrokerResult<()> {
        self.ensure_registered(client)?;
        self.ensure_channel(channel)?;
        let subs = self
            .subscriptions
            .get_mut(channel)
            .ok_or_else(|| BrokerError::UnknownChannel(channel.to_string()))?;
        if subs.remove(client).is_none() {
            return Err(BrokerError::NotSubscribed {
                client: client.clone(),
                channel: channel.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn modify_filter(
        &mut self,
        client: &ClientId,
        channel: &str,
        filter: MessageFilter,
    ) -> BrokerResult<bool> {
        self.ensure_registered(client)?;
        self.ensure_channel(channel)?;
        let subs = self
            .subscriptions
            .get_mut(channel)
            .ok_or_else(|| BrokerError::UnknownChannel(channel.to_string()))?;
        match subs.get_mut(client) {
            Some(entry) => {
                *entry = filter;
                Ok(true)
            }
            None => Err(BrokerError::NotSubscribed {
                client: client.clone(),
                channel: channel.to_string(),
            }),
        }
    }

    // -------------------------------------------------------------------
    // Публикация
    // -------------------------------------------------------------------

    /// Согласованный снимок подписчиков канала, чьи фильтры приняли
    /// сообщение. Проверяет права публикующего; вызывается под замком,
    /// доставка выполняется уже вне его.
    pub(crate) fn matching_subscribers(
        &self,
        publisher: &ClientId,
        channel: &str,
        message: &Message,
    ) -> BrokerResult<Vec<ClientId>> {
        if !self.is_authorized(publisher, channel)? {
            return Err(BrokerError::Unauthorized);
        }
        let subs = self
            .subscriptions
            .get(channel)
            .ok_or_else(|| BrokerError::UnknownChannel(channel.to_string()))?;
        Ok(subs
            .iter()
            .filter(|(_, filter)| filter.matches(message))
            .map(|(client, _)| client.clone())
            .collect())
    }
}
