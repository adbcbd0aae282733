use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{state::BrokerState, ClientId, ServiceTier};
use crate::{BrokerResult, Message, MessageFilter, Settings, Transport};

/// Брокер публикации/подписки с фильтрацией по содержимому.
///
/// Единственный владелец всего состояния (клиенты, каналы, подписки,
/// квоты): каждая операция — короткая критическая секция под одним
/// мьютексом, так что создание канала, проверки авторизации, подписка и
/// публикация никогда не перемежаются несогласованно. Снимок подписчиков
/// для публикации берётся под замком, сама доставка через транспорт
/// выполняется уже вне его.
pub struct Broker {
    state: Mutex<BrokerState>,
    transport: Arc<dyn Transport>,
    /// Общее количество вызовов `publish` (включая сообщения батча).
    pub publish_count: AtomicUsize,
    /// Количество отказов доставки (точка доставки закрыта или отсутствует).
    pub send_error_count: AtomicUsize,
}

impl Broker {
    pub fn new(settings: Settings, transport: Arc<dyn Transport>) -> Self {
        debug!(
            free_channels = settings.free_channels,
            standard_quota = settings.standard_channel_quota,
            premium_quota = settings.premium_channel_quota,
            "broker started"
        );
        Self {
            state: Mutex::new(BrokerState::new(settings)),
            transport,
            publish_count: AtomicUsize::new(0),
            send_error_count: AtomicUsize::new(0),
        }
    }

    // -------------------------------------------------------------------
    // Реестр клиентов
    // -------------------------------------------------------------------

    pub fn is_registered(&self, client: &ClientId) -> bool {
        self.state.lock().is_registered(client)
    }

    pub fn is_registered_with_tier(&self, client: &ClientId, tier: ServiceTier) -> bool {
        self.state.lock().is_registered_with_tier(client, tier)
    }

    /// Регистрирует клиента и открывает его точку доставки у транспорта.
    pub fn register(&self, client: ClientId, tier: ServiceTier) -> BrokerResult<()> {
        self.state.lock().register(client.clone(), tier)?;
        self.transport.open(&client);
        debug!(client = %client, ?tier, "client registered");
        Ok(())
    }

    pub fn modify_service_class(&self, client: &ClientId, tier: ServiceTier) -> BrokerResult<()> {
        self.state.lock().modify_service_class(client, tier)?;
        debug!(client = %client, ?tier, "service class modified");
        Ok(())
    }

    /// Удаляет клиента, все его подписки и счётчик квоты; просит транспорт
    /// освободить точку доставки.
    pub fn unregister(&self, client: &ClientId) -> BrokerResult<()> {
        self.state.lock().unregister(client)?;
        self.transport.release(client);
        debug!(client = %client, "client unregistered");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Каналы и авторизация
    // -------------------------------------------------------------------

    pub fn channel_exists(&self, channel: &str) -> bool {
        self.state.lock().channel_exists(channel)
    }

    pub fn is_authorized(&self, client: &ClientId, channel: &str) -> BrokerResult<bool> {
        self.state.lock().is_authorized(client, channel)
    }

    /// Достигнута ли клиентом квота привилегированных каналов его класса.
    pub fn quota_reached(&self, client: &ClientId) -> BrokerResult<bool> {
        self.state.lock().quota_reached(client)
    }

    /// Является ли клиент владельцем данного канала.
    pub fn has_created_channel(&self, client: &ClientId, channel: &str) -> BrokerResult<bool> {
        self.state.lock().has_created_channel(client, channel)
    }

    /// Создаёт привилегированный канал с необязательным разрешающим
    /// glob-шаблоном; без шаблона авторизованы все зарегистрированные
    /// клиенты.
    pub fn create_channel(
        &self,
        owner: &ClientId,
        channel: &str,
        allow_pattern: Option<&str>,
    ) -> BrokerResult<()> {
        self.state.lock().create_channel(owner, channel, allow_pattern)?;
        debug!(owner = %owner, channel, pattern = ?allow_pattern, "privileged channel created");
        Ok(())
    }

    /// Заменяет разрешающий шаблон канала (только владелец).
    pub fn modify_authorized_users(
        &self,
        owner: &ClientId,
        channel: &str,
        pattern: &str,
    ) -> BrokerResult<()> {
        self.state
            .lock()
            .modify_authorized_users(owner, channel, pattern)?;
        debug!(owner = %owner, channel, pattern, "authorized users modified");
        Ok(())
    }

    /// Добавляет запрещающий шаблон канала (только владелец).
    pub fn remove_authorized_users(
        &self,
        owner: &ClientId,
        channel: &str,
        pattern: &str,
    ) -> BrokerResult<()> {
        self.state
            .lock()
            .remove_authorized_users(owner, channel, pattern)?;
        debug!(owner = %owner, channel, pattern, "authorized users removed");
        Ok(())
    }

    /// Уничтожает привилегированный канал вместе с его подписками
    /// и возвращает владельцу единицу квоты.
    ///
    /// Доставка синхронна и сообщений «в полёте» не существует, поэтому
    /// плавный и немедленный варианты совпадают.
    pub fn destroy_channel(&self, owner: &ClientId, channel: &str) -> BrokerResult<()> {
        self.destroy_channel_now(owner, channel)
    }

    /// Немедленный вариант [`Broker::destroy_channel`].
    pub fn destroy_channel_now(&self, owner: &ClientId, channel: &str) -> BrokerResult<()> {
        self.state.lock().destroy_channel(owner, channel)?;
        debug!(owner = %owner, channel, "privileged channel destroyed");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Подписки
    // -------------------------------------------------------------------

    pub fn is_subscribed(&self, client: &ClientId, channel: &str) -> BrokerResult<bool> {
        self.state.lock().is_subscribed(client, channel)
    }

    /// Подписывает клиента на канал с фильтром; повторная подписка той же
    /// пары заменяет фильтр.
    pub fn subscribe(
        &self,
        client: &ClientId,
        channel: &str,
        filter: MessageFilter,
    ) -> BrokerResult<()> {
        self.state.lock().subscribe(client, channel, filter)?;
        debug!(client = %client, channel, "subscribed");
        Ok(())
    }

    pub fn unsubscribe(&self, client: &ClientId, channel: &str) -> BrokerResult<()> {
        self.state.lock().unsubscribe(client, channel)?;
        debug!(client = %client, channel, "unsubscribed");
        Ok(())
    }

    /// Заменяет фильтр существующей подписки; возвращает, произошла ли
    /// замена.
    pub fn modify_filter(
        &self,
        client: &ClientId,
        channel: &str,
        filter: MessageFilter,
    ) -> BrokerResult<bool> {
        self.state.lock().modify_filter(client, channel, filter)
    }

    // -------------------------------------------------------------------
    // Публикация
    // -------------------------------------------------------------------

    /// Публикует сообщение в канал.
    ///
    /// Публикующий проходит ту же проверку авторизации, что и подписчики.
    /// Фильтр каждого подписчика вычисляется над сообщением один раз;
    /// совпавшим сообщение передаётся в транспорт. Отказ доставки одному
    /// подписчику изолирован. Возвращает число успешно поставленных
    /// в очередь доставок.
    pub fn publish(
        &self,
        publisher: &ClientId,
        channel: &str,
        message: &Message,
    ) -> BrokerResult<usize> {
        self.publish_count.fetch_add(1, Ordering::Relaxed);

        let matched = self
            .state
            .lock()
            .matching_subscribers(publisher, channel, message)?;

        let mut delivered = 0;
        for subscriber in matched {
            if self.transport.deliver(&subscriber, channel, message.clone()) {
                delivered += 1;
            } else {
                self.send_error_count.fetch_add(1, Ordering::Relaxed);
                warn!(subscriber = %subscriber, channel, "delivery failed, skipping subscriber");
            }
        }
        Ok(delivered)
    }

    /// Публикует пакет сообщений по порядку списка.
    ///
    /// Не атомарно: ошибка на i-м сообщении оставляет предыдущие
    /// доставленными. Возвращает суммарное число доставок.
    pub fn publish_batch(
        &self,
        publisher: &ClientId,
        channel: &str,
        messages: &[Message],
    ) -> BrokerResult<usize> {
        let mut delivered = 0;
        for message in messages {
            delivered += self.publish(publisher, channel, message)?;
        }
        Ok(delivered)
    }
}
