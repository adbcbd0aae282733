use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

use super::{Delivery, Transport};
use crate::{broker::ClientId, Message, RecvError, TryRecvError};

/// Внутрипроцессный транспорт: неограниченная очередь tokio mpsc
/// на клиента.
///
/// Очередь создаётся вызовом [`LocalTransport::attach`] (клиент получает
/// свой [`Inbox`] до регистрации у брокера) и закрывается при
/// `release` либо при дропе `Inbox`. Неограниченная очередь гарантирует,
/// что `deliver` никогда не блокирует брокер.
#[derive(Debug, Default)]
pub struct LocalTransport {
    inboxes: DashMap<ClientId, mpsc::UnboundedSender<Delivery>>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создаёт входящую очередь клиента и возвращает её приёмный конец.
    /// Повторный вызов заменяет очередь (прежний `Inbox` закрывается).
    pub fn attach(&self, client: &ClientId) -> Inbox {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inboxes.insert(client.clone(), tx);
        Inbox {
            client: client.clone(),
            inner: rx,
        }
    }
}

impl Transport for LocalTransport {
    fn open(&self, client: &ClientId) {
        // Очередь создаётся заранее в attach; регистрация лишь отмечается.
        debug!(client = %client, attached = self.inboxes.contains_key(client), "delivery endpoint opened");
    }

    fn deliver(&self, client: &ClientId, channel: &str, message: Message) -> bool {
        match self.inboxes.get(client) {
            Some(tx) => tx
                .send(Delivery {
                    channel: channel.to_string(),
                    message,
                })
                .is_ok(),
            None => false,
        }
    }

    fn release(&self, client: &ClientId) {
        self.inboxes.remove(client);
        debug!(client = %client, "delivery endpoint released");
    }
}

/// Приёмный конец очереди доставки одного клиента.
pub struct Inbox {
    client: ClientId,
    inner: mpsc::UnboundedReceiver<Delivery>,
}

impl Inbox {
    /// Асинхронно ожидает следующую доставку.
    ///
    /// # Возвращает
    /// - `Ok(Delivery)` при получении
    /// - `Err(RecvError::Closed)` когда очередь закрыта и опустошена
    pub async fn recv(&mut self) -> Result<Delivery, RecvError> {
        self.inner.recv().await.ok_or(RecvError::Closed)
    }

    /// Пытается получить доставку без ожидания.
    pub fn try_recv(&mut self) -> Result<Delivery, TryRecvError> {
        self.inner.try_recv().map_err(Into::into)
    }

    /// Идентификатор клиента, которому принадлежит очередь.
    pub fn client(&self) -> &ClientId {
        &self.client
    }

    /// Количество доставок, ожидающих в очереди.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
