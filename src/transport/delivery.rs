use crate::{broker::ClientId, Message};

/// Сообщение, доставленное подписчику, вместе с каналом публикации.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub channel: String,
    pub message: Message,
}

/// Контракт транспортного слоя, потребляемый ядром брокера.
///
/// Доставка — best-effort: `deliver` обязан завершаться ограниченно
/// быстро и не блокировать брокер на медленном подписчике (реализация
/// ставит сообщение в очередь, а не ждёт его обработки). Отказ доставки
/// одному подписчику изолирован и не влияет ни на других подписчиков,
/// ни на вызов публикующего.
pub trait Transport: Send + Sync {
    /// Открывает точку доставки клиента; вызывается при регистрации.
    fn open(&self, client: &ClientId);

    /// Ставит сообщение в очередь клиента. Возвращает `false`,
    /// если точка доставки отсутствует или закрыта.
    fn deliver(&self, client: &ClientId, channel: &str, message: Message) -> bool;

    /// Освобождает точку доставки; вызывается при отмене регистрации.
    fn release(&self, client: &ClientId);
}
