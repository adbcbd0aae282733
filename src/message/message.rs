use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::PropertyValue;
use crate::MessageError;

/// Сообщение, публикуемое в канал.
///
/// Состоит из payload (разделяется между копиями по счётчику ссылок в
/// [`Bytes`]), таблицы именованных свойств с уникальными именами и метки
/// времени, зафиксированной в момент создания.
///
/// `Clone` копирует таблицу свойств и метку времени, но разделяет payload
/// с оригиналом.
#[derive(Debug, Clone)]
pub struct Message {
    payload: Bytes,
    properties: HashMap<String, PropertyValue>,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Создаёт сообщение без свойств. Метка времени фиксируется сейчас.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            properties: HashMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Создаёт сообщение с начальным набором свойств.
    ///
    /// Возвращает `MessageError::DuplicateProperty`, если одно имя
    /// встречается дважды, и `MessageError::InvalidPropertyName` для
    /// пустого имени.
    pub fn with_properties<I, N>(payload: impl Into<Bytes>, properties: I) -> Result<Self, MessageError>
    where
        I: IntoIterator<Item = (N, PropertyValue)>,
        N: Into<String>,
    {
        let mut msg = Message::new(payload);
        for (name, value) in properties {
            msg.put_property(name, value)?;
        }
        Ok(msg)
    }

    /// Добавляет свойство. Имена уникальны: повторное добавление — ошибка.
    pub fn put_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<(), MessageError> {
        let name = name.into();
        if name.is_empty() {
            return Err(MessageError::InvalidPropertyName);
        }
        if self.properties.contains_key(&name) {
            return Err(MessageError::DuplicateProperty(name));
        }
        self.properties.insert(name, value.into());
        Ok(())
    }

    /// Удаляет свойство. Удаление отсутствующего имени — ошибка.
    pub fn remove_property(&mut self, name: &str) -> Result<PropertyValue, MessageError> {
        self.properties
            .remove(name)
            .ok_or_else(|| MessageError::UnknownProperty(name.to_string()))
    }

    /// Возвращает значение свойства, если оно есть.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Проверяет наличие свойства с данным именем.
    pub fn property_exists(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Таблица свойств сообщения.
    pub fn properties(&self) -> &HashMap<String, PropertyValue> {
        &self.properties
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
