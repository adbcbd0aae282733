use super::ValueFilter;
use crate::Message;

/// Фильтр по одному именованному свойству сообщения.
///
/// Отсутствие свойства с данным именем — всегда отклонение,
/// никогда не ошибка.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFilter {
    name: String,
    value_filter: ValueFilter,
}

impl PropertyFilter {
    pub fn new(name: impl Into<String>, value_filter: ValueFilter) -> Self {
        Self {
            name: name.into(),
            value_filter,
        }
    }

    /// Фильтр «свойство равно значению» — самый частый случай.
    pub fn equals(name: impl Into<String>, value: impl Into<crate::PropertyValue>) -> Self {
        Self::new(name, ValueFilter::Equals(value.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_filter(&self) -> &ValueFilter {
        &self.value_filter
    }

    /// Вердикт фильтра для сообщения.
    pub fn matches(&self, message: &Message) -> bool {
        match message.property(&self.name) {
            Some(value) => self.value_filter.matches(value),
            None => false,
        }
    }
}
