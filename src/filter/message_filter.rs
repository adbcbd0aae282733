use super::{PropertiesFilter, PropertyFilter, TimeFilter};
use crate::Message;

/// Композитный фильтр подписки.
///
/// Сообщение принимается, когда приняли все компоненты, в таком порядке
/// с обрывом на первом отклонении:
///
/// 1. каждый [`PropertyFilter`] по своему свойству;
/// 2. каждый [`PropertiesFilter`] по своей группе свойств;
/// 3. единственный [`TimeFilter`] по метке времени.
///
/// Чистая конъюнкция: дизъюнкцию нужно кодировать внутри одного
/// предиката. Фильтр тотален над произвольными сообщениями —
/// отсутствующее свойство означает отклонение, а не ошибку.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    property_filters: Vec<PropertyFilter>,
    properties_filters: Vec<PropertiesFilter>,
    time_filter: TimeFilter,
}

impl MessageFilter {
    pub fn new(
        property_filters: Vec<PropertyFilter>,
        properties_filters: Vec<PropertiesFilter>,
        time_filter: TimeFilter,
    ) -> Self {
        Self {
            property_filters,
            properties_filters,
            time_filter,
        }
    }

    /// Пустой фильтр, принимающий любое сообщение.
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Фильтр из одного [`PropertyFilter`] — самый частый случай подписки.
    pub fn property(filter: PropertyFilter) -> Self {
        Self {
            property_filters: vec![filter],
            ..Self::default()
        }
    }

    pub fn property_filters(&self) -> &[PropertyFilter] {
        &self.property_filters
    }

    pub fn properties_filters(&self) -> &[PropertiesFilter] {
        &self.properties_filters
    }

    pub fn time_filter(&self) -> &TimeFilter {
        &self.time_filter
    }

    /// Единый вердикт фильтра для сообщения.
    pub fn matches(&self, message: &Message) -> bool {
        for pf in &self.property_filters {
            if !pf.matches(message) {
                return false;
            }
        }
        for mpf in &self.properties_filters {
            if !mpf.matches(message) {
                return false;
            }
        }
        self.time_filter.matches(message.timestamp())
    }
}
