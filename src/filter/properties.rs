use std::{fmt, sync::Arc};

use crate::{Message, PropertyValue};

/// Предикат над кортежем значений нескольких свойств.
///
/// Значения передаются в порядке объявления имён в [`PropertiesFilter`].
/// Реализован для любого подходящего замыкания, так что обычно достаточно
/// передать `|values| ...`.
pub trait MultiValuesFilter: Send + Sync {
    fn matches(&self, values: &[&PropertyValue]) -> bool;
}

impl<F> MultiValuesFilter for F
where
    F: Fn(&[&PropertyValue]) -> bool + Send + Sync,
{
    fn matches(&self, values: &[&PropertyValue]) -> bool {
        self(values)
    }
}

/// Фильтр по группе свойств: упорядоченный список имён и предикат над
/// кортежем их значений (кросс-свойственные ограничения).
///
/// Если хотя бы одно из имён отсутствует в сообщении, фильтр отклоняет
/// сообщение, не вычисляя предикат.
#[derive(Clone)]
pub struct PropertiesFilter {
    names: Vec<String>,
    predicate: Arc<dyn MultiValuesFilter>,
}

impl PropertiesFilter {
    pub fn new<N, S>(names: N, predicate: impl MultiValuesFilter + 'static) -> Self
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Вердикт фильтра для сообщения.
    pub fn matches(&self, message: &Message) -> bool {
        let mut values = Vec::with_capacity(self.names.len());
        for name in &self.names {
            match message.property(name) {
                Some(value) => values.push(value),
                None => return false,
            }
        }
        self.predicate.matches(&values)
    }
}

impl fmt::Debug for PropertiesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertiesFilter")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}
