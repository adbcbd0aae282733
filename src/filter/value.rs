use std::cmp::Ordering;

use crate::PropertyValue;

/// Предикат над значением одного свойства.
///
/// Порядковые варианты (`GreaterOrEqual`, `LowerOrEqual`,
/// `BetweenInclusive`) сравнивают только значения одного варианта
/// [`PropertyValue`]; несравнимая пара отклоняется. Фильтр тотален:
/// для любого значения он возвращает вердикт, а не ошибку.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueFilter {
    /// Принимает любое значение.
    AcceptAll,
    /// Значение равно ожидаемому.
    Equals(PropertyValue),
    /// Значение не меньше нижней границы (включительно).
    GreaterOrEqual(PropertyValue),
    /// Значение не больше верхней границы (включительно).
    LowerOrEqual(PropertyValue),
    /// Значение в отрезке `[lo, hi]` (обе границы включительно).
    BetweenInclusive(PropertyValue, PropertyValue),
}

impl ValueFilter {
    /// Вычисляет вердикт предиката для данного значения.
    pub fn matches(&self, value: &PropertyValue) -> bool {
        match self {
            ValueFilter::AcceptAll => true,
            ValueFilter::Equals(expected) => value == expected,
            ValueFilter::GreaterOrEqual(lo) => {
                matches!(value.compare(lo), Some(Ordering::Greater | Ordering::Equal))
            }
            ValueFilter::LowerOrEqual(hi) => {
                matches!(value.compare(hi), Some(Ordering::Less | Ordering::Equal))
            }
            ValueFilter::BetweenInclusive(lo, hi) => {
                matches!(value.compare(lo), Some(Ordering::Greater | Ordering::Equal))
                    && matches!(value.compare(hi), Some(Ordering::Less | Ordering::Equal))
            }
        }
    }
}
