use std::cmp::Ordering;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Типизированное значение свойства сообщения.
///
/// Упорядоченное сравнение определено только между значениями одного
/// варианта; сравнение значений разных вариантов возвращает `None`,
/// и фильтры с порядковыми операторами такие пары отклоняют.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    /// Логическое значение.
    Bool(bool),
    /// 64-битное целое со знаком.
    Int(i64),
    /// 64-битное число с плавающей точкой (тотальный порядок через
    /// `OrderedFloat`).
    Float(OrderedFloat<f64>),
    /// Строка.
    Str(String),
    /// Бинарные данные.
    Bytes(Bytes),
    /// Момент времени (UTC).
    Time(DateTime<Utc>),
}

impl PropertyValue {
    /// Сравнивает два значения, если они одного варианта.
    pub fn compare(&self, other: &PropertyValue) -> Option<Ordering> {
        match (self, other) {
            (PropertyValue::Bool(a), PropertyValue::Bool(b)) => Some(a.cmp(b)),
            (PropertyValue::Int(a), PropertyValue::Int(b)) => Some(a.cmp(b)),
            (PropertyValue::Float(a), PropertyValue::Float(b)) => Some(a.cmp(b)),
            (PropertyValue::Str(a), PropertyValue::Str(b)) => Some(a.cmp(b)),
            (PropertyValue::Bytes(a), PropertyValue::Bytes(b)) => Some(a.cmp(b)),
            (PropertyValue::Time(a), PropertyValue::Time(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl PartialOrd for PropertyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(OrderedFloat(v))
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Str(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Str(v)
    }
}

impl From<Bytes> for PropertyValue {
    fn from(v: Bytes) -> Self {
        PropertyValue::Bytes(v)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(v: DateTime<Utc>) -> Self {
        PropertyValue::Time(v)
    }
}
