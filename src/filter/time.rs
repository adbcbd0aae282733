use chrono::{DateTime, Utc};

/// Предикат над меткой времени сообщения.
///
/// Композитный фильтр всегда несёт ровно один временной фильтр;
/// по умолчанию — [`TimeFilter::AcceptAll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    /// Принимает любую метку времени.
    #[default]
    AcceptAll,
    /// Метка не раньше границы (включительно).
    AtOrAfter(DateTime<Utc>),
    /// Метка не позже границы (включительно).
    AtOrBefore(DateTime<Utc>),
    /// Метка в отрезке `[lo, hi]` (обе границы включительно).
    BetweenInclusive(DateTime<Utc>, DateTime<Utc>),
}

impl TimeFilter {
    /// Вычисляет вердикт предиката для данной метки времени.
    pub fn matches(&self, timestamp: DateTime<Utc>) -> bool {
        match self {
            TimeFilter::AcceptAll => true,
            TimeFilter::AtOrAfter(lo) => timestamp >= *lo,
            TimeFilter::AtOrBefore(hi) => timestamp <= *hi,
            TimeFilter::BetweenInclusive(lo, hi) => timestamp >= *lo && timestamp <= *hi,
        }
    }
}
