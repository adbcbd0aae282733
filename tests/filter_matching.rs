use bytes::Bytes;
use chrono::{Duration, Utc};
use proptest::prelude::*;

use vestnik::{
    Message, MessageFilter, PropertiesFilter, PropertyFilter, PropertyValue, TimeFilter,
    ValueFilter,
};

fn value_strategy() -> impl Strategy<Value = PropertyValue> {
    prop_oneof![
        any::<bool>().prop_map(PropertyValue::from),
        any::<i64>().prop_map(PropertyValue::from),
        any::<f64>().prop_map(PropertyValue::from),
        "[a-z]{0,8}".prop_map(PropertyValue::from),
    ]
}

fn message_strategy() -> impl Strategy<Value = Message> {
    proptest::collection::btree_map("[a-d]", value_strategy(), 0..4).prop_map(|props| {
        Message::with_properties(
            Bytes::new(),
            props.into_iter().map(|(k, v)| (k, v)),
        )
        .expect("уникальные имена по построению")
    })
}

proptest! {
    /// Свойство: фильтр тотален — на произвольном сообщении он выносит
    /// вердикт, а не паникует и не ошибается.
    #[test]
    fn prop_filter_is_total(message in message_strategy(), expected in value_strategy()) {
        let filter = MessageFilter::new(
            vec![
                PropertyFilter::new("a", ValueFilter::Equals(expected.clone())),
                PropertyFilter::new("z", ValueFilter::GreaterOrEqual(expected.clone())),
            ],
            vec![PropertiesFilter::new(
                ["a", "b"],
                |values: &[&PropertyValue]| values[0] == values[1],
            )],
            TimeFilter::AcceptAll,
        );
        // интересует только отсутствие паники
        let _ = filter.matches(&message);
    }

    /// Свойство: сообщение без свойства `z` всегда отклоняется фильтром,
    /// требующим `z`, каким бы ни был предикат значения.
    #[test]
    fn prop_missing_property_always_rejects(message in message_strategy(), bound in value_strategy()) {
        prop_assume!(!message.property_exists("z"));
        for vf in [
            ValueFilter::AcceptAll,
            ValueFilter::Equals(bound.clone()),
            ValueFilter::GreaterOrEqual(bound.clone()),
            ValueFilter::LowerOrEqual(bound.clone()),
        ] {
            let filter = MessageFilter::property(PropertyFilter::new("z", vf));
            prop_assert!(!filter.matches(&message));
        }
    }

    /// Свойство: `BetweenInclusive` эквивалентен конъюнкции
    /// `GreaterOrEqual` и `LowerOrEqual`.
    #[test]
    fn prop_between_is_conjunction(value in value_strategy(), lo in value_strategy(), hi in value_strategy()) {
        let between = ValueFilter::BetweenInclusive(lo.clone(), hi.clone());
        let ge = ValueFilter::GreaterOrEqual(lo);
        let le = ValueFilter::LowerOrEqual(hi);
        prop_assert_eq!(between.matches(&value), ge.matches(&value) && le.matches(&value));
    }
}

/// Тест проверяет составной фильтр, близкий к реальной подписке:
/// тип события, порог скорости и кросс-свойственное ограничение.
#[test]
fn test_composite_subscription_filter() {
    let filter = MessageFilter::new(
        vec![
            PropertyFilter::equals("type", "wind"),
            PropertyFilter::new(
                "speed",
                ValueFilter::GreaterOrEqual(PropertyValue::from(60i64)),
            ),
        ],
        vec![PropertiesFilter::new(
            ["speed", "gust"],
            |values: &[&PropertyValue]| {
                // порыв сильнее устойчивого ветра
                values[1].compare(values[0]) == Some(std::cmp::Ordering::Greater)
            },
        )],
        TimeFilter::AtOrAfter(Utc::now() - Duration::hours(1)),
    );

    let mut storm = Message::new(Bytes::new());
    storm.put_property("type", "wind").unwrap();
    storm.put_property("speed", 75i64).unwrap();
    storm.put_property("gust", 90i64).unwrap();
    assert!(filter.matches(&storm));

    let mut breeze = Message::new(Bytes::new());
    breeze.put_property("type", "wind").unwrap();
    breeze.put_property("speed", 20i64).unwrap();
    breeze.put_property("gust", 25i64).unwrap();
    assert!(!filter.matches(&breeze));

    // порыв слабее ветра — отклоняет кросс-свойственный фильтр
    let mut inverted = Message::new(Bytes::new());
    inverted.put_property("type", "wind").unwrap();
    inverted.put_property("speed", 75i64).unwrap();
    inverted.put_property("gust", 70i64).unwrap();
    assert!(!filter.matches(&inverted));
}

/// Тест проверяет временную границу фильтра на настоящем сообщении:
/// метка времени фиксируется при создании.
#[test]
fn test_time_filter_against_creation_timestamp() {
    let msg = Message::new(Bytes::new());

    let past_only = MessageFilter::new(
        vec![],
        vec![],
        TimeFilter::AtOrBefore(Utc::now() - Duration::hours(1)),
    );
    assert!(!past_only.matches(&msg));

    let window = MessageFilter::new(
        vec![],
        vec![],
        TimeFilter::BetweenInclusive(Utc::now() - Duration::hours(1), Utc::now() + Duration::hours(1)),
    );
    assert!(window.matches(&msg));
}
