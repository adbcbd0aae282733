use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use tokio::time::timeout;

use vestnik::{
    Broker, BrokerError, ClientId, LocalTransport, Message, MessageFilter, PropertyFilter,
    ServiceTier, Settings,
};

fn setup() -> (Arc<Broker>, Arc<LocalTransport>) {
    let transport = Arc::new(LocalTransport::new());
    let broker = Arc::new(Broker::new(Settings::default(), transport.clone()));
    (broker, transport)
}

fn register(
    broker: &Broker,
    transport: &LocalTransport,
    id: &str,
    tier: ServiceTier,
) -> (ClientId, vestnik::Inbox) {
    let client = ClientId::from(id);
    let inbox = transport.attach(&client);
    broker.register(client.clone(), tier).unwrap();
    (client, inbox)
}

/// Сценарий 1: A и B — FREE-клиенты; A подписан на `channel0`
/// с фильтром `type == "demo"`; B публикует сообщение с этим свойством;
/// A получает ровно одну доставку с этим сообщением.
#[tokio::test]
async fn test_scenario_free_channel_filtered_delivery() {
    let (broker, transport) = setup();
    let (a, mut inbox_a) = register(&broker, &transport, "client-a", ServiceTier::Free);
    let (b, _inbox_b) = register(&broker, &transport, "client-b", ServiceTier::Free);

    broker
        .subscribe(
            &a,
            "channel0",
            MessageFilter::property(PropertyFilter::equals("type", "demo")),
        )
        .unwrap();

    let mut msg = Message::new(Bytes::from_static(b"demo payload"));
    msg.put_property("type", "demo").unwrap();
    let delivered = broker.publish(&b, "channel0", &msg).unwrap();
    assert_eq!(delivered, 1);

    let delivery = timeout(Duration::from_millis(100), inbox_a.recv())
        .await
        .expect("timed out")
        .expect("no delivery");
    assert_eq!(delivery.channel, "channel0");
    assert_eq!(delivery.message.payload(), &Bytes::from_static(b"demo payload"));
    assert!(inbox_a.is_empty(), "ровно одна доставка");

    // сообщение без свойства не доходит
    broker
        .publish(&b, "channel0", &Message::new(Bytes::from_static(b"no props")))
        .unwrap();
    assert!(inbox_a.is_empty());
}

/// Сценарий 2: владелец O создаёт `priv0` с шаблоном, описывающим только
/// клиента X; X подписывается успешно, Y получает `Unauthorized`;
/// O публикует — получает только X.
#[tokio::test]
async fn test_scenario_privileged_channel_acl() {
    let (broker, transport) = setup();
    let (o, _inbox_o) = register(&broker, &transport, "owner", ServiceTier::Standard);
    let (x, mut inbox_x) = register(&broker, &transport, "client-x", ServiceTier::Free);
    let (y, inbox_y) = register(&broker, &transport, "client-y", ServiceTier::Free);

    broker.create_channel(&o, "priv0", Some("client-x")).unwrap();

    broker
        .subscribe(&x, "priv0", MessageFilter::accept_all())
        .unwrap();
    assert_eq!(
        broker.subscribe(&y, "priv0", MessageFilter::accept_all()),
        Err(BrokerError::Unauthorized)
    );

    let delivered = broker
        .publish(&o, "priv0", &Message::new(Bytes::from_static(b"secret")))
        .unwrap();
    assert_eq!(delivered, 1);

    let delivery = timeout(Duration::from_millis(100), inbox_x.recv())
        .await
        .expect("timed out")
        .expect("no delivery");
    assert_eq!(delivery.channel, "priv0");
    assert!(inbox_y.is_empty());
}

/// Сценарий 3: STANDARD-владелец с квотой 2 создаёт два канала, третий —
/// `QuotaExceeded`; после уничтожения одного создание вновь проходит.
#[tokio::test]
async fn test_scenario_quota_cycle() {
    let (broker, transport) = setup();
    let (o, _inbox) = register(&broker, &transport, "owner", ServiceTier::Standard);

    broker.create_channel(&o, "priv0", None).unwrap();
    broker.create_channel(&o, "priv1", None).unwrap();
    assert!(matches!(
        broker.create_channel(&o, "priv2", None),
        Err(BrokerError::QuotaExceeded { .. })
    ));
    assert!(broker.quota_reached(&o).unwrap());

    broker.destroy_channel(&o, "priv0").unwrap();
    assert!(!broker.channel_exists("priv0"));
    broker.create_channel(&o, "priv2", None).unwrap();
    assert!(broker.channel_exists("priv2"));
}

/// Тест проверяет, что повторная регистрация отклоняется и не меняет
/// класс обслуживания существующей записи.
#[tokio::test]
async fn test_duplicate_registration() {
    let (broker, transport) = setup();
    let (a, _inbox) = register(&broker, &transport, "client-a", ServiceTier::Premium);

    assert_eq!(
        broker.register(a.clone(), ServiceTier::Free),
        Err(BrokerError::AlreadyRegistered(a.clone()))
    );
    assert!(broker.is_registered_with_tier(&a, ServiceTier::Premium));
}

/// Тест проверяет, что сконфигурированные FREE-каналы существуют сразу
/// после конструирования брокера, до единого `create_channel`.
#[tokio::test]
async fn test_free_channels_preprovisioned() {
    let transport = Arc::new(LocalTransport::new());
    let settings = Settings {
        free_channels: 5,
        ..Settings::default()
    };
    let broker = Broker::new(settings, transport);

    for i in 0..5 {
        assert!(broker.channel_exists(&format!("channel{i}")));
    }
    assert!(!broker.channel_exists("channel5"));
}

/// Тест проверяет каскад `unregister`: все подписки клиента исчезают,
/// повторная регистрация проходит без остаточного состояния.
#[tokio::test]
async fn test_unregister_cascade_and_reregistration() {
    let (broker, transport) = setup();
    let (a, _inbox) = register(&broker, &transport, "client-a", ServiceTier::Free);

    broker
        .subscribe(&a, "channel0", MessageFilter::accept_all())
        .unwrap();
    broker
        .subscribe(&a, "channel1", MessageFilter::accept_all())
        .unwrap();

    broker.unregister(&a).unwrap();
    assert!(!broker.is_registered(&a));

    let _inbox = transport.attach(&a);
    broker.register(a.clone(), ServiceTier::Standard).unwrap();
    assert!(!broker.is_subscribed(&a, "channel0").unwrap());
    assert!(!broker.is_subscribed(&a, "channel1").unwrap());
}

/// Тест проверяет изменение и отзыв прав на привилегированном канале
/// через запрещающие шаблоны.
#[tokio::test]
async fn test_modify_and_remove_authorized_users() {
    let (broker, transport) = setup();
    let (o, _inbox_o) = register(&broker, &transport, "owner", ServiceTier::Premium);
    let (m1, _inbox_1) = register(&broker, &transport, "member-1", ServiceTier::Free);
    let (m2, _inbox_2) = register(&broker, &transport, "member-2", ServiceTier::Free);

    broker.create_channel(&o, "priv0", Some("member-*")).unwrap();
    assert!(broker.is_authorized(&m1, "priv0").unwrap());
    assert!(broker.is_authorized(&m2, "priv0").unwrap());

    // отзыв member-2 через запрещающий шаблон
    broker.remove_authorized_users(&o, "priv0", "member-2").unwrap();
    assert!(broker.is_authorized(&m1, "priv0").unwrap());
    assert!(!broker.is_authorized(&m2, "priv0").unwrap());

    // уже подписанный, но отозванный клиент больше не может публиковать
    assert_eq!(
        broker.publish(&m2, "priv0", &Message::new(Bytes::new())),
        Err(BrokerError::Unauthorized)
    );

    // замена разрешающего правила сбрасывает запреты
    broker.modify_authorized_users(&o, "priv0", "member-*").unwrap();
    assert!(broker.is_authorized(&m2, "priv0").unwrap());
}

/// Тест проверяет, что уничтожение канала снимает подписки и делает
/// дальнейшую публикацию ошибкой `UnknownChannel`.
#[tokio::test]
async fn test_destroy_channel_removes_subscriptions() {
    let (broker, transport) = setup();
    let (o, _inbox_o) = register(&broker, &transport, "owner", ServiceTier::Standard);
    let (a, inbox_a) = register(&broker, &transport, "client-a", ServiceTier::Free);

    broker.create_channel(&o, "priv0", None).unwrap();
    broker
        .subscribe(&a, "priv0", MessageFilter::accept_all())
        .unwrap();

    broker.destroy_channel_now(&o, "priv0").unwrap();
    assert!(!broker.channel_exists("priv0"));
    assert_eq!(
        broker.publish(&o, "priv0", &Message::new(Bytes::new())),
        Err(BrokerError::UnknownChannel("priv0".into()))
    );
    assert!(inbox_a.is_empty());
}

/// Тест проверяет конкурентную публикацию из нескольких задач:
/// подписчик получает все сообщения, брокер не теряет согласованности.
#[tokio::test]
async fn test_concurrent_publishers() {
    let (broker, transport) = setup();
    let (sub, mut inbox) = register(&broker, &transport, "subscriber", ServiceTier::Free);
    broker
        .subscribe(&sub, "channel0", MessageFilter::accept_all())
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..4 {
        let (publisher, _inbox) = register(
            &broker,
            &transport,
            &format!("publisher-{i}"),
            ServiceTier::Free,
        );
        let broker = broker.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..25 {
                broker
                    .publish(&publisher, "channel0", &Message::new(Bytes::new()))
                    .unwrap();
            }
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    let mut received = 0;
    while inbox.try_recv().is_ok() {
        received += 1;
    }
    assert_eq!(received, 100);
}
