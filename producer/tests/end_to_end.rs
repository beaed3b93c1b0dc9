//! Producer against a real relay on a local port.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use carrier_relay_producer::{
    CarrierLink, DEFAULT_TIMEOUT, PayloadEncoding, ProducerSettings, RelayClient,
    SHUTDOWN_EVENT, STATUS_INITIALISING, STATUS_LINKED, STATUS_NO_LINK, STATUS_UNREACHABLE,
    SettingsStore, StatusColor, TransportError,
};
use carrier_relay_testing::{
    MemorySettingsStore, RecordingStatus, TestRelay, fixtures, init_test_tracing, spawn_relay,
};
use serde_json::json;

fn settings_for(relay: &TestRelay) -> ProducerSettings {
    ProducerSettings {
        target_server: "http://127.0.0.1".to_string(),
        target_port: relay.addr.port(),
        ..ProducerSettings::default()
    }
}

#[tokio::test]
async fn test_fresh_relay_has_no_event() {
    init_test_tracing();
    let relay = spawn_relay().await;
    let client = RelayClient::new(&relay.url, DEFAULT_TIMEOUT).unwrap();

    assert_eq!(client.last_event().await.unwrap(), None);
}

#[tokio::test]
async fn test_double_encoded_entry_is_unwrapped() {
    let relay = spawn_relay().await;
    let client = RelayClient::new(&relay.url, DEFAULT_TIMEOUT).unwrap();

    let ack = client.submit(&fixtures::fsd_jump("Sol")).await.unwrap();
    assert_eq!(ack.event, json!("FSDJump"));

    let held = relay.cache.get().expect("relay holds an event");
    assert_eq!(held.as_value(), &json!("FSDJump"));
    assert_eq!(client.last_event().await.unwrap(), Some(json!("FSDJump")));
}

#[tokio::test]
async fn test_plain_entry_is_accepted() {
    let relay = spawn_relay().await;
    let client = RelayClient::new(&relay.url, DEFAULT_TIMEOUT)
        .unwrap()
        .with_encoding(PayloadEncoding::Plain);

    let ack = client.submit(&fixtures::docked("Jameson Memorial")).await.unwrap();
    assert_eq!(ack.event, json!("Docked"));
    assert_eq!(client.last_event().await.unwrap(), Some(json!("Docked")));
}

#[tokio::test]
async fn test_entry_without_event_is_refused() {
    let relay = spawn_relay().await;
    let client = RelayClient::new(&relay.url, DEFAULT_TIMEOUT).unwrap();

    let err = client.submit(&fixtures::eventless()).await.unwrap_err();
    assert!(
        matches!(err, TransportError::Status { status: 400, .. }),
        "unexpected error: {err:?}"
    );
    assert!(relay.cache.is_empty());
}

#[tokio::test]
async fn test_latest_entry_wins() {
    let relay = spawn_relay().await;
    let client = RelayClient::new(&relay.url, DEFAULT_TIMEOUT).unwrap();

    client.submit(&fixtures::fsd_jump("Sol")).await.unwrap();
    client.submit(&fixtures::docked("Jameson Memorial")).await.unwrap();

    assert_eq!(client.last_event().await.unwrap(), Some(json!("Docked")));
    assert_eq!(relay.cache.snapshot().map(|c| c.sequence), Some(2));
}

#[tokio::test]
async fn test_link_lifecycle() {
    init_test_tracing();
    let relay = spawn_relay().await;
    let store = MemorySettingsStore::with(settings_for(&relay));
    let status = RecordingStatus::new();

    let link = CarrierLink::start(&store.load().unwrap(), status.clone()).unwrap();
    assert_eq!(
        status.last(),
        Some((STATUS_INITIALISING.to_string(), StatusColor::Green))
    );

    let ack = link.journal_entry(&fixtures::fsd_jump("Colonia")).await.unwrap();
    assert_eq!(ack.event, json!("FSDJump"));

    let farewell = link.stop().await.expect("relay is up");
    assert_eq!(farewell.event, json!(SHUTDOWN_EVENT));
    assert_eq!(
        status.last(),
        Some((STATUS_NO_LINK.to_string(), StatusColor::Grey))
    );
    assert_eq!(relay.cache.get().unwrap().as_value(), &json!(SHUTDOWN_EVENT));

    let err = link.journal_entry(&fixtures::docked("Colonia")).await.unwrap_err();
    assert!(matches!(err, TransportError::ShuttingDown));
}

#[tokio::test]
async fn test_prefs_change_retargets_link() {
    let first = spawn_relay().await;
    let second = spawn_relay().await;
    let store = MemorySettingsStore::with(settings_for(&first));

    let mut link = CarrierLink::start(&store.load().unwrap(), RecordingStatus::new()).unwrap();
    link.journal_entry(&fixtures::fsd_jump("Sol")).await.unwrap();

    store.save(&settings_for(&second)).unwrap();
    link.prefs_changed(&store.load().unwrap()).unwrap();
    link.journal_entry(&fixtures::docked("Abraham Lincoln")).await.unwrap();

    assert_eq!(first.cache.get().unwrap().as_value(), &json!("FSDJump"));
    assert_eq!(second.cache.get().unwrap().as_value(), &json!("Docked"));
    assert_eq!(store.save_count(), 1);
}

#[tokio::test]
async fn test_unreachable_relay_turns_status_red_until_it_answers() {
    // Bind and release a port so nothing listens there.
    let dead_port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let dead = ProducerSettings {
        target_server: "http://127.0.0.1".to_string(),
        target_port: dead_port,
        request_timeout_secs: 1,
        ..ProducerSettings::default()
    };
    let status = RecordingStatus::new();
    let mut link = CarrierLink::start(&dead, status.clone()).unwrap();

    let err = link.journal_entry(&fixtures::fsd_jump("Sol")).await.unwrap_err();
    assert!(err.is_unreachable(), "unexpected error: {err:?}");
    assert_eq!(
        status.last(),
        Some((STATUS_UNREACHABLE.to_string(), StatusColor::Red))
    );

    let relay = spawn_relay().await;
    link.prefs_changed(&settings_for(&relay)).unwrap();
    link.journal_entry(&fixtures::docked("Jameson Memorial")).await.unwrap();
    assert_eq!(
        status.last(),
        Some((STATUS_LINKED.to_string(), StatusColor::Green))
    );
    assert_eq!(status.updates().len(), 3);
}
