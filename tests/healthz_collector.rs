//! Scrape behaviour of the healthz collector against live status servers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use healthz_exporter::collector::{
    Collector, HealthSample, HealthState, HealthzCollector, ServerSource, StatusClient,
};

mod common;

fn client() -> StatusClient {
    common::direct_client(Duration::from_secs(2))
}

fn collector(servers: &[ServerSource]) -> HealthzCollector {
    HealthzCollector::with_client("gnatsd", "healthz", servers, client())
}

fn sample(id: &str, state: HealthState) -> HealthSample {
    HealthSample {
        server_id: id.to_string(),
        state,
    }
}

#[tokio::test]
async fn test_up_and_unreachable() {
    let s1 = common::start_status_server(200, r#"{"server_id":"s1"}"#).await;
    let s2 = common::unreachable_addr().await;

    let collector = collector(&[
        ServerSource::new("s1", common::base_url(s1)),
        ServerSource::new("s2", common::base_url(s2)),
    ]);

    let samples = collector.collect_health().await;
    assert_eq!(
        samples,
        vec![sample("s1", HealthState::Up), sample("s2", HealthState::Down)]
    );
}

#[tokio::test]
async fn test_polls_serverz_path() {
    let paths = Arc::new(Mutex::new(Vec::new()));
    let seen = paths.clone();
    let addr = common::start_programmable_server(move |path| {
        seen.lock().unwrap().push(path);
        async move { (200, r#"{"server_id":"x"}"#.to_string()) }
    })
    .await;

    let collector = collector(&[ServerSource::new("s1", common::base_url(addr))]);
    collector.collect_health().await;

    assert_eq!(*paths.lock().unwrap(), vec!["/streaming/serverz".to_string()]);
}

#[tokio::test]
async fn test_empty_server_id_is_down() {
    let empty_object = common::start_status_server(200, "{}").await;
    let empty_id = common::start_status_server(200, r#"{"server_id":""}"#).await;

    let collector = collector(&[
        ServerSource::new("a", common::base_url(empty_object)),
        ServerSource::new("b", common::base_url(empty_id)),
    ]);

    let samples = collector.collect_health().await;
    assert_eq!(
        samples,
        vec![sample("a", HealthState::Down), sample("b", HealthState::Down)]
    );
}

#[tokio::test]
async fn test_error_status_and_malformed_body_are_down() {
    let error_status = common::start_status_server(503, r#"{"server_id":"s1"}"#).await;
    let html = common::start_status_server(200, "<html>not json</html>").await;

    let collector = collector(&[
        ServerSource::new("s1", common::base_url(error_status)),
        ServerSource::new("s2", common::base_url(html)),
    ]);

    let samples = collector.collect_health().await;
    assert_eq!(
        samples,
        vec![sample("s1", HealthState::Down), sample("s2", HealthState::Down)]
    );
}

#[tokio::test]
async fn test_label_is_registered_id() {
    let addr = common::start_status_server(200, r#"{"server_id":"remote-id"}"#).await;

    let collector = collector(&[ServerSource::new("configured-id", common::base_url(addr))]);
    let samples = collector.collect().await;

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].name, "gnatsd_healthz_state");
    assert_eq!(
        samples[0].labels,
        vec![("server_id".to_string(), "configured-id".to_string())]
    );
    assert_eq!(samples[0].value, 1.0);
}

#[tokio::test]
async fn test_one_sample_per_server() {
    let up = common::start_status_server(200, r#"{"server_id":"up"}"#).await;
    let down = common::unreachable_addr().await;

    let servers: Vec<ServerSource> = (0..6)
        .map(|i| {
            let addr = if i % 2 == 0 { up } else { down };
            ServerSource::new(format!("s{i}"), common::base_url(addr))
        })
        .collect();
    let collector = collector(&servers);

    let samples = collector.collect_health().await;
    assert_eq!(samples.len(), servers.len());
    for (i, s) in samples.iter().enumerate() {
        assert_eq!(s.server_id, format!("s{i}"));
        let expected = if i % 2 == 0 { HealthState::Up } else { HealthState::Down };
        assert_eq!(s.state, expected);
    }
}

#[tokio::test]
async fn test_malformed_base_url_is_down() {
    let collector = collector(&[ServerSource::new("bad", "not a url")]);
    let samples = collector.collect_health().await;
    assert_eq!(samples, vec![sample("bad", HealthState::Down)]);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let slow = common::start_programmable_server(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, r#"{"server_id":"slow"}"#.to_string())
    })
    .await;
    let fast = common::start_status_server(200, r#"{"server_id":"fast"}"#).await;

    let client = common::direct_client(Duration::from_millis(300));
    let collector = HealthzCollector::with_client(
        "gnatsd",
        "healthz",
        &[
            ServerSource::new("slow", common::base_url(slow)),
            ServerSource::new("fast", common::base_url(fast)),
        ],
        client,
    );

    let started = std::time::Instant::now();
    let samples = collector.collect_health().await;
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(
        samples,
        vec![sample("slow", HealthState::Down), sample("fast", HealthState::Up)]
    );
}

#[tokio::test]
async fn test_concurrent_scrapes() {
    let addr = common::start_status_server(200, r#"{"server_id":"s1"}"#).await;
    let collector = Arc::new(collector(&[ServerSource::new("s1", common::base_url(addr))]));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let collector = collector.clone();
            tokio::spawn(async move { collector.collect_health().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), vec![sample("s1", HealthState::Up)]);
    }
}

#[tokio::test]
async fn test_scrapes_are_independent() {
    let healthy = Arc::new(std::sync::atomic::AtomicBool::new(true));
    let flag = healthy.clone();
    let addr = common::start_programmable_server(move |_| {
        let up = flag.load(std::sync::atomic::Ordering::SeqCst);
        async move {
            if up {
                (200, r#"{"server_id":"s1"}"#.to_string())
            } else {
                (500, "dead".to_string())
            }
        }
    })
    .await;

    let collector = collector(&[ServerSource::new("s1", common::base_url(addr))]);
    assert_eq!(collector.collect_health().await[0].state, HealthState::Up);

    healthy.store(false, std::sync::atomic::Ordering::SeqCst);
    assert_eq!(collector.collect_health().await[0].state, HealthState::Down);

    healthy.store(true, std::sync::atomic::Ordering::SeqCst);
    assert_eq!(collector.collect_health().await[0].state, HealthState::Up);
}
