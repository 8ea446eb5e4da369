//! Live-listener tests: binding, request IDs and graceful shutdown.

use std::time::Duration;

use tokio::net::TcpListener;
use travel_proxy::config::AppConfig;
use travel_proxy::http::HttpServer;
use travel_proxy::lifecycle::Shutdown;

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_serves_and_shuts_down() {
    let config = AppConfig::default();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, common::test_state(&config));
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let res = client()
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("Server unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));

    let res = client()
        .get(format!("http://{}/reminders", addr))
        .header("x-request-id", "trip-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trip-123");
    let json: serde_json::Value = res.json().await.unwrap();
    assert_eq!(json["total"], 5);

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("Server did not stop");
    assert!(result.unwrap().is_ok());
}

#[tokio::test]
async fn test_places_server_is_separate() {
    let config = AppConfig::default();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::places(&config, common::test_state(&config));
    tokio::spawn(server.run(listener, shutdown.subscribe()));

    let res = client()
        .get(format!("http://{}/places?destination=Lisbon", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let res = client()
        .get(format!("http://{}/reminders", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404, "API routes are not served by the places listener");

    shutdown.trigger();
}
