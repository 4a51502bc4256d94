//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use urlshort::config::ServiceConfig;
use urlshort::lifecycle::startup;
use urlshort::Shutdown;

/// Start the full service on `addr` with `config`; returns the shutdown handle.
pub async fn start_service(addr: SocketAddr, mut config: ServiceConfig) -> Shutdown {
    config.listener.bind_address = addr.to_string();

    let (server, listener) = startup::prepare(config).await.unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

/// A client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// `Location` header of a response, if any.
#[allow(dead_code)]
pub fn location(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
