//! Shared helpers for gateway integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use docgate::config::GatewayConfig;
use docgate::http::GatewayServer;
use docgate::lifecycle::Shutdown;
use docgate::ratelimit::LimiterSet;
use docgate::store::DocumentStore;

pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a gateway on an ephemeral port and return its address.
pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let shutdown = Shutdown::new();
    let limiters = Arc::new(LimiterSet::from_config(&config.limits));
    let store = Arc::new(DocumentStore::new());
    let server = GatewayServer::new(&config, limiters, store);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestGateway { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A valid PNG payload: the 8-byte header followed by filler.
pub fn png_bytes(total_len: usize) -> Vec<u8> {
    let mut buf = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    buf.resize(total_len.max(8), 0xAB);
    buf
}

/// A minimal valid-looking PDF payload.
pub fn pdf_bytes() -> Vec<u8> {
    let mut buf = b"%PDF-1.4\n".to_vec();
    buf.extend_from_slice(&[0x20; 64]);
    buf
}

/// A ZIP local-file header, as a DOCX upload would start.
pub fn docx_bytes() -> Vec<u8> {
    let mut buf = vec![0x50, 0x4B, 0x03, 0x04];
    buf.extend_from_slice(&[0x00; 60]);
    buf
}

pub const DOCX_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Upload a payload as `user` and return the response.
pub async fn upload(
    gateway: &TestGateway,
    user: &str,
    content_type: &str,
    filename: &str,
    body: Vec<u8>,
) -> reqwest::Response {
    client()
        .post(gateway.url("/documents/upload"))
        .header("X-User-Id", user)
        .header("Content-Type", content_type)
        .header("X-Filename", filename)
        .body(body)
        .send()
        .await
        .expect("gateway unreachable")
}

/// Upload and extract the created document id; panics on rejection.
pub async fn upload_ok(
    gateway: &TestGateway,
    user: &str,
    content_type: &str,
    filename: &str,
    body: Vec<u8>,
) -> String {
    let response = upload(gateway, user, content_type, filename, body).await;
    assert_eq!(response.status(), 201, "upload rejected");
    let json: serde_json::Value = response.json().await.unwrap();
    json["document"]["id"].as_str().unwrap().to_string()
}
