//! Integration tests for the status endpoint.
//!
//! These tests bind real listeners on loopback and talk to them over HTTP.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use hyclone_status::players::{FileSource, MockPlayerSource, PlayerSource, Roster};
use hyclone_status::{StatusError, StatusServer};
use pretty_assertions::assert_eq;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

fn loopback() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

/// A running server plus the handle that stops it.
struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<hyclone_status::Result<()>>,
}

impl Running {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn shutdown(self) {
        let _ = self.stop.send(());
        self.task.await.unwrap().unwrap();
    }
}

async fn start(source: Arc<dyn PlayerSource>) -> Running {
    let server = StatusServer::bind_addr(loopback(), source).await.unwrap();
    let addr = server.local_addr();
    let (stop, stopped) = oneshot::channel::<()>();

    let task = tokio::spawn(server.serve_with_shutdown(async move {
        let _ = stopped.await;
    }));

    Running { addr, stop, task }
}

#[tokio::test]
async fn get_root_returns_player_list() {
    let running = start(Arc::new(MockPlayerSource::new(["alice", "bob"]))).await;

    let response = reqwest::get(running.url("/")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "[alice bob]");

    running.shutdown().await;
}

#[tokio::test]
async fn post_to_other_path_returns_same_content() {
    let running = start(Arc::new(MockPlayerSource::new(["alice", "bob"]))).await;
    let client = reqwest::Client::new();

    let response = client
        .post(running.url("/foo"))
        .body("ignored")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "[alice bob]");

    running.shutdown().await;
}

#[tokio::test]
async fn body_tracks_source_at_request_time() {
    let mock = MockPlayerSource::new(["alice"]);
    let running = start(Arc::new(mock.clone())).await;

    let first = reqwest::get(running.url("/")).await.unwrap().text().await.unwrap();
    mock.set_players(["alice", "carol"]);
    let second = reqwest::get(running.url("/")).await.unwrap().text().await.unwrap();

    assert_eq!(first, "[alice]");
    assert_eq!(second, "[alice carol]");
    assert_eq!(mock.calls(), 2);

    running.shutdown().await;
}

#[tokio::test]
async fn second_instance_on_same_port_fails_to_bind() {
    let running = start(Arc::new(Roster::new())).await;

    let err = StatusServer::bind_addr(running.addr, Arc::new(Roster::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, StatusError::Bind { .. }));

    // The first instance keeps serving.
    let response = reqwest::get(running.url("/")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    running.shutdown().await;
}

#[tokio::test]
async fn roster_file_changes_are_served() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# lobby\nbob").unwrap();
    file.flush().unwrap();

    let running = start(Arc::new(FileSource::new(file.path()))).await;
    assert_eq!(
        reqwest::get(running.url("/")).await.unwrap().text().await.unwrap(),
        "[bob]"
    );

    writeln!(file, "alice").unwrap();
    file.flush().unwrap();
    assert_eq!(
        reqwest::get(running.url("/")).await.unwrap().text().await.unwrap(),
        "[alice bob]"
    );

    running.shutdown().await;
}

#[tokio::test]
async fn failing_source_returns_503() {
    let running = start(Arc::new(MockPlayerSource::failing())).await;

    let response = reqwest::get(running.url("/")).await.unwrap();
    assert_eq!(response.status().as_u16(), 503);

    running.shutdown().await;
}

#[tokio::test]
async fn json_snapshot_over_http() {
    let roster = Roster::with_players(["zoe", "amy"]);
    let running = start(Arc::new(roster)).await;

    let body: serde_json::Value = reqwest::Client::new()
        .get(running.url("/status"))
        .header("accept", "application/json")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["count"], 2);
    assert_eq!(body["players"], serde_json::json!(["amy", "zoe"]));

    running.shutdown().await;
}
