use std::sync::Arc;
use std::time::Duration;

use hyper::client::HttpConnector;
use hyper::{Body, Client, Method, Request, StatusCode};
use serial_test::serial;

use crate::api::run;
use crate::config::AppConfig;
use crate::global::GlobalState;

use super::global::{mock_global_state, reset_tables, seed_follow, seed_post, seed_user, ts};

struct TestServer {
    global: Arc<GlobalState>,
    handler: common::context::Handler,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
    base: String,
}

async fn start_server() -> TestServer {
    let port = portpicker::pick_unused_port().expect("no free port");
    let config = AppConfig {
        bind_address: format!("[::]:{}", port),
        ..Default::default()
    };

    let (global, handler) = mock_global_state(config).await;
    reset_tables(&global.db).await;

    let handle = tokio::spawn(run(global.clone()));

    // We need to wait for the server to start
    tokio::time::sleep(Duration::from_millis(300)).await;

    TestServer {
        global,
        handler,
        handle,
        base: format!("http://localhost:{}", port),
    }
}

impl TestServer {
    /// Drives a clean shutdown so a hung accept loop fails the test
    /// instead of wedging the run.
    async fn shutdown(self, client: Client<HttpConnector>) {
        drop(self.global);
        // The client uses Keep-Alive, so we need to drop it to release the
        // global context
        drop(client);

        tokio::time::timeout(Duration::from_secs(1), self.handler.cancel())
            .await
            .expect("failed to cancel context");
        tokio::time::timeout(Duration::from_secs(1), self.handle)
            .await
            .expect("failed to stop api")
            .expect("api panicked")
            .expect("api failed");
    }
}

fn json_request(method: Method, uri: String, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(resp: hyper::Response<Body>) -> serde_json::Value {
    let body = hyper::body::to_bytes(resp.into_body()).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres (DATABASE_URL)"]
async fn test_follow_endpoints() {
    let server = start_server().await;
    seed_user(&server.global.db, 1, "alice").await;
    seed_user(&server.global.db, 2, "bob").await;

    let client = Client::new();

    let resp = client
        .request(json_request(
            Method::POST,
            format!("{}/v1/follows", server.base),
            serde_json::json!({ "follower_id": 1, "following_id": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["follow"]["follower_id"], 1);
    assert_eq!(body["follow"]["following_id"], 2);

    // Creating the same edge twice is a conflict the caller can branch on.
    let resp = client
        .request(json_request(
            Method::POST,
            format!("{}/v1/follows", server.base),
            serde_json::json!({ "follower_id": 1, "following_id": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["code"], "duplicate_edge");

    let resp = client
        .request(json_request(
            Method::POST,
            format!("{}/v1/follows", server.base),
            serde_json::json!({ "follower_id": 1, "following_id": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["code"], "self_follow");

    let resp = client
        .request(json_request(
            Method::POST,
            format!("{}/v1/follows", server.base),
            serde_json::json!({ "follower_id": 1, "following_id": 99 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["code"], "target_not_found");

    let resp = client
        .request(json_request(
            Method::DELETE,
            format!("{}/v1/follows", server.base),
            serde_json::json!({ "follower_id": 2, "following_id": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["code"], "edge_not_found");

    let resp = client
        .request(json_request(
            Method::DELETE,
            format!("{}/v1/follows", server.base),
            serde_json::json!({ "follower_id": 1, "following_id": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["success"], true);

    let resp = client
        .request(json_request(
            Method::POST,
            format!("{}/v1/follows", server.base),
            serde_json::json!({ "follower_id": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    server.shutdown(client).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres (DATABASE_URL)"]
async fn test_graph_read_endpoints() {
    let server = start_server().await;
    let db = &server.global.db;
    seed_user(db, 1, "alice").await;
    seed_user(db, 2, "bob").await;
    seed_user(db, 3, "carol").await;

    seed_follow(db, 1, 2, ts("2021-01-01T00:00:01Z")).await;
    seed_follow(db, 1, 3, ts("2021-01-01T00:00:02Z")).await;
    seed_follow(db, 2, 1, ts("2021-01-01T00:00:03Z")).await;

    let client = Client::new();

    let resp = client
        .get(format!("{}/v1/users/1/following", server.base).parse().unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["id"], 3);
    assert_eq!(body["data"][1]["id"], 2);

    let resp = client
        .get(
            format!("{}/v1/users/1/following?limit=1&offset=1", server.base)
                .parse()
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["username"], "bob");

    let resp = client
        .get(
            format!("{}/v1/users/1/following?limit=abc", server.base)
                .parse()
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(
            format!("{}/v1/users/1/following?offset=-1", server.base)
                .parse()
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["code"], "invalid_pagination");

    let resp = client
        .get(format!("{}/v1/users/1/followers", server.base).parse().unwrap())
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["username"], "bob");

    let resp = client
        .get(format!("{}/v1/users/1/stats", server.base).parse().unwrap())
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["following"], 2);
    assert_eq!(body["followers"], 1);

    let resp = client
        .get(format!("{}/v1/users/1/following/2", server.base).parse().unwrap())
        .await
        .unwrap();
    assert_eq!(json_body(resp).await["following"], true);

    let resp = client
        .get(format!("{}/v1/users/2/following/3", server.base).parse().unwrap())
        .await
        .unwrap();
    assert_eq!(json_body(resp).await["following"], false);

    let resp = client
        .get(format!("{}/v1/users/2", server.base).parse().unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["username"], "bob");
    assert_eq!(body["following"], 1);
    assert_eq!(body["followers"], 1);

    let resp = client
        .get(format!("{}/v1/users/99", server.base).parse().unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{}/v1/health", server.base).parse().unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "ok");

    server.shutdown(client).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires a live postgres (DATABASE_URL)"]
async fn test_feed_endpoint() {
    let server = start_server().await;
    let db = &server.global.db;
    seed_user(db, 1, "alice").await;
    seed_user(db, 2, "bob").await;
    seed_user(db, 3, "carol").await;

    seed_follow(db, 1, 2, ts("2021-01-01T00:00:01Z")).await;
    seed_follow(db, 1, 3, ts("2021-01-01T00:00:02Z")).await;

    seed_post(db, 10, 2, "A", ts("2021-01-02T00:00:01Z")).await;
    seed_post(db, 11, 2, "B", ts("2021-01-02T00:00:02Z")).await;
    seed_post(db, 12, 1, "C", ts("2021-01-02T00:00:03Z")).await;

    let client = Client::new();

    let resp = client
        .get(format!("{}/v1/feed/1?limit=2", server.base).parse().unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["content"], "C");
    assert_eq!(body["data"][1]["content"], "B");

    let resp = client
        .get(format!("{}/v1/feed/1", server.base).parse().unwrap())
        .await
        .unwrap();
    assert_eq!(json_body(resp).await["count"], 3);

    let resp = client
        .get(format!("{}/v1/feed/1?offset=2", server.base).parse().unwrap())
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["content"], "A");

    let resp = client
        .get(format!("{}/v1/feed/1?limit=-5", server.base).parse().unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["code"], "invalid_pagination");

    // Bob follows no one, his feed is just his own posts.
    let resp = client
        .get(format!("{}/v1/feed/2", server.base).parse().unwrap())
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["content"], "B");

    server.shutdown(client).await;
}
