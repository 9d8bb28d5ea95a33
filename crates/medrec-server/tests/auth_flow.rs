//! Integration tests for the authentication flow.
//!
//! Each test starts its own server on an ephemeral port with fresh
//! in-memory storage.

use medrec_server::{build_app, config::AppConfig};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

async fn start_server() -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let app = build_app(&AppConfig::default());

    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

async fn register(client: &reqwest::Client, base: &str, username: &str, role: &str) {
    let resp = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({ "username": username, "password": "s3cret!", "role": role }))
        .send()
        .await
        .expect("register");
    assert_eq!(resp.status(), 201);
}

async fn login(client: &reqwest::Client, base: &str, username: &str) -> Value {
    let resp = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "username": username, "password": "s3cret!" }))
        .send()
        .await
        .expect("login");
    assert_eq!(resp.status(), 200);
    resp.json().await.expect("login body")
}

#[tokio::test]
async fn register_login_profile() {
    let (base, shutdown, handle) = start_server().await;
    let client = reqwest::Client::new();

    register(&client, &base, "dr.house", "doctor").await;
    let tokens = login(&client, &base, "dr.house").await;
    assert_eq!(tokens["role"], "doctor");
    let access = tokens["accessToken"].as_str().unwrap();

    let profile: Value = client
        .get(format!("{base}/api/auth/profile"))
        .bearer_auth(access)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["username"], "dr.house");
    assert_eq!(profile["role"], "doctor");
    // The hash never leaves the server.
    assert!(profile.get("passwordHash").is_none());
    assert!(profile.get("password").is_none());

    let _ = shutdown.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let (base, shutdown, handle) = start_server().await;
    let client = reqwest::Client::new();

    register(&client, &base, "nina", "nurse").await;
    let resp = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "username": "nina", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Unknown users answer identically.
    let resp = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "username": "nobody", "password": "s3cret!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let _ = shutdown.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (base, shutdown, handle) = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/auth/profile"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["msg"], "no token, authorization denied");

    let resp = client
        .get(format!("{base}/api/auth/profile"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let _ = shutdown.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn logout_revokes_the_refresh_token() {
    let (base, shutdown, handle) = start_server().await;
    let client = reqwest::Client::new();

    register(&client, &base, "ravi", "receptionist").await;
    let tokens = login(&client, &base, "ravi").await;
    let refresh = tokens["refreshToken"].as_str().unwrap();

    let resp = client
        .post(format!("{base}/api/auth/logout"))
        .json(&json!({ "refreshToken": refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // A revoked token fails refresh even though its signature is valid.
    let resp = client
        .post(format!("{base}/api/auth/refresh"))
        .json(&json!({ "refreshToken": refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let _ = shutdown.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn refresh_mints_a_new_pair_without_rotation() {
    let (base, shutdown, handle) = start_server().await;
    let client = reqwest::Client::new();

    register(&client, &base, "asha", "admin").await;
    let tokens = login(&client, &base, "asha").await;
    let refresh = tokens["refreshToken"].as_str().unwrap();

    let resp = client
        .post(format!("{base}/api/auth/refresh"))
        .json(&json!({ "refreshToken": refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let pair: Value = resp.json().await.unwrap();
    let new_access = pair["accessToken"].as_str().unwrap();
    assert!(pair["refreshToken"].as_str().is_some());

    // The new access token works.
    let resp = client
        .get(format!("{base}/api/auth/profile"))
        .bearer_auth(new_access)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // The old refresh token stays valid: refresh is rotation-less.
    let resp = client
        .post(format!("{base}/api/auth/refresh"))
        .json(&json!({ "refreshToken": refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let _ = shutdown.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn refresh_requires_a_token_in_the_body() {
    let (base, shutdown, handle) = start_server().await;
    let client = reqwest::Client::new();

    for path in ["/api/auth/refresh", "/api/auth/logout"] {
        let resp = client
            .post(format!("{base}{path}"))
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "{path}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["msg"], "refresh token required");
    }

    let _ = shutdown.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn user_listing_excludes_password_hashes() {
    let (base, shutdown, handle) = start_server().await;
    let client = reqwest::Client::new();

    register(&client, &base, "dr.a", "doctor").await;
    register(&client, &base, "nurse.b", "nurse").await;
    let tokens = login(&client, &base, "dr.a").await;
    let access = tokens["accessToken"].as_str().unwrap();

    let users: Value = client
        .get(format!("{base}/api/auth/users"))
        .bearer_auth(access)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert!(user["username"].as_str().is_some());
    }

    let _ = shutdown.send(());
    let _ = handle.await;
}
