use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tokio::test;

use adapters::{ApiError, AuthApi, HealthApi, UsersApi, UsersServiceClient};
use corelib::{Credentials, NewUser, Registration};

use stub_service::{KNOWN_EMAIL, KNOWN_PASSWORD, VALID_REFRESH, serve, spawn_stub};

fn client(url: &str) -> UsersServiceClient {
    UsersServiceClient::new(url, Duration::from_secs(5)).expect("client builds")
}

#[test]
async fn add_then_list_contains_user_once() -> anyhow::Result<()> {
    let (url, _state) = spawn_stub().await;
    let api = client(&url);

    let created = api
        .add_user(&NewUser::new("testuser1", "testuser1@example.com"))
        .await?;
    // The service only confirms with a message.
    assert!(created.is_none());

    let users = api.list_users().await?;
    let matches = users
        .iter()
        .filter(|u| u.username == "testuser1" && u.email == "testuser1@example.com")
        .count();
    assert_eq!(matches, 1);

    Ok(())
}

#[test]
async fn duplicate_user_surfaces_service_message() -> anyhow::Result<()> {
    let (url, _state) = spawn_stub().await;
    let api = client(&url);

    api.add_user(&NewUser::new("dup", "dup@example.com")).await?;
    let err = api
        .add_user(&NewUser::new("dup", "dup@example.com"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "Sorry. That email already exists.");

    Ok(())
}

#[test]
async fn login_returns_token_pair() -> anyhow::Result<()> {
    let (url, _state) = spawn_stub().await;
    let api = client(&url);

    let tokens = api
        .login(&Credentials {
            email: KNOWN_EMAIL.into(),
            password: KNOWN_PASSWORD.into(),
        })
        .await?;

    assert_eq!(tokens.access_token, "access-1");
    assert_eq!(tokens.refresh_token, VALID_REFRESH);

    Ok(())
}

#[test]
async fn unknown_login_is_404_with_message() {
    let (url, _state) = spawn_stub().await;
    let api = client(&url);

    let err = api
        .login(&Credentials {
            email: "nobody@test.com".into(),
            password: "whatever".into(),
        })
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "User does not exist.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
async fn refresh_exchanges_valid_token() -> anyhow::Result<()> {
    let (url, _state) = spawn_stub().await;
    let api = client(&url);

    let tokens = api.refresh(VALID_REFRESH).await?;
    assert_eq!(tokens.access_token, "access-2");
    assert_eq!(tokens.refresh_token, "refresh-2");

    let err = api.refresh("stale").await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    Ok(())
}

#[test]
async fn register_accepts_created_and_rejects_duplicate() -> anyhow::Result<()> {
    let (url, _state) = spawn_stub().await;
    let api = client(&url);

    let registration = Registration {
        username: "justatest".into(),
        email: "justatest@test.com".into(),
        password: "123456".into(),
    };

    api.register(&registration).await?;

    let err = api.register(&registration).await.unwrap_err();
    assert_eq!(err.user_message(), "Sorry. That email already exists.");

    Ok(())
}

#[test]
async fn ping_answers_pong() -> anyhow::Result<()> {
    let (url, _state) = spawn_stub().await;

    let msg = client(&url).ping().await?;
    assert_eq!(msg.status.as_deref(), Some("success"));
    assert_eq!(msg.message, "pong");

    Ok(())
}

#[test]
async fn garbage_body_is_a_decode_error() {
    let app = Router::new().route("/users", get(|| async { "<html>not json</html>" }));
    let url = serve(app).await;

    let err = client(&url).list_users().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
async fn unrecognised_add_confirmation_still_succeeds() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/users",
        post(|| async { (axum::http::StatusCode::CREATED, r#"{"ok":true}"#) }),
    );
    let url = serve(app).await;

    let created = client(&url)
        .add_user(&NewUser::new("testuser3", "testuser3@example.com"))
        .await?;
    assert!(created.is_none());

    Ok(())
}

#[test]
async fn plain_text_error_body_is_kept() {
    let app = Router::new().route(
        "/users",
        get(|| async { (axum::http::StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let url = serve(app).await;

    let err = client(&url).list_users().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.user_message(), "upstream down");
}

#[test]
async fn unreachable_service_is_http_error() {
    // Nothing listens on port 9 of the loopback interface.
    let err = client("http://127.0.0.1:9").list_users().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
}
