use std::sync::Arc;

use tokio::test;

use cli::app::App;
use cli::cli::{Command, LoginArgs, RegisterArgs, UsersCommand};
use cli::commands::run;
use session::MemoryTokenStore;

use mock_service::{EMAIL, FakeService, PASSWORD};

fn app() -> App {
    let service = Arc::new(FakeService::default());
    App::from_parts(
        service.clone(),
        service.clone(),
        service,
        Arc::new(MemoryTokenStore::new()),
    )
}

async fn exec(app: &App, command: Command) -> anyhow::Result<String> {
    let mut out = Vec::new();
    run(app, command, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

fn login(password: &str) -> Command {
    Command::Login(LoginArgs {
        email: EMAIL.into(),
        password: password.into(),
    })
}

#[test]
async fn empty_list_says_so() -> anyhow::Result<()> {
    let app = app();

    let out = exec(&app, Command::Users(UsersCommand::List)).await?;
    assert_eq!(out, "no users\n");
    Ok(())
}

#[test]
async fn add_prints_refreshed_list() -> anyhow::Result<()> {
    let app = app();

    let out = exec(
        &app,
        Command::Users(UsersCommand::Add {
            username: "testuser1".into(),
            email: "testuser1@example.com".into(),
        }),
    )
    .await?;

    assert_eq!(out, "1\ttestuser1\ttestuser1@example.com\n");
    Ok(())
}

#[test]
async fn status_follows_login_and_logout() -> anyhow::Result<()> {
    let app = app();

    assert_eq!(exec(&app, Command::Status).await?, "not authenticated\n");

    assert_eq!(
        exec(&app, login(PASSWORD)).await?,
        format!("logged in as {}\n", EMAIL)
    );
    assert_eq!(exec(&app, Command::Status).await?, "authenticated\n");

    assert_eq!(exec(&app, Command::Logout).await?, "logged out\n");
    assert_eq!(exec(&app, Command::Status).await?, "not authenticated\n");
    Ok(())
}

#[test]
async fn bad_login_fails_with_service_message() {
    let app = app();

    let err = exec(&app, login("nope")).await.unwrap_err();
    assert_eq!(err.to_string(), "login failed: User does not exist.");
}

#[test]
async fn refresh_requires_login() -> anyhow::Result<()> {
    let app = app();

    let err = exec(&app, Command::Refresh).await.unwrap_err();
    assert_eq!(err.to_string(), "not logged in");

    exec(&app, login(PASSWORD)).await?;
    assert_eq!(exec(&app, Command::Refresh).await?, "tokens refreshed\n");
    assert_eq!(
        app.session.access_token().await.as_deref(),
        Some("access-2")
    );
    Ok(())
}

#[test]
async fn duplicate_registration_fails() -> anyhow::Result<()> {
    let app = app();

    let ok = exec(
        &app,
        Command::Register(RegisterArgs {
            username: "new".into(),
            email: "new@test.com".into(),
            password: PASSWORD.into(),
        }),
    )
    .await?;
    assert_eq!(ok, "registered new@test.com; log in to continue\n");

    let err = exec(
        &app,
        Command::Register(RegisterArgs {
            username: "test".into(),
            email: EMAIL.into(),
            password: PASSWORD.into(),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "registration failed: Sorry. That email already exists."
    );

    // registering never logs in
    assert_eq!(exec(&app, Command::Status).await?, "not authenticated\n");
    Ok(())
}

#[test]
async fn ping_prints_reply() -> anyhow::Result<()> {
    let app = app();

    assert_eq!(exec(&app, Command::Ping).await?, "success: pong\n");
    Ok(())
}
