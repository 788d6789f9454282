use std::io::Write;

use anyhow::{Context, Result, bail};
use corelib::{Credentials, NewUser, Registration, User};
use session::SessionError;

use crate::app::App;
use crate::cli::{Command, UsersCommand};

/// Run one front-end command against `app`, writing user-facing text to `out`.
///
/// Login, register and refresh failures are returned so the process exits
/// non-zero; directory failures are only logged and the (possibly stale)
/// list is printed anyway.
pub async fn run(app: &App, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Users(UsersCommand::List) => {
            app.directory.load_users().await;
            print_users(&app.directory.users().await, out)?;
        }

        Command::Users(UsersCommand::Add { username, email }) => {
            app.directory.add_user(NewUser::new(username, email)).await;
            print_users(&app.directory.users().await, out)?;
        }

        Command::Register(args) => {
            let registration = Registration {
                username: args.username,
                email: args.email,
                password: args.password,
            };

            if let Err(e) = app.session.register(&registration).await {
                bail!("registration failed: {}", e.user_message());
            }
            writeln!(out, "registered {}; log in to continue", registration.email)?;
        }

        Command::Login(args) => {
            let credentials = Credentials {
                email: args.email,
                password: args.password,
            };

            if let Err(e) = app.session.login(&credentials).await {
                bail!("login failed: {}", e.user_message());
            }
            writeln!(out, "logged in as {}", credentials.email)?;
        }

        Command::Logout => {
            app.session.logout().await.context("logout failed")?;
            writeln!(out, "logged out")?;
        }

        Command::Status => {
            if app.session.is_authenticated().await {
                writeln!(out, "authenticated")?;
            } else {
                writeln!(out, "not authenticated")?;
            }
        }

        Command::Refresh => match app.session.refresh().await {
            Ok(()) => writeln!(out, "tokens refreshed")?,
            Err(SessionError::NoRefreshToken) => bail!("not logged in"),
            Err(e) => bail!("refresh failed: {}", e.user_message()),
        },

        Command::Ping => {
            let reply = app.ping().await.context("users service unreachable")?;
            writeln!(out, "{}", reply)?;
        }
    }

    Ok(())
}

fn print_users(users: &[User], out: &mut impl Write) -> Result<()> {
    if users.is_empty() {
        writeln!(out, "no users")?;
        return Ok(());
    }

    for user in users {
        writeln!(out, "{}\t{}\t{}", user.id, user.username, user.email)?;
    }
    Ok(())
}
