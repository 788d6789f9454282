use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[clap(name = "users-client", version, about = "Client for the users service")]
pub struct Cli {
    /// Base URL of the users service (overrides USERS_SERVICE_URL)
    #[clap(long, global = true)]
    pub url: Option<String>,

    /// SQLite URL for the persisted refresh token (overrides TOKEN_STORE_URL)
    #[clap(long, global = true)]
    pub token_store: Option<String>,

    /// Keep tokens in memory only
    #[clap(long, global = true)]
    pub ephemeral: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List or add users
    #[clap(subcommand)]
    Users(UsersCommand),

    /// Create an account (does not log in)
    Register(RegisterArgs),

    /// Log in and store the refresh token
    Login(LoginArgs),

    /// Forget both tokens
    Logout,

    /// Report whether the session is authenticated, refreshing if needed
    Status,

    /// Exchange the stored refresh token for new tokens
    Refresh,

    /// Check that the users service is reachable
    Ping,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List,
    Add {
        #[clap(long)]
        username: String,
        #[clap(long)]
        email: String,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[clap(long)]
    pub username: String,
    #[clap(long)]
    pub email: String,
    #[clap(long, env = "USERS_CLIENT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[clap(long)]
    pub email: String,
    #[clap(long, env = "USERS_CLIENT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Cli {
    /// Flags win over the environment.
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(url) = &self.url {
            cfg.users_service_url = url.clone();
        }
        if let Some(store) = &self.token_store {
            cfg.token_store_url = store.clone();
        }
        if self.ephemeral {
            cfg.ephemeral = true;
        }
    }
}

impl Command {
    /// Span label for the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Users(UsersCommand::List) => "users_list",
            Command::Users(UsersCommand::Add { .. }) => "users_add",
            Command::Register(_) => "register",
            Command::Login(_) => "login",
            Command::Logout => "logout",
            Command::Status => "status",
            Command::Refresh => "refresh",
            Command::Ping => "ping",
        }
    }
}
