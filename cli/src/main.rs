use clap::Parser;
use tracing::Instrument;

use cli::app::App;
use cli::cli::Cli;
use cli::commands;
use cli::config::AppConfig;
use common::logger::{TraceId, init_logger, root_span};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // The subscriber goes up first so config fallbacks are logged.
    init_logger("users-client", AppConfig::json_logs_from_env());

    let mut cfg = AppConfig::from_env();
    args.apply(&mut cfg);

    let app = App::new(&cfg).await?;

    let span = root_span(args.command.name(), &TraceId::new());
    let mut stdout = std::io::stdout().lock();

    commands::run(&app, args.command, &mut stdout)
        .instrument(span)
        .await
}
