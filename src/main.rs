use std::sync::Arc;

use clap::{
    Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use spotsync::{config, db::Store, error, server, spotify::auth::TokenProvider, success};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP sync service
    Serve,

    /// Drop and recreate the database schema
    Reset,
}

#[tokio::main]
async fn main() {
    config::load_env();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            if let Err(e) = config::require_credentials() {
                error!("{}", e);
            }

            let store = match Store::connect(&config::database_url()).await {
                Ok(store) => store,
                Err(e) => error!("Failed to connect to database: {}", e),
            };
            if let Err(e) = store.init_schema().await {
                error!("Failed to initialize schema: {}", e);
            }

            let state = server::AppState {
                store,
                tokens: Arc::new(TokenProvider::new()),
                http: reqwest::Client::new(),
            };
            server::start_api_server(state).await;
        }
        Command::Reset => {
            let store = match Store::connect(&config::database_url()).await {
                Ok(store) => store,
                Err(e) => error!("Failed to connect to database: {}", e),
            };
            if let Err(e) = store.reset().await {
                error!("Failed to reset database: {}", e);
            }
            success!("Database has been reset.");
        }
    }
}
