use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod error;
mod handlers;
mod server;
mod store;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("users_crud=debug,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match config::Config::from_env() {
        Ok(config) => server::run(config).await,
        Err(err) => Err(err.into()),
    };

    if let Err(err) = result {
        tracing::error!("Error: {:#}", err);
        std::process::exit(1);
    }
}
