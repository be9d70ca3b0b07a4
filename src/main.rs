use mimalloc::MiMalloc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let cfg = match expenses_api::config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "error in loading configuration");
            std::process::exit(1);
        }
    };

    info!(
        listen_addr = %cfg.listen_addr(),
        shutdown_timeout_secs = cfg.shutdown_timeout.as_secs(),
        "starting expenses-api"
    );

    if let Err(e) = expenses_api::server::run(cfg).await {
        error!(error = %e, "fatal lifecycle error");
        std::process::exit(1);
    }
}
