use rate_my_brain::env_config::{Config, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match Config::from_env().with_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: rate-my-brain [--seed <u64>] [--share-url <url>] [--export-dir <dir>]");
            std::process::exit(2);
        }
    };
    tracing::info!(seed = ?config.seed, share_url = %config.share_url, "starting RateMyBrain");

    if let Err(err) = rate_my_brain::play::run(config).await {
        eprintln!("terminal error: {err}");
        std::process::exit(1);
    }
}
