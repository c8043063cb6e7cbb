use statusbadge::runner;
use statusbadge::utils;

#[tokio::main]
async fn main() {
    if let Err(e) = utils::init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = runner::run_server().await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
