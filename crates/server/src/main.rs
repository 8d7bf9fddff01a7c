mod activation;
mod api;
mod cli;
mod router;
mod startup;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    promptwall_core::config::load_dotenv();
    let config = promptwall_core::Config::from_env();
    let args: Vec<String> = std::env::args().collect();

    if cli::dispatch(&config, &args).await? {
        return Ok(());
    }

    config.log_summary();
    startup::serve(&config).await
}
