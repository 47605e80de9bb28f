mod app;
mod config;
mod data;
mod event;
mod logging;
mod state;
mod ui;

use app::App;
use config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenv::dotenv().ok();
    color_eyre::install()?;
    logging::init(&config::log_path());

    let config = AppConfig::from_env();
    info!(
        symbol = %config.symbol,
        convert = %config.convert,
        api_key_set = config.api_key.is_some(),
        "starting price tracker"
    );

    let terminal = ratatui::init();
    let result = App::new(&config).run(terminal).await;
    ratatui::restore();
    result
}
