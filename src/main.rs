use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use crypto_quotes_tui::{
    app::{App, AppContext},
    config::Config,
};
use env_logger::{Env, Target};

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file at path: {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_logging(config.log_file())?;

    let ctx = AppContext::init(config).await?;

    let mut app = App::new(ctx);
    let result = app.run();

    app.into_context().shutdown();

    result
}
