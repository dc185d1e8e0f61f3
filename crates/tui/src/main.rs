mod app;
mod config;
mod error;
mod report;
mod session;
mod store;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // Stdout belongs to the terminal UI; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "romana_tui={level},engine={level}",
            level = config.log_level
        ))
        .with_writer(std::io::stderr)
        .init();

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
