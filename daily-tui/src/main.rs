mod api;
mod app;
mod bootstrap;
mod cli;
mod config;
mod logging;
mod runtime;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use bootstrap::Backend;
use cli::{Cli, Commands};
use config::TasksConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = TasksConfig::load()?;

    let backend = match cli.command.unwrap_or(Commands::Run { api_url: None }) {
        Commands::ConfigPath => {
            let path = TasksConfig::config_path()?;
            if !path.exists() {
                config.save()?;
                println!("Created default config at {}", path.display());
            }
            println!("{}", path.display());
            return Ok(());
        }
        Commands::Dev => Backend::Dev,
        Commands::Run { api_url } => Backend::Remote(config.resolve_api_url(api_url.as_deref())),
    };

    let log_path = logging::init(&config.data_dir()?, &config.log_level)?;
    tracing::debug!(path = %log_path.display(), "logging initialised");

    let (mut app, client, mut store_rx) = bootstrap::build_app(&config, backend)?;
    bootstrap::initialize_app_state(&mut app, &client).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &client, &mut store_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
