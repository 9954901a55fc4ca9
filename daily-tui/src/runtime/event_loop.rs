use crate::api::ApiClient;
use crate::app::App;
use crate::store::StoreEventRx;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::action_queue::channel;
use super::actions::run_action;
use super::views::handle_view_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
    store_rx: &mut StoreEventRx,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    loop {
        while let Ok(event) = store_rx.try_recv() {
            app.apply_store_event(event);
        }
        app.tick(Instant::now());

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            // Show the in-flight state before suspending on the network.
            app.is_loading = true;
            terminal.draw(|f| ui::render(f, app))?;
            run_action(action, app, client).await?;
            app.is_loading = false;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
