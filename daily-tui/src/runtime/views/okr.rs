use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_okr_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Tab => app.toggle_tab(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Char('n') => app.open_new_objective(),
        KeyCode::Char('a') => app.open_add_key_result(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_rename_selected_objective(),
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_selected_key_result(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_okr_row(),
        _ => {}
    }
}
