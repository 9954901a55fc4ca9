use crate::app::{App, Tab, TextInput};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod dialogs;
mod okr;
mod todos;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }
    if app.dialog.is_some() {
        dialogs::handle_dialog_key(key, app, action_tx);
        return;
    }
    match app.tab {
        Tab::Daily => todos::handle_todos_key(key, app, action_tx),
        Tab::Okr => okr::handle_okr_key(key, app),
    }
}

/// Apply a line-editing key to `input`. Returns false when the key is not an edit.
fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
        _ => return false,
    }
    true
}
