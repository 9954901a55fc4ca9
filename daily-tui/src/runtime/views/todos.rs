use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_todos_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Tab => app.toggle_tab(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Char('a') => app.open_new_todo(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_selected_todo(),
        KeyCode::Char('n') => app.open_natural_language(),
        KeyCode::Char('c') => app.open_new_category(),
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(id) = app.selected_todo().map(|t| t.id) {
                enqueue_action(action_tx, Action::ToggleTodo(id));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete_selected_todo(),
        KeyCode::Char('s') => app.cycle_status_filter(),
        KeyCode::Char('p') => app.cycle_priority_filter(),
        KeyCode::Char('f') => app.cycle_category_filter(),
        KeyCode::Char('0') => app.reset_filters(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.toggle_sidebar_category(index);
        }
        KeyCode::Char('r') => enqueue_action(action_tx, Action::LoadAll),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::test_app;
    use crate::api::{ApiClient, DevBackend};
    use crate::app::{DeleteTarget, Dialog};
    use crossterm::event::KeyModifiers;
    use daily_api::{TodoId, TodoPayload};

    use super::super::super::action_queue::channel;

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_todos_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    #[test]
    fn toggle_without_selection_enqueues_nothing() {
        let (mut app, _rx) = test_app();
        assert_eq!(press(&mut app, KeyCode::Char(' ')), None);
    }

    #[test]
    fn refresh_enqueues_load() {
        let (mut app, _rx) = test_app();
        assert_eq!(press(&mut app, KeyCode::Char('r')), Some(Action::LoadAll));
    }

    #[tokio::test]
    async fn toggle_and_delete_target_selected_todo() {
        let (mut app, _rx) = test_app();
        let client = ApiClient::with_dev_backend(DevBackend::empty()).unwrap();
        for title in ["a", "b"] {
            app.todos
                .create(&client, &TodoPayload::new(title))
                .await
                .unwrap();
        }
        app.rebuild_visible_todos();

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(
            press(&mut app, KeyCode::Char(' ')),
            Some(Action::ToggleTodo(TodoId::new(2)))
        );

        assert_eq!(press(&mut app, KeyCode::Char('d')), None);
        assert_eq!(
            app.dialog,
            Some(Dialog::ConfirmDelete(DeleteTarget::Todo {
                id: TodoId::new(2),
                title: "b".into()
            }))
        );
    }

    #[test]
    fn q_quits() {
        let (mut app, _rx) = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
