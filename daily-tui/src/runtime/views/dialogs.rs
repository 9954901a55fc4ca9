use crate::app::{App, DeleteTarget, Dialog, TodoForm};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{edit_text, enqueue_action};

pub(super) fn handle_dialog_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Esc {
        // A natural-language request in flight cannot be cancelled; keep its dialog.
        if !(app.nl_in_flight && matches!(app.dialog, Some(Dialog::NaturalLanguage(_)))) {
            app.close_dialog();
        }
        return;
    }

    let categories = app.categories.all().to_vec();
    let Some(dialog) = app.dialog.as_mut() else {
        return;
    };
    match dialog {
        Dialog::TodoForm(form) => {
            if key.code == KeyCode::Enter {
                enqueue_action(action_tx, Action::SubmitTodoForm);
            } else {
                handle_todo_form_key(key, form, &categories);
            }
        }
        Dialog::NewCategory(input) => {
            if key.code == KeyCode::Enter {
                enqueue_action(action_tx, Action::SubmitCategory(input.value.clone()));
            } else {
                edit_text(input, key);
            }
        }
        Dialog::NaturalLanguage(input) => {
            if app.nl_in_flight {
                return;
            }
            if key.code == KeyCode::Enter {
                let text = input.value.clone();
                app.nl_in_flight = true;
                enqueue_action(action_tx, Action::SubmitNaturalLanguage(text));
            } else {
                edit_text(input, key);
            }
        }
        Dialog::ObjectiveForm { title, .. } => {
            if key.code == KeyCode::Enter {
                app.submit_objective_form();
            } else {
                edit_text(title, key);
            }
        }
        Dialog::KeyResultForm { content, .. } => {
            if key.code == KeyCode::Enter {
                app.submit_key_result_form();
            } else {
                edit_text(content, key);
            }
        }
        Dialog::ConfirmDelete(target) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => match target.clone() {
                DeleteTarget::Todo { id, .. } => {
                    enqueue_action(action_tx, Action::DeleteTodo(id));
                }
                DeleteTarget::Objective { id, .. } => app.confirm_delete_objective(&id),
            },
            KeyCode::Char('n') | KeyCode::Char('N') => app.close_dialog(),
            _ => {}
        },
    }
}

fn handle_todo_form_key(key: KeyEvent, form: &mut TodoForm, categories: &[daily_api::Category]) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focused = form.focused.next(),
        KeyCode::BackTab | KeyCode::Up => form.focused = form.focused.prev(),
        _ if form.focused.is_text() => {
            if let Some(input) = form.focused_input() {
                edit_text(input, key);
            }
        }
        KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => form.cycle(true, categories),
        KeyCode::Left | KeyCode::Char('h') => form.cycle(false, categories),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::test_app;
    use crate::app::{TextInput, TodoFormField};
    use crossterm::event::KeyModifiers;
    use daily_api::{TodoId, TodoPriority};

    use super::super::super::action_queue::channel;

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_dialog_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn natural_language_submits_once_while_in_flight() {
        let (mut app, _rx) = test_app();
        app.open_natural_language();
        type_str(&mut app, "call mom");

        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Action::SubmitNaturalLanguage("call mom".into()))
        );
        assert!(app.nl_in_flight);
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        press(&mut app, KeyCode::Esc);
        assert!(app.dialog.is_some());
    }

    #[test]
    fn todo_form_edits_focused_field() {
        let (mut app, _rx) = test_app();
        app.open_new_todo();
        type_str(&mut app, "Plan");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);

        let Some(Dialog::TodoForm(form)) = &app.dialog else {
            panic!("expected todo form");
        };
        assert_eq!(form.title.value, "Plan");
        assert_eq!(form.focused, TodoFormField::Priority);
        assert_eq!(form.priority, TodoPriority::High);
        assert_eq!(press(&mut app, KeyCode::Enter), Some(Action::SubmitTodoForm));
    }

    #[test]
    fn confirm_delete_todo_enqueues_and_cancel_closes() {
        let (mut app, _rx) = test_app();
        app.dialog = Some(Dialog::ConfirmDelete(DeleteTarget::Todo {
            id: TodoId::new(3),
            title: "x".into(),
        }));
        assert_eq!(
            press(&mut app, KeyCode::Char('y')),
            Some(Action::DeleteTodo(TodoId::new(3)))
        );

        assert_eq!(press(&mut app, KeyCode::Char('n')), None);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn category_dialog_enqueues_name() {
        let (mut app, _rx) = test_app();
        app.dialog = Some(Dialog::NewCategory(TextInput::from_str("Wor")));
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Action::SubmitCategory("Work".into()))
        );
    }

    #[test]
    fn objective_dialog_submits_synchronously() {
        let (mut app, _rx) = test_app();
        app.open_new_objective();
        type_str(&mut app, "Ship v1");
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert!(app.dialog.is_none());
        assert_eq!(app.okr.objectives()[0].title, "Ship v1");
    }
}
