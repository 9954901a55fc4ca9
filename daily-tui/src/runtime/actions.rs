use crate::api::ApiClient;
use crate::app::{
    App, Dialog, CREATE_BANNER_TTL, NATURAL_LANGUAGE_BANNER_TTL, QUICK_BANNER_TTL,
};
use crate::store::TodoStoreError;
use crate::ui::truncate_chars;
use anyhow::Result;
use daily_api::{TodoId, TodoStatus};
use tracing::info;

use super::action_queue::Action;

pub(super) async fn run_action(action: Action, app: &mut App, client: &ApiClient) -> Result<()> {
    match action {
        Action::LoadAll => load_all(app, client).await,
        Action::SubmitTodoForm => handle_submit_todo_form(app, client).await,
        Action::ToggleTodo(id) => handle_toggle(app, client, id).await,
        Action::DeleteTodo(id) => handle_delete(app, client, id).await,
        Action::SubmitCategory(name) => handle_submit_category(app, client, &name).await,
        Action::SubmitNaturalLanguage(text) => {
            handle_natural_language(app, client, &text).await;
            app.nl_in_flight = false;
        }
    }
    Ok(())
}

/// Startup and manual refresh: categories first, then todos.
///
/// A category failure leaves the sidebar empty without a banner; a todo failure is
/// what tells the user the backend is down.
pub async fn load_all(app: &mut App, client: &ApiClient) {
    app.is_loading = true;
    app.categories.load(client).await;
    match app.todos.load(client).await {
        Ok(()) => app.clear_banner(),
        Err(e) => {
            let message = app.connectivity_message(&e.to_string());
            app.set_error(message);
        }
    }
    app.is_loading = false;
}

/// Shared failure reporting for remote mutations.
fn report_failure(app: &mut App, action: &str, error: TodoStoreError) {
    match error {
        TodoStoreError::Validation(message) => app.set_error(message),
        TodoStoreError::Rejected(e) => app.set_error(format!("{action} failed: {e}")),
        TodoStoreError::Resync(e) => {
            let message = app.connectivity_message(&e.to_string());
            app.set_error(message);
        }
    }
}

async fn handle_submit_todo_form(app: &mut App, client: &ApiClient) {
    let Some(Dialog::TodoForm(form)) = &mut app.dialog else {
        return;
    };
    let payload = match form.to_payload() {
        Ok(payload) => payload,
        Err(message) => {
            form.error = Some(message);
            return;
        }
    };
    form.error = None;
    let editing = form.editing;

    let result = match editing {
        Some(id) => app.todos.update(client, id, &payload).await,
        None => app.todos.create(client, &payload).await,
    };
    match result {
        Ok(()) => {
            app.close_dialog();
            let message = if editing.is_some() {
                "Todo updated"
            } else {
                "Todo created"
            };
            app.set_success(message, CREATE_BANNER_TTL);
        }
        Err(TodoStoreError::Resync(e)) => {
            app.close_dialog();
            report_failure(app, "Save", TodoStoreError::Resync(e));
        }
        // Keep the dialog so the user's input survives a rejected save.
        Err(e) => report_failure(app, "Save", e),
    }
}

async fn handle_toggle(app: &mut App, client: &ApiClient, id: TodoId) {
    match app.todos.toggle_status(client, id).await {
        Ok(Some(status)) => {
            let message = if status == TodoStatus::Done {
                "Marked as done"
            } else {
                "Marked as not done"
            };
            app.set_success(message, QUICK_BANNER_TTL);
        }
        Ok(None) => {}
        Err(e) => report_failure(app, "Update", e),
    }
}

async fn handle_delete(app: &mut App, client: &ApiClient, id: TodoId) {
    app.close_dialog();
    match app.todos.delete(client, id).await {
        Ok(()) => app.set_success("Todo deleted", QUICK_BANNER_TTL),
        Err(e) => report_failure(app, "Delete", e),
    }
}

async fn handle_submit_category(app: &mut App, client: &ApiClient, name: &str) {
    match app.categories.create(client, name).await {
        Ok(true) => {
            app.close_dialog();
            app.set_success("Category added", QUICK_BANNER_TTL);
        }
        Ok(false) => {}
        Err(e) => app.set_error(format!("Add category failed: {e}")),
    }
}

async fn handle_natural_language(app: &mut App, client: &ApiClient, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        app.clear_banner();
    }
    match app.todos.create_from_natural_language(client, text).await {
        Ok(()) => {
            info!(chars = text.chars().count(), "natural-language todo submitted");
            app.close_dialog();
            app.set_success(
                format!("Created todo from \"{}\"", truncate_chars(text, 20)),
                NATURAL_LANGUAGE_BANNER_TTL,
            );
        }
        Err(e) => report_failure(app, "Create", e),
    }
}
