use daily_api::TodoId;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work that needs the backend. Key handlers enqueue these; the event loop awaits them in order.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    LoadAll,
    SubmitTodoForm,
    ToggleTodo(TodoId),
    DeleteTodo(TodoId),
    SubmitCategory(String),
    SubmitNaturalLanguage(String),
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
