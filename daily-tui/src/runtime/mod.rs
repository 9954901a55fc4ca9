mod action_queue;
mod actions;
mod event_loop;
mod views;

pub use actions::load_all;
pub use event_loop::run_app;
