pub mod event_queue;
pub mod reactive_core;
pub mod unlock_reactive;
