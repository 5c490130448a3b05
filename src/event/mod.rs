mod bus;
mod events;
mod handlers;

pub use bus::{EventBus, SubscriptionId};
pub use handlers::EventLog;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}

// Re-export the event types
pub use events::CanvasEvent;
pub use events::EditorEvent;
