use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::{EditorEvent, EventHandler};

/// Buffers editor events so a panel can poll them once per frame.
///
/// The handler half is subscribed to the bus; the reader half stays with the panel.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<EditorEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handler that appends into this log
    pub fn handler(&self) -> Box<dyn EventHandler> {
        Box::new(self.clone())
    }

    /// Takes every event buffered since the last call
    pub fn drain(&self) -> Vec<EditorEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventBus;

    #[test]
    fn test_log_receives_bus_events() {
        let bus = EventBus::new();
        let log = EventLog::new();
        bus.subscribe(log.handler());
        assert_eq!(bus.handler_count(), 1);

        bus.emit(EditorEvent::LayersChanged { count: 2 });
        bus.emit(EditorEvent::SelectionChanged(None));

        assert_eq!(log.len(), 2);
        let events = log.drain();
        assert_eq!(events[0], EditorEvent::LayersChanged { count: 2 });
        assert!(log.is_empty());
    }
}
