use crate::object::ObjectId;
use crate::tool::Tool;

/// Notifications emitted by the graphics engine as its object graph changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasEvent {
    SelectionCreated { selected: Vec<ObjectId> },
    SelectionUpdated { selected: Vec<ObjectId> },
    SelectionCleared,
    ObjectAdded(ObjectId),
    ObjectModified(ObjectId),
    ObjectRemoved(ObjectId),
}

impl CanvasEvent {
    /// Delivery order within one drained batch: selection changes first,
    /// then object changes. Events of equal rank keep their emission order.
    pub fn delivery_rank(&self) -> u8 {
        match self {
            CanvasEvent::SelectionCreated { .. }
            | CanvasEvent::SelectionUpdated { .. }
            | CanvasEvent::SelectionCleared => 0,
            CanvasEvent::ObjectAdded(_)
            | CanvasEvent::ObjectModified(_)
            | CanvasEvent::ObjectRemoved(_) => 1,
        }
    }

    pub fn is_selection(&self) -> bool {
        self.delivery_rank() == 0
    }
}

/// Notifications published to UI consumers of the editor session
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    HistoryChanged {
        len: usize,
        cursor: Option<usize>,
    },
    LayersChanged {
        count: usize,
    },
    SelectionChanged(Option<ObjectId>),
    ToolChanged {
        old: Tool,
        new: Tool,
    },
}
