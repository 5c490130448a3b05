use std::cell::Cell;
use std::rc::Rc;

/// Marks programmatic engine mutations so the bridge ignores their notifications.
///
/// The flag is only ever raised through [`Suppression::acquire`]. The returned
/// guard puts the previous value back when it goes out of scope, including on
/// early returns and unwinding, so the flag cannot be left raised.
#[derive(Debug, Clone, Default)]
pub struct Suppression {
    flag: Rc<Cell<bool>>,
}

impl Suppression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.flag.get()
    }

    pub fn acquire(&self) -> SuppressionGuard {
        let previous = self.flag.replace(true);
        SuppressionGuard {
            flag: Rc::clone(&self.flag),
            previous,
        }
    }
}

/// Scoped acquisition of a [`Suppression`] flag
#[derive(Debug)]
#[must_use = "suppression ends as soon as the guard is dropped"]
pub struct SuppressionGuard {
    flag: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}
