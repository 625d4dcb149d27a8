//! Latest-Value Channel
//!
//! Single-writer / single-reader change notification for UI-driven values
//! (the selected block). The publisher overwrites any pending value; the
//! consumer drains at most one value per call. This preserves "last write
//! wins, read once per frame" without a shared mutable singleton.

use std::cell::RefCell;
use std::rc::Rc;

/// Create a connected publisher/consumer pair.
pub fn channel<T>() -> (Publisher<T>, Consumer<T>) {
    let slot = Rc::new(RefCell::new(None));
    (
        Publisher { slot: slot.clone() },
        Consumer { slot },
    )
}

/// Writing half. Clonable so the UI layer can hold several handles.
#[derive(Debug, Clone)]
pub struct Publisher<T> {
    slot: Rc<RefCell<Option<T>>>,
}

impl<T> Publisher<T> {
    /// Publish a value, replacing any value not yet consumed.
    pub fn publish(&self, value: T) {
        *self.slot.borrow_mut() = Some(value);
    }
}

/// Reading half, owned by the consuming controller.
#[derive(Debug)]
pub struct Consumer<T> {
    slot: Rc<RefCell<Option<T>>>,
}

impl<T> Consumer<T> {
    /// Take the pending value, if any. At most one value per call.
    pub fn take(&self) -> Option<T> {
        self.slot.borrow_mut().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_channel_yields_nothing() {
        let (_tx, rx) = channel::<u32>();
        assert_eq!(rx.take(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let (tx, rx) = channel();
        tx.publish(1);
        tx.publish(2);
        tx.publish(3);
        assert_eq!(rx.take(), Some(3));
        assert_eq!(rx.take(), None);
    }

    #[test]
    fn test_publish_after_drain() {
        let (tx, rx) = channel();
        tx.publish("a");
        assert_eq!(rx.take(), Some("a"));
        tx.publish("b");
        assert_eq!(rx.take(), Some("b"));
    }
}
