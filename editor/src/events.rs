//! Change notifications.

use onto_core::{Edge, EdgeId, Node, NodeId};
use std::sync::mpsc::Sender;

/// A change observers are told about.
///
/// Every committed mutation emits its specific event (if it has one)
/// followed by `GraphChanged`. Undo and redo emit `GraphChanged` only.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    NodeAdded(Node),
    NodeDeleted(NodeId),
    RelationshipAdded(Edge),
    RelationshipDeleted(EdgeId),
    /// Something in the graph changed; re-derive any cached view.
    GraphChanged,
}

/// Receives editor events synchronously, inside the call that caused them.
pub trait EditorObserver {
    fn notify(&mut self, event: &EditorEvent);
}

impl<F> EditorObserver for F
where
    F: FnMut(&EditorEvent),
{
    fn notify(&mut self, event: &EditorEvent) {
        self(event)
    }
}

/// Forward events into a channel. A disconnected receiver is ignored.
impl EditorObserver for Sender<EditorEvent> {
    fn notify(&mut self, event: &EditorEvent) {
        if self.send(event.clone()).is_err() {
            tracing::debug!("event receiver disconnected");
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    entries: Vec<(SubscriptionId, Box<dyn EditorObserver>)>,
    next_id: u64,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Box<dyn EditorObserver>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: &EditorEvent) {
        for (_, observer) in self.entries.iter_mut() {
            observer.notify(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;

    #[test]
    fn test_observers_notified_in_order() {
        // GIVEN
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::default();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            observers.subscribe(Box::new(move |_: &EditorEvent| seen.borrow_mut().push(tag)));
        }

        // WHEN
        observers.emit(&EditorEvent::GraphChanged);

        // THEN
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut observers = Observers::default();
        let id = observers.subscribe(Box::new(|_: &EditorEvent| {}));

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        assert_eq!(observers.len(), 0);
    }

    #[test]
    fn test_channel_observer() {
        let (tx, rx) = mpsc::channel();
        let mut observers = Observers::default();
        observers.subscribe(Box::new(tx));

        observers.emit(&EditorEvent::NodeDeleted(NodeId::new(3)));
        drop(observers);

        let events: Vec<EditorEvent> = rx.iter().collect();
        assert_eq!(events, vec![EditorEvent::NodeDeleted(NodeId::new(3))]);
    }
}
