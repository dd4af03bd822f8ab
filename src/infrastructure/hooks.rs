use crate::domain::{BookingEntry, Snapshot};
use anyhow::Result;

/// What produced a published snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotChange {
    Added(BookingEntry),
    Removed(BookingEntry),
}

/// Context provided to snapshot listeners
#[derive(Debug, Clone, Copy)]
pub struct PublishContext<'a> {
    pub version: u64,
    pub change: &'a SnapshotChange,
}

/// Trait for plugins that react to newly published snapshots
pub trait SnapshotListener {
    /// Called after the store has replaced its snapshot
    fn on_snapshot(&self, context: &PublishContext, snapshot: &Snapshot) -> Result<()>;

    /// Human-readable name for this listener
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of snapshot listeners, notified in registration order
pub struct ListenerRegistry {
    listeners: Vec<(SubscriptionId, Box<dyn SnapshotListener>)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn register<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: SnapshotListener + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        log::debug!("Registered snapshot listener '{}'", listener.name());
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered
    pub fn unregister(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Notify every listener. A failing listener is logged and skipped.
    pub fn notify(&self, context: &PublishContext, snapshot: &Snapshot) {
        for (_, listener) in &self.listeners {
            if let Err(e) = listener.on_snapshot(context, snapshot) {
                log::warn!("Snapshot listener '{}' failed: {}", listener.name(), e);
            }
        }
    }

    pub fn list_listeners(&self) -> Vec<&str> {
        self.listeners.iter().map(|(_, l)| l.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Named {
        name: &'static str,
        calls: Rc<RefCell<Vec<&'static str>>>,
        fail: bool,
    }

    impl SnapshotListener for Named {
        fn on_snapshot(&self, _context: &PublishContext, _snapshot: &Snapshot) -> Result<()> {
            self.calls.borrow_mut().push(self.name);
            if self.fail {
                anyhow::bail!("{} refused", self.name);
            }
            Ok(())
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn publish(registry: &ListenerRegistry) {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let entry = BookingEntry::new(day, day, "Alice");
        let change = SnapshotChange::Added(entry.clone());
        let snapshot: Snapshot = vec![entry].into();
        registry.notify(
            &PublishContext {
                version: 1,
                change: &change,
            },
            &snapshot,
        );
    }

    #[test]
    fn test_failing_listener_does_not_stop_others() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.register(Named {
            name: "first",
            calls: calls.clone(),
            fail: true,
        });
        registry.register(Named {
            name: "second",
            calls: calls.clone(),
            fail: false,
        });

        publish(&registry);

        assert_eq!(*calls.borrow(), vec!["first", "second"]);
        assert_eq!(registry.list_listeners(), vec!["first", "second"]);
    }

    #[test]
    fn test_unregister_only_removes_matching_id() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        let first = registry.register(Named {
            name: "first",
            calls: calls.clone(),
            fail: false,
        });
        registry.register(Named {
            name: "second",
            calls: calls.clone(),
            fail: false,
        });

        assert!(registry.unregister(first));
        assert_eq!(registry.len(), 1);
        publish(&registry);

        assert_eq!(*calls.borrow(), vec!["second"]);
    }
}
