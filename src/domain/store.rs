use crate::domain::BookingEntry;
use crate::infrastructure::{
    ListenerRegistry, PublishContext, SnapshotChange, SnapshotListener, SubscriptionId,
};
use chrono::NaiveDate;
use std::rc::Rc;

/// Immutable view of the booking collection at one point in time.
pub type Snapshot = Rc<[BookingEntry]>;

/// Owns the session's bookings. Every mutation swaps in a whole new
/// snapshot before any listener runs, so readers never see a partial list.
pub struct BookingStore {
    entries: Snapshot,
    version: u64,
    listeners: ListenerRegistry,
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new().into(),
            version: 0,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Current snapshot, in insertion order.
    pub fn bookings_entries(&self) -> Snapshot {
        Rc::clone(&self.entries)
    }

    /// Number of snapshots published since the store was created.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a new entry. Callers are expected to have validated the input.
    pub fn add_booking_entry(
        &mut self,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
        name: impl Into<String>,
    ) {
        let entry = BookingEntry::new(arrival_date, departure_date, name);
        log::debug!("Adding booking entry {}", entry);

        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.extend_from_slice(&self.entries);
        next.push(entry.clone());

        self.publish(next.into(), SnapshotChange::Added(entry));
    }

    /// Removes the first entry structurally equal to `entry`. Absent entries
    /// are ignored and publish nothing.
    pub fn delete_booking_entry(&mut self, entry: &BookingEntry) {
        let Some(position) = self.entries.iter().position(|e| e == entry) else {
            log::debug!("Ignoring delete of absent booking entry {}", entry);
            return;
        };

        let mut next = self.entries.to_vec();
        let removed = next.remove(position);
        log::debug!("Deleted booking entry {} at index {}", removed, position);

        self.publish(next.into(), SnapshotChange::Removed(removed));
    }

    pub fn subscribe<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: SnapshotListener + 'static,
    {
        self.listeners.register(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unregister(id)
    }

    fn publish(&mut self, snapshot: Snapshot, change: SnapshotChange) {
        self.entries = snapshot;
        self.version += 1;

        let context = PublishContext {
            version: self.version,
            change: &change,
        };
        self.listeners.notify(&context, &self.entries);
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}
