use crate::domain::Snapshot;
use crate::infrastructure::{PublishContext, SnapshotChange, SnapshotListener};
use anyhow::Result;

/// Plugin that writes a log line for every published snapshot
pub struct SnapshotLoggerListener;

impl SnapshotListener for SnapshotLoggerListener {
    fn on_snapshot(&self, context: &PublishContext, snapshot: &Snapshot) -> Result<()> {
        let (verb, entry) = match context.change {
            SnapshotChange::Added(entry) => ("added", entry),
            SnapshotChange::Removed(entry) => ("removed", entry),
        };

        log::info!(
            "Snapshot v{}: {} {} - {} booking(s)",
            context.version,
            verb,
            entry,
            snapshot.len()
        );

        Ok(())
    }

    fn name(&self) -> &str {
        "Snapshot Logger"
    }
}
