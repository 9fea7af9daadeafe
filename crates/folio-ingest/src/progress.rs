//! Delivery of progress events to whoever drives the UI.

use folio_core::ImportProgress;
use tokio::sync::mpsc;
use tracing::debug;

/// Receives progress events in emission order.
///
/// Reporting is fire-and-forget: a sink must never block the pipeline, and a
/// consumer that went away is not an import failure.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: ImportProgress);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: ImportProgress) {}
}

impl ProgressSink for mpsc::UnboundedSender<ImportProgress> {
    fn report(&self, progress: ImportProgress) {
        if self.send(progress).is_err() {
            debug!("Progress receiver dropped");
        }
    }
}

/// Lossy: an event is dropped when the channel is full, so a slow consumer
/// may miss `processing` events. Use an unbounded sender to see every event.
impl ProgressSink for mpsc::Sender<ImportProgress> {
    fn report(&self, progress: ImportProgress) {
        if let Err(e) = self.try_send(progress) {
            debug!("Progress event not delivered: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ImportStage;

    #[test]
    fn test_unbounded_sender_delivers_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.report(ImportProgress::new(ImportStage::Scanning, 0, 2, "a"));
        tx.report(ImportProgress::new(ImportStage::Processing, 2, 2, "b"));

        assert_eq!(rx.try_recv().unwrap().stage, ImportStage::Scanning);
        assert_eq!(rx.try_recv().unwrap().stage, ImportStage::Processing);
    }

    #[test]
    fn test_closed_receiver_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        tx.report(ImportProgress::new(ImportStage::Scanning, 0, 1, "ignored"));
    }

    #[test]
    fn test_full_bounded_channel_drops_event() {
        let (tx, mut rx) = mpsc::channel(1);
        tx.report(ImportProgress::new(ImportStage::Scanning, 0, 1, "kept"));
        tx.report(ImportProgress::new(ImportStage::Processing, 1, 1, "dropped"));

        assert_eq!(rx.try_recv().unwrap().details, "kept");
        assert!(rx.try_recv().is_err());
    }
}
