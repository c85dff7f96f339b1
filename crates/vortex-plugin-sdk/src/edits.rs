use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

use crate::ParameterId;

/// A parameter write travelling from a control context to the audio path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterEdit {
    pub id: ParameterId,
    pub value: i32,
}

impl ParameterEdit {
    pub fn new(id: ParameterId, value: i32) -> Self {
        Self { id, value }
    }
}

/// Bounded queue of pending parameter edits.
///
/// Senders belong to control threads other than the one running the
/// processor; MIDI and direct host writes on the processor's own thread do
/// not go through here. The owning processor drains the queue at the top of
/// each audio block, so an edit is observed no later than the next block.
/// Neither side blocks.
#[derive(Debug)]
pub struct ParameterEditQueue {
    tx: Sender<ParameterEdit>,
    rx: Receiver<ParameterEdit>,
}

impl ParameterEditQueue {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity.max(1));
        Self { tx, rx }
    }

    pub fn sender(&self) -> ParameterEditSender {
        ParameterEditSender {
            tx: self.tx.clone(),
        }
    }

    /// Next pending edit, if any.
    #[inline]
    pub fn pop(&self) -> Option<ParameterEdit> {
        self.rx.try_recv().ok()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// Cloneable handle for posting edits to a [`ParameterEditQueue`].
#[derive(Debug, Clone)]
pub struct ParameterEditSender {
    tx: Sender<ParameterEdit>,
}

impl ParameterEditSender {
    /// Posts an edit without blocking. Returns `false` if the queue is full
    /// or the processor has been dropped; the edit is discarded. Only call
    /// this from a control thread, since a full queue is logged.
    pub fn post(&self, edit: ParameterEdit) -> bool {
        match self.tx.try_send(edit) {
            Ok(()) => true,
            Err(TrySendError::Full(edit)) => {
                tracing::warn!(id = %edit.id, value = edit.value, "parameter edit queue full");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_arrive_in_order() {
        let queue = ParameterEditQueue::new(4);
        let sender = queue.sender();
        assert!(sender.post(ParameterEdit::new(ParameterId(3), 1)));
        assert!(sender.post(ParameterEdit::new(ParameterId(4), 2)));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(ParameterEdit::new(ParameterId(3), 1)));
        assert_eq!(queue.pop(), Some(ParameterEdit::new(ParameterId(4), 2)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn full_queue_drops_edit() {
        let queue = ParameterEditQueue::new(1);
        let sender = queue.sender();
        assert!(sender.post(ParameterEdit::new(ParameterId(0), 1)));
        assert!(!sender.post(ParameterEdit::new(ParameterId(0), 2)));
        assert_eq!(queue.pop().map(|edit| edit.value), Some(1));
    }

    #[test]
    fn sender_survives_across_threads() {
        let queue = ParameterEditQueue::new(8);
        let sender = queue.sender();
        std::thread::spawn(move || sender.post(ParameterEdit::new(ParameterId(1), 7)))
            .join()
            .expect("sender thread panicked");
        assert_eq!(queue.pop(), Some(ParameterEdit::new(ParameterId(1), 7)));
    }
}
