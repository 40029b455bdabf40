//! Document-change subscribers.
//!
//! Observers are plain callbacks held by the [`Editor`](crate::Editor). The
//! applier invokes each one exactly once per outermost batch, after every
//! operation of that batch has settled.

use crate::{Document, Operation};

/// Payload handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct Change<'a> {
    /// The settled document.
    pub document: &'a Document,
    /// Every operation applied in the batch, in application order.
    pub operations: &'a [Operation],
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Change<'_>)>;

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub(crate) fn add(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub(crate) fn notify(&mut self, change: &Change<'_>) {
        for (_, callback) in &mut self.callbacks {
            callback(change);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
