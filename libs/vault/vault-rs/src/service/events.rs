pub use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::*;

use crate::Vault;

#[derive(Clone)]
pub struct EventSubs {
    tx: Sender<Event>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The account record for this uid was written. The new record may be
    /// identical to the old one; subscribers recompute regardless.
    AccountChanged(String),

    /// A batch of records was loaded at once, every uid should be re-read.
    AccountsReloaded,
}

impl Default for EventSubs {
    fn default() -> Self {
        let (tx, _) = broadcast::channel::<Event>(10000);
        Self { tx }
    }
}

impl EventSubs {
    pub(crate) fn account_changed(&self, uid: &str) {
        self.queue(Event::AccountChanged(uid.to_string()));
    }

    pub(crate) fn accounts_reloaded(&self) {
        self.queue(Event::AccountsReloaded);
    }

    fn queue(&self, evt: Event) {
        // nobody listening is the common case for batch tooling
        if self.tx.receiver_count() == 0 {
            return;
        }
        if let Err(e) = self.tx.send(evt.clone()) {
            error!(?evt, ?e, "could not queue");
        }
    }
}

impl Vault {
    pub fn subscribe(&self) -> Receiver<Event> {
        self.events.tx.subscribe()
    }
}
