use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use vault_shared::time::parse_timestamp;
use vault_shared::ResolvedSubscription;

use crate::model::errors::{Unexpected, VaultResult};
use crate::service::events::Event;
use crate::Vault;

/// A live view of one account's subscription.
///
/// Every write to the account's record is pushed through the resolver and
/// replaces the previous view. Readers only ever see the most recently
/// resolved view; intermediate views may be skipped if writes arrive faster
/// than they are read.
pub struct SubscriptionWatch {
    pub uid: String,
    rx: watch::Receiver<ResolvedSubscription>,
}

impl SubscriptionWatch {
    pub fn current(&self) -> ResolvedSubscription {
        self.rx.borrow().clone()
    }

    /// Waits for the next resolved view. Returns `None` once the background
    /// task has stopped, after which [SubscriptionWatch::current] stays fixed.
    pub async fn changed(&mut self) -> Option<ResolvedSubscription> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

impl Vault {
    /// Resolves `uid` now and keeps re-resolving it whenever its record is
    /// written, and again once a live trial or pass reaches its end time.
    /// Must be called from within a tokio runtime. The background task stops
    /// when the returned watch is dropped.
    pub fn watch_subscription(&self, uid: &str) -> VaultResult<SubscriptionWatch> {
        // subscribe before the first read so a write in between is not missed
        let mut events = self.subscribe();
        let (tx, rx) = watch::channel(self.resolve_account(uid)?);

        let bg = self.clone();
        let task_uid = uid.to_string();

        tokio::spawn(async move {
            loop {
                let wake = next_transition(&tx.borrow(), Utc::now());
                let evt = tokio::select! {
                    _ = tx.closed() => return,
                    _ = sleep_for(wake) => None,
                    evt = events.recv() => Some(evt),
                };

                match evt {
                    None => debug!(uid = %task_uid, "trial or pass boundary reached, re-resolving"),
                    Some(Ok(Event::AccountChanged(changed))) if changed == task_uid => {}
                    Some(Ok(Event::AccountsReloaded)) => {}
                    Some(Ok(Event::AccountChanged(_))) => continue,
                    Some(Err(RecvError::Lagged(skipped))) => {
                        warn!(uid = %task_uid, skipped, "subscription watch lagged, re-reading");
                    }
                    Some(Err(RecvError::Closed)) => return,
                }

                if let Some(view) = bg.resolve_account(&task_uid).log_and_ignore() {
                    tx.send_if_modified(|current| {
                        if *current == view {
                            false
                        } else {
                            *current = view;
                            true
                        }
                    });
                }
            }
        });

        Ok(SubscriptionWatch { uid: uid.to_string(), rx })
    }
}

/// How long until the earliest trial or expiry timestamp in `view` that is
/// still ahead of `now`.
fn next_transition(view: &ResolvedSubscription, now: DateTime<Utc>) -> Option<Duration> {
    [view.trial_ends_at.as_deref(), view.expires_at.as_deref()]
        .into_iter()
        .flatten()
        .filter_map(parse_timestamp)
        .filter(|ts| *ts > now)
        .min()
        .and_then(|ts| (ts - now).to_std().ok())
}

async fn sleep_for(wake: Option<Duration>) {
    match wake {
        Some(wake) => tokio::time::sleep(wake).await,
        None => std::future::pending().await,
    }
}
