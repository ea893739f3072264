//! The library behind vault's subscription gating and admin analytics.
//!
//! Every surface that needs to know what a user is entitled to (feature
//! gates in the apps, revenue and churn reports in the admin console) goes
//! through the resolver in [vault_shared::subscription]. This crate wires
//! that resolver to the account store.
//!
//! - Most integrators will be interested in the functions attached to the [Vault] struct.
//!   See the [service] module for evolving this functionality.
//! - The [model] module contains configuration, errors and the shared data model.
//! - The [subscribers] module keeps resolved views up to date as records change.
//! - The [blocking] module contains blocking variants of [Vault] functions for consumers without
//!   async runtimes.
//! - The [io] module contains interactions with the document store and exports on disk.

#[macro_use]
extern crate tracing;

pub mod blocking;
pub mod io;
pub mod model;
pub mod service;
pub mod subscribers;

#[derive(Clone)]
pub struct Vault {
    pub config: Config,
    pub store: Arc<dyn AccountStore>,
    pub events: EventSubs,
}

impl Vault {
    #[instrument(level = "info", skip_all, err(Debug))]
    pub async fn init(config: Config) -> VaultResult<Self> {
        Self::init_with_store(config, Arc::new(MemoryAccountStore::default())).await
    }

    /// Same as [Vault::init] but reads and writes accounts through `store`.
    pub async fn init_with_store(config: Config, store: Arc<dyn AccountStore>) -> VaultResult<Self> {
        logging::init(&config)?;

        let events = EventSubs::default();

        Ok(Self { config, store, events })
    }
}

use io::{AccountStore, MemoryAccountStore};
pub use model::core_config::{Config, PriceBook};
pub use model::errors::{VaultErr, VaultErrKind, VaultResult};
use service::events::EventSubs;
use service::logging;
use std::sync::Arc;
pub use vault_shared::{
    resolve, resolve_at, AccountRecord, ResolvedStatus, ResolvedSubscription, SubscriptionStatus,
    Tier, TierLabel,
};
