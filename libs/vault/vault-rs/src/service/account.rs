use std::path::Path;

use vault_shared::{resolve, AccountRecord, ResolvedSubscription};

use crate::io::export;
use crate::model::errors::{VaultErrKind, VaultResult};
use crate::Vault;

impl Vault {
    pub fn get_account(&self, uid: &str) -> VaultResult<AccountRecord> {
        self.store.get(uid)?.ok_or_else(|| VaultErrKind::AccountNonexistent.into())
    }

    /// Writes a whole record and notifies subscribers. This is the path the
    /// billing integration's writes arrive through.
    #[instrument(level = "debug", skip(self, record), err(Debug))]
    pub fn put_account(&self, uid: &str, record: AccountRecord) -> VaultResult<()> {
        self.store.put(uid, record)?;
        self.events.account_changed(uid);
        Ok(())
    }

    pub fn list_accounts(&self) -> VaultResult<Vec<(String, AccountRecord)>> {
        self.store.all()
    }

    /// Loads a collection export into the store, returning how many records
    /// were read.
    #[instrument(level = "info", skip(self, path), err(Debug))]
    pub fn import_accounts(&self, path: impl AsRef<Path>) -> VaultResult<usize> {
        let accounts = export::read_accounts(path)?;
        let count = accounts.len();
        for (uid, record) in accounts {
            self.store.put(&uid, record)?;
        }
        self.events.accounts_reloaded();
        info!(count, "imported accounts");
        Ok(count)
    }

    /// The current view for `uid`. A uid the store has never seen resolves as
    /// an account that has just signed up.
    pub fn resolve_account(&self, uid: &str) -> VaultResult<ResolvedSubscription> {
        let record = self.store.get(uid)?.unwrap_or_default();
        let view = resolve(&record);
        debug!(uid, tier = %view.tier, status = view.status.as_str(), "resolved subscription");
        Ok(view)
    }
}
