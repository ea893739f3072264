use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;
use vault_shared::{AccountRecord, ResolvedSubscription};

use crate::io::AccountStore;
use crate::model::core_config::Config;
use crate::model::errors::{Unexpected, VaultResult};
use crate::service::funnel::{ChurnReport, FunnelReport};
use crate::service::insights::UserInsights;
use crate::service::revenue::RevenueReport;
use crate::subscribers::subscription::SubscriptionWatch;

#[derive(Clone)]
pub struct Vault {
    vault: crate::Vault,
    rt: Arc<Runtime>,
}

impl Vault {
    pub fn init(config: Config) -> VaultResult<Self> {
        let rt = Arc::new(Runtime::new().map_unexpected()?);
        let vault = rt.block_on(crate::Vault::init(config))?;
        Ok(Self { rt, vault })
    }

    pub fn init_with_store(config: Config, store: Arc<dyn AccountStore>) -> VaultResult<Self> {
        let rt = Arc::new(Runtime::new().map_unexpected()?);
        let vault = rt.block_on(crate::Vault::init_with_store(config, store))?;
        Ok(Self { rt, vault })
    }

    pub fn get_account(&self, uid: &str) -> VaultResult<AccountRecord> {
        self.vault.get_account(uid)
    }

    pub fn put_account(&self, uid: &str, record: AccountRecord) -> VaultResult<()> {
        self.vault.put_account(uid, record)
    }

    pub fn list_accounts(&self) -> VaultResult<Vec<(String, AccountRecord)>> {
        self.vault.list_accounts()
    }

    pub fn import_accounts(&self, path: impl AsRef<Path>) -> VaultResult<usize> {
        self.vault.import_accounts(path)
    }

    pub fn resolve_account(&self, uid: &str) -> VaultResult<ResolvedSubscription> {
        self.vault.resolve_account(uid)
    }

    /// The returned watch is driven by this instance's runtime, so
    /// [SubscriptionWatch::current] keeps updating while the caller blocks.
    pub fn watch_subscription(&self, uid: &str) -> VaultResult<SubscriptionWatch> {
        let _guard = self.rt.enter();
        self.vault.watch_subscription(uid)
    }

    pub fn revenue_report(&self) -> VaultResult<RevenueReport> {
        self.vault.revenue_report()
    }

    pub fn funnel_report(&self) -> VaultResult<FunnelReport> {
        self.vault.funnel_report()
    }

    pub fn churn_report(&self) -> VaultResult<ChurnReport> {
        self.vault.churn_report()
    }

    pub fn user_insights(&self) -> VaultResult<UserInsights> {
        self.vault.user_insights()
    }
}
