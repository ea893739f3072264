use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vault_shared::time::parse_timestamp;
use vault_shared::{resolve_at, AccountRecord};

use crate::model::errors::VaultResult;
use crate::Vault;

pub const UNKNOWN_MONTH: &str = "unknown";

/// Headcounts for the user insights dashboard.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UserInsights {
    pub total: u64,
    pub active: u64,
    pub lifetime: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_tier: BTreeMap<String, u64>,
    /// `YYYY-MM` of `createdAt`, or [UNKNOWN_MONTH]
    pub signups_by_month: BTreeMap<String, u64>,
}

pub fn user_insights<'a>(
    records: impl IntoIterator<Item = &'a AccountRecord>, now: DateTime<Utc>,
) -> UserInsights {
    let mut insights = UserInsights::default();

    for record in records {
        let view = resolve_at(record, now);

        insights.total += 1;
        if view.is_active {
            insights.active += 1;
        }
        if view.has_lifetime_access {
            insights.lifetime += 1;
        }
        *insights.by_status.entry(view.status.as_str().to_string()).or_default() += 1;
        *insights.by_tier.entry(view.tier.to_string()).or_default() += 1;

        let month = record
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|ts| ts.format("%Y-%m").to_string())
            .unwrap_or_else(|| UNKNOWN_MONTH.to_string());
        *insights.signups_by_month.entry(month).or_default() += 1;
    }

    insights
}

impl Vault {
    pub fn user_insights(&self) -> VaultResult<UserInsights> {
        self.user_insights_at(Utc::now())
    }

    #[instrument(level = "debug", skip(self), err(Debug))]
    pub fn user_insights_at(&self, now: DateTime<Utc>) -> VaultResult<UserInsights> {
        let accounts = self.store.all()?;
        Ok(user_insights(accounts.iter().map(|(_, record)| record), now))
    }
}
