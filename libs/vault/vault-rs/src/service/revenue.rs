use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vault_shared::{resolve_at, AccountRecord, TierLabel};

use crate::model::errors::VaultResult;
use crate::{PriceBook, Vault};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanRevenue {
    pub subscribers: u64,
    pub mrr_cents: u64,
}

/// Recurring revenue from paying subscribers. Lifetime grants, trials, passes,
/// lite subscriptions and subscriptions past their expiry are not counted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RevenueReport {
    pub paying_users: u64,
    pub mrr_cents: u64,
    pub arr_cents: u64,
    /// average monthly revenue per paying user, rounded down
    pub arpu_cents: u64,
    /// keyed by normalized tier label
    pub by_plan: BTreeMap<String, PlanRevenue>,
}

pub fn revenue_report<'a>(
    records: impl IntoIterator<Item = &'a AccountRecord>, prices: &PriceBook, now: DateTime<Utc>,
) -> RevenueReport {
    let mut report = RevenueReport::default();

    for record in records {
        if !resolve_at(record, now).is_paying_at(now) {
            continue;
        }

        let label = TierLabel::from_record(record.subscription_tier.as_deref());
        let cents = prices.monthly_cents(label);

        report.paying_users += 1;
        report.mrr_cents += cents;

        let plan = report.by_plan.entry(label.to_string()).or_default();
        plan.subscribers += 1;
        plan.mrr_cents += cents;
    }

    report.arr_cents = report.mrr_cents * 12;
    report.arpu_cents = report.mrr_cents.checked_div(report.paying_users).unwrap_or(0);
    report
}

impl Vault {
    pub fn revenue_report(&self) -> VaultResult<RevenueReport> {
        self.revenue_report_at(Utc::now())
    }

    #[instrument(level = "debug", skip(self), err(Debug))]
    pub fn revenue_report_at(&self, now: DateTime<Utc>) -> VaultResult<RevenueReport> {
        let accounts = self.store.all()?;
        let report =
            revenue_report(accounts.iter().map(|(_, record)| record), &self.config.prices, now);
        info!(paying = report.paying_users, mrr_cents = report.mrr_cents, "computed revenue");
        Ok(report)
    }
}
