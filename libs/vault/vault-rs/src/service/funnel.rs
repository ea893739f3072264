use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vault_shared::{resolve_at, AccountRecord, ResolvedStatus};

use crate::model::errors::VaultResult;
use crate::Vault;

/// Where accounts sit between sign-up and paying. Lifetime grants are
/// counted on their own and kept out of every other stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FunnelReport {
    pub total_accounts: u64,
    pub pending: u64,
    pub ever_subscribed: u64,
    pub trialing: u64,
    pub on_pass: u64,
    pub paying: u64,
    pub lifetime: u64,
    /// paying / ever_subscribed
    pub trial_to_paid_rate: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ChurnReport {
    pub paying: u64,
    pub lapsed: u64,
    /// lapsed / (lapsed + paying)
    pub churn_rate: f64,
}

pub fn funnel_report<'a>(
    records: impl IntoIterator<Item = &'a AccountRecord>, now: DateTime<Utc>,
) -> FunnelReport {
    let mut report = FunnelReport::default();

    for record in records {
        report.total_accounts += 1;

        let view = resolve_at(record, now);
        if view.has_lifetime_access {
            report.lifetime += 1;
            continue;
        }

        if view.has_had_subscription {
            report.ever_subscribed += 1;
        }
        if view.is_paying_at(now) {
            report.paying += 1;
        }
        match view.status {
            ResolvedStatus::Trialing => report.trialing += 1,
            ResolvedStatus::Pass => report.on_pass += 1,
            ResolvedStatus::Pending => report.pending += 1,
            _ => {}
        }
    }

    report.trial_to_paid_rate = ratio(report.paying, report.ever_subscribed);
    report
}

pub fn churn_report<'a>(
    records: impl IntoIterator<Item = &'a AccountRecord>, now: DateTime<Utc>,
) -> ChurnReport {
    let mut report = ChurnReport::default();

    for record in records {
        let view = resolve_at(record, now);
        if view.is_paying_at(now) {
            report.paying += 1;
        } else if view.is_lapsed() {
            report.lapsed += 1;
        }
    }

    report.churn_rate = ratio(report.lapsed, report.lapsed + report.paying);
    report
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl Vault {
    pub fn funnel_report(&self) -> VaultResult<FunnelReport> {
        self.funnel_report_at(Utc::now())
    }

    #[instrument(level = "debug", skip(self), err(Debug))]
    pub fn funnel_report_at(&self, now: DateTime<Utc>) -> VaultResult<FunnelReport> {
        let accounts = self.store.all()?;
        Ok(funnel_report(accounts.iter().map(|(_, record)| record), now))
    }

    pub fn churn_report(&self) -> VaultResult<ChurnReport> {
        self.churn_report_at(Utc::now())
    }

    #[instrument(level = "debug", skip(self), err(Debug))]
    pub fn churn_report_at(&self, now: DateTime<Utc>) -> VaultResult<ChurnReport> {
        let accounts = self.store.all()?;
        Ok(churn_report(accounts.iter().map(|(_, record)| record), now))
    }
}
