//! Resolution of an [AccountRecord] into the subscription view every
//! consumer gates on.
//!
//! Feature gating, revenue, funnel and churn reporting all call [resolve_at]
//! so that what a user is shown and what gets counted agree. The view is
//! never stored; callers recompute it whenever the record changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::{AccountRecord, SubscriptionStatus};
use crate::tier::{Tier, TierLabel};
use crate::time;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedStatus {
    Active,
    Trialing,
    /// A live onboarding pass, extended trial or day pass.
    Pass,
    Free,
    /// Part of the view contract for consumers that track expiry themselves;
    /// the resolver downgrades lapsed accounts to [ResolvedStatus::Free].
    Expired,
    Pending,
}

impl ResolvedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedStatus::Active => "active",
            ResolvedStatus::Trialing => "trialing",
            ResolvedStatus::Pass => "pass",
            ResolvedStatus::Free => "free",
            ResolvedStatus::Expired => "expired",
            ResolvedStatus::Pending => "pending",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSubscription {
    pub tier: Tier,
    pub status: ResolvedStatus,
    /// whether paid-tier (or retained free-tier) features are unlocked
    pub is_active: bool,
    pub is_trialing: bool,
    pub trial_ends_at: Option<String>,
    pub expires_at: Option<String>,
    pub has_lifetime_access: bool,
    pub has_had_subscription: bool,
}

impl Default for ResolvedSubscription {
    fn default() -> Self {
        resolve_at(&AccountRecord::default(), DateTime::<Utc>::MIN_UTC)
    }
}

impl ResolvedSubscription {
    /// Counted towards recurring revenue: an active pro subscription that is
    /// neither a lifetime grant nor past its expiry date.
    pub fn is_paying_at(&self, now: DateTime<Utc>) -> bool {
        self.tier == Tier::Pro
            && self.status == ResolvedStatus::Active
            && !self.has_lifetime_access
            && !time::is_past(self.expires_at.as_deref(), now)
    }

    /// Once paid, no longer active or trialing, kept on the free tier.
    pub fn is_lapsed(&self) -> bool {
        self.has_had_subscription
            && self.status == ResolvedStatus::Free
            && !self.has_lifetime_access
    }
}

/// [resolve_at] against the current wall clock.
pub fn resolve(record: &AccountRecord) -> ResolvedSubscription {
    resolve_at(record, Utc::now())
}

/// First matching rule wins:
///
/// 1. lifetime access overrides everything else on the record
/// 2. an `active` subscription is pro when its tier label is a paid one
/// 3. a trial whose end date is strictly after `now`
/// 4. a pass whose expiry is strictly after `now`
/// 5. anyone who has ever paid keeps free-tier access
/// 6. everyone else is inactive
pub fn resolve_at(record: &AccountRecord, now: DateTime<Utc>) -> ResolvedSubscription {
    let trial_ends_at = record.trial_ends_at.clone();
    let expires_at = record.subscription_expires_at.clone();

    if record.has_lifetime_access {
        return ResolvedSubscription {
            tier: Tier::Pro,
            status: ResolvedStatus::Active,
            is_active: true,
            is_trialing: false,
            trial_ends_at: None,
            expires_at: None,
            has_lifetime_access: true,
            has_had_subscription: true,
        };
    }

    if record.subscription_status == Some(SubscriptionStatus::Active) {
        return ResolvedSubscription {
            tier: TierLabel::from_record(record.subscription_tier.as_deref()).tier(),
            status: ResolvedStatus::Active,
            is_active: true,
            is_trialing: false,
            trial_ends_at,
            expires_at,
            has_lifetime_access: false,
            has_had_subscription: true,
        };
    }

    if record.is_trialing && time::is_future(trial_ends_at.as_deref(), now) {
        return ResolvedSubscription {
            tier: Tier::Pro,
            status: ResolvedStatus::Trialing,
            is_active: true,
            is_trialing: true,
            trial_ends_at,
            expires_at,
            has_lifetime_access: false,
            has_had_subscription: true,
        };
    }

    if record.is_on_pass() && time::is_future(expires_at.as_deref(), now) {
        return ResolvedSubscription {
            tier: Tier::Pro,
            status: ResolvedStatus::Pass,
            is_active: true,
            is_trialing: false,
            trial_ends_at,
            expires_at,
            has_lifetime_access: false,
            has_had_subscription: record.has_had_subscription,
        };
    }

    if record.has_had_subscription {
        return ResolvedSubscription {
            tier: Tier::Lite,
            status: ResolvedStatus::Free,
            is_active: true,
            is_trialing: false,
            trial_ends_at,
            expires_at,
            has_lifetime_access: false,
            has_had_subscription: true,
        };
    }

    ResolvedSubscription {
        tier: Tier::Lite,
        status: if record.is_pending() { ResolvedStatus::Pending } else { ResolvedStatus::Free },
        is_active: false,
        is_trialing: false,
        trial_ends_at,
        expires_at,
        has_lifetime_access: false,
        has_had_subscription: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    fn days_from_now(days: i64) -> Option<String> {
        Some((now() + Duration::days(days)).to_rfc3339())
    }

    #[test]
    fn empty_record() {
        let view = resolve_at(&AccountRecord::default(), now());
        assert_eq!(
            view,
            ResolvedSubscription {
                tier: Tier::Lite,
                status: ResolvedStatus::Free,
                is_active: false,
                is_trialing: false,
                trial_ends_at: None,
                expires_at: None,
                has_lifetime_access: false,
                has_had_subscription: false,
            }
        );
        assert_eq!(view, ResolvedSubscription::default());
    }

    #[test]
    fn lifetime_beats_contradictory_fields() {
        let record = AccountRecord {
            has_lifetime_access: true,
            subscription_status: Some(SubscriptionStatus::Expired),
            subscription_tier: Some("lite".into()),
            is_trialing: true,
            trial_ends_at: days_from_now(-3),
            subscription_expires_at: days_from_now(-3),
            ..Default::default()
        };
        let view = resolve_at(&record, now());
        assert_eq!(view.tier, Tier::Pro);
        assert_eq!(view.status, ResolvedStatus::Active);
        assert!(view.is_active);
        assert!(!view.is_trialing);
        assert_eq!(view.trial_ends_at, None);
        assert_eq!(view.expires_at, None);
        assert!(view.has_had_subscription);
        assert!(!view.is_paying_at(now()));
    }

    #[test]
    fn active_paid_labels() {
        for label in ["pro", "athlete", "athlete_plus", "athletePlus"] {
            let record = AccountRecord {
                subscription_status: Some(SubscriptionStatus::Active),
                subscription_tier: Some(label.into()),
                subscription_expires_at: days_from_now(20),
                ..Default::default()
            };
            let view = resolve_at(&record, now());
            assert_eq!(view.tier, Tier::Pro, "{label}");
            assert!(view.is_active);
            assert!(view.has_had_subscription);
            assert_eq!(view.expires_at, days_from_now(20));
            assert!(view.is_paying_at(now()));
        }
    }

    #[test]
    fn active_unpaid_labels_are_lite() {
        for label in [Some("lite"), Some("free"), Some("Pro"), None] {
            let record = AccountRecord {
                subscription_status: Some(SubscriptionStatus::Active),
                subscription_tier: label.map(String::from),
                ..Default::default()
            };
            let view = resolve_at(&record, now());
            assert_eq!(view.tier, Tier::Lite, "{label:?}");
            assert_eq!(view.status, ResolvedStatus::Active);
            assert!(view.is_active);
            assert!(!view.is_paying_at(now()));
        }
    }

    #[test]
    fn live_trial() {
        let record = AccountRecord {
            is_trialing: true,
            trial_ends_at: days_from_now(1),
            ..Default::default()
        };
        let view = resolve_at(&record, now());
        assert_eq!(view.tier, Tier::Pro);
        assert_eq!(view.status, ResolvedStatus::Trialing);
        assert!(view.is_active);
        assert!(view.is_trialing);
        assert!(view.has_had_subscription);
        assert!(!view.is_paying_at(now()));
    }

    #[test]
    fn ended_trial_with_history_is_downgraded() {
        let record = AccountRecord {
            is_trialing: true,
            trial_ends_at: days_from_now(-1),
            has_had_subscription: true,
            ..Default::default()
        };
        let view = resolve_at(&record, now());
        assert_eq!(view.tier, Tier::Lite);
        assert_eq!(view.status, ResolvedStatus::Free);
        assert!(view.is_active);
        assert!(!view.is_trialing);
        assert!(view.is_lapsed());
    }

    #[test]
    fn ended_trial_without_history_is_inactive() {
        let record = AccountRecord {
            is_trialing: true,
            trial_ends_at: days_from_now(-1),
            ..Default::default()
        };
        let view = resolve_at(&record, now());
        assert_eq!(view.tier, Tier::Lite);
        assert_eq!(view.status, ResolvedStatus::Free);
        assert!(!view.is_active);

        let record = AccountRecord { subscription_status: Some(SubscriptionStatus::Pending), ..record };
        assert_eq!(resolve_at(&record, now()).status, ResolvedStatus::Pending);
    }

    #[test]
    fn trial_without_end_date_fails_closed() {
        for trial_ends_at in [None, Some("".to_string()), Some("tomorrow".to_string())] {
            let record = AccountRecord { is_trialing: true, trial_ends_at, ..Default::default() };
            let view = resolve_at(&record, now());
            assert_eq!(view.status, ResolvedStatus::Free);
            assert!(!view.is_active);
        }
    }

    #[test]
    fn trial_ending_exactly_now_is_over() {
        let record = AccountRecord {
            is_trialing: true,
            trial_ends_at: Some(now().to_rfc3339()),
            ..Default::default()
        };
        assert_eq!(resolve_at(&record, now()).status, ResolvedStatus::Free);
    }

    #[test]
    fn cancelled_subscriber_keeps_free_access() {
        let record = AccountRecord {
            has_had_subscription: true,
            subscription_status: Some(SubscriptionStatus::Cancelled),
            ..Default::default()
        };
        let view = resolve_at(&record, now());
        assert_eq!(view.tier, Tier::Lite);
        assert_eq!(view.status, ResolvedStatus::Free);
        assert!(view.is_active);
    }

    #[test]
    fn live_pass() {
        for status in [
            SubscriptionStatus::OnboardingPass,
            SubscriptionStatus::ExtendedTrial,
            SubscriptionStatus::ProDayPass,
        ] {
            let record = AccountRecord {
                subscription_status: Some(status),
                subscription_expires_at: days_from_now(1),
                ..Default::default()
            };
            let view = resolve_at(&record, now());
            assert_eq!(view.tier, Tier::Pro, "{status:?}");
            assert_eq!(view.status, ResolvedStatus::Pass);
            assert!(view.is_active);
            assert!(!view.has_had_subscription);
            assert!(!view.is_paying_at(now()));
        }
    }

    #[test]
    fn expired_or_undated_pass_falls_through() {
        let expired = AccountRecord {
            subscription_status: Some(SubscriptionStatus::ProDayPass),
            subscription_expires_at: days_from_now(-1),
            ..Default::default()
        };
        let view = resolve_at(&expired, now());
        assert_eq!(view.status, ResolvedStatus::Free);
        assert!(!view.is_active);

        let undated = AccountRecord { subscription_expires_at: None, ..expired.clone() };
        assert_eq!(resolve_at(&undated, now()).status, ResolvedStatus::Free);

        let lapsed = AccountRecord { has_had_subscription: true, ..expired };
        let view = resolve_at(&lapsed, now());
        assert_eq!(view.status, ResolvedStatus::Free);
        assert!(view.is_active);
    }

    #[test]
    fn live_trial_beats_pass() {
        let record = AccountRecord {
            subscription_status: Some(SubscriptionStatus::ExtendedTrial),
            subscription_expires_at: days_from_now(10),
            is_trialing: true,
            trial_ends_at: days_from_now(2),
            ..Default::default()
        };
        assert_eq!(resolve_at(&record, now()).status, ResolvedStatus::Trialing);
    }

    #[test]
    fn active_past_expiry_is_not_paying() {
        let record = AccountRecord {
            subscription_status: Some(SubscriptionStatus::Active),
            subscription_tier: Some("pro".into()),
            subscription_expires_at: days_from_now(-1),
            ..Default::default()
        };
        let view = resolve_at(&record, now());
        assert_eq!(view.status, ResolvedStatus::Active);
        assert!(!view.is_paying_at(now()));
    }

    #[test]
    fn serializes_camel_case_with_nulls() {
        let json = serde_json::to_value(resolve_at(&AccountRecord::default(), now())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tier": "lite",
                "status": "free",
                "isActive": false,
                "isTrialing": false,
                "trialEndsAt": null,
                "expiresAt": null,
                "hasLifetimeAccess": false,
                "hasHadSubscription": false,
            })
        );
    }
}
