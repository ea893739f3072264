use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use vault_shared::{
    resolve_at, AccountRecord, ResolvedStatus, SubscriptionStatus, Tier, TierLabel,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

fn any_status() -> impl Strategy<Value = Option<SubscriptionStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(SubscriptionStatus::Active)),
        Just(Some(SubscriptionStatus::Trial)),
        Just(Some(SubscriptionStatus::Pending)),
        Just(Some(SubscriptionStatus::Expired)),
        Just(Some(SubscriptionStatus::Cancelled)),
        Just(Some(SubscriptionStatus::OnboardingPass)),
        Just(Some(SubscriptionStatus::ExtendedTrial)),
        Just(Some(SubscriptionStatus::ProDayPass)),
        Just(Some(SubscriptionStatus::Unknown)),
    ]
}

fn any_tier() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("pro".to_string())),
        Just(Some("athlete".to_string())),
        Just(Some("athlete_plus".to_string())),
        Just(Some("athletePlus".to_string())),
        Just(Some("lite".to_string())),
        Just(Some("free".to_string())),
        Just(Some("lifetime".to_string())),
        "[a-zA-Z_]{0,12}".prop_map(Some),
    ]
}

fn any_timestamp() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        (-400i64..400).prop_map(|days| Some((now() + Duration::days(days)).to_rfc3339())),
        "[0-9a-z:-]{0,20}".prop_map(Some),
    ]
}

fn any_record() -> impl Strategy<Value = AccountRecord> {
    (
        any::<bool>(),
        any::<bool>(),
        any_status(),
        any_tier(),
        any::<bool>(),
        any_timestamp(),
        any_timestamp(),
    )
        .prop_map(
            |(
                has_lifetime_access,
                has_had_subscription,
                subscription_status,
                subscription_tier,
                is_trialing,
                trial_ends_at,
                subscription_expires_at,
            )| AccountRecord {
                has_lifetime_access,
                has_had_subscription,
                subscription_status,
                subscription_tier,
                is_trialing,
                trial_ends_at,
                subscription_expires_at,
                ..Default::default()
            },
        )
}

proptest! {
    #[test]
    fn lifetime_is_always_active_pro(record in any_record()) {
        let record = AccountRecord { has_lifetime_access: true, ..record };
        let view = resolve_at(&record, now());
        prop_assert!(view.is_active);
        prop_assert_eq!(view.tier, Tier::Pro);
        prop_assert_eq!(view.status, ResolvedStatus::Active);
        prop_assert!(view.trial_ends_at.is_none());
        prop_assert!(view.expires_at.is_none());
    }

    #[test]
    fn active_tier_follows_label(record in any_record()) {
        let record = AccountRecord {
            has_lifetime_access: false,
            subscription_status: Some(SubscriptionStatus::Active),
            ..record
        };
        let view = resolve_at(&record, now());
        let expected = TierLabel::from_record(record.subscription_tier.as_deref()).tier();
        prop_assert_eq!(view.tier, expected);
        prop_assert!(view.is_active);
        prop_assert!(view.has_had_subscription);
    }

    #[test]
    fn never_subscribed_is_never_active(record in any_record()) {
        let record = AccountRecord {
            has_lifetime_access: false,
            has_had_subscription: false,
            is_trialing: false,
            ..record
        };
        let view = resolve_at(&record, now());
        let gated = view.status == ResolvedStatus::Active || view.status == ResolvedStatus::Pass;
        prop_assert_eq!(view.is_active, gated);
    }

    #[test]
    fn pro_implies_active(record in any_record()) {
        let view = resolve_at(&record, now());
        if view.tier == Tier::Pro {
            prop_assert!(view.is_active);
        }
    }

    #[test]
    fn resolver_never_reports_expired(record in any_record()) {
        prop_assert_ne!(resolve_at(&record, now()).status, ResolvedStatus::Expired);
    }

    #[test]
    fn deterministic(record in any_record()) {
        let first = resolve_at(&record, now());
        let second = resolve_at(&record, now());
        prop_assert_eq!(&first, &second);

        let first = serde_json_bytes(&first);
        let second = serde_json_bytes(&second);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn record_survives_a_store_round_trip(record in any_record()) {
        let json = serde_json::to_string(&record).unwrap();
        let decoded: AccountRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(resolve_at(&decoded, now()), resolve_at(&record, now()));
    }
}

fn serde_json_bytes<T: serde::Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap()
}
