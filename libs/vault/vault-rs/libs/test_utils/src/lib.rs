use chrono::{Duration, Utc};
use std::env;
use std::sync::Arc;
use uuid::Uuid;
use vault_rs::io::MemoryAccountStore;
use vault_rs::{Config, PriceBook, Vault};
use vault_shared::{AccountRecord, SubscriptionStatus};

pub fn test_config() -> Config {
    Config {
        writeable_path: format!("{}/vault-test/{}", env::temp_dir().display(), Uuid::new_v4()),
        logs: false,
        stdout_logs: false,
        colored_logs: false,
        prices: PriceBook::default(),
    }
}

pub async fn test_vault() -> Vault {
    Vault::init(test_config()).await.unwrap()
}

pub async fn test_vault_with(accounts: Vec<(String, AccountRecord)>) -> Vault {
    Vault::init_with_store(test_config(), Arc::new(MemoryAccountStore::from_records(accounts)))
        .await
        .unwrap()
}

pub fn random_uid() -> String {
    Uuid::new_v4()
        .to_string()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// An RFC 3339 timestamp `days` from the current wall clock.
pub fn days_from_now(days: i64) -> Option<String> {
    Some((Utc::now() + Duration::days(days)).to_rfc3339())
}

pub fn paying(tier: &str) -> AccountRecord {
    AccountRecord {
        has_had_subscription: true,
        subscription_status: Some(SubscriptionStatus::Active),
        subscription_tier: Some(tier.to_string()),
        subscription_expires_at: days_from_now(30),
        ..Default::default()
    }
}

pub fn trialing(days_left: i64) -> AccountRecord {
    AccountRecord {
        is_trialing: true,
        subscription_status: Some(SubscriptionStatus::Trial),
        trial_ends_at: days_from_now(days_left),
        ..Default::default()
    }
}

pub fn lapsed() -> AccountRecord {
    AccountRecord {
        has_had_subscription: true,
        subscription_status: Some(SubscriptionStatus::Cancelled),
        subscription_tier: Some("pro".to_string()),
        subscription_expires_at: days_from_now(-10),
        ..Default::default()
    }
}

pub fn on_pass(status: SubscriptionStatus, days_left: i64) -> AccountRecord {
    AccountRecord {
        subscription_status: Some(status),
        subscription_expires_at: days_from_now(days_left),
        ..Default::default()
    }
}

pub fn lifetime() -> AccountRecord {
    AccountRecord { has_lifetime_access: true, ..Default::default() }
}

pub fn signed_up() -> AccountRecord {
    AccountRecord { subscription_status: Some(SubscriptionStatus::Pending), ..Default::default() }
}
