use serde::{Deserialize, Deserializer, Serialize};

/// An account document as persisted by sign-up and the billing integration.
///
/// Every field is optional on the wire: a freshly created account may carry
/// nothing but an id, and older documents store `null` where newer ones omit
/// the field entirely. Both decode to the same record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(deserialize_with = "null_as_false")]
    pub has_lifetime_access: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub has_had_subscription: bool,
    pub subscription_status: Option<SubscriptionStatus>,
    pub subscription_tier: Option<String>,
    #[serde(deserialize_with = "null_as_false")]
    pub is_trialing: bool,
    pub trial_ends_at: Option<String>,
    pub subscription_expires_at: Option<String>,
}

impl AccountRecord {
    pub fn is_pending(&self) -> bool {
        self.subscription_status == Some(SubscriptionStatus::Pending)
    }

    pub fn is_on_pass(&self) -> bool {
        self.subscription_status.map(SubscriptionStatus::is_pass).unwrap_or(false)
    }
}

/// Billing-side status of an account.
///
/// Values written by older billing integrations that this build does not
/// know about decode as [SubscriptionStatus::Unknown] and are treated like a
/// missing status.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trial,
    Pending,
    Expired,
    Cancelled,
    OnboardingPass,
    ExtendedTrial,
    ProDayPass,
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Time-boxed free grants. These never count as paid revenue.
    pub fn is_pass(self) -> bool {
        matches!(
            self,
            SubscriptionStatus::OnboardingPass
                | SubscriptionStatus::ExtendedTrial
                | SubscriptionStatus::ProDayPass
        )
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
