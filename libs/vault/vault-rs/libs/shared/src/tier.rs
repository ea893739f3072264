use std::fmt;

use serde::{Deserialize, Serialize};

/// The feature bucket an account currently qualifies for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Pro,
    Lite,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Pro => write!(f, "pro"),
            Tier::Lite => write!(f, "lite"),
        }
    }
}

/// Known values of the free-form `subscriptionTier` field.
///
/// Matching is exact and case sensitive. `athlete_plus` and `athletePlus` are
/// both in the wild because two checkout flows wrote different spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TierLabel {
    Pro,
    Athlete,
    AthletePlus,
    Lite,
    Free,
    Lifetime,
    Unrecognized,
}

impl TierLabel {
    pub fn parse(label: &str) -> Self {
        match label {
            "pro" => TierLabel::Pro,
            "athlete" => TierLabel::Athlete,
            "athlete_plus" | "athletePlus" => TierLabel::AthletePlus,
            "lite" => TierLabel::Lite,
            "free" => TierLabel::Free,
            "lifetime" => TierLabel::Lifetime,
            _ => TierLabel::Unrecognized,
        }
    }

    pub fn from_record(label: Option<&str>) -> Self {
        label.map(Self::parse).unwrap_or(TierLabel::Unrecognized)
    }

    /// Labels sold as a paid subscription. `lifetime` is granted through its
    /// own flag and never through the tier label.
    pub fn is_paid(self) -> bool {
        matches!(self, TierLabel::Pro | TierLabel::Athlete | TierLabel::AthletePlus)
    }

    pub fn tier(self) -> Tier {
        if self.is_paid() {
            Tier::Pro
        } else {
            Tier::Lite
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TierLabel::Pro => "pro",
            TierLabel::Athlete => "athlete",
            TierLabel::AthletePlus => "athlete_plus",
            TierLabel::Lite => "lite",
            TierLabel::Free => "free",
            TierLabel::Lifetime => "lifetime",
            TierLabel::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for TierLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
