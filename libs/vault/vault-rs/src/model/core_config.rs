use std::env;

use serde::{Deserialize, Serialize};
use vault_shared::TierLabel;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Where should vault write logs and exports?
    pub writeable_path: String,

    /// Should we log at all?
    pub logs: bool,
    /// Should logs be printed to stdout?
    pub stdout_logs: bool,
    /// Should logs be colored?
    pub colored_logs: bool,

    /// Monthly list prices used by revenue reporting.
    pub prices: PriceBook,
}

impl Config {
    /// Configures vault for CLI use with no stdout logs. `writeable_path_subfolder` is generally a
    /// hardcoded client name like `"admin"`.
    pub fn cli_config(writeable_path_subfolder: &str) -> Config {
        Config {
            writeable_path: Self::writeable_path(writeable_path_subfolder),
            logs: true,
            stdout_logs: false,
            colored_logs: true,
            prices: PriceBook::from_env_vars(),
        }
    }

    /// Configures vault for long running consumers with stdout logs.
    pub fn ui_config(writeable_path_subfolder: &str) -> Config {
        Config {
            writeable_path: Self::writeable_path(writeable_path_subfolder),
            logs: true,
            stdout_logs: true,
            colored_logs: true,
            prices: PriceBook::from_env_vars(),
        }
    }

    /// Produces a full writable path based on environment variables and platform. Falls back to
    /// the system temp directory when no home directory can be found.
    pub fn writeable_path(writeable_path_subfolder: &str) -> String {
        let specified_path = env::var("VAULT_PATH");

        let default_path = env::var("HOME") // unix
            .or(env::var("HOMEPATH")) // windows
            .map(|home| format!("{home}/.vault/{writeable_path_subfolder}"));

        specified_path.or(default_path).unwrap_or_else(|_| {
            format!("{}/vault/{writeable_path_subfolder}", env::temp_dir().display())
        })
    }
}

/// Monthly price in cents for each paid tier label.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PriceBook {
    pub pro_monthly_cents: u64,
    pub athlete_monthly_cents: u64,
    pub athlete_plus_monthly_cents: u64,
}

impl Default for PriceBook {
    fn default() -> Self {
        Self { pro_monthly_cents: 999, athlete_monthly_cents: 999, athlete_plus_monthly_cents: 1999 }
    }
}

impl PriceBook {
    pub fn from_env_vars() -> Self {
        let defaults = Self::default();
        Self {
            pro_monthly_cents: env_cents("VAULT_PRO_MONTHLY_CENTS")
                .unwrap_or(defaults.pro_monthly_cents),
            athlete_monthly_cents: env_cents("VAULT_ATHLETE_MONTHLY_CENTS")
                .unwrap_or(defaults.athlete_monthly_cents),
            athlete_plus_monthly_cents: env_cents("VAULT_ATHLETE_PLUS_MONTHLY_CENTS")
                .unwrap_or(defaults.athlete_plus_monthly_cents),
        }
    }

    /// Labels that don't resolve to the pro tier are never billed.
    pub fn monthly_cents(&self, label: TierLabel) -> u64 {
        match label {
            TierLabel::Pro => self.pro_monthly_cents,
            TierLabel::Athlete => self.athlete_monthly_cents,
            TierLabel::AthletePlus => self.athlete_plus_monthly_cents,
            TierLabel::Lite
            | TierLabel::Free
            | TierLabel::Lifetime
            | TierLabel::Unrecognized => 0,
        }
    }
}

fn env_cents(key: &str) -> Option<u64> {
    match env::var(key) {
        Ok(val) => match val.parse::<u64>() {
            Ok(cents) => Some(cents),
            Err(err) => {
                warn!(key, val, ?err, "ignoring unparsable price override");
                None
            }
        },
        Err(_) => None,
    }
}
