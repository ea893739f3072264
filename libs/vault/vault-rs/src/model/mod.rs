pub mod core_config;
pub mod errors;

pub use vault_shared::{account, subscription, tier, time};
