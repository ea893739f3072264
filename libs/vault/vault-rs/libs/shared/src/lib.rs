//! The subscription model shared by every vault component.
//!
//! - [account] holds the raw account record as billing writes it into the
//!   document store.
//! - [tier] normalizes the free-form tier labels found on those records.
//! - [subscription] resolves a record into the view that gates paid features
//!   and feeds revenue reporting.

pub mod account;
pub mod subscription;
pub mod tier;
pub mod time;

pub use account::{AccountRecord, SubscriptionStatus};
pub use subscription::{resolve, resolve_at, ResolvedStatus, ResolvedSubscription};
pub use tier::{Tier, TierLabel};
