pub mod account;
pub mod events;
pub mod funnel;
pub mod insights;
pub mod logging;
pub mod revenue;
