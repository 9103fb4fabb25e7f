//! SeaORM entity definitions for the trial server.

pub mod download;
pub mod event;
pub mod profile;
pub mod session;

pub use profile::SubscriptionTier;
