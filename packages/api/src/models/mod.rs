//! Data models for the client.

mod identity;
mod record;

pub use identity::{Credential, Identity, Role};
pub use record::{Aliment, Donation, DonatorInfo, Record};
