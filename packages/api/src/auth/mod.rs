//! Authentication: the session store and the role-inference flow behind it.

mod profile;
mod role;
mod store;

pub use role::{infer_role, ProbeStrategy};
pub use store::SessionStore;
