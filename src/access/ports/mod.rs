//! Port contracts for the access context.

pub mod allow_list;
pub mod identity;

pub use allow_list::{AllowList, AllowListError, AllowListResult};
pub use identity::{IdentityError, IdentityProvider, IdentityResult};
