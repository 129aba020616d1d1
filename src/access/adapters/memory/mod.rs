//! In-memory identity provider and allow-list.

mod allow_list;
mod identity;

pub use allow_list::StaticAllowList;
pub use identity::InMemoryIdentityProvider;
