//! Trait definitions for resource manager operations.
//!
//! Each resource type implements the traits its provider supports, keeping
//! the endpoint layout and body shape of every operation next to the model.

mod delete;
mod get;
mod list;
mod put;

pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use put::CreateOrUpdate;
