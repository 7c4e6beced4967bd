//! Trait definitions for Linode resource operations.
//!
//! Each entity type implements the traits it supports; nested collections
//! and actions are exposed as free functions in the model modules.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use update::Update;
