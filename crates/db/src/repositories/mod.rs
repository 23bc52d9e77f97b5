//! Repository layer.
//!
//! Users and resources are zero-sized repositories whose async methods take
//! `&DataStore` as the first argument. Topics and topic versions are served
//! by `DataStore` itself through the `kb_core::store` traits.

pub mod resource_repo;
pub mod topic_repo;
pub mod topic_version_repo;
pub mod user_repo;

pub use resource_repo::ResourceRepo;
pub use user_repo::UserRepo;
