//! Domain core for the knowledge base: models, validation, roles and the
//! topic hierarchy engine. No HTTP or file-system code lives here.

pub mod error;
pub mod hierarchy;
pub mod resource;
pub mod roles;
pub mod store;
pub mod topic;
pub mod types;
pub mod user;
pub mod validation;
pub mod version_factory;
