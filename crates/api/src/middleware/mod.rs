//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from the `x-user-id` header.
//!   Handlers then call [`AuthUser::require`](auth::AuthUser::require) with
//!   the [`Action`](kb_core::roles::Action) the endpoint needs.

pub mod auth;
