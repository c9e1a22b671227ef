//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and session token handling live here, independent of
//! the HTTP layer. Password hashing and token signing are explicit services
//! injected into [`AuthService`].

pub mod domain;
pub mod errors;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use service::{AuthConfig, AuthService};
