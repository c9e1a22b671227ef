//! Ownership-scoped contact CRUD.
//!
//! Every repository call takes the owner's id alongside the contact id, so a
//! contact belonging to someone else is indistinguishable from a missing one.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{Contact, ContactPatch};
pub use service::ContactService;
