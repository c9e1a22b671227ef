//! Service layer providing business operations on top of models.
//! - Separates business logic from data access through repository traits.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod auth;
pub mod contacts;
#[cfg(test)]
pub mod test_support;
