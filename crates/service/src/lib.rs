//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access through repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides typed errors the HTTP layer maps to status codes.

pub mod errors;
pub mod pagination;
pub mod query;
pub mod trivia;
pub mod booking;
pub mod coffee;
pub mod gate;
#[cfg(test)]
pub mod test_support;
