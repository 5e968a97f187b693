//! Shared helpers used by every service binary: logging setup and the small
//! response types that are not tied to one domain.

pub mod types;
pub mod utils;
