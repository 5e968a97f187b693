//! Venues, artists and the shows that connect them.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::BookingService;
