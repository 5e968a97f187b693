//! Drinks and their recipes.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CoffeeService;
