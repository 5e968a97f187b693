//! Trivia questions and categories: paginated listing, search, per-category
//! listing and quiz rounds.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::TriviaService;
