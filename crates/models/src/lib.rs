//! SeaORM entities for the booking, trivia and coffee-shop tables, plus the
//! validation helpers that belong next to them.

pub mod errors;
pub mod db;
pub mod venue;
pub mod artist;
pub mod show;
pub mod category;
pub mod question;
pub mod drink;

#[cfg(test)]
mod tests;
