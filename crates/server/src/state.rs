use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::booking::{repository::SeaOrmBookingRepository, BookingService};
use service::coffee::{repository::SeaOrmDrinkRepository, CoffeeService};
use service::gate::TokenVerifier;
use service::trivia::{repository::SeaOrmTriviaRepository, TriviaService};

/// Everything handlers need, built once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub trivia: Arc<TriviaService<SeaOrmTriviaRepository>>,
    pub booking: Arc<BookingService<SeaOrmBookingRepository>>,
    pub coffee: Arc<CoffeeService<SeaOrmDrinkRepository>>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, verifier: Arc<dyn TokenVerifier>, page_size: u32) -> Self {
        Self {
            trivia: Arc::new(
                TriviaService::new(Arc::new(SeaOrmTriviaRepository::new(db.clone()))).with_page_size(page_size),
            ),
            booking: Arc::new(BookingService::new(Arc::new(SeaOrmBookingRepository::new(db.clone())))),
            coffee: Arc::new(CoffeeService::new(Arc::new(SeaOrmDrinkRepository::new(db)))),
            verifier,
        }
    }
}
