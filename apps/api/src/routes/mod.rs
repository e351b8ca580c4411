//! HTTP route handlers and shared state.

pub mod health;
pub mod orders;

use foodhub_db::{Database, OrderService};

/// Shared application state accessible from all handlers.
///
/// Both fields are handles over the same pool, so cloning per request is
/// cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub orders: OrderService,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        let orders = db.order_service();
        AppState { db, orders }
    }
}
