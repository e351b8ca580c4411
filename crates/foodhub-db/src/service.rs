//! # Order Service
//!
//! Where the order rules from `foodhub-core` meet the repository.
//!
//! ## Place Order
//! ```text
//! PlaceOrderRequest
//!      │
//!      ▼
//! build_order(request, now) ── ValidationError ──► OrderError::Validation
//!      │                                           (nothing written)
//!      ▼
//! OrderRepository::save_order_with_items ── DbError ──► NotFound / Storage
//!      │                                                (rolled back)
//!      ▼
//! PlacedOrder { order_id, status, total_amount }
//! ```
//!
//! The result is built from the committed `NewOrder`, never from a read
//! after the commit.
//!
//! ## Update Status
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ attempt 1..=MAX_STATUS_UPDATE_ATTEMPTS                       │
//! │   read current status         ── missing ──► NotFound        │
//! │   check_transition(current → requested)                      │
//! │                               ── illegal ──► InvalidTransition│
//! │   UPDATE ... WHERE status = current                          │
//! │       applied?  ── yes ──► Ok(requested)                     │
//! │                 ── no  ──► someone moved it: loop            │
//! └──────────────────────────────────────────────────────────────┘
//!   attempts exhausted ──► Conflict
//! ```

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::repository::order::OrderRepository;
use foodhub_core::{
    build_order, check_transition, Money, Order, OrderError, OrderFilter, OrderItem,
    OrderResult, OrderStatus, PlaceOrderRequest,
};

/// How many times a status update re-reads after losing a race.
pub const MAX_STATUS_UPDATE_ATTEMPTS: usize = 3;

/// A committed order, as reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub status: OrderStatus,
    pub total_amount: Money,
}

/// Order placement, status transitions and order reads.
///
/// Holds no state besides the repository, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct OrderService {
    orders: OrderRepository,
}

impl OrderService {
    pub fn new(orders: OrderRepository) -> Self {
        OrderService { orders }
    }

    /// Validates and persists a new order with all of its items.
    ///
    /// ## Returns
    /// The new order id with its status (`PENDING`) and total.
    pub async fn place_order(&self, request: PlaceOrderRequest) -> OrderResult<PlacedOrder> {
        let customer_id = request.customer_id;
        let order = build_order(request, Utc::now()).map_err(|err| {
            debug!(customer_id, field = err.field(), error = %err, "Order rejected");
            OrderError::from(err)
        })?;

        let order_id = self.orders.save_order_with_items(&order).await?;

        info!(
            order_id,
            customer_id,
            total = %order.total_amount(),
            "Order placed"
        );
        Ok(PlacedOrder {
            order_id,
            status: order.status(),
            total_amount: order.total_amount(),
        })
    }

    /// Moves an order to `requested` if that is a legal next step.
    ///
    /// ## Returns
    /// The new status.
    ///
    /// ## Errors
    /// - `NotFound` - no such order
    /// - `InvalidTransition` - `requested` is not a direct successor of the
    ///   current status (stored status unchanged)
    /// - `Conflict` - the status kept changing underneath us
    pub async fn update_status(
        &self,
        order_id: i64,
        requested: OrderStatus,
    ) -> OrderResult<OrderStatus> {
        for attempt in 1..=MAX_STATUS_UPDATE_ATTEMPTS {
            let current = self.get_order(order_id).await?.status;

            check_transition(order_id, current, requested).map_err(|err| {
                debug!(order_id, from = %current, to = %requested, "Transition rejected");
                err
            })?;

            if self
                .orders
                .update_status(order_id, current, requested)
                .await?
            {
                info!(order_id, from = %current, to = %requested, "Order status updated");
                return Ok(requested);
            }

            warn!(
                order_id,
                attempt,
                from = %current,
                to = %requested,
                "Order status changed concurrently, re-reading"
            );
        }

        Err(OrderError::Conflict { order_id })
    }

    /// Gets an order by id.
    pub async fn get_order(&self, order_id: i64) -> OrderResult<Order> {
        self.orders
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::not_found("Order", order_id))
    }

    /// Lists orders, newest first.
    pub async fn list_orders(&self, filter: OrderFilter) -> OrderResult<Vec<Order>> {
        Ok(self.orders.list(filter).await?)
    }

    /// A customer's orders, newest first.
    pub async fn get_orders_by_customer(&self, customer_id: i64) -> OrderResult<Vec<Order>> {
        Ok(self.orders.get_by_customer(customer_id).await?)
    }

    /// The items of an existing order.
    pub async fn get_order_items(&self, order_id: i64) -> OrderResult<Vec<OrderItem>> {
        // Distinguish "no such order" from "order without items" (never stored)
        self.get_order(order_id).await?;
        Ok(self.orders.get_items(order_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::catalog::{NewCustomer, NewMenuItem};
    use foodhub_core::{Money, OrderLineRequest, ValidationError};
    use crate::testing::TempDb;
    use OrderStatus::*;

    struct Fixture {
        db: Database,
        service: OrderService,
        customer_id: i64,
        menu_item_id: i64,
    }

    async fn fixture(db: Database) -> Fixture {
        let customer_id = db
            .catalog()
            .insert_customer(&NewCustomer::new("Sherlock Holmes", "555-0221"))
            .await
            .unwrap();
        let menu_item_id = db
            .catalog()
            .insert_menu_item(&NewMenuItem::new("Margherita", 950, "Pizza"))
            .await
            .unwrap();
        let service = db.order_service();
        Fixture {
            db,
            service,
            customer_id,
            menu_item_id,
        }
    }

    async fn setup() -> Fixture {
        fixture(Database::new(DbConfig::in_memory()).await.unwrap()).await
    }

    fn baker_street(customer_id: i64, menu_item_id: i64) -> PlaceOrderRequest {
        PlaceOrderRequest {
            customer_id,
            delivery_address: "221B Baker St".to_string(),
            items: vec![OrderLineRequest {
                menu_item_id,
                quantity: 2,
                unit_price: Money::parse_decimal("9.50").unwrap(),
                subtotal: Money::parse_decimal("19.00").unwrap(),
            }],
            total_amount: None,
        }
    }

    async fn order_count(db: &Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    async fn place(fx: &Fixture) -> i64 {
        fx.service
            .place_order(baker_street(fx.customer_id, fx.menu_item_id))
            .await
            .unwrap()
            .order_id
    }

    async fn walk_to(fx: &Fixture, order_id: i64, path: &[OrderStatus]) {
        for status in path {
            fx.service.update_status(order_id, *status).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_place_baker_street_order() {
        let fx = setup().await;

        let order_id = place(&fx).await;
        assert!(order_id > 0);

        let order = fx.service.get_order(order_id).await.unwrap();
        assert_eq!(order.status, Pending);
        assert_eq!(order.total_amount().to_decimal_string(), "19.00");
        assert_eq!(order.delivery_address, "221B Baker St");

        let items = fx.service.get_order_items(order_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].menu_item_id, fx.menu_item_id);
        assert_eq!(items[0].subtotal_cents, 1900);
    }

    #[tokio::test]
    async fn test_placed_order_reports_committed_values() {
        let fx = setup().await;

        let mut request = baker_street(fx.customer_id, fx.menu_item_id);
        request.items.push(OrderLineRequest {
            menu_item_id: fx.menu_item_id,
            quantity: 1,
            unit_price: Money::from_cents(250),
            subtotal: Money::from_cents(250),
        });
        let placed = fx.service.place_order(request).await.unwrap();

        assert_eq!(placed.status, Pending);
        assert_eq!(placed.total_amount, Money::from_cents(2150));

        let stored = fx.service.get_order(placed.order_id).await.unwrap();
        assert_eq!(stored.status, placed.status);
        assert_eq!(stored.total_amount(), placed.total_amount);
    }

    #[tokio::test]
    async fn test_validation_failure_touches_nothing() {
        let fx = setup().await;

        let mut request = baker_street(fx.customer_id, fx.menu_item_id);
        request.items[0].quantity = 0;
        let err = fx.service.place_order(request).await.unwrap_err();
        assert!(matches!(
            err,
            OrderError::Validation(ValidationError::MustBePositive { ref field }) if field == "items[0].quantity"
        ));
        assert!(!err.is_retryable());

        let mut request = baker_street(fx.customer_id, fx.menu_item_id);
        request.items.clear();
        assert!(matches!(
            fx.service.place_order(request).await,
            Err(OrderError::Validation(_))
        ));

        assert_eq!(order_count(&fx.db).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_references_are_not_found() {
        let fx = setup().await;

        let err = fx
            .service
            .place_order(baker_street(4242, fx.menu_item_id))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotFound { ref entity, .. } if entity == "Customer"));

        let err = fx
            .service
            .place_order(baker_street(fx.customer_id, 4242))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotFound { ref entity, .. } if entity == "Menu item"));

        assert_eq!(order_count(&fx.db).await, 0);
    }

    #[tokio::test]
    async fn test_unavailable_store_is_storage_error() {
        let fx = setup().await;
        fx.db.close().await;

        let err = fx
            .service
            .place_order(baker_street(fx.customer_id, fx.menu_item_id))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Storage(_)));
        assert!(err.is_retryable());

        let err = fx.service.update_status(1, Confirmed).await.unwrap_err();
        assert!(matches!(err, OrderError::Storage(_)));
    }

    #[tokio::test]
    async fn test_full_happy_path() {
        let fx = setup().await;
        let order_id = place(&fx).await;

        for next in [Confirmed, Preparing, OutForDelivery, Delivered] {
            assert_eq!(fx.service.update_status(order_id, next).await.unwrap(), next);
            assert_eq!(fx.service.get_order(order_id).await.unwrap().status, next);
        }
    }

    #[tokio::test]
    async fn test_delivered_immediately_is_rejected() {
        let fx = setup().await;
        let order_id = place(&fx).await;

        let err = fx.service.update_status(order_id, Delivered).await.unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidTransition { from: Pending, to: Delivered, .. }
        ));
        assert!(!err.is_retryable());
        assert_eq!(fx.service.get_order(order_id).await.unwrap().status, Pending);
    }

    #[tokio::test]
    async fn test_from_pending_only_confirm_or_cancel() {
        let fx = setup().await;

        for target in OrderStatus::ALL {
            let order_id = place(&fx).await;
            let result = fx.service.update_status(order_id, target).await;
            let stored = fx.service.get_order(order_id).await.unwrap().status;

            match target {
                Confirmed | Cancelled => {
                    assert_eq!(result.unwrap(), target);
                    assert_eq!(stored, target);
                }
                _ => {
                    assert!(matches!(result, Err(OrderError::InvalidTransition { .. })));
                    assert_eq!(stored, Pending);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_terminal_states_reject_everything() {
        let fx = setup().await;

        let delivered = place(&fx).await;
        walk_to(&fx, delivered, &[Confirmed, Preparing, OutForDelivery, Delivered]).await;
        let cancelled = place(&fx).await;
        walk_to(&fx, cancelled, &[Confirmed, Cancelled]).await;

        for (order_id, terminal) in [(delivered, Delivered), (cancelled, Cancelled)] {
            for target in OrderStatus::ALL {
                let err = fx.service.update_status(order_id, target).await.unwrap_err();
                assert!(matches!(err, OrderError::InvalidTransition { .. }));
            }
            assert_eq!(fx.service.get_order(order_id).await.unwrap().status, terminal);
        }
    }

    #[tokio::test]
    async fn test_missing_order() {
        let fx = setup().await;

        assert!(matches!(
            fx.service.update_status(999, Confirmed).await,
            Err(OrderError::NotFound { .. })
        ));
        assert!(matches!(
            fx.service.get_order(999).await,
            Err(OrderError::NotFound { .. })
        ));
        assert!(matches!(
            fx.service.get_order_items(999).await,
            Err(OrderError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_reads() {
        let fx = setup().await;
        let first = place(&fx).await;
        let second = place(&fx).await;
        fx.service.update_status(second, Confirmed).await.unwrap();

        let mine = fx.service.get_orders_by_customer(fx.customer_id).await.unwrap();
        assert_eq!(mine.len(), 2);

        let all = fx.service.list_orders(OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let pending = fx
            .service
            .list_orders(OrderFilter {
                customer_id: None,
                status: Some(Pending),
            })
            .await
            .unwrap();
        assert_eq!(pending.iter().map(|o| o.id).collect::<Vec<_>>(), vec![first]);
    }

    /// Two requests race from CONFIRMED toward PREPARING and CANCELLED:
    /// exactly one wins, the loser sees an invalid transition or a conflict.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_transitions_have_one_winner() {
        let file = TempDb::new("race");
        let db = Database::new(DbConfig::new(file.path()).max_connections(4))
            .await
            .unwrap();
        let fx = fixture(db).await;

        for _ in 0..10 {
            let order_id = place(&fx).await;
            fx.service.update_status(order_id, Confirmed).await.unwrap();

            let a = fx.service.clone();
            let b = fx.service.clone();
            let to_preparing = tokio::spawn(async move { a.update_status(order_id, Preparing).await });
            let to_cancelled = tokio::spawn(async move { b.update_status(order_id, Cancelled).await });

            let results = [to_preparing.await.unwrap(), to_cancelled.await.unwrap()];
            let winners: Vec<OrderStatus> = results
                .iter()
                .filter_map(|r| r.as_ref().ok().copied())
                .collect();
            assert_eq!(winners.len(), 1, "results: {results:?}");

            for loser in results.iter().filter_map(|r| r.as_ref().err()) {
                assert!(
                    matches!(
                        loser,
                        OrderError::InvalidTransition { .. } | OrderError::Conflict { .. }
                    ),
                    "unexpected loser: {loser:?}"
                );
            }

            let stored = fx.service.get_order(order_id).await.unwrap().status;
            assert_eq!(stored, winners[0]);
        }

        fx.db.close().await;
    }
}
