//! # Order Repository
//!
//! Database operations for orders and order items.
//!
//! ## Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Writes                                      │
//! │                                                                         │
//! │  1. SAVE (one transaction)                                             │
//! │     BEGIN                                                              │
//! │     └── INSERT orders            → new order id                        │
//! │     └── INSERT order_items × n   (each references the new id)          │
//! │     COMMIT                                                             │
//! │     Any error before COMMIT drops the transaction → ROLLBACK           │
//! │                                                                         │
//! │  2. STATUS (single-row compare-and-set)                                │
//! │     UPDATE orders SET status = new                                     │
//! │     WHERE id = ? AND status = expected                                 │
//! │     └── rows_affected == 0 → someone else moved it first               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No business rules live here: the repository will happily store any
//! status it is given. Sequencing is enforced by `OrderService`.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use foodhub_core::{NewOrder, Order, OrderFilter, OrderItem, OrderStatus};

const ORDER_COLUMNS: &str = r#"
    id,
    customer_id,
    order_date,
    total_amount_cents,
    status,
    delivery_address
"#;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Persists an order header and all of its items atomically.
    ///
    /// ## Returns
    /// The id assigned to the new order.
    ///
    /// ## Errors
    /// - `DbError::NotFound { entity: "Customer" }` - unknown customer id
    /// - `DbError::NotFound { entity: "Menu item" }` - unknown menu item id
    /// - anything else - storage failure
    ///
    /// In every error case nothing is left behind: the transaction is dropped
    /// without commit and SQLite rolls it back.
    pub async fn save_order_with_items(&self, order: &NewOrder) -> DbResult<i64> {
        debug!(
            customer_id = order.customer_id(),
            items = order.items().len(),
            total_cents = order.total_amount().cents(),
            "Saving order"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                customer_id, order_date, total_amount_cents, status, delivery_address
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5
            )
            "#,
        )
        .bind(order.customer_id())
        .bind(order.order_date())
        .bind(order.total_amount().cents())
        .bind(order.status())
        .bind(order.delivery_address())
        .execute(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { .. } => {
                DbError::not_found("Customer", order.customer_id())
            }
            other => other,
        })?;

        let order_id = result.last_insert_rowid();

        for item in order.items() {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    order_id, menu_item_id, quantity, unit_price_cents, subtotal_cents
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5
                )
                "#,
            )
            .bind(order_id)
            .bind(item.menu_item_id)
            .bind(item.quantity)
            .bind(item.unit_price.cents())
            .bind(item.subtotal.cents())
            .execute(&mut *tx)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::ForeignKeyViolation { .. } => {
                    DbError::not_found("Menu item", item.menu_item_id)
                }
                other => other,
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            order_id,
            customer_id = order.customer_id(),
            total = %order.total_amount(),
            "Order saved"
        );

        Ok(order_id)
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Lists orders matching a filter, newest first.
    ///
    /// Unset filter fields match everything. Orders created in the same
    /// instant come back in descending id order.
    pub async fn list(&self, filter: OrderFilter) -> DbResult<Vec<Order>> {
        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE (?1 IS NULL OR customer_id = ?1)
              AND (?2 IS NULL OR status = ?2)
            ORDER BY order_date DESC, id DESC
            "#
        );

        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(filter.customer_id)
            .bind(filter.status)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    /// Gets all orders, newest first.
    pub async fn get_all(&self) -> DbResult<Vec<Order>> {
        self.list(OrderFilter::default()).await
    }

    /// Gets a customer's orders, newest first.
    pub async fn get_by_customer(&self, customer_id: i64) -> DbResult<Vec<Order>> {
        self.list(OrderFilter {
            customer_id: Some(customer_id),
            status: None,
        })
        .await
    }

    /// Gets orders in a given status, newest first.
    pub async fn get_by_status(&self, status: OrderStatus) -> DbResult<Vec<Order>> {
        self.list(OrderFilter {
            customer_id: None,
            status: Some(status),
        })
        .await
    }

    /// Gets all items for an order, in the order they were written.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT
                id,
                order_id,
                menu_item_id,
                quantity,
                unit_price_cents,
                subtotal_cents
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Moves an order from `expected` to `new` status.
    ///
    /// ## Returns
    /// * `true` - the row held `expected` and now holds `new`
    /// * `false` - the row holds something else, or doesn't exist
    ///
    /// A single autocommit statement: SQLite serializes writers, so two
    /// callers holding the same `expected` can never both see `true`.
    pub async fn update_status(
        &self,
        id: i64,
        expected: OrderStatus,
        new: OrderStatus,
    ) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET status = ?2
            WHERE id = ?1 AND status = ?3
            "#,
        )
        .bind(id)
        .bind(new)
        .bind(expected)
        .execute(&self.pool)
        .await?;

        let applied = result.rows_affected() == 1;
        debug!(order_id = id, from = %expected, to = %new, applied, "Status compare-and-set");

        Ok(applied)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
