//! # Catalog Repository
//!
//! Inserts for the rows orders point at: customers and menu items.
//!
//! Browsing and editing the menu or customer records happens elsewhere;
//! this repository only exists so orders have something to reference
//! (seed data, tests).

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// A customer to insert.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_date: DateTime<Utc>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, mobile: impl Into<String>) -> Self {
        NewCustomer {
            name: name.into(),
            mobile: mobile.into(),
            email: None,
            address: None,
            created_date: Utc::now(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// A menu item to insert. Prices are in cents.
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub category: String,
    pub available: bool,
    pub image_url: Option<String>,
}

impl NewMenuItem {
    pub fn new(name: impl Into<String>, price_cents: i64, category: impl Into<String>) -> Self {
        NewMenuItem {
            name: name.into(),
            description: None,
            price_cents,
            category: category.into(),
            available: true,
            image_url: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Repository for customers and menu items.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Inserts a customer and returns its id.
    pub async fn insert_customer(&self, customer: &NewCustomer) -> DbResult<i64> {
        debug!(name = %customer.name, "Inserting customer");

        let result = sqlx::query(
            r#"
            INSERT INTO customers (name, mobile, email, address, created_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.mobile)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(customer.created_date)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Inserts a menu item and returns its id.
    pub async fn insert_menu_item(&self, item: &NewMenuItem) -> DbResult<i64> {
        debug!(name = %item.name, price_cents = item.price_cents, "Inserting menu item");

        let result = sqlx::query(
            r#"
            INSERT INTO menu_items (name, description, price_cents, category, available, image_url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(&item.category)
        .bind(item.available)
        .bind(&item.image_url)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Counts menu items.
    pub async fn count_menu_items(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
