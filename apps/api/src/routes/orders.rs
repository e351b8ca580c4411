//! Order placement, status updates and order reads.
//!
//! ```text
//! GET  /api/orders[?customerId=&status=]   list, newest first
//! POST /api/orders                         place an order        → 201
//! GET  /api/order?id=N                     one order
//! GET  /api/order/items?orderId=N          items of one order
//! PUT  /api/order/status                   {orderId, status}
//! ```
//!
//! Amounts arrive as JSON numbers and are parsed from their literal text
//! (serde_json `arbitrary_precision`) exactly into cents; they
//! leave as decimal strings (`"19.00"`) alongside integer cents.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use foodhub_core::{
    Money, Order, OrderFilter, OrderItem, OrderLineRequest, OrderStatus, PlaceOrderRequest,
    ValidationError,
};

use super::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub total_amount: Option<Number>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: Number,
    pub subtotal: Number,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub order_id: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub customer_id: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderIdQuery {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemsQuery {
    pub order_id: i64,
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub order_id: i64,
    pub status: OrderStatus,
    pub total_amount: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub customer_id: i64,
    pub order_date: String,
    pub total_amount: String,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub delivery_address: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            customer_id: order.customer_id,
            order_date: order.order_date.to_rfc3339(),
            total_amount: order.total_amount().to_decimal_string(),
            total_cents: order.total_amount_cents,
            status: order.status,
            delivery_address: order.delivery_address,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: String,
    pub subtotal: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            id: item.id,
            order_id: item.order_id,
            menu_item_id: item.menu_item_id,
            quantity: item.quantity,
            unit_price: item.unit_price().to_decimal_string(),
            subtotal: item.subtotal().to_decimal_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusResponse {
    pub order_id: i64,
    pub status: OrderStatus,
}

// -- Conversions --

/// Parses a JSON number as an exact amount of money.
fn parse_amount(field: String, number: &Number) -> Result<Money, ValidationError> {
    Money::parse_decimal(&number.to_string()).map_err(|err| match err {
        ValidationError::InvalidFormat { reason, .. } => {
            ValidationError::InvalidFormat { field, reason }
        }
        other => other,
    })
}

impl CreateOrderRequest {
    fn into_domain(self) -> Result<PlaceOrderRequest, ValidationError> {
        let customer_id = self.customer_id.ok_or_else(|| ValidationError::Required {
            field: "customerId".to_string(),
        })?;

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Ok(OrderLineRequest {
                    menu_item_id: item.menu_item_id,
                    quantity: item.quantity,
                    unit_price: parse_amount(format!("items[{index}].unitPrice"), &item.unit_price)?,
                    subtotal: parse_amount(format!("items[{index}].subtotal"), &item.subtotal)?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let total_amount = self
            .total_amount
            .as_ref()
            .map(|total| parse_amount("totalAmount".to_string(), total))
            .transpose()?;

        Ok(PlaceOrderRequest {
            customer_id,
            delivery_address: self.delivery_address,
            items,
            total_amount,
        })
    }
}

fn parse_status(status: &str) -> Result<OrderStatus, ApiError> {
    Ok(status.parse::<OrderStatus>()?)
}

// -- Handlers --

/// GET /api/orders: all orders, optionally filtered, newest first.
#[tracing::instrument(skip(state, query))]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListOrdersQuery>, QueryRejection>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let Query(query) = query?;

    let filter = OrderFilter {
        customer_id: query.customer_id,
        status: query.status.as_deref().map(parse_status).transpose()?,
    };

    let orders = state.orders.list_orders(filter).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// POST /api/orders: place an order with its items.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let Json(request) = payload?;
    let request = request.into_domain()?;

    let placed = state.orders.place_order(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            order_id: placed.order_id,
            status: placed.status,
            total_amount: placed.total_amount.to_decimal_string(),
        }),
    ))
}

/// GET /api/order?id=N: one order.
#[tracing::instrument(skip(state, query))]
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<OrderIdQuery>, QueryRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let Query(OrderIdQuery { id }) = query?;

    let order = state.orders.get_order(id).await?;
    Ok(Json(order.into()))
}

/// GET /api/order/items?orderId=N: the items of one order.
#[tracing::instrument(skip(state, query))]
pub async fn items(
    State(state): State<AppState>,
    query: Result<Query<OrderItemsQuery>, QueryRejection>,
) -> Result<Json<Vec<OrderItemResponse>>, ApiError> {
    let Query(OrderItemsQuery { order_id }) = query?;

    let items = state.orders.get_order_items(order_id).await?;
    Ok(Json(items.into_iter().map(OrderItemResponse::from).collect()))
}

/// PUT /api/order/status: move an order to its next status.
#[tracing::instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
    let Json(request) = payload?;
    let requested = parse_status(&request.status)?;

    let status = state.orders.update_status(request.order_id, requested).await?;
    Ok(Json(UpdateStatusResponse {
        order_id: request.order_id,
        status,
    }))
}
