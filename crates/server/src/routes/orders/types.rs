//! Wire types for the order endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::{CreateOrder, Order, OrderChanges, OrderId, OrderStatus, UserId};

use crate::error::AppError;

/// Order as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_name: String,
    pub delivery_date: NaiveDate,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            product_name: order.product_name,
            delivery_date: order.delivery_date,
            status: order.status,
            total: order.total,
        }
    }
}

/// Body of `PUT /orders/create`.
///
/// Field names follow the existing frontend: `userId` in camel case, the rest
/// in snake case. `status` defaults to `CREATED`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: Option<UserId>,
    #[serde(alias = "productName")]
    pub product_name: Option<String>,
    #[serde(alias = "deliveryDate")]
    pub delivery_date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
    pub total: Option<Decimal>,
}

impl TryFrom<CreateOrderRequest> for CreateOrder {
    type Error = AppError;

    fn try_from(body: CreateOrderRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: body.user_id,
            product_name: body.product_name.ok_or_else(|| missing("product_name"))?,
            delivery_date: body.delivery_date.ok_or_else(|| missing("delivery_date"))?,
            status: body.status.unwrap_or_default(),
            total: body.total.ok_or_else(|| missing("total"))?,
        })
    }
}

/// Body of `PUT /orders/update/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(alias = "deliveryDate")]
    pub delivery_date: Option<NaiveDate>,
    pub total: Option<Decimal>,
}

impl From<UpdateOrderRequest> for OrderChanges {
    fn from(body: UpdateOrderRequest) -> Self {
        Self {
            delivery_date: body.delivery_date,
            total: body.total,
        }
    }
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("{field} is required"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_response_shape() {
        let order = Order {
            id: OrderId::new(3),
            user_id: UserId::new(1),
            product_name: "Test Product".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            status: OrderStatus::Created,
            total: Decimal::from_str("99.99").unwrap(),
        };

        let value = serde_json::to_value(OrderResponse::from(order)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "userId": 1,
                "productName": "Test Product",
                "deliveryDate": "2026-05-01",
                "status": "CREATED",
                "total": 99.99,
            })
        );
    }

    #[test]
    fn test_create_request_accepts_string_or_number_total() {
        let from_number: CreateOrderRequest = serde_json::from_value(json!({
            "userId": 1,
            "product_name": "Lamp",
            "delivery_date": "2026-05-01",
            "status": "DELIVERED",
            "total": 12.5,
        }))
        .unwrap();
        let from_string: CreateOrderRequest = serde_json::from_value(json!({
            "userId": 1,
            "product_name": "Lamp",
            "delivery_date": "2026-05-01",
            "total": "12.50",
        }))
        .unwrap();

        let a = CreateOrder::try_from(from_number).unwrap();
        let b = CreateOrder::try_from(from_string).unwrap();
        assert_eq!(a.total, b.total);
        assert_eq!(a.status, OrderStatus::Delivered);
        assert_eq!(b.status, OrderStatus::Created);
    }

    #[test]
    fn test_response_total_keeps_every_digit() {
        let order = Order {
            id: OrderId::new(1),
            user_id: UserId::new(1),
            product_name: "Ledger".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            status: OrderStatus::Created,
            total: Decimal::from_str("12345678901234567.89").unwrap(),
        };

        let body = serde_json::to_string(&OrderResponse::from(order)).unwrap();
        assert!(body.contains(r#""total":12345678901234567.89"#), "{body}");
    }

    #[test]
    fn test_create_request_missing_fields() {
        let body: CreateOrderRequest = serde_json::from_value(json!({ "userId": 1 })).unwrap();
        assert!(matches!(
            CreateOrder::try_from(body),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_create_request_without_user_passes_through() {
        let body: CreateOrderRequest = serde_json::from_value(json!({
            "product_name": "Lamp",
            "delivery_date": "2026-05-01",
            "total": 1,
        }))
        .unwrap();
        assert_eq!(CreateOrder::try_from(body).unwrap().user_id, None);
    }
}
