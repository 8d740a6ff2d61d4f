use crate::db::OrderTotalWindow;
use crate::enums::STATUS_SUCCESS;
use crate::models::order::Order;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub order: Order,
}

impl OrderResponse {
    pub fn new(order: Order, message: Option<&str>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.map(str::to_string),
            order,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct OrderListResponse {
    pub status: String,
    pub orders: Vec<Order>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotalResponse {
    pub status: String,
    pub window: OrderTotalWindow,
    pub total_amount: f64,
}
