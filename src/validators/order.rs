use crate::db::OrderTotalWindow;
use crate::validators::{non_blank, FieldErrors, Numeric};
use serde::Deserialize;
use utoipa::ToSchema;

pub const ORDER_ID_MESSAGE: &str = "Order id must be a number";
pub const USER_ID_MESSAGE: &str = "User id must be a number";

const MEAL_ID_REQUIRED: &str = "Meal id is required";
const MEAL_ID_INVALID: &str = "Meal id must be a positive number";
const QUANTITY_REQUIRED: &str = "Quantity is required";
const QUANTITY_INVALID: &str = "Quantity must be a positive whole number";
const STATUS_INVALID: &str = "Status must be non-empty text of at most 32 characters";
const NOTHING_TO_UPDATE: &str = "Provide at least one of mealId, quantity or status";
const MAX_STATUS_LEN: usize = 32;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub meal_id: Option<Numeric>,
    pub quantity: Option<Numeric>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderRequest {
    pub meal_id: i32,
    pub quantity: i32,
}

/// The mutable fields of an order a caller asked to change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub meal_id: Option<i32>,
    pub quantity: Option<i32>,
    pub status: Option<String>,
}

pub fn validate_new_order(payload: &OrderPayload) -> Result<NewOrderRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    let meal_id = match &payload.meal_id {
        None => {
            errors.add("mealId", MEAL_ID_REQUIRED);
            None
        }
        Some(raw) => positive(&mut errors, "mealId", raw, MEAL_ID_INVALID),
    };
    let quantity = match &payload.quantity {
        None => {
            errors.add("quantity", QUANTITY_REQUIRED);
            None
        }
        Some(raw) => positive(&mut errors, "quantity", raw, QUANTITY_INVALID),
    };

    match (meal_id, quantity) {
        (Some(meal_id), Some(quantity)) => Ok(NewOrderRequest { meal_id, quantity }),
        _ => Err(errors),
    }
}

pub fn validate_order_update(payload: &OrderPayload) -> Result<OrderUpdate, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut update = OrderUpdate::default();

    if payload.meal_id.is_none() && payload.quantity.is_none() && payload.status.is_none() {
        return Err(FieldErrors::single("order", NOTHING_TO_UPDATE));
    }
    if let Some(raw) = &payload.meal_id {
        update.meal_id = positive(&mut errors, "mealId", raw, MEAL_ID_INVALID);
    }
    if let Some(raw) = &payload.quantity {
        update.quantity = positive(&mut errors, "quantity", raw, QUANTITY_INVALID);
    }
    if let Some(raw) = payload.status.as_deref() {
        match non_blank(Some(raw)) {
            Some(status) if status.chars().count() <= MAX_STATUS_LEN => {
                update.status = Some(status.to_lowercase())
            }
            _ => errors.add("status", STATUS_INVALID),
        }
    }

    errors.into_result(update)
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TotalQuery {
    pub window: Option<String>,
}

/// `None` when the caller left the window to configuration.
pub fn validate_total_window(query: &TotalQuery) -> Result<Option<OrderTotalWindow>, FieldErrors> {
    match query.window.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => OrderTotalWindow::get_enum_from_str(raw)
            .map(Some)
            .ok_or_else(|| FieldErrors::single("window", "Window must be one of: today, all")),
    }
}

fn positive(errors: &mut FieldErrors, field: &str, raw: &Numeric, message: &str) -> Option<i32> {
    let value = raw.as_positive_i32();
    if value.is_none() {
        errors.add(field, message);
    }
    value
}
