use crate::auth::policy::can_modify_order;
use crate::auth::Principal;
use crate::db::schema::{meals, menu_meals, menus, orders};
use crate::db::{DbConnection, DbPool, RepositoryError};
use crate::models::menu::Menu;
use crate::models::order::{NewOrder, Order, OrderChanges, STATUS_CREATED};
use crate::validators::order::{NewOrderRequest, OrderUpdate};
use chrono::{Duration, NaiveDate, Utc};
use diesel::dsl::sum;
use diesel::prelude::*;
use log::{debug, error};
use serde::Serialize;
use utoipa::ToSchema;

pub const MENU_NOT_SET: &str = "Menu for today have not been set";
pub const ORDER_NOT_FOUND: &str = "Order not found";
pub const ORDER_LOCKED: &str = "Order can no longer be modified";
const MEAL_NOT_ON_MENU: &str = "Meal is not on today's menu";
const AMOUNT_OUT_OF_RANGE: &str = "Order amount is out of range";

/// Which orders count towards the revenue total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum OrderTotalWindow {
    /// Orders placed against today's menu.
    Today,
    AllTime,
}

impl OrderTotalWindow {
    pub fn get_enum_from_str(value: &str) -> Option<OrderTotalWindow> {
        match value.to_ascii_lowercase().as_str() {
            "today" => Some(OrderTotalWindow::Today),
            "all" | "all_time" | "alltime" => Some(OrderTotalWindow::AllTime),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct OrderOperations {
    pool: DbPool,
}

impl OrderOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Places an order against the menu of `today`.
    ///
    /// The menu row is share-locked for the whole transaction so it cannot be
    /// replaced between the membership check and the insert.
    pub fn create_order(
        &self,
        userid: i32,
        today: NaiveDate,
        request: NewOrderRequest,
    ) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_order: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| -> Result<Order, RepositoryError> {
            let menu = menus::table
                .filter(menus::menu_date.eq(today))
                .select(Menu::as_select())
                .for_share()
                .get_result::<Menu>(conn)
                .optional()?
                .ok_or_else(|| RepositoryError::NotFound(MENU_NOT_SET.to_string()))?;

            let price = meal_price_on_menu(conn, menu.menu_id, request.meal_id)?;
            let amount = order_amount(price, request.quantity)?;

            let order = diesel::insert_into(orders::table)
                .values(&NewOrder {
                    user_id: userid,
                    meal_id: request.meal_id,
                    menu_id: menu.menu_id,
                    quantity: request.quantity,
                    amount,
                    status: STATUS_CREATED.to_string(),
                })
                .returning(Order::as_returning())
                .get_result::<Order>(conn)
                .map_err(|e| {
                    error!("create_order: error inserting order for user {}: {}", userid, e);
                    RepositoryError::from_write(e, "Order references a missing meal or menu")
                })?;

            debug!(
                "create_order: order {} for user {} meal {} x{} = {}",
                order.order_id, userid, order.meal_id, order.quantity, order.amount
            );
            Ok(order)
        })
    }

    pub fn update_order(
        &self,
        id: i32,
        update: OrderUpdate,
        caller: &Principal,
        today: NaiveDate,
        edit_window: Option<Duration>,
    ) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("update_order: failed to acquire DB connection for id {}: {}", id, e);
            e
        })?;

        conn.connection().transaction(|conn| -> Result<Order, RepositoryError> {
            let current = orders::table
                .find(id)
                .select(Order::as_select())
                .for_update()
                .get_result::<Order>(conn)
                .map_err(|e| RepositoryError::from_lookup(e, ORDER_NOT_FOUND))?;

            if !can_modify_order(caller, &current) {
                return Err(RepositoryError::Forbidden(format!(
                    "user {} cannot modify order {}",
                    caller.user_id, id
                )));
            }
            if current.is_terminal() {
                return Err(RepositoryError::Conflict(ORDER_LOCKED.to_string()));
            }
            if let Some(window) = edit_window {
                if Utc::now() - current.created_at > window {
                    return Err(RepositoryError::Conflict(ORDER_LOCKED.to_string()));
                }
            }
            let order_date = menus::table
                .find(current.menu_id)
                .select(menus::menu_date)
                .for_share()
                .get_result::<NaiveDate>(conn)?;
            if order_date != today {
                return Err(RepositoryError::Conflict(ORDER_LOCKED.to_string()));
            }

            let amount = if update.meal_id.is_some() || update.quantity.is_some() {
                let meal = update.meal_id.unwrap_or(current.meal_id);
                let quantity = update.quantity.unwrap_or(current.quantity);
                let price = meal_price_on_menu(conn, current.menu_id, meal)?;
                Some(order_amount(price, quantity)?)
            } else {
                None
            };

            let changes = OrderChanges {
                meal_id: update.meal_id,
                quantity: update.quantity,
                amount,
                status: update.status.clone(),
            };

            diesel::update(orders::table.find(id))
                .set((&changes, orders::updated_at.eq(Utc::now())))
                .returning(Order::as_returning())
                .get_result::<Order>(conn)
                .map_err(|e| {
                    error!("update_order: error updating order {}: {}", id, e);
                    RepositoryError::DatabaseError(e)
                })
        })
    }

    pub fn get_all_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_orders: failed to acquire DB connection: {}", e);
            e
        })?;

        orders::table
            .order_by(orders::order_id.asc())
            .select(Order::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!("get_all_orders: error fetching orders: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_orders_by_user(&self, userid: i32) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_orders_by_user: failed to acquire DB connection for user {}: {}",
                userid, e
            );
            e
        })?;

        orders::table
            .filter(orders::user_id.eq(userid))
            .order_by(orders::order_id.asc())
            .select(Order::as_select())
            .load(conn.connection())
            .map_err(|e| {
                error!("get_orders_by_user: error fetching orders of user {}: {}", userid, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn total_amount(
        &self,
        window: OrderTotalWindow,
        today: NaiveDate,
    ) -> Result<f64, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("total_amount: failed to acquire DB connection: {}", e);
            e
        })?;

        let total = match window {
            OrderTotalWindow::Today => orders::table
                .inner_join(menus::table)
                .filter(menus::menu_date.eq(today))
                .select(sum(orders::amount))
                .get_result::<Option<f64>>(conn.connection()),
            OrderTotalWindow::AllTime => orders::table
                .select(sum(orders::amount))
                .get_result::<Option<f64>>(conn.connection()),
        }
        .map_err(|e| {
            error!("total_amount: error summing orders ({:?}): {}", window, e);
            RepositoryError::DatabaseError(e)
        })?;

        Ok(total.unwrap_or(0.0))
    }
}

fn order_amount(price: f64, quantity: i32) -> Result<f64, RepositoryError> {
    let amount = price * f64::from(quantity);
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(RepositoryError::InvalidReference {
            field: "quantity",
            message: AMOUNT_OUT_OF_RANGE.to_string(),
        })
    }
}

fn meal_price_on_menu(
    conn: &mut PgConnection,
    menu: i32,
    meal: i32,
) -> Result<f64, RepositoryError> {
    menu_meals::table
        .inner_join(meals::table)
        .filter(menu_meals::menu_id.eq(menu))
        .filter(menu_meals::meal_id.eq(meal))
        .select(meals::price)
        .first::<f64>(conn)
        .optional()?
        .ok_or(RepositoryError::InvalidReference {
            field: "mealId",
            message: MEAL_NOT_ON_MENU.to_string(),
        })
}
