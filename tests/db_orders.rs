mod common;

use book_a_meal::auth::Principal;
use book_a_meal::db::{DbConnection, MealOperations, OrderOperations, OrderTotalWindow, RepositoryError};
use book_a_meal::models::meal::MealChanges;
use book_a_meal::models::user::Role;
use book_a_meal::test_utils::seed_menu;
use book_a_meal::validators::order::{NewOrderRequest, OrderUpdate};
use chrono::{Days, NaiveDate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

fn customer(id: i32) -> Principal {
    Principal {
        user_id: id,
        role: Role::Customer,
    }
}

#[actix_rt::test]
async fn amount_is_price_times_quantity_at_order_time() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let mut conn = DbConnection::new(&pool).unwrap();
    seed_menu(conn.connection(), today(), fixtures.caterer_id, &fixtures.meal_ids).unwrap();
    let order_ops = OrderOperations::new(pool.clone());

    let order = order_ops
        .create_order(
            fixtures.customer_id,
            today(),
            NewOrderRequest {
                meal_id: fixtures.meal_ids[0],
                quantity: 4,
            },
        )
        .expect("create order");
    assert_eq!(order.amount, 1500.0 * 4.0);

    // Later price changes do not touch placed orders.
    let caterer = Principal {
        user_id: fixtures.caterer_id,
        role: Role::Caterer,
    };
    MealOperations::new(pool.clone())
        .update_meal(
            fixtures.meal_ids[0],
            MealChanges {
                price: Some(2000.0),
                ..Default::default()
            },
            &caterer,
        )
        .unwrap();
    let stored = order_ops.get_orders_by_user(fixtures.customer_id).unwrap();
    assert_eq!(stored[0].amount, 6000.0);

    // Changing quantity reprices from the current meal price.
    let updated = order_ops
        .update_order(
            order.order_id,
            OrderUpdate {
                quantity: Some(2),
                ..Default::default()
            },
            &customer(fixtures.customer_id),
            today(),
            None,
        )
        .unwrap();
    assert_eq!(updated.amount, 4000.0);
}

#[actix_rt::test]
async fn create_without_menu_is_not_found() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let err = OrderOperations::new(pool)
        .create_order(
            fixtures.customer_id,
            today(),
            NewOrderRequest {
                meal_id: fixtures.meal_ids[0],
                quantity: 1,
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[actix_rt::test]
async fn expired_edit_window_locks_order() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let mut conn = DbConnection::new(&pool).unwrap();
    seed_menu(conn.connection(), today(), fixtures.caterer_id, &fixtures.meal_ids).unwrap();
    let order_ops = OrderOperations::new(pool.clone());
    let order = order_ops
        .create_order(
            fixtures.customer_id,
            today(),
            NewOrderRequest {
                meal_id: fixtures.meal_ids[0],
                quantity: 1,
            },
        )
        .unwrap();

    let err = order_ops
        .update_order(
            order.order_id,
            OrderUpdate {
                quantity: Some(3),
                ..Default::default()
            },
            &customer(fixtures.customer_id),
            today(),
            Some(chrono::Duration::zero()),
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    // The order's menu day has passed.
    let err = order_ops
        .update_order(
            order.order_id,
            OrderUpdate {
                quantity: Some(3),
                ..Default::default()
            },
            &customer(fixtures.customer_id),
            today() + Days::new(1),
            None,
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[actix_rt::test]
async fn totals_by_window() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let mut conn = DbConnection::new(&pool).unwrap();
    let yesterday = today() - Days::new(1);
    seed_menu(conn.connection(), yesterday, fixtures.caterer_id, &fixtures.meal_ids).unwrap();
    seed_menu(conn.connection(), today(), fixtures.caterer_id, &fixtures.meal_ids).unwrap();
    let order_ops = OrderOperations::new(pool.clone());

    let place = |day: NaiveDate, meal: i32, qty: i32| {
        order_ops
            .create_order(
                fixtures.customer_id,
                day,
                NewOrderRequest {
                    meal_id: meal,
                    quantity: qty,
                },
            )
            .unwrap()
    };
    place(yesterday, fixtures.meal_ids[0], 1);
    place(today(), fixtures.meal_ids[1], 2);

    assert_eq!(order_ops.total_amount(OrderTotalWindow::Today, today()).unwrap(), 1600.0);
    assert_eq!(order_ops.total_amount(OrderTotalWindow::AllTime, today()).unwrap(), 3100.0);
    assert_eq!(
        order_ops
            .total_amount(OrderTotalWindow::Today, today() + Days::new(7))
            .unwrap(),
        0.0
    );
}

#[actix_rt::test]
async fn meal_with_orders_cannot_be_deleted() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let mut conn = DbConnection::new(&pool).unwrap();
    seed_menu(conn.connection(), today(), fixtures.caterer_id, &fixtures.meal_ids).unwrap();
    OrderOperations::new(pool.clone())
        .create_order(
            fixtures.customer_id,
            today(),
            NewOrderRequest {
                meal_id: fixtures.meal_ids[0],
                quantity: 1,
            },
        )
        .unwrap();

    let caterer = Principal {
        user_id: fixtures.caterer_id,
        role: Role::Caterer,
    };
    let err = MealOperations::new(pool)
        .remove_meal(fixtures.meal_ids[0], &caterer)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
}
