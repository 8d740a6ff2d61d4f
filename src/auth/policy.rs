//! Ownership capability checks shared by the meal and order paths.

use crate::auth::Principal;
use crate::models::meal::Meal;
use crate::models::order::Order;
use crate::models::user::Role;

/// Super admins may modify any meal; caterers only the meals they own.
pub fn can_modify_meal(principal: &Principal, meal: &Meal) -> bool {
    match principal.role {
        Role::SuperAdmin => true,
        Role::Caterer => meal.owner_id == principal.user_id,
        Role::Customer => false,
    }
}

pub fn can_modify_order(principal: &Principal, order: &Order) -> bool {
    principal.is_admin() || order.user_id == principal.user_id
}

pub fn can_view_history(principal: &Principal, user_id: i32) -> bool {
    principal.is_admin() || principal.user_id == user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn principal(user_id: i32, role: Role) -> Principal {
        Principal { user_id, role }
    }

    fn meal_owned_by(owner_id: i32) -> Meal {
        Meal {
            meal_id: 1,
            owner_id,
            name: "Jollof rice".into(),
            description: "Rice".into(),
            image_url: "https://img.example.com/jollof.png".into(),
            price: 1500.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn order_owned_by(user_id: i32) -> Order {
        Order {
            order_id: 1,
            user_id,
            meal_id: 1,
            menu_id: 1,
            quantity: 2,
            amount: 3000.0,
            status: "created".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn caterer_modifies_only_own_meals() {
        let meal = meal_owned_by(10);
        assert!(can_modify_meal(&principal(10, Role::Caterer), &meal));
        assert!(!can_modify_meal(&principal(11, Role::Caterer), &meal));
    }

    #[test]
    fn super_admin_modifies_any_meal() {
        assert!(can_modify_meal(&principal(99, Role::SuperAdmin), &meal_owned_by(10)));
    }

    #[test]
    fn customer_never_modifies_meals() {
        assert!(!can_modify_meal(&principal(10, Role::Customer), &meal_owned_by(10)));
    }

    #[test]
    fn order_modification_by_owner_or_admin() {
        let order = order_owned_by(5);
        assert!(can_modify_order(&principal(5, Role::Customer), &order));
        assert!(!can_modify_order(&principal(6, Role::Customer), &order));
        assert!(can_modify_order(&principal(6, Role::Caterer), &order));
    }

    #[test]
    fn history_visible_to_self_and_admins() {
        assert!(can_view_history(&principal(5, Role::Customer), 5));
        assert!(!can_view_history(&principal(5, Role::Customer), 6));
        assert!(can_view_history(&principal(1, Role::SuperAdmin), 6));
    }
}
