use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Customer,
    Caterer,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Caterer => "caterer",
            Role::SuperAdmin => "superAdmin",
        }
    }

    pub fn get_enum_from_str(value: &str) -> Option<Role> {
        match value {
            "customer" => Some(Role::Customer),
            "caterer" => Some(Role::Caterer),
            "superAdmin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Caterers and super admins manage meals, menus and order totals.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Caterer | Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Unknown role strings are treated as the least privileged role.
    pub fn role(&self) -> Role {
        Role::get_enum_from_str(&self.role).unwrap_or(Role::Customer)
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role(),
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}
