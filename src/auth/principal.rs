use crate::models::user::Role;

/// Identity of an authenticated caller, inserted into request extensions by `AuthLayer`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i32,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
