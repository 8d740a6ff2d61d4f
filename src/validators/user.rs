use crate::validators::{non_blank, FieldErrors};
use serde::Deserialize;
use utoipa::ToSchema;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SigninPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub name: String,
    /// Lowercased.
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub fn validate_signup(payload: &SignupPayload) -> Result<Signup, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = non_blank(payload.name.as_deref());
    if name.is_none() {
        errors.add("name", "Name is required");
    }
    let email = check_email(&mut errors, payload.email.as_deref());

    let password = payload.password.clone().unwrap_or_default();
    if password.trim().is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
    if payload.confirm_password.as_deref() != Some(password.as_str()) {
        errors.add("confirmPassword", "Passwords do not match");
    }

    match (name, email) {
        (Some(name), Some(email)) if errors.is_empty() => Ok(Signup {
            name,
            email,
            password,
        }),
        _ => Err(errors),
    }
}

pub fn validate_signin(payload: &SigninPayload) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = check_email(&mut errors, payload.email.as_deref());
    let password = payload.password.clone().filter(|p| !p.is_empty());
    if password.is_none() {
        errors.add("password", "Password is required");
    }

    match (email, password) {
        (Some(email), Some(password)) => Ok(Credentials { email, password }),
        _ => Err(errors),
    }
}

fn check_email(errors: &mut FieldErrors, raw: Option<&str>) -> Option<String> {
    let Some(email) = non_blank(raw) else {
        errors.add("email", "Email is required");
        return None;
    };
    if looks_like_email(&email) {
        Some(email.to_lowercase())
    } else {
        errors.add("email", "Email is invalid");
        None
    }
}

fn looks_like_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|label| !label.is_empty())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirm: &str) -> SignupPayload {
        SignupPayload {
            name: Some("Ann Ihe".into()),
            email: Some("Ann.Ihe@Example.com".into()),
            password: Some(password.into()),
            confirm_password: Some(confirm.into()),
        }
    }

    #[test]
    fn signup_normalizes_email() {
        let valid = validate_signup(&signup("1234567890", "1234567890")).unwrap();
        assert_eq!(valid.email, "ann.ihe@example.com");
        assert_eq!(valid.name, "Ann Ihe");
    }

    #[test]
    fn signup_rejects_mismatch_and_short_password() {
        let errors = validate_signup(&signup("1234567890", "0987654321")).unwrap_err();
        assert!(errors.contains("confirmPassword"));

        let errors = validate_signup(&signup("123", "123")).unwrap_err();
        assert!(errors.contains("password"));
    }

    #[test]
    fn email_shape_check() {
        for good in ["a@b.co", "first.last@mail.example.org"] {
            assert!(looks_like_email(good), "{good}");
        }
        for bad in ["", "plain", "a@b", "a@@b.com", "@b.com", "a b@c.com", "a@b..com"] {
            assert!(!looks_like_email(bad), "{bad}");
        }
    }

    #[test]
    fn signin_requires_both_fields() {
        let errors = validate_signin(&SigninPayload::default()).unwrap_err();
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
    }
}
