use crate::models::meal::MealChanges;
use crate::validators::{non_blank, FieldErrors, Numeric};
use serde::Deserialize;
use url::Url;
use utoipa::ToSchema;

pub const MEAL_ID_MESSAGE: &str = "Meal id must be a number";

const NAME_REQUIRED: &str = "Meal name is required";
const PRICE_REQUIRED: &str = "Meal price is required";
const PRICE_INVALID: &str = "Meal price must be a positive number";
const DESCRIPTION_REQUIRED: &str = "Meal description is required";
const IMAGE_URL_REQUIRED: &str = "Meal image url is required";
const IMAGE_URL_INVALID: &str = "Meal image url must be a url";

/// Upper bound on a meal price; keeps `price * quantity` finite.
pub const MAX_PRICE: f64 = 1e9;

/// Meal fields as sent by a client. Used for both add and update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<Numeric>,
}

/// A complete meal ready to be stored; the owner is set by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMeal {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
}

pub fn validate_new_meal(payload: &MealPayload) -> Result<ValidatedMeal, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required(&mut errors, "name", payload.name.as_deref(), NAME_REQUIRED);
    let description = required(
        &mut errors,
        "description",
        payload.description.as_deref(),
        DESCRIPTION_REQUIRED,
    );
    let image_url = match payload.image_url.as_deref() {
        None => {
            errors.add("imageUrl", IMAGE_URL_REQUIRED);
            None
        }
        Some(raw) => check_image_url(&mut errors, raw),
    };
    let price = match &payload.price {
        None => {
            errors.add("price", PRICE_REQUIRED);
            None
        }
        Some(raw) => check_price(&mut errors, raw),
    };

    match (name, description, image_url, price) {
        (Some(name), Some(description), Some(image_url), Some(price)) if errors.is_empty() => {
            Ok(ValidatedMeal {
                name,
                description,
                image_url,
                price,
            })
        }
        _ => Err(errors),
    }
}

/// Validates only the fields present; the result carries exactly those fields.
pub fn validate_meal_update(payload: &MealPayload) -> Result<MealChanges, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut changes = MealChanges::default();

    if let Some(raw) = payload.name.as_deref() {
        changes.name = required(&mut errors, "name", Some(raw), NAME_REQUIRED);
    }
    if let Some(raw) = payload.description.as_deref() {
        changes.description = required(&mut errors, "description", Some(raw), DESCRIPTION_REQUIRED);
    }
    if let Some(raw) = payload.image_url.as_deref() {
        changes.image_url = check_image_url(&mut errors, raw);
    }
    if let Some(raw) = &payload.price {
        changes.price = check_price(&mut errors, raw);
    }

    errors.into_result(changes)
}

fn required(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    message: &str,
) -> Option<String> {
    let value = non_blank(value);
    if value.is_none() {
        errors.add(field, message);
    }
    value
}

fn check_image_url(errors: &mut FieldErrors, raw: &str) -> Option<String> {
    let Some(trimmed) = non_blank(Some(raw)) else {
        errors.add("imageUrl", IMAGE_URL_REQUIRED);
        return None;
    };
    if is_web_url(&trimmed) {
        Some(trimmed)
    } else {
        errors.add("imageUrl", IMAGE_URL_INVALID);
        None
    }
}

fn check_price(errors: &mut FieldErrors, raw: &Numeric) -> Option<f64> {
    if let Numeric::Text(text) = raw {
        if text.trim().is_empty() {
            errors.add("price", PRICE_REQUIRED);
            return None;
        }
    }
    match raw.as_f64() {
        Some(price) if price > 0.0 && price <= MAX_PRICE => Some(price),
        _ => {
            errors.add("price", PRICE_INVALID);
            None
        }
    }
}

fn is_web_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> MealPayload {
        MealPayload {
            name: Some("Jollof rice".into()),
            description: Some("Smoky party jollof".into()),
            image_url: Some("https://img.example.com/jollof.jpg".into()),
            price: Some(Numeric::Text("1500".into())),
        }
    }

    #[test]
    fn new_meal_accepts_complete_payload_and_trims() {
        let mut payload = full_payload();
        payload.name = Some("  Jollof rice  ".into());
        let meal = validate_new_meal(&payload).expect("valid meal");
        assert_eq!(meal.name, "Jollof rice");
        assert_eq!(meal.price, 1500.0);
        assert_eq!(meal.image_url, "https://img.example.com/jollof.jpg");
    }

    #[test]
    fn new_meal_names_each_missing_field() {
        let cases: [(&str, fn(&mut MealPayload)); 4] = [
            ("name", |p| p.name = None),
            ("description", |p| p.description = None),
            ("imageUrl", |p| p.image_url = None),
            ("price", |p| p.price = None),
        ];
        for (field, strip) in cases {
            let mut payload = full_payload();
            strip(&mut payload);
            let errors = validate_new_meal(&payload).unwrap_err();
            assert!(errors.contains(field), "missing {field} should be reported");
        }
    }

    #[test]
    fn new_meal_rejects_blank_fields() {
        let payload = MealPayload {
            name: Some("   ".into()),
            description: Some("".into()),
            image_url: Some(" ".into()),
            price: Some(Numeric::Text(" ".into())),
        };
        let errors = validate_new_meal(&payload).unwrap_err();
        assert_eq!(errors.get("name"), Some(NAME_REQUIRED));
        assert_eq!(errors.get("description"), Some(DESCRIPTION_REQUIRED));
        assert_eq!(errors.get("imageUrl"), Some(IMAGE_URL_REQUIRED));
        assert_eq!(errors.get("price"), Some(PRICE_REQUIRED));
    }

    #[test]
    fn new_meal_rejects_bad_price_and_url() {
        let mut payload = full_payload();
        payload.price = Some(Numeric::Text("ten naira".into()));
        payload.image_url = Some("not a url".into());
        let errors = validate_new_meal(&payload).unwrap_err();
        assert_eq!(errors.get("price"), Some(PRICE_INVALID));
        assert_eq!(errors.get("imageUrl"), Some(IMAGE_URL_INVALID));

        payload = full_payload();
        payload.price = Some(Numeric::Number(0.0));
        assert!(validate_new_meal(&payload).unwrap_err().contains("price"));

        payload = full_payload();
        payload.image_url = Some("ftp://files.example.com/a.png".into());
        assert!(validate_new_meal(&payload).unwrap_err().contains("imageUrl"));
    }

    #[test]
    fn price_above_cap_is_rejected() {
        let mut payload = full_payload();
        payload.price = Some(Numeric::Number(1e308));
        let errors = validate_new_meal(&payload).unwrap_err();
        assert_eq!(errors.get("price"), Some(PRICE_INVALID));

        payload.price = Some(Numeric::Number(MAX_PRICE));
        assert!(validate_new_meal(&payload).is_ok());
    }

    #[test]
    fn update_keeps_only_supplied_fields() {
        let payload = MealPayload {
            description: Some(" Now with plantain ".into()),
            ..Default::default()
        };
        let changes = validate_meal_update(&payload).expect("valid update");
        assert_eq!(
            changes,
            MealChanges {
                description: Some("Now with plantain".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn update_validates_present_fields() {
        let payload = MealPayload {
            name: Some("  ".into()),
            image_url: Some("nope".into()),
            price: Some(Numeric::Number(-3.0)),
            ..Default::default()
        };
        let errors = validate_meal_update(&payload).unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("imageUrl"));
        assert!(errors.contains("price"));
        assert!(!errors.contains("description"));
    }

    #[test]
    fn empty_update_is_valid_and_empty() {
        let changes = validate_meal_update(&MealPayload::default()).unwrap();
        assert!(changes.is_empty());
    }
}
